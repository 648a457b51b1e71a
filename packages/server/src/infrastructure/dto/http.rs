//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::websocket::ClientInfo;

/// Body of `POST /api/execute`.
///
/// Fields stay untyped so that a wrong JSON type is reported with the same
/// message as a missing field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequestDto {
    #[serde(default)]
    pub code: Value,
    #[serde(default)]
    pub language: Value,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub room_id: Value,
}

/// Successful execution response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponseDto {
    pub success: bool,
    pub output: String,
    pub error: String,
    pub status: String,
    pub time: Option<String>,
    pub memory: Option<u64>,
}

/// Error response shared by the HTTP endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub success: bool,
    pub error: String,
}

impl ErrorResponseDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Response of `GET /api/test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfoDto {
    pub success: bool,
    pub message: String,
    pub supported_languages: Vec<String>,
}

/// Shared editor state of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStateDto {
    pub code: String,
    pub language: String,
    pub input: String,
}

/// Response of `GET /api/rooms/{room_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub state: RoomStateDto,
    pub members: Vec<ClientInfo>,
}
