//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `type`, e.g.
//! `{"type":"code_change","roomId":"r1","code":"print(1)"}`.

use serde::{Deserialize, Serialize};

/// Event sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Join {
        room_id: String,
        username: String,
    },
    CodeChange {
        room_id: String,
        code: String,
    },
    LanguageChange {
        room_id: String,
        language: String,
    },
    InputChange {
        room_id: String,
        input: String,
    },
    /// Missing fields default to empty strings so that the failure is
    /// reported to the room as a `code_executed` error.
    ExecuteCode {
        room_id: String,
        #[serde(default)]
        code: String,
        #[serde(default)]
        language: String,
        #[serde(default)]
        input: String,
    },
}

impl ClientMessage {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            ClientMessage::Join { .. } => "join",
            ClientMessage::CodeChange { .. } => "code_change",
            ClientMessage::LanguageChange { .. } => "language_change",
            ClientMessage::InputChange { .. } => "input_change",
            ClientMessage::ExecuteCode { .. } => "execute_code",
        }
    }
}

/// A room member as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub socket_id: String,
    pub username: String,
}

/// Event sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    RoomState {
        code: String,
        language: String,
        input: String,
    },
    Joined {
        clients: Vec<ClientInfo>,
        username: String,
        socket_id: String,
    },
    UserLeft {
        clients: Vec<ClientInfo>,
        username: String,
        socket_id: String,
    },
    CodeChanged {
        code: String,
    },
    LanguageChanged {
        language: String,
    },
    InputChanged {
        input: String,
    },
    ExecutionStarted,
    CodeExecuted {
        output: String,
        error: String,
        status: String,
        time: Option<String>,
        memory: Option<u64>,
    },
}
