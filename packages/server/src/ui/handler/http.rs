//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{
        ErrorResponseDto, ExecuteRequestDto, ExecuteResponseDto, RoomDetailDto, ServerInfoDto,
    },
    ui::state::AppState,
    usecase::{GetRoomDetailError, RunCodeError, RunCodeRequest},
};

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Reports that the server is up and which languages it runs
pub async fn server_info(State(state): State<Arc<AppState>>) -> Json<ServerInfoDto> {
    Json(ServerInfoDto {
        success: true,
        message: "Server is working".to_string(),
        supported_languages: state
            .run_code_usecase
            .supported_languages()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// Runs code synchronously and returns the result
pub async fn execute_code(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExecuteRequestDto>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Rejected execute request: {}", rejection);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponseDto::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    let request = RunCodeRequest {
        code: as_string(payload.code),
        language: as_string(payload.language),
        input: as_string(payload.input),
        room_id: as_string(payload.room_id),
    };

    match state.run_code_usecase.execute(request).await {
        Ok(result) => Json(ExecuteResponseDto::from(result)).into_response(),
        Err(RunCodeError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponseDto::new(message))).into_response()
        }
        Err(RunCodeError::Execution(e)) => {
            tracing::error!("Execution failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponseDto::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(snapshot) => Ok(Json(RoomDetailDto::from(snapshot))),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}

/// Non-string JSON values count as missing.
fn as_string(value: Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value),
        _ => None,
    }
}
