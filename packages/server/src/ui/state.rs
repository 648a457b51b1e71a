//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetRoomDetailUseCase, RunCodeUseCase};

use super::router::EventRouter;

/// State handed to every axum handler
pub struct AppState {
    /// EventRouter（WebSocket イベントの振り分け）
    pub event_router: Arc<EventRouter>,
    /// RunCodeUseCase（HTTP 経由のコード実行のユースケース）
    pub run_code_usecase: Arc<RunCodeUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
