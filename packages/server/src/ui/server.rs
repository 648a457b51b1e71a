//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{GetRoomDetailUseCase, RunCodeUseCase};

use super::{
    handler::{execute_code, get_room_detail, health_check, server_info, websocket_handler},
    router::EventRouter,
    signal::shutdown_signal,
    state::AppState,
};

/// Collaborative code room server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(event_router, run_code_usecase, get_room_detail_usecase, None);
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// EventRouter（WebSocket イベントの振り分け）
    event_router: Arc<EventRouter>,
    /// RunCodeUseCase（HTTP 経由のコード実行のユースケース）
    run_code_usecase: Arc<RunCodeUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// CORS で許可するオリジン（None なら全て許可）
    allowed_origin: Option<String>,
}

impl Server {
    pub fn new(
        event_router: Arc<EventRouter>,
        run_code_usecase: Arc<RunCodeUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        allowed_origin: Option<String>,
    ) -> Self {
        Self {
            event_router,
            run_code_usecase,
            get_room_detail_usecase,
            allowed_origin,
        }
    }

    /// Build the axum router with every route and layer.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            event_router: self.event_router.clone(),
            run_code_usecase: self.run_code_usecase.clone(),
            get_room_detail_usecase: self.get_room_detail_usecase.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/execute", post(execute_code))
            .route("/api/test", get(server_info))
            .route("/api/health", get(health_check))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .with_state(app_state)
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http())
    }

    fn cors_layer(&self) -> CorsLayer {
        let Some(origin) = self.allowed_origin.as_deref() else {
            return CorsLayer::permissive();
        };
        match HeaderValue::from_str(origin) {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(e) => {
                tracing::warn!("Invalid allowed origin '{}' ({}), allowing any", origin, e);
                CorsLayer::permissive()
            }
        }
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Codecast server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
