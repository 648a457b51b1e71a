//! Collaborative code room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin codecast-server
//! cargo run --bin codecast-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use codecast_server::{
    config::Config,
    infrastructure::{
        executor::Judge0Executor,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryMembershipTracker, InMemoryRoomStateStore},
    },
    ui::{EventRouter, Server},
    usecase::{
        ExecuteCodeUseCase, ExecutionCoordinator, GetRoomDetailUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, RunCodeUseCase, UpdateRoomStateUseCase,
    },
};
use codecast_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. Execution backend
    // 4. UseCases
    // 5. Server

    // 1. Create Repositories (in-memory)
    let room_states = Arc::new(InMemoryRoomStateStore::new());
    let membership = Arc::new(InMemoryMembershipTracker::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create execution backend
    let executor = match Judge0Executor::new(config.judge0_config()) {
        Ok(executor) => Arc::new(executor),
        Err(e) => {
            tracing::error!("Failed to build Judge0 client: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Execution backend: {} (API key configured: {})",
        config.judge0_url,
        if config.has_api_key() { "yes" } else { "no" }
    );
    let coordinator = Arc::new(ExecutionCoordinator::new(
        executor,
        config.daily_execution_limit,
        Arc::new(SystemClock),
    ));

    // 4. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        room_states.clone(),
        membership.clone(),
        message_pusher.clone(),
    ));
    let update_room_state_usecase = Arc::new(UpdateRoomStateUseCase::new(
        room_states.clone(),
        membership.clone(),
        message_pusher.clone(),
    ));
    let execute_code_usecase = Arc::new(ExecuteCodeUseCase::new(
        coordinator.clone(),
        membership.clone(),
        message_pusher.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        membership.clone(),
        message_pusher.clone(),
    ));
    let run_code_usecase = Arc::new(RunCodeUseCase::new(
        coordinator,
        membership.clone(),
        message_pusher.clone(),
    ));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(room_states, membership));

    let event_router = Arc::new(EventRouter::new(
        join_room_usecase,
        update_room_state_usecase,
        execute_code_usecase,
        leave_room_usecase,
        message_pusher,
    ));

    // 5. Create and run the server
    let server = Server::new(
        event_router,
        run_code_usecase,
        get_room_detail_usecase,
        config.allowed_origin.clone(),
    );
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
