//! axum handlers.

mod http;
mod websocket;

pub use http::{execute_code, get_room_detail, health_check, server_info};
pub use websocket::websocket_handler;
