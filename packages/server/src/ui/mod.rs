//! WebSocket and HTTP entry points.

mod handler;
pub mod router;
mod server;
mod signal;
pub mod state;

pub use router::EventRouter;
pub use server::Server;
