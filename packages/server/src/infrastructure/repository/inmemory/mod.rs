//! インメモリ実装（プロセスの生存期間中のみ保持）

mod connection_registry;
mod membership;
mod room_state;

pub(crate) use connection_registry::ConnectionRegistry;
pub use membership::InMemoryMembershipTracker;
pub use room_state::InMemoryRoomStateStore;
