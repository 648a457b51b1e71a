//! Domain layer: value objects, entities, events and the traits the use cases
//! depend on.

pub mod entity;
pub mod error;
pub mod event;
pub mod executor;
pub mod message_pusher;
pub mod quota;
pub mod repository;
pub mod value_object;

pub use entity::{
    ExecutionRequest, ExecutionResult, Member, RoomSnapshot, RoomState, RoomStateChange, Submission,
};
pub use error::{ExecutionError, MessagePushError, ValueObjectError};
pub use event::RoomEvent;
pub use executor::CodeExecutor;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use quota::DailyQuota;
pub use repository::{Departure, MembershipRepository, RoomStateGuard, RoomStateRepository};
pub use value_object::{ConnectionId, DisplayName, Language, RoomId};
