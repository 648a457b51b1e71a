//! Events pushed from the server to room members.

use super::{
    entity::{ExecutionResult, Member, RoomState},
    value_object::{ConnectionId, DisplayName},
};

/// Outbound event, independent of its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Full state snapshot for a connection that just joined.
    RoomState(RoomState),
    Joined {
        members: Vec<Member>,
        display_name: DisplayName,
        connection_id: ConnectionId,
    },
    UserLeft {
        members: Vec<Member>,
        display_name: DisplayName,
        connection_id: ConnectionId,
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
    CodeExecuted(ExecutionResult),
}

impl RoomEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::RoomState(_) => "room_state",
            RoomEvent::Joined { .. } => "joined",
            RoomEvent::UserLeft { .. } => "user_left",
            RoomEvent::CodeChanged { .. } => "code_changed",
            RoomEvent::LanguageChanged { .. } => "language_changed",
            RoomEvent::InputChanged { .. } => "input_changed",
            RoomEvent::ExecutionStarted => "execution_started",
            RoomEvent::CodeExecuted(_) => "code_executed",
        }
    }
}
