//! Conversion logic between DTOs and domain entities.

use crate::domain::{ExecutionResult, Member, RoomEvent, RoomSnapshot, RoomState};
use crate::infrastructure::dto::{http, websocket as ws};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Member> for ws::ClientInfo {
    fn from(model: Member) -> Self {
        Self {
            socket_id: model.connection_id.into_string(),
            username: model.display_name.into_string(),
        }
    }
}

fn client_infos(members: Vec<Member>) -> Vec<ws::ClientInfo> {
    members.into_iter().map(Into::into).collect()
}

impl From<RoomEvent> for ws::ServerMessage {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::RoomState(state) => Self::RoomState {
                code: state.code,
                language: state.language,
                input: state.input,
            },
            RoomEvent::Joined {
                members,
                display_name,
                connection_id,
            } => Self::Joined {
                clients: client_infos(members),
                username: display_name.into_string(),
                socket_id: connection_id.into_string(),
            },
            RoomEvent::UserLeft {
                members,
                display_name,
                connection_id,
            } => Self::UserLeft {
                clients: client_infos(members),
                username: display_name.into_string(),
                socket_id: connection_id.into_string(),
            },
            RoomEvent::CodeChanged { code } => Self::CodeChanged { code },
            RoomEvent::LanguageChanged { language } => Self::LanguageChanged { language },
            RoomEvent::InputChanged { input } => Self::InputChanged { input },
            RoomEvent::ExecutionStarted => Self::ExecutionStarted,
            RoomEvent::CodeExecuted(result) => Self::CodeExecuted {
                output: result.output,
                error: result.error,
                status: result.status,
                time: result.time,
                memory: result.memory,
            },
        }
    }
}

impl From<ExecutionResult> for http::ExecuteResponseDto {
    fn from(result: ExecutionResult) -> Self {
        Self {
            success: true,
            output: result.output,
            error: result.error,
            status: result.status,
            time: result.time,
            memory: result.memory,
        }
    }
}

impl From<RoomState> for http::RoomStateDto {
    fn from(state: RoomState) -> Self {
        Self {
            code: state.code,
            language: state.language,
            input: state.input,
        }
    }
}

impl From<RoomSnapshot> for http::RoomDetailDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            id: snapshot.room_id.into_string(),
            state: snapshot.state.into(),
            members: client_infos(snapshot.members),
        }
    }
}
