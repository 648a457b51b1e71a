//! UseCase 層
//!
//! ルームへの参加・状態変更・コード実行・切断のビジネスロジックを提供します。
//! Repository / MessagePusher / CodeExecutor の trait にのみ依存します。

mod error;
mod execute_code;
mod execution_coordinator;
mod get_room_detail;
mod join_room;
mod leave_room;
mod run_code;
mod update_room_state;

pub use error::{
    ExecuteCodeError, GetRoomDetailError, JoinRoomError, RunCodeError, UpdateRoomStateError,
};
pub use execute_code::ExecuteCodeUseCase;
pub use execution_coordinator::ExecutionCoordinator;
pub use get_room_detail::GetRoomDetailUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use run_code::{RunCodeRequest, RunCodeUseCase};
pub use update_room_state::UpdateRoomStateUseCase;

#[cfg(test)]
pub(crate) mod test_support;
