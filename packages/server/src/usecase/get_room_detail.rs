//! UseCase: ルーム詳細の取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{MembershipRepository, RoomId, RoomSnapshot, RoomStateRepository};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    room_states: Arc<dyn RoomStateRepository>,
    membership: Arc<dyn MembershipRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(
        room_states: Arc<dyn RoomStateRepository>,
        membership: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            room_states,
            membership,
        }
    }

    /// ルームの状態とメンバー一覧を取得（ルームは作成しない）
    pub async fn execute(&self, room_id: RoomId) -> Result<RoomSnapshot, GetRoomDetailError> {
        let state = self
            .room_states
            .get(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;
        let members = self.membership.list_members(&room_id).await;

        Ok(RoomSnapshot {
            room_id,
            state,
            members,
        })
    }
}
