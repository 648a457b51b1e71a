//! UseCase: ルーム状態（コード・言語・入力）の変更処理
//!
//! 変更はルームのロックの下で適用し、同じロックを保持したまま送信者以外の
//! メンバーへブロードキャストします。これにより、同じルームへの変更が
//! 保存された順にクライアントへ届きます。
//!
//! 送信者は自分の編集内容を既に持っているため、送信者へのエコーは行いません。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MembershipRepository, MessagePusher, RoomId, RoomStateChange,
    RoomStateRepository,
};

use super::error::UpdateRoomStateError;

/// ルーム状態変更のユースケース
pub struct UpdateRoomStateUseCase {
    room_states: Arc<dyn RoomStateRepository>,
    membership: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateRoomStateUseCase {
    pub fn new(
        room_states: Arc<dyn RoomStateRepository>,
        membership: Arc<dyn MembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            room_states,
            membership,
            message_pusher,
        }
    }

    /// 変更を適用してブロードキャスト
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 通知した接続（送信者を除くメンバー）
    /// * `Err(UpdateRoomStateError)` - 未参加の接続、または存在しないルーム
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        change: RoomStateChange,
    ) -> Result<Vec<ConnectionId>, UpdateRoomStateError> {
        if !self.membership.is_member(sender, room_id).await {
            return Err(UpdateRoomStateError::NotJoined);
        }

        let mut state = self
            .room_states
            .lock(room_id)
            .await
            .ok_or(UpdateRoomStateError::UnknownRoom)?;
        let event = change.apply(&mut state);

        let targets: Vec<ConnectionId> = self
            .membership
            .list_members(room_id)
            .await
            .into_iter()
            .map(|member| member.connection_id)
            .filter(|id| id != sender)
            .collect();
        self.message_pusher
            .broadcast(&targets, &event)
            .await
            .map_err(UpdateRoomStateError::BroadcastFailed)?;
        drop(state);

        Ok(targets)
    }
}
