//! UseCase: ルーム参加処理
//!
//! 1. メンバーシップに登録（表示名も登録）
//! 2. ルーム状態を用意（未作成ならデフォルト状態で作成）
//! 3. 参加者に現在のルーム状態をユニキャスト（送信できなければ登録を取り消して終了）
//! 4. 参加者を含む全メンバーに最新のメンバー一覧をブロードキャスト

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, Member, MembershipRepository, MessagePusher, RoomEvent, RoomId,
    RoomStateRepository,
};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    room_states: Arc<dyn RoomStateRepository>,
    membership: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
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

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Member>)` - 参加後のメンバー一覧（join した順）
    /// * `Err(JoinRoomError)` - 参加者へのルーム状態の送信に失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        display_name: DisplayName,
    ) -> Result<Vec<Member>, JoinRoomError> {
        self.membership
            .join(connection_id.clone(), room_id.clone(), display_name.clone())
            .await;

        // ルームのロックを保持したままスナップショットを送り、
        // 同時に進むコード変更との順序を保つ
        {
            let state = self.room_states.lock_or_create(&room_id).await;
            if let Err(e) = self
                .message_pusher
                .push_to(&connection_id, &RoomEvent::RoomState(state.clone()))
                .await
            {
                // 送信できない接続は切断済みとみなし、メンバーシップに残さない
                self.membership.leave(&connection_id).await;
                return Err(JoinRoomError::StateDeliveryFailed(e));
            }
        }

        let members = self.membership.list_members(&room_id).await;
        let targets: Vec<ConnectionId> = members.iter().map(|m| m.connection_id.clone()).collect();
        let event = RoomEvent::Joined {
            members: members.clone(),
            display_name,
            connection_id,
        };
        if let Err(e) = self.message_pusher.broadcast(&targets, &event).await {
            tracing::warn!("Failed to broadcast joined to room '{}': {}", room_id, e);
        }

        Ok(members)
    }
}
