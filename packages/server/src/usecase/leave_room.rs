//! UseCase: 切断処理
//!
//! トランスポートの切断通知を受けて、接続を全ルームのメンバーシップと
//! 表示名の登録から外し、所属していた各ルームの残りのメンバーに
//! 最新のメンバー一覧をブロードキャストします。

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, MembershipRepository, MessagePusher, RoomEvent};

use super::execute_code::broadcast_to_room;

/// 切断のユースケース
pub struct LeaveRoomUseCase {
    membership: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        membership: Arc<dyn MembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            membership,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 接続の表示名と、所属していたルームの一覧
    pub async fn execute(&self, connection_id: &ConnectionId) -> Departure {
        self.message_pusher.unregister_client(connection_id).await;
        let departure = self.membership.leave(connection_id).await;

        let Some(display_name) = departure.display_name.clone() else {
            return departure;
        };
        for room_id in &departure.rooms {
            let members = self.membership.list_members(room_id).await;
            let event = RoomEvent::UserLeft {
                members,
                display_name: display_name.clone(),
                connection_id: connection_id.clone(),
            };
            broadcast_to_room(
                self.membership.as_ref(),
                self.message_pusher.as_ref(),
                room_id,
                &event,
            )
            .await;
        }

        departure
    }
}
