//! UseCase テスト用のヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, DisplayName, MembershipRepository, MessagePusher, RoomId},
    infrastructure::{
        dto::websocket::ServerMessage,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryMembershipTracker, InMemoryRoomStateStore},
    },
};

/// インメモリ実装一式
pub(crate) struct Harness {
    pub room_states: Arc<InMemoryRoomStateStore>,
    pub membership: Arc<InMemoryMembershipTracker>,
    pub pusher: Arc<WebSocketMessagePusher>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            room_states: Arc::new(InMemoryRoomStateStore::new()),
            membership: Arc::new(InMemoryMembershipTracker::new()),
            pusher: Arc::new(WebSocketMessagePusher::new()),
        }
    }

    /// 接続を作成して MessagePusher に登録
    pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection_id = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(connection_id.clone(), tx).await;
        (connection_id, rx)
    }

    /// MessagePusher を通さずにメンバーシップだけ登録
    pub async fn add_member(&self, connection_id: &ConnectionId, room_id: &RoomId, name: &str) {
        self.membership
            .join(connection_id.clone(), room_id.clone(), display_name(name))
            .await;
    }
}

pub(crate) fn room(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

pub(crate) fn display_name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

/// 受信済みのフレームをすべて取り出してデコード
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        messages.push(serde_json::from_str(&frame).unwrap());
    }
    messages
}
