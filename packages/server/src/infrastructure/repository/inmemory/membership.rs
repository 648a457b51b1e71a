//! InMemory MembershipTracker 実装
//!
//! ルーム → 接続 ID のメンバーシップテーブルと、接続 ID → 表示名の
//! ConnectionRegistry を 1 つのロックで保護します。join / leave は
//! テーブルとレジストリを同時に更新するため、切断済みの接続が
//! メンバー一覧に残ることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Departure, DisplayName, Member, MembershipRepository, RoomId};

use super::ConnectionRegistry;

#[derive(Default)]
struct MembershipTable {
    registry: ConnectionRegistry,
    /// Key: room_id, Value: join した順の接続 ID
    rooms: HashMap<RoomId, Vec<ConnectionId>>,
}

/// インメモリ MembershipTracker
#[derive(Default)]
pub struct InMemoryMembershipTracker {
    table: Mutex<MembershipTable>,
}

impl InMemoryMembershipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示名が登録されている接続数
    pub async fn count_connections(&self) -> usize {
        self.table.lock().await.registry.len()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipTracker {
    async fn join(&self, connection_id: ConnectionId, room_id: RoomId, display_name: DisplayName) {
        let mut table = self.table.lock().await;
        table
            .registry
            .register(connection_id.clone(), display_name.clone());

        let members = table.rooms.entry(room_id.clone()).or_default();
        if !members.contains(&connection_id) {
            members.push(connection_id.clone());
        }
        tracing::debug!(
            "Connection '{}' joined room '{}' as '{}'",
            connection_id,
            room_id,
            display_name.as_str()
        );
    }

    async fn list_members(&self, room_id: &RoomId) -> Vec<Member> {
        let table = self.table.lock().await;
        let Some(connection_ids) = table.rooms.get(room_id) else {
            return Vec::new();
        };

        connection_ids
            .iter()
            .filter_map(|connection_id| {
                table
                    .registry
                    .display_name(connection_id)
                    .map(|name| Member::new(connection_id.clone(), name.clone()))
            })
            .collect()
    }

    async fn is_member(&self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        let table = self.table.lock().await;
        table
            .rooms
            .get(room_id)
            .is_some_and(|members| members.contains(connection_id))
    }

    async fn display_name(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let table = self.table.lock().await;
        table.registry.display_name(connection_id).cloned()
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Departure {
        let mut table = self.table.lock().await;
        let display_name = table.registry.remove(connection_id);

        let mut rooms = Vec::new();
        table.rooms.retain(|room_id, members| {
            let before = members.len();
            members.retain(|id| id != connection_id);
            if members.len() != before {
                rooms.push(room_id.clone());
            }
            !members.is_empty()
        });
        rooms.sort();

        tracing::debug!(
            "Connection '{}' left {} room(s)",
            connection_id,
            rooms.len()
        );
        Departure {
            display_name,
            rooms,
        }
    }
}
