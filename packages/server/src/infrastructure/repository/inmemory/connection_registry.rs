//! 接続 ID → 表示名のレジストリ

use std::collections::HashMap;

use crate::domain::{ConnectionId, DisplayName};

/// 接続中のクライアントの表示名を保持する
///
/// ロックは持たない。MembershipTracker のテーブルの一部として、
/// ルームのメンバーシップと同じロックの下で更新される。
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    names: HashMap<ConnectionId, DisplayName>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 表示名を登録（既に登録済みなら上書き）
    pub fn register(&mut self, connection_id: ConnectionId, display_name: DisplayName) {
        self.names.insert(connection_id, display_name);
    }

    pub fn display_name(&self, connection_id: &ConnectionId) -> Option<&DisplayName> {
        self.names.get(connection_id)
    }

    /// 登録を削除し、登録されていた表示名を返す
    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<DisplayName> {
        self.names.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
