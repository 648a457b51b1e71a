//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::{
    entity::{Member, RoomState, RoomStateChange},
    value_object::{ConnectionId, DisplayName, RoomId},
};

/// ルーム単位の排他ロック
///
/// 保持している間、同じルームへの他の更新は待たされる。
pub type RoomStateGuard = OwnedMutexGuard<RoomState>;

/// ルーム状態（コード・言語・入力）のストア
#[async_trait]
pub trait RoomStateRepository: Send + Sync {
    /// 既存の状態を返す。存在しなければデフォルト状態で作成する（上書きはしない）
    async fn ensure(&self, room_id: &RoomId) -> RoomState;

    /// 作成せずに状態を取得
    async fn get(&self, room_id: &RoomId) -> Option<RoomState>;

    /// ルームのロックを取得（ルームが存在しない場合は None）
    async fn lock(&self, room_id: &RoomId) -> Option<RoomStateGuard>;

    /// ルームのロックを取得。存在しなければデフォルト状態で作成する
    async fn lock_or_create(&self, room_id: &RoomId) -> RoomStateGuard;

    /// 変更を適用。ルームが存在しなければ何もせず false を返す
    async fn apply(&self, room_id: &RoomId, change: RoomStateChange) -> bool {
        match self.lock(room_id).await {
            Some(mut state) => {
                change.apply(&mut state);
                true
            }
            None => false,
        }
    }

    async fn set_code(&self, room_id: &RoomId, code: String) -> bool {
        self.apply(room_id, RoomStateChange::Code(code)).await
    }

    async fn set_language(&self, room_id: &RoomId, language: String) -> bool {
        self.apply(room_id, RoomStateChange::Language(language)).await
    }

    async fn set_input(&self, room_id: &RoomId, input: String) -> bool {
        self.apply(room_id, RoomStateChange::Input(input)).await
    }
}

/// 切断した接続の情報
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Departure {
    /// 登録されていた表示名（join していない接続は None）
    pub display_name: Option<DisplayName>,
    /// 接続が所属していたルーム
    pub rooms: Vec<RoomId>,
}

/// ルームのメンバーシップ（接続 → 表示名、ルーム → 接続）
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// 接続をルームに参加させる。再 join は表示名を上書きする（冪等）
    async fn join(&self, connection_id: ConnectionId, room_id: RoomId, display_name: DisplayName);

    /// 現在のメンバー一覧（join した順）。メンバーがいなければ空
    async fn list_members(&self, room_id: &RoomId) -> Vec<Member>;

    /// 接続がルームに参加しているか
    async fn is_member(&self, connection_id: &ConnectionId, room_id: &RoomId) -> bool;

    /// 接続の表示名を取得
    async fn display_name(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 接続を全ルームと表示名の登録から外す
    async fn leave(&self, connection_id: &ConnectionId) -> Departure;
}
