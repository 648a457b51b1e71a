//! InMemory RoomState ストア実装
//!
//! ドメイン層が定義する RoomStateRepository trait の具体的な実装。
//! ルームごとに独立した Mutex を持つため、同じルームへの更新は直列化され、
//! 異なるルームへの更新は並行して進められます。
//!
//! ルームは最初の join で作成され、削除されることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{RoomId, RoomState, RoomStateGuard, RoomStateRepository};

/// インメモリ RoomState ストア
#[derive(Default)]
pub struct InMemoryRoomStateStore {
    /// Key: room_id, Value: ルーム単位でロックされる状態
    rooms: RwLock<HashMap<RoomId, Arc<Mutex<RoomState>>>>,
}

impl InMemoryRoomStateStore {
    /// 新しい InMemoryRoomStateStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    async fn room(&self, room_id: &RoomId) -> Option<Arc<Mutex<RoomState>>> {
        self.rooms.read().await.get(room_id).cloned()
    }

    /// 作成済みのルーム数
    pub async fn count_rooms(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[async_trait]
impl RoomStateRepository for InMemoryRoomStateStore {
    async fn ensure(&self, room_id: &RoomId) -> RoomState {
        let state = self.lock_or_create(room_id).await;
        (*state).clone()
    }

    async fn get(&self, room_id: &RoomId) -> Option<RoomState> {
        let room = self.room(room_id).await?;
        let state = room.lock().await;
        Some(state.clone())
    }

    async fn lock(&self, room_id: &RoomId) -> Option<RoomStateGuard> {
        let room = self.room(room_id).await?;
        Some(room.lock_owned().await)
    }

    async fn lock_or_create(&self, room_id: &RoomId) -> RoomStateGuard {
        let room = match self.room(room_id).await {
            Some(room) => room,
            None => {
                let mut rooms = self.rooms.write().await;
                rooms
                    .entry(room_id.clone())
                    .or_insert_with(|| {
                        tracing::info!("Room '{}' created", room_id);
                        Arc::new(Mutex::new(RoomState::default()))
                    })
                    .clone()
            }
        };
        room.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ensure: 未作成ならデフォルト状態で作成、作成済みなら上書きしない
    // - get: 作成しない読み取り
    // - set_code / set_language / set_input: 存在しないルームへの更新は無視される
    // - 同一ルームへの並行更新で状態が壊れない
    // ========================================

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_ensure_creates_default_state() {
        // テスト項目: 未作成のルームを ensure するとデフォルト状態が作成される
        // given (前提条件):
        let store = InMemoryRoomStateStore::new();

        // when (操作):
        let state = store.ensure(&room("r1")).await;

        // then (期待する結果):
        assert_eq!(state, RoomState::default());
        assert_eq!(store.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_ensure_never_overwrites_existing_state() {
        // テスト項目: 作成済みのルームを ensure しても状態は上書きされない（冪等性）
        // given (前提条件):
        let store = InMemoryRoomStateStore::new();
        store.ensure(&room("r1")).await;
        store.set_code(&room("r1"), "print(1)".to_string()).await;

        // when (操作):
        let state = store.ensure(&room("r1")).await;

        // then (期待する結果):
        assert_eq!(state.code, "print(1)");
        assert_eq!(store.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_get_does_not_create_room() {
        // テスト項目: get は存在しないルームを作成しない
        // given (前提条件):
        let store = InMemoryRoomStateStore::new();

        // when (操作):
        let state = store.get(&room("missing")).await;

        // then (期待する結果):
        assert!(state.is_none());
        assert_eq!(store.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_updates_to_unknown_room_are_ignored() {
        // テスト項目: 存在しないルームへの更新はエラーにならず無視される
        // given (前提条件):
        let store = InMemoryRoomStateStore::new();

        // when (操作):
        let code = store.set_code(&room("ghost"), "x".to_string()).await;
        let language = store.set_language(&room("ghost"), "python".to_string()).await;
        let input = store.set_input(&room("ghost"), "1".to_string()).await;

        // then (期待する結果):
        assert!(!code && !language && !input);
        assert!(store.get(&room("ghost")).await.is_none());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        // テスト項目: 連続したコード変更は最後に適用されたものが残る
        // given (前提条件):
        let store = InMemoryRoomStateStore::new();
        store.ensure(&room("r1")).await;

        // when (操作):
        for code in ["a", "ab", "abc"] {
            store.set_code(&room("r1"), code.to_string()).await;
        }
        store.set_language(&room("r1"), "python".to_string()).await;
        store.set_input(&room("r1"), "stdin".to_string()).await;

        // then (期待する結果):
        let state = store.get(&room("r1")).await.unwrap();
        assert_eq!(state.code, "abc");
        assert_eq!(state.language, "python");
        assert_eq!(state.input, "stdin");
    }

    #[tokio::test]
    async fn test_concurrent_updates_leave_one_complete_value() {
        // テスト項目: 同一ルームへの並行更新後、状態はいずれかの書き込み値そのものになる
        // given (前提条件):
        let store = Arc::new(InMemoryRoomStateStore::new());
        store.ensure(&room("r1")).await;
        let payloads: Vec<String> = (0..32).map(|i| format!("code-{i}").repeat(100)).collect();

        // when (操作):
        let handles: Vec<_> = payloads
            .iter()
            .cloned()
            .map(|code| {
                let store = store.clone();
                tokio::spawn(async move { store.set_code(&room("r1"), code).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        // then (期待する結果):
        let state = store.get(&room("r1")).await.unwrap();
        assert!(payloads.contains(&state.code));
    }

    #[tokio::test]
    async fn test_rooms_are_independent() {
        // テスト項目: ルームごとに独立した状態を持つ
        // given (前提条件):
        let store = InMemoryRoomStateStore::new();
        store.ensure(&room("r1")).await;
        store.ensure(&room("r2")).await;

        // when (操作):
        store.set_code(&room("r1"), "only r1".to_string()).await;

        // then (期待する結果):
        assert_eq!(store.get(&room("r1")).await.unwrap().code, "only r1");
        assert_eq!(
            store.get(&room("r2")).await.unwrap(),
            RoomState::default()
        );
    }
}
