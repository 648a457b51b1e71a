//! UseCase: ルームでのコード実行
//!
//! 実行開始イベントを全メンバーに即座にブロードキャストし、実行そのものは
//! 別タスクで進めます。実行が終わると（成功・失敗・タイムアウトのいずれでも）
//! その時点のメンバー全員に結果を 1 回だけブロードキャストします。
//!
//! 実行中もイベント処理はブロックされず、実行はキャンセルされません。

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{
    ConnectionId, ExecutionRequest, ExecutionResult, MembershipRepository, MessagePusher,
    RoomEvent, RoomId,
};

use super::{error::ExecuteCodeError, execution_coordinator::ExecutionCoordinator};

/// ルームでのコード実行のユースケース
pub struct ExecuteCodeUseCase {
    coordinator: Arc<ExecutionCoordinator>,
    membership: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ExecuteCodeUseCase {
    pub fn new(
        coordinator: Arc<ExecutionCoordinator>,
        membership: Arc<dyn MembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            coordinator,
            membership,
            message_pusher,
        }
    }

    /// 実行を開始する
    ///
    /// # Returns
    ///
    /// * `Ok(JoinHandle)` - 結果をブロードキャストするタスク
    /// * `Err(ExecuteCodeError)` - 送信者がルームに参加していない
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: RoomId,
        request: ExecutionRequest,
    ) -> Result<JoinHandle<()>, ExecuteCodeError> {
        if !self.membership.is_member(sender, &room_id).await {
            return Err(ExecuteCodeError::NotJoined);
        }

        broadcast_to_room(
            self.membership.as_ref(),
            self.message_pusher.as_ref(),
            &room_id,
            &RoomEvent::ExecutionStarted,
        )
        .await;

        let coordinator = self.coordinator.clone();
        let membership = self.membership.clone();
        let message_pusher = self.message_pusher.clone();
        Ok(tokio::spawn(async move {
            let result = match coordinator.execute(request).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("Execution in room '{}' failed: {}", room_id, e);
                    ExecutionResult::failed(e.to_string())
                }
            };
            broadcast_to_room(
                membership.as_ref(),
                message_pusher.as_ref(),
                &room_id,
                &RoomEvent::CodeExecuted(result),
            )
            .await;
        }))
    }
}

/// ルームの現在のメンバー全員にブロードキャスト
pub(crate) async fn broadcast_to_room(
    membership: &dyn MembershipRepository,
    message_pusher: &dyn MessagePusher,
    room_id: &RoomId,
    event: &RoomEvent,
) {
    let targets: Vec<ConnectionId> = membership
        .list_members(room_id)
        .await
        .into_iter()
        .map(|member| member.connection_id)
        .collect();
    if let Err(e) = message_pusher.broadcast(&targets, event).await {
        tracing::warn!(
            "Failed to broadcast '{}' to room '{}': {}",
            event.name(),
            room_id,
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use codecast_shared::time::FixedClock;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        domain::{CodeExecutor, ExecutionError, Submission, executor::MockCodeExecutor},
        infrastructure::dto::websocket::ServerMessage,
        usecase::test_support::{Harness, drain, room},
    };

    fn usecase(harness: &Harness, executor: MockCodeExecutor, limit: u32) -> ExecuteCodeUseCase {
        let coordinator = ExecutionCoordinator::new(
            Arc::new(executor),
            limit,
            Arc::new(FixedClock::new(1714564800000)),
        );
        ExecuteCodeUseCase::new(
            Arc::new(coordinator),
            harness.membership.clone(),
            harness.pusher.clone(),
        )
    }

    fn request(language: &str) -> ExecutionRequest {
        ExecutionRequest {
            code: "print(1)".to_string(),
            language: language.to_string(),
            input: String::new(),
        }
    }

    #[tokio::test]
    async fn test_started_then_single_result_for_all_members() {
        // テスト項目: 全メンバーが実行開始を受け取り、その後に結果を 1 回だけ受け取る
        // given (前提条件):
        let harness = Harness::new();
        let mut executor = MockCodeExecutor::new();
        executor.expect_submit().times(1).returning(|_| {
            Ok(ExecutionResult {
                output: "1\n".to_string(),
                status: "Accepted".to_string(),
                time: Some("0.01".to_string()),
                memory: Some(2048),
                ..ExecutionResult::default()
            })
        });
        let usecase = usecase(&harness, executor, 150);
        let (alice, mut alice_rx) = harness.connect().await;
        let (bob, mut bob_rx) = harness.connect().await;
        harness.add_member(&alice, &room("r1"), "alice").await;
        harness.add_member(&bob, &room("r1"), "bob").await;

        // when (操作):
        let handle = usecase
            .execute(&alice, room("r1"), request("python"))
            .await
            .unwrap();
        handle.await.unwrap();

        // then (期待する結果):
        let expected = vec![
            ServerMessage::ExecutionStarted,
            ServerMessage::CodeExecuted {
                output: "1\n".to_string(),
                error: String::new(),
                status: "Accepted".to_string(),
                time: Some("0.01".to_string()),
                memory: Some(2048),
            },
        ];
        assert_eq!(drain(&mut alice_rx), expected);
        assert_eq!(drain(&mut bob_rx), expected);
    }

    #[tokio::test]
    async fn test_failure_is_reported_as_error_result() {
        // テスト項目: 未対応言語は status=Error の結果としてルームに通知される
        // given (前提条件):
        let harness = Harness::new();
        let mut executor = MockCodeExecutor::new();
        executor.expect_submit().never();
        let usecase = usecase(&harness, executor, 150);
        let (alice, mut alice_rx) = harness.connect().await;
        harness.add_member(&alice, &room("r1"), "alice").await;

        // when (操作):
        let handle = usecase
            .execute(&alice, room("r1"), request("ruby"))
            .await
            .unwrap();
        handle.await.unwrap();

        // then (期待する結果):
        assert_eq!(
            drain(&mut alice_rx),
            vec![
                ServerMessage::ExecutionStarted,
                ServerMessage::CodeExecuted {
                    output: String::new(),
                    error: "Unsupported language: ruby".to_string(),
                    status: "Error".to_string(),
                    time: None,
                    memory: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_quota_exceeded_is_reported_to_room() {
        // テスト項目: 上限超過は接続を切らずに実行失敗としてルームに通知される
        // given (前提条件):
        let harness = Harness::new();
        let mut executor = MockCodeExecutor::new();
        executor.expect_submit().never();
        let usecase = usecase(&harness, executor, 0);
        let (alice, mut alice_rx) = harness.connect().await;
        harness.add_member(&alice, &room("r1"), "alice").await;

        // when (操作):
        let handle = usecase
            .execute(&alice, room("r1"), request("python"))
            .await
            .unwrap();
        handle.await.unwrap();

        // then (期待する結果):
        let messages = drain(&mut alice_rx);
        match &messages[1] {
            ServerMessage::CodeExecuted { error, status, .. } => {
                assert_eq!(error, &ExecutionError::QuotaExceeded { limit: 0 }.to_string());
                assert_eq!(status, "Error");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    /// 通知されるまで結果を返さない CodeExecutor
    struct GatedExecutor(Arc<Notify>);

    #[async_trait::async_trait]
    impl CodeExecutor for GatedExecutor {
        async fn submit(&self, _submission: Submission) -> Result<ExecutionResult, ExecutionError> {
            self.0.notified().await;
            Ok(ExecutionResult::default())
        }
    }

    #[tokio::test]
    async fn test_result_goes_to_members_present_at_settle_time() {
        // テスト項目: 実行中に切断したメンバーには結果が届かず、残りのメンバーには届く
        // given (前提条件):
        let harness = Harness::new();
        let gate = Arc::new(Notify::new());
        let coordinator = ExecutionCoordinator::new(
            Arc::new(GatedExecutor(gate.clone())),
            150,
            Arc::new(FixedClock::new(1714564800000)),
        );
        let usecase = ExecuteCodeUseCase::new(
            Arc::new(coordinator),
            harness.membership.clone(),
            harness.pusher.clone(),
        );
        let (alice, mut alice_rx) = harness.connect().await;
        let (bob, mut bob_rx) = harness.connect().await;
        harness.add_member(&alice, &room("r1"), "alice").await;
        harness.add_member(&bob, &room("r1"), "bob").await;

        // when (操作): 実行中に bob が切断
        let handle = usecase
            .execute(&alice, room("r1"), request("python"))
            .await
            .unwrap();
        harness.membership.leave(&bob).await;
        gate.notify_one();
        handle.await.unwrap();

        // then (期待する結果):
        assert_eq!(drain(&mut alice_rx).len(), 2);
        assert_eq!(drain(&mut bob_rx), vec![ServerMessage::ExecutionStarted]);
    }

    #[tokio::test]
    async fn test_non_member_cannot_execute() {
        // テスト項目: 参加していない接続からの実行要求は拒否され、何も送信されない
        // given (前提条件):
        let harness = Harness::new();
        let mut executor = MockCodeExecutor::new();
        executor.expect_submit().never();
        let usecase = usecase(&harness, executor, 150);
        let (alice, mut alice_rx) = harness.connect().await;
        let (outsider, _rx) = harness.connect().await;
        harness.add_member(&alice, &room("r1"), "alice").await;

        // when (操作):
        let result = usecase
            .execute(&outsider, room("r1"), request("python"))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(ExecuteCodeError::NotJoined)));
        assert!(drain(&mut alice_rx).is_empty());
    }
}
