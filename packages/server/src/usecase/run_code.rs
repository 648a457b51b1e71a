//! UseCase: HTTP 経由のコード実行
//!
//! リクエストを検証してから同期的に実行し、結果を返します。
//! `room_id` が指定されていれば、結果をそのルームのメンバーにも
//! `code_executed` としてブロードキャストします。
//!
//! 検証エラーには副作用がありません（日次カウンタも増えません）。

use std::sync::Arc;

use crate::domain::{
    ExecutionRequest, ExecutionResult, Language, MembershipRepository, MessagePusher, RoomEvent,
    RoomId,
};

use super::{
    error::RunCodeError, execute_code::broadcast_to_room,
    execution_coordinator::ExecutionCoordinator,
};

/// 未検証の実行リクエスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCodeRequest {
    pub code: Option<String>,
    pub language: Option<String>,
    pub input: Option<String>,
    pub room_id: Option<String>,
}

/// HTTP 経由のコード実行のユースケース
pub struct RunCodeUseCase {
    coordinator: Arc<ExecutionCoordinator>,
    membership: Arc<dyn MembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RunCodeUseCase {
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

    /// サポートしている言語名
    pub fn supported_languages(&self) -> Vec<&'static str> {
        self.coordinator.supported_languages()
    }

    pub async fn execute(&self, request: RunCodeRequest) -> Result<ExecutionResult, RunCodeError> {
        let (execution, room_id) = Self::validate(request)?;

        let result = self.coordinator.execute(execution).await?;

        if let Some(room_id) = room_id {
            broadcast_to_room(
                self.membership.as_ref(),
                self.message_pusher.as_ref(),
                &room_id,
                &RoomEvent::CodeExecuted(result.clone()),
            )
            .await;
        }
        Ok(result)
    }

    fn validate(
        request: RunCodeRequest,
    ) -> Result<(ExecutionRequest, Option<RoomId>), RunCodeError> {
        let code = request
            .code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| RunCodeError::Validation("Missing or invalid code parameter.".into()))?;
        let language = request
            .language
            .filter(|language| !language.is_empty())
            .ok_or_else(|| {
                RunCodeError::Validation("Missing or invalid language parameter.".into())
            })?;
        if language.parse::<Language>().is_err() {
            return Err(RunCodeError::Validation(format!(
                "Unsupported language: {}. Supported: {}",
                language,
                Language::supported_names().join(", ")
            )));
        }
        let room_id = request.room_id.and_then(|id| RoomId::new(id).ok());

        Ok((
            ExecutionRequest {
                code,
                language,
                input: request.input.unwrap_or_default(),
            },
            room_id,
        ))
    }
}
