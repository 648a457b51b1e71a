//! 実行リクエストの調整
//!
//! 1 回の実行は `Received → QuotaChecked → Dispatched → Completed | Failed`
//! の順に進みます。
//!
//! - 日次カウンタは言語の検証より前に必ずインクリメントされる
//!   （成功数ではなく試行数を数える）
//! - 上限超過・未対応言語のときはバックエンドを呼ばない
//! - バックエンドの失敗はリトライしない

use std::sync::Arc;

use codecast_shared::time::Clock;

use crate::domain::{
    CodeExecutor, DailyQuota, ExecutionError, ExecutionRequest, ExecutionResult, Language,
    Submission,
};

/// 実行リクエストを日次上限と照合してバックエンドへ送る
pub struct ExecutionCoordinator {
    executor: Arc<dyn CodeExecutor>,
    quota: DailyQuota,
    clock: Arc<dyn Clock>,
}

impl ExecutionCoordinator {
    pub fn new(executor: Arc<dyn CodeExecutor>, daily_limit: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            executor,
            quota: DailyQuota::new(daily_limit),
            clock,
        }
    }

    /// サポートしている言語名
    pub fn supported_languages(&self) -> Vec<&'static str> {
        Language::supported_names()
    }

    /// 当日（UTC）の試行回数
    pub async fn attempts_today(&self) -> u32 {
        self.quota.attempts(&self.clock.today_key()).await
    }

    /// コードを実行する
    ///
    /// # Errors
    ///
    /// * `UnsupportedLanguage` - 言語がサポート対象外
    /// * `QuotaExceeded` - 当日の試行回数が上限を超えた
    /// * `Backend` - バックエンドの呼び出しに失敗した
    pub async fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Result<ExecutionResult, ExecutionError> {
        let date_key = self.clock.today_key();
        let attempts = self.quota.record_attempt(&date_key).await;

        let language: Language = request
            .language
            .parse()
            .map_err(|_| ExecutionError::UnsupportedLanguage(request.language.clone()))?;

        if self.quota.is_exceeded(attempts) {
            tracing::warn!(
                "Daily execution limit reached ({} attempts on {})",
                attempts,
                date_key
            );
            return Err(ExecutionError::QuotaExceeded {
                limit: self.quota.ceiling(),
            });
        }

        tracing::info!(
            "Executing {} code ({} bytes), attempt {}/{} on {}",
            language,
            request.code.len(),
            attempts,
            self.quota.ceiling(),
            date_key
        );
        self.executor
            .submit(Submission {
                source_code: request.code,
                language,
                stdin: request.input,
            })
            .await
    }
}
