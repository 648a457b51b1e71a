//! Execution backend trait.

use async_trait::async_trait;

use super::{
    entity::{ExecutionResult, Submission},
    error::ExecutionError,
};

/// Remote service that compiles and runs a submission.
///
/// Implementations make exactly one attempt per call and report every
/// failure (timeout, transport, malformed reply) as
/// [`ExecutionError::Backend`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    async fn submit(&self, submission: Submission) -> Result<ExecutionResult, ExecutionError>;
}
