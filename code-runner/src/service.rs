use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    error::Error,
    executor::CodeExecutor,
    types::{ExecutionResult, RunnerConfig, Submission},
};

#[derive(Clone)]
pub struct CodeExecutionService {
    executor: Arc<CodeExecutor>,
    /// `None` means no admission control at all
    semaphore: Option<Arc<Semaphore>>,
}

impl CodeExecutionService {
    /// Create a service. `max_concurrent_executions` of `None` lets every
    /// request spawn its process immediately.
    pub fn new(config: RunnerConfig, max_concurrent_executions: Option<usize>) -> Self {
        Self {
            executor: Arc::new(CodeExecutor::new(config)),
            semaphore: max_concurrent_executions.map(|n| Arc::new(Semaphore::new(n))),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        self.executor.config()
    }

    pub async fn execute(&self, submission: Submission) -> Result<ExecutionResult, Error> {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", id = %run_id, language = %submission.language);

        async move {
            let _permit = match &self.semaphore {
                Some(semaphore) => Some(semaphore.acquire().await.map_err(|e| {
                    Error::System(format!("Failed to acquire execution permit: {}", e))
                })?),
                None => None,
            };

            debug!("Starting execution of {} bytes", submission.code.len());
            let started = Instant::now();
            let result = self.executor.execute(&submission).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(ExecutionResult { failure: None, .. }) => {
                    info!(elapsed_ms, "Execution completed successfully")
                }
                Ok(ExecutionResult {
                    failure: Some(failure),
                    ..
                }) => info!(elapsed_ms, "Execution failed: {}", failure),
                Err(e) => error!("Execution setup failed: {}", e),
            }

            result
        }
        .instrument(span)
        .await
    }

    /// Remaining permits, or `None` when executions are unbounded
    pub fn available_slots(&self) -> Option<usize> {
        self.semaphore
            .as_ref()
            .map(|semaphore| semaphore.available_permits())
    }
}
