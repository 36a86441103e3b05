//! Poll loop waiting for stack creation to reach a terminal status
//!
//! CloudFormation provisions asynchronously; the only way to observe
//! progress is to poll. The waiter sleeps a fixed interval between
//! describe calls (wide enough to stay clear of API rate limits) and gives
//! up when the overall budget elapses. Dropping the returned future cancels
//! the wait immediately, which is how the CLI wires Ctrl-C through.

use crate::client::{StackOps, StackStatus};
use std::sync::Arc;
use std::time::Duration;
use tfboot_cloud::{CloudError, Result};

/// Seconds between describe calls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Waits for a named stack to finish creating.
pub struct StackWaiter<C> {
    ops: Arc<C>,
    poll_interval: Duration,
}

impl<C: StackOps> StackWaiter<C> {
    pub fn new(ops: Arc<C>) -> Self {
        Self {
            ops,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Block until the stack reaches `CREATE_COMPLETE` or `max_wait` elapses.
    ///
    /// A failure terminal (`CREATE_FAILED`, `ROLLBACK_COMPLETE`) aborts with
    /// [`CloudError::ProvisionFailed`]; a vanished stack aborts with
    /// [`CloudError::StackNotFound`].
    pub async fn wait(&self, stack_name: &str, max_wait: Duration) -> Result<StackStatus> {
        tokio::time::timeout(max_wait, self.poll_until_terminal(stack_name))
            .await
            .map_err(|_| CloudError::WaitTimeout(max_wait))?
    }

    async fn poll_until_terminal(&self, stack_name: &str) -> Result<StackStatus> {
        let mut last_status: Option<StackStatus> = None;
        loop {
            tokio::time::sleep(self.poll_interval).await;

            let stack = self
                .ops
                .describe_stack(stack_name)
                .await?
                .ok_or_else(|| CloudError::StackNotFound(stack_name.to_string()))?;

            if last_status.as_ref() != Some(&stack.status) {
                tracing::info!(stack = stack_name, status = %stack.status, "stack status");
            }

            match &stack.status {
                StackStatus::CreateComplete => return Ok(StackStatus::CreateComplete),
                StackStatus::CreateFailed | StackStatus::RollbackComplete => {
                    return Err(CloudError::ProvisionFailed {
                        status: stack.status.to_string(),
                    });
                }
                other => last_status = Some(other.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Stack, StackRequest, StackSummary};
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// StackOps fake whose describe calls walk a scripted status sequence.
    /// `None` entries stand for a missing stack; once the script runs out
    /// every further poll sees `fallback`.
    struct ScriptedStacks {
        script: Mutex<VecDeque<Option<StackStatus>>>,
        fallback: Option<StackStatus>,
        polls: AtomicUsize,
    }

    impl ScriptedStacks {
        fn with_script(steps: Vec<Option<StackStatus>>) -> Self {
            Self {
                script: Mutex::new(steps.into()),
                fallback: None,
                polls: AtomicUsize::new(0),
            }
        }

        fn repeating(status: StackStatus) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                fallback: Some(status),
                polls: AtomicUsize::new(0),
            }
        }

        fn polls(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StackOps for ScriptedStacks {
        async fn list_stacks(&self, _statuses: &[StackStatus]) -> Result<Vec<StackSummary>> {
            Ok(Vec::new())
        }

        async fn describe_stack(&self, name: &str) -> Result<Option<Stack>> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone());
            Ok(next.map(|status| Stack {
                name: name.to_string(),
                status,
                tags: HashMap::new(),
                outputs: HashMap::new(),
            }))
        }

        async fn create_stack(&self, _request: &StackRequest) -> Result<()> {
            Ok(())
        }
    }

    fn waiter(ops: &Arc<ScriptedStacks>) -> StackWaiter<ScriptedStacks> {
        StackWaiter::new(Arc::clone(ops))
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_exactly_three_polls() {
        let ops = Arc::new(ScriptedStacks::with_script(vec![
            Some(StackStatus::CreateInProgress),
            Some(StackStatus::CreateInProgress),
            Some(StackStatus::CreateComplete),
        ]));

        let status = waiter(&ops)
            .wait("tfboot-backend", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(status, StackStatus::CreateComplete);
        assert_eq!(ops.polls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_terminal_aborts_immediately() {
        let ops = Arc::new(ScriptedStacks::with_script(vec![
            Some(StackStatus::CreateInProgress),
            Some(StackStatus::CreateFailed),
        ]));

        let err = waiter(&ops)
            .wait("tfboot-backend", Duration::from_secs(60))
            .await
            .unwrap_err();

        assert!(
            matches!(&err, CloudError::ProvisionFailed { status } if status == "CREATE_FAILED")
        );
        assert_eq!(ops.polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn rollback_complete_is_a_failure_terminal() {
        let ops = Arc::new(ScriptedStacks::with_script(vec![Some(
            StackStatus::RollbackComplete,
        )]));

        let err = waiter(&ops)
            .wait("tfboot-backend", Duration::from_secs(60))
            .await
            .unwrap_err();

        assert!(
            matches!(&err, CloudError::ProvisionFailed { status } if status == "ROLLBACK_COMPLETE")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_no_terminal_status_arrives() {
        let ops = Arc::new(ScriptedStacks::repeating(StackStatus::CreateInProgress));

        let err = waiter(&ops)
            .wait("tfboot-backend", Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, CloudError::WaitTimeout(_)));
        assert_eq!(ops.polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn vanished_stack_aborts_the_wait() {
        let ops = Arc::new(ScriptedStacks::with_script(vec![
            Some(StackStatus::CreateInProgress),
            None,
        ]));

        let err = waiter(&ops)
            .wait("tfboot-backend", Duration::from_secs(60))
            .await
            .unwrap_err();

        assert!(matches!(err, CloudError::StackNotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_statuses_keep_the_loop_polling() {
        let ops = Arc::new(ScriptedStacks::with_script(vec![
            Some(StackStatus::Other("REVIEW_IN_PROGRESS".to_string())),
            Some(StackStatus::CreateComplete),
        ]));

        let status = waiter(&ops)
            .with_poll_interval(Duration::from_secs(10))
            .wait("tfboot-backend", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(status, StackStatus::CreateComplete);
        assert_eq!(ops.polls(), 2);
    }
}
