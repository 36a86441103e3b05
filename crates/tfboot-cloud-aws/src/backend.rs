//! Idempotent backend bootstrap orchestration
//!
//! Composes the template, stack client and waiter into the two public
//! operations: ensure the backend exists, and show an existing one. The
//! idempotency signal is the bootstrap tag, not the stack name, so a stack
//! renamed or created by an older tool version is still recognized as long
//! as it carries the tag.

use crate::client::{CloudFormation, Stack, StackOps, StackStatus};
use crate::template::{self, BOOTSTRAP_TAG_KEY, BOOTSTRAP_TAG_VALUE, BUCKET_NAME_OUTPUT, STACK_NAME};
use crate::waiter::StackWaiter;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tfboot_cloud::{BackendProvider, CloudError, Result};

/// Overall budget for one stack creation.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(300);

/// Statuses under which an existing stack counts for the bootstrap scan.
const ACTIVE_STATUSES: [StackStatus; 3] = [
    StackStatus::CreateComplete,
    StackStatus::UpdateComplete,
    StackStatus::UpdateRollbackComplete,
];

/// Terraform state backend on AWS, backed by a CloudFormation stack.
pub struct AwsBackendService<C = CloudFormation> {
    ops: Arc<C>,
    waiter: StackWaiter<C>,
    max_wait: Duration,
}

impl AwsBackendService<CloudFormation> {
    /// Connect to CloudFormation in the given region using the default
    /// credential chain.
    pub async fn new(region: &str) -> Self {
        Self::with_client(Arc::new(CloudFormation::from_region(region).await))
    }
}

impl<C: StackOps> AwsBackendService<C> {
    pub fn with_client(ops: Arc<C>) -> Self {
        let waiter = StackWaiter::new(Arc::clone(&ops));
        Self {
            ops,
            waiter,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }

    /// Scan active stacks for the bootstrap tag.
    ///
    /// More than one tagged stack means two bootstraps happened under
    /// different names; there is no safe way to guess which one holds the
    /// state, so that case is an error.
    async fn find_bootstrap_stack(&self) -> Result<Option<Stack>> {
        let summaries = self.ops.list_stacks(&ACTIVE_STATUSES).await?;

        let mut matches = Vec::new();
        for summary in summaries {
            let Some(stack) = self.ops.describe_stack(&summary.name).await? else {
                // Deleted between list and describe
                continue;
            };
            if stack
                .tags
                .get(BOOTSTRAP_TAG_KEY)
                .is_some_and(|value| value == BOOTSTRAP_TAG_VALUE)
            {
                matches.push(stack);
            }
        }

        if matches.len() > 1 {
            let names: Vec<&str> = matches.iter().map(|s| s.name.as_str()).collect();
            return Err(CloudError::AmbiguousBootstrap(names.join(", ")));
        }
        Ok(matches.pop())
    }

    fn bucket_name(stack: &Stack) -> Result<String> {
        stack
            .outputs
            .get(BUCKET_NAME_OUTPUT)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| CloudError::MissingOutput(BUCKET_NAME_OUTPUT.to_string()))
    }
}

#[async_trait]
impl<C: StackOps> BackendProvider for AwsBackendService<C> {
    fn name(&self) -> &str {
        "aws"
    }

    async fn ensure_backend(&self, name_prefix: &str) -> Result<String> {
        if let Some(existing) = self.find_bootstrap_stack().await? {
            tracing::info!(stack = %existing.name, "backend already bootstrapped, nothing to do");
            return Self::bucket_name(&existing);
        }

        let request = template::render(name_prefix)?;
        self.ops.create_stack(&request).await?;
        tracing::info!(stack = STACK_NAME, "stack creation submitted, waiting for completion");

        self.waiter.wait(STACK_NAME, self.max_wait).await?;

        let stack = self
            .ops
            .describe_stack(STACK_NAME)
            .await?
            .ok_or_else(|| CloudError::StackNotFound(STACK_NAME.to_string()))?;
        Self::bucket_name(&stack)
    }

    async fn show_backend(&self) -> Result<String> {
        let stack = self
            .find_bootstrap_stack()
            .await?
            .ok_or(CloudError::NotBootstrapped)?;
        Self::bucket_name(&stack)
    }
}
