//! CloudFormation stack operations
//!
//! Wraps the three CloudFormation calls tfboot needs behind the [`StackOps`]
//! trait so the orchestration and wait logic can run against a scripted
//! fake in tests. The domain types carry only what the rest of the crate
//! reads, with tags and outputs flattened into plain maps.

use async_trait::async_trait;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_cloudformation::types::{self, Parameter, Tag};
use std::collections::HashMap;
use tfboot_cloud::{CloudError, Result};

/// Stack status as reported by CloudFormation.
///
/// Only the statuses the bootstrap flow inspects get their own variant;
/// everything else is carried verbatim in `Other` and keeps the wait loop
/// polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackStatus {
    CreateInProgress,
    CreateComplete,
    CreateFailed,
    RollbackComplete,
    UpdateComplete,
    UpdateRollbackComplete,
    Other(String),
}

impl StackStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "CREATE_IN_PROGRESS" => StackStatus::CreateInProgress,
            "CREATE_COMPLETE" => StackStatus::CreateComplete,
            "CREATE_FAILED" => StackStatus::CreateFailed,
            "ROLLBACK_COMPLETE" => StackStatus::RollbackComplete,
            "UPDATE_COMPLETE" => StackStatus::UpdateComplete,
            "UPDATE_ROLLBACK_COMPLETE" => StackStatus::UpdateRollbackComplete,
            other => StackStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StackStatus::CreateInProgress => "CREATE_IN_PROGRESS",
            StackStatus::CreateComplete => "CREATE_COMPLETE",
            StackStatus::CreateFailed => "CREATE_FAILED",
            StackStatus::RollbackComplete => "ROLLBACK_COMPLETE",
            StackStatus::UpdateComplete => "UPDATE_COMPLETE",
            StackStatus::UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
            StackStatus::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for StackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entry returned by the list-stacks call
#[derive(Debug, Clone, PartialEq)]
pub struct StackSummary {
    pub name: String,
    pub status: StackStatus,
}

/// Full stack description
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    pub name: String,
    pub status: StackStatus,
    pub tags: HashMap<String, String>,
    pub outputs: HashMap<String, String>,
}

/// Everything a create-stack submission carries
#[derive(Debug, Clone)]
pub struct StackRequest {
    pub stack_name: String,
    pub template_body: String,
    pub tags: HashMap<String, String>,
    pub parameters: HashMap<String, String>,
}

/// The three remote stack operations the bootstrap flow is built on.
///
/// Every call is a network round-trip with at-least-once semantics on the
/// remote side; nothing here retries, and duplicate creates are caught by
/// CloudFormation's own stack-name uniqueness.
#[async_trait]
pub trait StackOps: Send + Sync {
    /// List stacks currently in one of the given statuses.
    async fn list_stacks(&self, statuses: &[StackStatus]) -> Result<Vec<StackSummary>>;

    /// Describe a stack by name. `None` means the stack does not exist.
    async fn describe_stack(&self, name: &str) -> Result<Option<Stack>>;

    /// Submit a create-stack request. Returns as soon as CloudFormation
    /// acknowledges the submission; creation itself is asynchronous.
    async fn create_stack(&self, request: &StackRequest) -> Result<()>;
}

/// Thin wrapper over the CloudFormation SDK client
pub struct CloudFormation {
    client: aws_sdk_cloudformation::Client,
}

impl CloudFormation {
    pub fn new(client: aws_sdk_cloudformation::Client) -> Self {
        Self { client }
    }

    /// Connect to CloudFormation in the given region using the default
    /// credential chain.
    pub async fn from_region(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::new(aws_sdk_cloudformation::Client::new(&config))
    }
}

#[async_trait]
impl StackOps for CloudFormation {
    async fn list_stacks(&self, statuses: &[StackStatus]) -> Result<Vec<StackSummary>> {
        let filter: Vec<types::StackStatus> = statuses
            .iter()
            .map(|status| types::StackStatus::from(status.as_str()))
            .collect();

        let mut summaries = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let response = self
                .client
                .list_stacks()
                .set_stack_status_filter(Some(filter.clone()))
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|err| CloudError::ApiError(format!("{}", DisplayErrorContext(&err))))?;

            for summary in response.stack_summaries() {
                let Some(name) = summary.stack_name() else {
                    continue;
                };
                let status = summary
                    .stack_status()
                    .map(|s| StackStatus::from_raw(s.as_str()))
                    .unwrap_or(StackStatus::Other(String::new()));
                summaries.push(StackSummary {
                    name: name.to_string(),
                    status,
                });
            }

            next_token = response.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        Ok(summaries)
    }

    async fn describe_stack(&self, name: &str) -> Result<Option<Stack>> {
        tracing::debug!(stack = name, "describing stack");

        let response = match self.client.describe_stacks().stack_name(name).send().await {
            Ok(response) => response,
            Err(err) => {
                let context = format!("{}", DisplayErrorContext(&err));
                // CloudFormation reports a missing stack as a generic
                // validation error, distinguishable only by message.
                let service_err = err.into_service_error();
                if service_err
                    .message()
                    .is_some_and(|m| m.contains("does not exist"))
                {
                    return Ok(None);
                }
                return Err(CloudError::ApiError(context));
            }
        };

        let Some(stack) = response.stacks().first() else {
            return Ok(None);
        };

        Ok(Some(Stack {
            name: stack.stack_name().unwrap_or(name).to_string(),
            status: stack
                .stack_status()
                .map(|s| StackStatus::from_raw(s.as_str()))
                .unwrap_or(StackStatus::Other(String::new())),
            tags: stack
                .tags()
                .iter()
                .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
                .collect(),
            outputs: stack
                .outputs()
                .iter()
                .filter_map(|output| {
                    Some((
                        output.output_key()?.to_string(),
                        output.output_value()?.to_string(),
                    ))
                })
                .collect(),
        }))
    }

    async fn create_stack(&self, request: &StackRequest) -> Result<()> {
        let mut builder = self
            .client
            .create_stack()
            .stack_name(&request.stack_name)
            .template_body(&request.template_body);

        for (key, value) in &request.tags {
            builder = builder.tags(Tag::builder().key(key).value(value).build());
        }
        for (key, value) in &request.parameters {
            builder = builder.parameters(
                Parameter::builder()
                    .parameter_key(key)
                    .parameter_value(value)
                    .build(),
            );
        }

        if let Err(err) = builder.send().await {
            let context = format!("{}", DisplayErrorContext(&err));
            if err.into_service_error().is_already_exists_exception() {
                return Err(CloudError::AlreadyExists(request.stack_name.clone()));
            }
            return Err(CloudError::ApiError(context));
        }

        tracing::debug!(stack = %request.stack_name, "stack creation submitted");
        Ok(())
    }
}
