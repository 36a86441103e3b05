//! AWS backend provider for tfboot
//!
//! This crate implements the BackendProvider trait on top of AWS
//! CloudFormation: it provisions a versioned S3 bucket stack to hold
//! Terraform state and reads the bucket name back from the stack outputs.
//!
//! # Requirements
//!
//! - AWS credentials resolvable through the default credential chain
//!   (environment, shared config, instance profile, ...)
//!
//! # Example
//!
//! ```ignore
//! use tfboot_cloud::BackendProvider;
//! use tfboot_cloud_aws::AwsBackendService;
//!
//! let service = AwsBackendService::new("eu-central-1").await;
//!
//! // Idempotent: returns the existing bucket if one was bootstrapped before
//! let bucket = service.ensure_backend("acme").await?;
//! println!("state bucket: {bucket}");
//! ```

pub mod backend;
pub mod client;
pub mod template;
pub mod waiter;

pub use backend::AwsBackendService;
pub use client::{CloudFormation, Stack, StackOps, StackRequest, StackStatus, StackSummary};
pub use waiter::StackWaiter;
