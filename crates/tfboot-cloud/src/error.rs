//! Cloud provider error types

use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("unsupported cloud \"{0}\"")]
    UnsupportedCloud(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Stack already exists: {0}")]
    AlreadyExists(String),

    #[error("Stack not found: {0}")]
    StackNotFound(String),

    #[error("No backend has been bootstrapped yet. Run `tfboot init` first")]
    NotBootstrapped,

    #[error("Found more than one bootstrap stack ({0}); refusing to pick one")]
    AmbiguousBootstrap(String),

    #[error("Stack creation failed with status {status}")]
    ProvisionFailed { status: String },

    #[error("Timed out after {0:?} waiting for stack creation")]
    WaitTimeout(std::time::Duration),

    #[error("Output {0} missing from stack outputs")]
    MissingOutput(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
