//! Backend provider trait definition

use crate::error::{CloudError, Result};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Cloud selected on the command line.
///
/// Parsing accepts any casing. Only AWS has a provider implementation
/// today; selecting `gcp` or `azure` fails at provider construction
/// instead of silently doing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cloud {
    Aws,
    Gcp,
    Azure,
}

impl FromStr for Cloud {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aws" => Ok(Cloud::Aws),
            "gcp" => Ok(Cloud::Gcp),
            "azure" => Ok(Cloud::Azure),
            other => Err(CloudError::UnsupportedCloud(other.to_string())),
        }
    }
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cloud::Aws => write!(f, "aws"),
            Cloud::Gcp => write!(f, "gcp"),
            Cloud::Azure => write!(f, "azure"),
        }
    }
}

/// Terraform state backend provider abstraction
///
/// Each provider crate implements this trait so the CLI can bootstrap and
/// inspect the state backend without knowing which cloud backs it.
///
/// Both operations assume at most one tfboot instance runs against a given
/// account/region at a time; there is no lock, the remote provider's own
/// name-uniqueness constraint is the only safety net for racing creates.
#[async_trait]
pub trait BackendProvider: Send + Sync {
    /// Returns the provider name (e.g., "aws")
    fn name(&self) -> &str;

    /// Ensure the state backend exists and return its bucket name.
    ///
    /// Idempotent: if a backend was already bootstrapped, returns the
    /// existing bucket name without touching the account.
    async fn ensure_backend(&self, name_prefix: &str) -> Result<String>;

    /// Return the bucket name of an already bootstrapped backend.
    ///
    /// Never mutates; fails with [`CloudError::NotBootstrapped`] when no
    /// backend exists.
    async fn show_backend(&self) -> Result<String>;
}
