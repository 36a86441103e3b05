//! Cloud provider abstraction for tfboot
//!
//! This crate defines the provider-independent surface of tfboot: the
//! [`Cloud`] selector, the [`BackendProvider`] trait implemented by each
//! provider crate, and the shared [`CloudError`] taxonomy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   tfboot CLI                     │
//! │               (tfboot init/show)                 │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                tfboot-cloud                      │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │         Provider Abstraction              │   │
//! │  │  trait BackendProvider { ... }            │   │
//! │  └──────────────────────────────────────────┘   │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │  aws provider  │
//! │ (CloudFormation)│
//! └───────────────┘
//! ```

pub mod error;
pub mod provider;

// Re-exports
pub use error::{CloudError, Result};
pub use provider::{BackendProvider, Cloud};
