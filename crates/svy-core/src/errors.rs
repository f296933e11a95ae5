//! Cross-cutting error types for Surveyor.
//!
//! Domain-specific errors (`ClientError`, `ReportError`, `ConfigError`) live
//! in their own crates and converge in `svy-cli` through `anyhow`.

use thiserror::Error;

/// Errors that can be raised while building or checking domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The study definition breaks one or more rules.
    #[error("invalid study definition: {}", .0.join("; "))]
    InvalidDefinition(Vec<String>),

    /// A status transition was attempted that is not allowed.
    #[error("invalid state transition for study {id}: {from} -> {to}")]
    InvalidTransition { id: String, from: String, to: String },
}
