//! Configuration validation errors
//!
//! These are the only errors that abort a run. Everything that goes wrong
//! while listing is recorded per unit in the inventory instead.

use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// threads is zero
    #[error("threads must be at least 1, got {0}")]
    InvalidThreads(usize),

    /// Only one half of a static key pair was given
    #[error("--access-key-id and --secret-access-key must be given together")]
    PartialCredentials,

    /// The region argument matched no known region
    #[error("no valid regions selected from '{0}'")]
    NoValidRegions(String),

    /// The resource argument matched no supported resource type
    #[error("no valid resource types selected from '{0}'")]
    NoValidResources(String),

    /// The output argument matched no supported output
    #[error("no valid outputs selected from '{0}' (expected 'file' and/or 'stdout')")]
    NoValidOutputs(String),

    /// shutdown timeout is zero
    #[error("shutdown timeout must be greater than 0")]
    InvalidShutdownTimeout,
}
