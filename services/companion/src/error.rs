//! services/companion/src/error.rs
//!
//! Defines the primary error type for the companion service.

use crate::config::ConfigError;
use recovery_companion_core::EngineError;

/// The primary error type for the `companion` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the core engine.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
