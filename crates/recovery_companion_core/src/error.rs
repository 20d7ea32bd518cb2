//! crates/recovery_companion_core/src/error.rs
//!
//! Defines the failure taxonomy for the engine. Parsing an empty section
//! list is NOT an error (see `sections`); the engine never retries a failed
//! service call on its own.

/// The primary error type for all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The generative service rejected the configured credentials.
    /// Fatal; surfaced to the user without a retry affordance.
    #[error("the generative service rejected the configured credentials")]
    Unauthorized,

    /// A transient transport failure reaching the generative service.
    /// Surfaced with a retry affordance; never retried automatically.
    #[error("failed to reach the generative service: {0}")]
    Network(String),

    /// The generative service returned no usable text.
    #[error("the generative service returned no usable text")]
    EmptyResponse,

    /// Generated content failed strict schema validation. Callers must treat
    /// this as "no content available", never as partial content.
    #[error("generated content did not match the expected format: {0}")]
    ContentFormat(String),

    /// A generation call was made before an addiction topic was configured.
    /// A precondition violation, surfaced as a configuration prompt.
    #[error("no addiction topic has been configured")]
    EmptyTopic,

    /// The persistence layer failed to load or save a document.
    #[error("storage error: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;
