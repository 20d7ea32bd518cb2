//! crates/recovery_companion_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the engine's boundaries.
//! These traits form the edge of the hexagonal architecture, keeping the
//! core independent of the concrete generative service and storage format.

use async_trait::async_trait;

use crate::domain::{FavoriteSet, GuideDocument, ResourceDocument};
use crate::error::EngineResult;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Boundary abstraction over the external text-generation service.
///
/// The engine never constructs or inspects service-specific wire formats;
/// it hands over a prompt string and receives raw text back. Retry policy
/// toward this boundary is a caller decision.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Issues a single prompt/response exchange and returns the raw text.
    async fn complete(&self, prompt: &str) -> EngineResult<String>;
}

/// Durable key-value slots for the cached documents and the favorite set.
///
/// The encoding is up to the adapter (JSON suffices), but a save followed
/// by a load must reproduce an equal value.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn load_guide(&self) -> EngineResult<Option<GuideDocument>>;
    async fn save_guide(&self, document: &GuideDocument) -> EngineResult<()>;
    async fn clear_guide(&self) -> EngineResult<()>;

    async fn load_resources(&self) -> EngineResult<Option<ResourceDocument>>;
    async fn save_resources(&self, document: &ResourceDocument) -> EngineResult<()>;
    async fn clear_resources(&self) -> EngineResult<()>;

    /// Loads the persisted favorite titles, defaulting to an empty set.
    async fn load_favorites(&self) -> EngineResult<FavoriteSet>;
    async fn save_favorites(&self, favorites: &FavoriteSet) -> EngineResult<()>;
}
