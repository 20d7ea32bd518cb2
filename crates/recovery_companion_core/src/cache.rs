//! crates/recovery_companion_core/src/cache.rs
//!
//! Decides whether previously generated content is still valid and stores
//! freshly generated documents, backed by the durable `ContentStore` slots.
//! Staleness is a pure function of a caller-supplied `now`; no clock thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{GuideDocument, ResourceDocument};
use crate::error::EngineResult;
use crate::ports::ContentStore;

/// Cache over the two content-document slots.
///
/// `get_*` misses when no document is stored, when the stored topic differs
/// from the requested one (exact string comparison, no normalization), or
/// when the document is stale. `put_*` is last-write-wins; merging favorite
/// flags happens before `put_guide`, never at this layer.
///
/// Each slot carries a monotonically increasing epoch so that a late result
/// from an abandoned generation request is discarded instead of overwriting
/// a newer entry: callers capture a ticket before awaiting the service and
/// `put_*` is honored only while the epoch is unchanged. A forced refresh
/// bumps the epoch, superseding any request still in flight.
pub struct ContentCache {
    store: Arc<dyn ContentStore>,
    guide_epoch: AtomicU64,
    resource_epoch: AtomicU64,
}

impl ContentCache {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            guide_epoch: AtomicU64::new(0),
            resource_epoch: AtomicU64::new(0),
        }
    }

    pub async fn get_guide(
        &self,
        topic: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<Option<GuideDocument>> {
        let Some(document) = self.store.load_guide().await? else {
            return Ok(None);
        };
        if document.topic != topic || document.is_stale(now) {
            return Ok(None);
        }
        Ok(Some(document))
    }

    pub async fn get_resources(
        &self,
        topic: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<Option<ResourceDocument>> {
        let Some(document) = self.store.load_resources().await? else {
            return Ok(None);
        };
        if document.topic != topic || document.is_stale(now) {
            return Ok(None);
        }
        Ok(Some(document))
    }

    /// Registers a guide generation request and returns its ticket.
    /// `force` supersedes any request already in flight.
    pub fn begin_guide_generation(&self, force: bool) -> u64 {
        if force {
            self.guide_epoch.fetch_add(1, Ordering::AcqRel) + 1
        } else {
            self.guide_epoch.load(Ordering::Acquire)
        }
    }

    pub fn begin_resource_generation(&self, force: bool) -> u64 {
        if force {
            self.resource_epoch.fetch_add(1, Ordering::AcqRel) + 1
        } else {
            self.resource_epoch.load(Ordering::Acquire)
        }
    }

    /// Stores a freshly generated guide unless its request was superseded.
    /// Returns whether the document was actually stored.
    pub async fn put_guide(&self, document: &GuideDocument, ticket: u64) -> EngineResult<bool> {
        if self.guide_epoch.load(Ordering::Acquire) != ticket {
            tracing::debug!(topic = %document.topic, "discarding late guide generation result");
            return Ok(false);
        }
        self.store.save_guide(document).await?;
        Ok(true)
    }

    pub async fn put_resources(
        &self,
        document: &ResourceDocument,
        ticket: u64,
    ) -> EngineResult<bool> {
        if self.resource_epoch.load(Ordering::Acquire) != ticket {
            tracing::debug!(topic = %document.topic, "discarding late resource generation result");
            return Ok(false);
        }
        self.store.save_resources(document).await?;
        Ok(true)
    }

    /// Drops both cached documents and supersedes any in-flight requests.
    pub async fn invalidate(&self) -> EngineResult<()> {
        self.guide_epoch.fetch_add(1, Ordering::AcqRel);
        self.resource_epoch.fetch_add(1, Ordering::AcqRel);
        self.store.clear_guide().await?;
        self.store.clear_resources().await?;
        Ok(())
    }
}
