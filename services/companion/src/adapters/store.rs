//! services/companion/src/adapters/store.rs
//!
//! This module contains the JSON-file adapter for the persistence boundary.
//! It implements the `ContentStore` port from the `core` crate with three
//! key-value slots under one data directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use recovery_companion_core::{
    ContentStore, EngineError, EngineResult, FavoriteSet, GuideDocument, ResourceDocument,
};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

const GUIDE_FILE: &str = "guide.json";
const RESOURCES_FILE: &str = "resources.json";
const FAVORITES_FILE: &str = "favorites.json";

/// Stores each slot as a JSON file under `dir`. Writes are serialized
/// through one mutex; the core keeps the single-writer discipline anyway,
/// so the lock only guards against misuse.
pub struct JsonFileStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    fn slot(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

async fn read_slot<T: DeserializeOwned>(path: &Path) -> EngineResult<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| EngineError::Storage(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(EngineError::Storage(format!("{}: {e}", path.display()))),
    }
}

async fn write_slot<T: Serialize>(dir: &Path, path: &Path, value: &T) -> EngineResult<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| EngineError::Storage(format!("{}: {e}", dir.display())))?;
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| EngineError::Storage(e.to_string()))?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| EngineError::Storage(format!("{}: {e}", path.display())))
}

async fn clear_slot(path: &Path) -> EngineResult<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(EngineError::Storage(format!("{}: {e}", path.display()))),
    }
}

#[async_trait]
impl ContentStore for JsonFileStore {
    async fn load_guide(&self) -> EngineResult<Option<GuideDocument>> {
        let _guard = self.lock.lock().await;
        read_slot(&self.slot(GUIDE_FILE)).await
    }

    async fn save_guide(&self, document: &GuideDocument) -> EngineResult<()> {
        let _guard = self.lock.lock().await;
        write_slot(&self.dir, &self.slot(GUIDE_FILE), document).await
    }

    async fn clear_guide(&self) -> EngineResult<()> {
        let _guard = self.lock.lock().await;
        clear_slot(&self.slot(GUIDE_FILE)).await
    }

    async fn load_resources(&self) -> EngineResult<Option<ResourceDocument>> {
        let _guard = self.lock.lock().await;
        read_slot(&self.slot(RESOURCES_FILE)).await
    }

    async fn save_resources(&self, document: &ResourceDocument) -> EngineResult<()> {
        let _guard = self.lock.lock().await;
        write_slot(&self.dir, &self.slot(RESOURCES_FILE), document).await
    }

    async fn clear_resources(&self) -> EngineResult<()> {
        let _guard = self.lock.lock().await;
        clear_slot(&self.slot(RESOURCES_FILE)).await
    }

    async fn load_favorites(&self) -> EngineResult<FavoriteSet> {
        let _guard = self.lock.lock().await;
        Ok(read_slot(&self.slot(FAVORITES_FILE)).await?.unwrap_or_default())
    }

    async fn save_favorites(&self, favorites: &FavoriteSet) -> EngineResult<()> {
        let _guard = self.lock.lock().await;
        write_slot(&self.dir, &self.slot(FAVORITES_FILE), favorites).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use recovery_companion_core::GuideSection;
    use uuid::Uuid;

    fn temp_store() -> (JsonFileStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("companion-store-{}", Uuid::new_v4()));
        (JsonFileStore::new(&dir), dir)
    }

    #[tokio::test]
    async fn guide_round_trips_through_the_filesystem() {
        let (store, dir) = temp_store();
        let doc = GuideDocument {
            topic: "smoking".to_string(),
            sections: vec![GuideSection::new("A", "x\ny")],
            generated_at: Utc::now(),
        };

        store.save_guide(&doc).await.unwrap();
        assert_eq!(store.load_guide().await.unwrap(), Some(doc));

        store.clear_guide().await.unwrap();
        assert_eq!(store.load_guide().await.unwrap(), None);

        tokio::fs::remove_dir_all(dir).await.ok();
    }

    #[tokio::test]
    async fn favorites_default_to_empty_and_round_trip() {
        let (store, dir) = temp_store();
        assert!(store.load_favorites().await.unwrap().is_empty());

        let favorites: FavoriteSet = ["Coping Strategies".to_string()].into_iter().collect();
        store.save_favorites(&favorites).await.unwrap();
        assert_eq!(store.load_favorites().await.unwrap(), favorites);

        tokio::fs::remove_dir_all(dir).await.ok();
    }

    #[tokio::test]
    async fn missing_files_read_as_absent() {
        let (store, _) = temp_store();
        assert_eq!(store.load_guide().await.unwrap(), None);
        assert_eq!(store.load_resources().await.unwrap(), None);
        // Clearing a slot that was never written is not an error.
        store.clear_guide().await.unwrap();
    }
}
