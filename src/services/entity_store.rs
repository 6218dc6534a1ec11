//! Whole-collection persistence for JSON entity lists.
//!
//! Every mutation reads the complete collection stored at a key, changes it in
//! memory and writes the complete collection back. There is no locking: two
//! interleaved load/save cycles on the same key are last-writer-wins.

use std::sync::Arc;

use thiserror::Error;

use super::storage::KeyValueStore;
use crate::models::Entity;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend failed: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("Stored value at '{key}' is not a valid collection: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize collection for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where `append` inserts the new entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Front,
    Back,
}

#[derive(Clone)]
pub struct EntityStore {
    backend: Arc<dyn KeyValueStore>,
}

impl EntityStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Absent key reads as an empty collection.
    pub async fn load_collection<E: Entity>(&self, key: &str) -> Result<Vec<E>, StoreError> {
        let raw = self.backend.get_item(key).await?;
        match raw {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// `load_collection` for read paths that must not fail: an unreadable or
    /// corrupt value is logged and treated as empty.
    pub async fn load_or_empty<E: Entity>(&self, key: &str) -> Vec<E> {
        match self.load_collection(key).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Treating '{}' as empty: {}", key, e);
                Vec::new()
            }
        }
    }

    // Mutations start from an empty list when the stored value is corrupt, but
    // a failed read aborts before anything is written.
    async fn load_for_write<E: Entity>(&self, key: &str) -> Result<Vec<E>, StoreError> {
        match self.load_collection(key).await {
            Err(StoreError::Corrupt { source, .. }) => {
                tracing::warn!("Overwriting corrupt collection '{}': {}", key, source);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    pub async fn save_collection<E: Entity>(
        &self,
        key: &str,
        items: &[E],
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(items).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        if let Err(e) = self.backend.set_item(key, &json).await {
            tracing::error!("Failed to write '{}': {}", key, e);
            return Err(StoreError::Backend(e));
        }
        tracing::debug!("Saved {} entries to '{}'", items.len(), key);
        Ok(())
    }

    /// Returns the collection as written.
    pub async fn append<E: Entity>(
        &self,
        key: &str,
        entity: E,
        placement: Placement,
    ) -> Result<Vec<E>, StoreError> {
        let mut items: Vec<E> = self.load_for_write(key).await?;
        match placement {
            Placement::Front => items.insert(0, entity),
            Placement::Back => items.push(entity),
        }
        self.save_collection(key, &items).await?;
        Ok(items)
    }

    /// Idempotent: `Ok(false)` when nothing matched.
    pub async fn remove_by_id<E: Entity>(&self, key: &str, id: &str) -> Result<bool, StoreError> {
        let items: Vec<E> = self.load_for_write(key).await?;
        let before = items.len();
        let remaining: Vec<E> = items.into_iter().filter(|e| e.id() != id).collect();
        let removed = remaining.len() != before;
        self.save_collection(key, &remaining).await?;
        Ok(removed)
    }

    /// Apply `patch` to the entry with the given id. Returns the patched
    /// entity, or `None` when no entry matched.
    pub async fn update_by_id<E, F>(
        &self,
        key: &str,
        id: &str,
        patch: F,
    ) -> Result<Option<E>, StoreError>
    where
        E: Entity,
        F: FnOnce(&mut E),
    {
        let mut items: Vec<E> = self.load_for_write(key).await?;
        let updated = match items.iter_mut().find(|e| e.id() == id) {
            Some(entry) => {
                patch(entry);
                Some(entry.clone())
            }
            None => None,
        };
        self.save_collection(key, &items).await?;
        Ok(updated)
    }

    pub async fn find_by_id<E: Entity>(&self, key: &str, id: &str) -> Option<E> {
        self.load_or_empty::<E>(key)
            .await
            .into_iter()
            .find(|e| e.id() == id)
    }
}
