//! Layout persistence on top of a storage backend.
//!
//! The editor writes the whole layout after every completed change; the
//! store keeps track of the key and how many writes went through.

use crate::document::LayoutDocument;
use crate::persistence::{restore_layout, serialize_layout};
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use super::FileStorage;
#[cfg(target_arch = "wasm32")]
use super::LocalStorage;

/// Storage used by default on the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;
#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;

/// Create the default storage backend for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    FileStorage::default_location().map(Arc::new)
}

/// Create the default storage backend for the current platform.
#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(LocalStorage::new()))
}

/// Reads and writes one layout blob under a fixed key.
pub struct LayoutStore<S: Storage> {
    storage: Arc<S>,
    key: String,
    save_count: u64,
}

impl<S: Storage> LayoutStore<S> {
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            save_count: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Number of successful saves since the store was created.
    pub fn save_count(&self) -> u64 {
        self.save_count
    }

    /// Overwrite the stored blob with the current layer list.
    pub fn save(&mut self, document: &LayoutDocument) -> StorageResult<()> {
        let json = serialize_layout(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set_item(&self.key, &json)?;
        self.save_count += 1;
        log::debug!("Saved {} elements to '{}'", document.len(), self.key);
        Ok(())
    }

    /// Append the stored layout to `document`. A missing, unreadable, or
    /// malformed blob restores nothing. Returns the number of elements
    /// restored.
    pub fn load_into(&self, document: &mut LayoutDocument) -> usize {
        match self.storage.get_item(&self.key) {
            Ok(Some(json)) => {
                let restored = restore_layout(document, &json);
                log::info!("Restored {} elements from '{}'", restored, self.key);
                restored
            }
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Failed to read layout '{}': {}", self.key, e);
                0
            }
        }
    }

    /// Remove the stored blob.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove_item(&self.key)
    }
}
