//! Browser `localStorage` backend for WebAssembly.

use super::{Storage, StorageError, StorageResult};

/// Storage backed by `window.localStorage`.
///
/// The handle is looked up on each call, so a storage instance stays valid
/// for the lifetime of the page.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn handle(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.handle()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.handle()?
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.handle()?
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to delete {}: {:?}", key, e)))
    }
}
