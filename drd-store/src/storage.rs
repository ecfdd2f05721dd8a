//! Durable backends for the saved-path collection.
//!
//! The store hands a backend one serialized JSON array at a time; backends do
//! not interpret it.

use crate::StoreError;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

/// Key under which the collection is kept.
pub const STORAGE_KEY: &str = "cyclone_saved_paths";

/// Read/write port for the serialized collection.
pub trait PathStorage {
    /// `Ok(None)` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&self, contents: &str) -> Result<(), StoreError>;
}

/// In-memory backend. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    contents: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        let storage = Self::default();
        *storage.contents.borrow_mut() = Some(contents.to_string());
        storage
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Make subsequent writes fail, as a full quota would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl PathStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Storage("write refused".to_string()));
        }
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

/// One JSON file on disk, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PathStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| StoreError::Storage(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Storage(e.to_string()))
    }
}

/// `window.localStorage`, under [`STORAGE_KEY`].
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    pub fn new() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
        }
    }

    fn local_storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Storage("localStorage unavailable".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for BrowserStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl PathStorage for BrowserStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Self::local_storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Storage(format!("{:?}", e)))
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        Self::local_storage()?
            .set_item(&self.key, contents)
            .map_err(|e| StoreError::Storage(format!("{:?}", e)))
    }
}
