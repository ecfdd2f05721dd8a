//! Persistent named cyclone paths.
//!
//! A [`NamedPathStore`] is opened once at start-up over a [`PathStorage`]
//! backend and then shared by cloning the handle (`Rc` inside, single
//! threaded like the rest of the UI). The backend is read once on open and
//! rewritten in full after every mutation; if that write fails the mutation is
//! rolled back so memory and storage never disagree.
//!
//! # Example
//!
//! ```rust
//! use drd_geo::Coordinate;
//! use drd_store::{MemoryStorage, NamedPathStore};
//!
//! let store = NamedPathStore::open(MemoryStorage::new());
//! let coords = vec![
//!     Coordinate::new(12.0, 85.0),
//!     Coordinate::new(13.0, 84.5),
//!     Coordinate::new(14.2, 83.9),
//! ];
//! let saved = store.save("Cyclone Fani", &coords).unwrap();
//! assert_eq!(store.load(saved.id).unwrap(), coords);
//! ```

pub mod storage;

use chrono::{Local, Utc};
use drd_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

pub use storage::{JsonFileStorage, MemoryStorage, PathStorage, STORAGE_KEY};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;

/// Fewest points a path may be saved with.
pub const MIN_SAVED_POINTS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Name is blank after trimming
    #[error("Please enter a name for this path")]
    EmptyName,

    /// Fewer than three points
    #[error("At least 3 coordinates required to save")]
    InsufficientPoints { found: usize },

    /// The durable backend refused a read or write
    #[error("Saved paths storage failed: {0}")]
    Storage(String),
}

/// A named track kept across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPath {
    /// Creation time in epoch milliseconds, bumped when needed to stay unique.
    pub id: i64,
    pub name: String,
    pub coordinates: Vec<Coordinate>,
    /// Local creation time for display.
    pub timestamp: String,
}

struct Inner {
    storage: Box<dyn PathStorage>,
    paths: Vec<SavedPath>,
    last_id: i64,
}

impl Inner {
    fn persist(&self) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(&self.paths).map_err(|e| StoreError::Storage(e.to_string()))?;
        self.storage.write(&json)
    }
}

/// Shared handle to the saved-path collection.
#[derive(Clone)]
pub struct NamedPathStore {
    inner: Rc<RefCell<Inner>>,
}

impl NamedPathStore {
    /// Open the store, reading whatever the backend holds.
    ///
    /// Unreadable or corrupt contents are logged and treated as empty.
    pub fn open(storage: impl PathStorage + 'static) -> Self {
        let paths = match storage.read() {
            Ok(Some(json)) => serde_json::from_str::<Vec<SavedPath>>(&json).unwrap_or_else(|e| {
                log::warn!("discarding corrupt saved paths: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("could not read saved paths: {}", e);
                Vec::new()
            }
        };
        log::info!("opened saved-path store with {} paths", paths.len());
        let last_id = paths.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            inner: Rc::new(RefCell::new(Inner {
                storage: Box::new(storage),
                paths,
                last_id,
            })),
        }
    }

    /// Save `coordinates` under `name` and persist.
    pub fn save(&self, name: &str, coordinates: &[Coordinate]) -> Result<SavedPath, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if coordinates.len() < MIN_SAVED_POINTS {
            return Err(StoreError::InsufficientPoints {
                found: coordinates.len(),
            });
        }

        let mut inner = self.inner.borrow_mut();
        let id = Utc::now().timestamp_millis().max(inner.last_id + 1);
        let path = SavedPath {
            id,
            name: name.to_string(),
            coordinates: coordinates.to_vec(),
            timestamp: Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        };
        inner.paths.push(path.clone());
        if let Err(e) = inner.persist() {
            inner.paths.pop();
            return Err(e);
        }
        inner.last_id = id;
        log::debug!("saved path {} ({} points)", path.name, path.coordinates.len());
        Ok(path)
    }

    /// Copy of the coordinates saved under `id`.
    pub fn load(&self, id: i64) -> Option<Vec<Coordinate>> {
        self.inner
            .borrow()
            .paths
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.coordinates.clone())
    }

    /// Remove the path with `id`. Unknown ids are a no-op.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        let Some(index) = inner.paths.iter().position(|p| p.id == id) else {
            return Ok(());
        };
        let removed = inner.paths.remove(index);
        if let Err(e) = inner.persist() {
            inner.paths.insert(index, removed);
            return Err(e);
        }
        Ok(())
    }

    /// All saved paths in insertion order.
    pub fn list(&self) -> Vec<SavedPath> {
        self.inner.borrow().paths.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
