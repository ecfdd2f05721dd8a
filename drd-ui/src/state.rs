//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals and is `Copy`, so handlers and
//! spawned tasks can capture it freely. `Services` holds the shared,
//! non-reactive collaborators (backend client and saved-path store) and is
//! provided as a second context.

use drd_api::{ApiConfig, HttpPredictionClient, PredictionService};
use drd_orchestrator::{
    CycloneWorkflow, EarthquakeWorkflow, FloodWorkflow, Gating, LandslideWorkflow,
};
use drd_store::{NamedPathStore, SavedPath};
use dioxus::prelude::*;
use std::rc::Rc;

/// Shared reactive state for all dashboard apps.
#[derive(Clone, Copy)]
pub struct AppState {
    pub cyclone: Signal<CycloneWorkflow>,
    pub flood: Signal<FloodWorkflow>,
    pub earthquake: Signal<EarthquakeWorkflow>,
    pub landslide: Signal<LandslideWorkflow>,
    /// Mirror of the saved-path store for rendering.
    pub saved_paths: Signal<Vec<SavedPath>>,
    /// Message from the saved-path panel (save/delete failures).
    pub store_error: Signal<Option<String>>,
}

impl AppState {
    pub fn new(gating: Gating) -> Self {
        Self {
            cyclone: Signal::new(CycloneWorkflow::new(gating)),
            flood: Signal::new(FloodWorkflow::new()),
            earthquake: Signal::new(EarthquakeWorkflow::new()),
            landslide: Signal::new(LandslideWorkflow::new()),
            saved_paths: Signal::new(Vec::new()),
            store_error: Signal::new(None),
        }
    }
}

/// Backend and persistence handles, created once at start-up.
#[derive(Clone)]
pub struct Services {
    pub backend: Rc<dyn PredictionService>,
    pub store: NamedPathStore,
}

impl Services {
    pub fn new(backend: Rc<dyn PredictionService>, store: NamedPathStore) -> Self {
        Self { backend, store }
    }

    /// HTTP backend from the compiled-in configuration plus browser storage.
    pub fn from_config(config: ApiConfig) -> Result<Self, drd_api::ApiError> {
        log::info!("prediction backend at {}", config.base_url);
        let client = HttpPredictionClient::new(config)?;
        Ok(Self::new(Rc::new(client), open_store()))
    }
}

#[cfg(target_arch = "wasm32")]
fn open_store() -> NamedPathStore {
    NamedPathStore::open(drd_store::BrowserStorage::new())
}

/// Native builds keep saved paths for the session only.
#[cfg(not(target_arch = "wasm32"))]
fn open_store() -> NamedPathStore {
    NamedPathStore::open(drd_store::MemoryStorage::new())
}
