//! Prediction workflows for the disaster-risk dashboards.
//!
//! Each workflow is a plain struct that the UI (or a driver in [`driver`])
//! advances in two halves:
//!
//! 1. `begin_*` validates preconditions synchronously and returns a ticket
//!    carrying the request payload and the slot generation it was issued under.
//! 2. `finish_*` applies the backend outcome, but only if the ticket's
//!    generation is still current. Newer requests and `clear()` bump the
//!    generation, so late responses can never resurrect discarded state.
//!
//! Nothing here blocks or spawns; callers own the suspension points.

pub mod coordinates;
pub mod cyclone;
pub mod driver;
pub mod flood;
pub mod geolocation;
pub mod hazard;
pub mod slot;

pub use coordinates::{CoordinateList, MIN_TRACK_POINTS};
pub use cyclone::{
    CombinedTickets, CycloneError, CyclonePhase, CycloneWorkflow, Gating, IntensityTicket,
    TrackResult, TrackTicket,
};
pub use driver::WorkflowCell;
pub use flood::{FloodError, FloodPhase, FloodTicket, FloodWorkflow, LocateTicket, StationsTicket};
pub use geolocation::{FixedGeolocator, GeolocationError, Geolocator};
pub use hazard::{
    EarthquakeForm, EarthquakeTicket, EarthquakeWorkflow, HazardError, LandslideTicket,
    LandslideWorkflow,
};
pub use slot::{Generation, RequestSlot};
