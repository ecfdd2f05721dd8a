//! Declarative map scenes and the adapter that applies them to a map.
//!
//! Scene builders in [`scene`] are pure functions of workflow state. A
//! [`MapSynchronizer`] owns every layer it adds to a [`MapSurface`] and
//! removes them all before drawing the next scene, leaving tile layers and
//! anything else on the surface alone. [`leaflet`] is the browser surface.

pub mod leaflet;
pub mod scene;
pub mod style;
pub mod surface;
pub mod sync;

pub use scene::{
    earthquake_scene, parse_station_tag, station_scene, station_tag, track_scene, Layer, Scene,
    StationView, TrackView,
};
pub use surface::{Bounds, LayerId, MapSurface, MarkerSpec, MarkerStyle, PolylineSpec, Viewport};
pub use sync::MapSynchronizer;

use drd_geo::Coordinate;

/// Fallback view over the Indian subcontinent and surrounding seas.
pub const DEFAULT_BOUNDS: Bounds = Bounds {
    south_west: Coordinate {
        latitude: 8.0,
        longitude: 68.0,
    },
    north_east: Coordinate {
        latitude: 35.5,
        longitude: 97.0,
    },
};

/// Pixels kept free around fitted bounds.
pub const FIT_PADDING: u32 = 50;

/// Zoom for an explicit center with no track.
pub const DEFAULT_ZOOM: u8 = 6;

/// Zoom for focusing a single station.
pub const FOCUS_ZOOM: u8 = 8;

/// Wait before opening a popup after a fly-to, so the pan can settle.
pub const POPUP_DELAY_MS: u32 = 600;

/// Two markers closer than this (in degrees) are the same place.
pub const POSITION_TOLERANCE: f64 = 1e-4;
