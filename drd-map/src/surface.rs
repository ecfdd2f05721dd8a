//! The imperative map port and the layer descriptions passed through it.

use drd_geo::Coordinate;
use serde::Serialize;

/// Handle to one layer added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for no points.
    pub fn enclosing(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            south_west: *first,
            north_east: *first,
        };
        for p in &points[1..] {
            bounds.south_west.latitude = bounds.south_west.latitude.min(p.latitude);
            bounds.south_west.longitude = bounds.south_west.longitude.min(p.longitude);
            bounds.north_east.latitude = bounds.north_east.latitude.max(p.latitude);
            bounds.north_east.longitude = bounds.north_east.longitude.max(p.longitude);
        }
        Some(bounds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Viewport {
    Fit { bounds: Bounds, padding: u32 },
    Center { center: Coordinate, zoom: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerStyle {
    /// The library's stock pin.
    Pin,
    /// Filled dot in `color`.
    Dot { color: String },
    /// Small circle, used for catalog stations.
    Circle { fill: String, radius: u32 },
    /// Teardrop pin in `color`.
    Highlight { color: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: Coordinate,
    pub style: MarkerStyle,
    /// Popup HTML.
    pub popup: Option<String>,
    /// Reported back through the surface's click callback.
    pub click_tag: Option<String>,
}

impl MarkerSpec {
    pub fn new(position: Coordinate, style: MarkerStyle) -> Self {
        Self {
            position,
            style,
            popup: None,
            click_tag: None,
        }
    }

    pub fn popup(mut self, html: impl Into<String>) -> Self {
        self.popup = Some(html.into());
        self
    }

    pub fn click_tag(mut self, tag: impl Into<String>) -> Self {
        self.click_tag = Some(tag.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineSpec {
    pub points: Vec<Coordinate>,
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    /// Leaflet `dashArray`, e.g. `"10, 5"`.
    pub dash: Option<String>,
}

/// Mutation methods of a third-party map. Only [`crate::MapSynchronizer`]
/// should call these.
pub trait MapSurface {
    fn add_marker(&mut self, marker: &MarkerSpec) -> LayerId;
    fn add_polyline(&mut self, line: &PolylineSpec) -> LayerId;
    /// Unknown ids are ignored.
    fn remove_layer(&mut self, id: LayerId);
    fn set_viewport(&mut self, viewport: &Viewport);
    /// Animated pan and zoom.
    fn fly_to(&mut self, center: Coordinate, zoom: u8);
    fn open_popup(&mut self, id: LayerId, delay_ms: u32);
}
