//! Reusable Dioxus RSX components for the dashboard apps.

mod coordinate_panel;
mod earthquake_panel;
mod error_display;
mod flood_panel;
mod intensity_panel;
mod landslide_panel;
mod loading_spinner;
mod saved_paths;
mod scene_map;
mod track_summary;

pub use coordinate_panel::CoordinatePanel;
pub use earthquake_panel::EarthquakePanel;
pub use error_display::ErrorDisplay;
pub use flood_panel::FloodPanel;
pub use intensity_panel::{ForecastControls, IntensityPanel};
pub use landslide_panel::LandslidePanel;
pub use loading_spinner::LoadingSpinner;
pub use saved_paths::SavedPathsPanel;
pub use scene_map::SceneMap;
pub use track_summary::TrackSummary;
