//! Cyclone Intensity and Track Forecast
//!
//! Upload a satellite image to estimate intensity, then enter the historical
//! track (typed, pasted as JSON or loaded from a saved path) and forecast the
//! next positions. The map shows the historical track in blue, predicted
//! positions coloured by intensity and the current position last.
//!
//! Track inputs stay locked until an intensity result exists. "Run
//! Prediction" issues whichever of the two requests are possible at once.

use anyhow::Context;
use dioxus::prelude::*;
use drd_api::ApiConfig;
use drd_map::leaflet::{LEAFLET_CSS, LEAFLET_JS};
use drd_map::{track_scene, TrackView};
use drd_orchestrator::Gating;
use drd_ui::components::{
    CoordinatePanel, ErrorDisplay, ForecastControls, IntensityPanel, SavedPathsPanel, SceneMap,
    TrackSummary,
};
use drd_ui::state::{AppState, Services};

const MAP_ID: &str = "cyclone-track-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    log::info!("starting cyclone-dashboard against {}", ApiConfig::default().base_url);
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("cyclone-dashboard-root"))
        .launch(App);
}

fn build_services() -> Result<Services, String> {
    Services::from_config(ApiConfig::default())
        .context("could not create the prediction client")
        .map_err(|e| {
            log::error!("{:#}", e);
            format!("{:#}", e)
        })
}

#[component]
fn App() -> Element {
    let state = use_context_provider(|| AppState::new(Gating::IntensityFirst));
    // Built once, so the early return never changes the hook order.
    let services = match use_hook(build_services) {
        Ok(services) => services,
        Err(message) => {
            return rsx! {
                ErrorDisplay { message, hint: "Check the DRD_API_BASE the app was built with, then reload.".to_string() }
            };
        }
    };
    use_context_provider(|| services);

    let wf = state.cyclone.read();
    let scene = track_scene(&TrackView {
        historical: wf.coordinates(),
        predicted: wf.predicted_positions(),
        current: wf.current_position(),
        intensity: wf.intensity_knots(),
        center: None,
    });
    drop(wf);

    rsx! {
        document::Stylesheet { href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            h2 { style: "margin: 0 0 12px 0;", "Cyclone Intensity & Track Forecast" }
            div {
                style: "display: grid; grid-template-columns: minmax(320px, 420px) 1fr; gap: 16px; align-items: start;",
                div {
                    IntensityPanel {}
                    ForecastControls {}
                    CoordinatePanel {}
                    SavedPathsPanel {}
                }
                div {
                    SceneMap { id: MAP_ID.to_string(), scene, min_height: 560 }
                    TrackSummary {}
                }
            }
        }
    }
}
