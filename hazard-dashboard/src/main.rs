//! Earthquake and Landslide Risk
//!
//! Two independent tools on one page. The earthquake form takes a location
//! (typed or from the browser), depth, year and month and shows the returned
//! risk level, with the location pinned on the map as soon as it is valid.
//! The landslide tool uploads an HDF5 tile and shows the risk percentage next
//! to the RGB, mask and overlay images.

use anyhow::Context;
use dioxus::prelude::*;
use drd_api::ApiConfig;
use drd_map::earthquake_scene;
use drd_map::leaflet::{LEAFLET_CSS, LEAFLET_JS};
use drd_orchestrator::Gating;
use drd_ui::components::{EarthquakePanel, ErrorDisplay, LandslidePanel, SceneMap};
use drd_ui::state::{AppState, Services};

const MAP_ID: &str = "earthquake-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    log::info!("starting hazard-dashboard against {}", ApiConfig::default().base_url);
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("hazard-dashboard-root"))
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
    let state = use_context_provider(|| AppState::new(Gating::Open));
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

    let position = state.earthquake.read().form.position().ok();
    let scene = earthquake_scene(position);

    rsx! {
        document::Stylesheet { href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            h2 { style: "margin: 0 0 12px 0;", "Earthquake & Landslide Risk" }
            div {
                style: "display: grid; grid-template-columns: minmax(320px, 420px) 1fr; gap: 16px; align-items: start;",
                div {
                    EarthquakePanel {}
                    LandslidePanel {}
                }
                SceneMap { id: MAP_ID.to_string(), scene, min_height: 480 }
            }
        }
    }
}
