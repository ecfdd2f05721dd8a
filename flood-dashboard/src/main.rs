//! River Flood Forecast
//!
//! Loads the gauge stations once on mount and plots them on the map. Clicking
//! a station requests its flood prediction; the result card shows status,
//! probability and water levels, and the map re-centres on the station with a
//! highlighted pin. "Use my location" proposes the nearest station, which the
//! user confirms before anything is requested.

use anyhow::Context;
use dioxus::prelude::*;
use drd_api::ApiConfig;
use drd_map::leaflet::{LEAFLET_CSS, LEAFLET_JS};
use drd_map::{parse_station_tag, station_scene, StationView};
use drd_orchestrator::{driver, Gating};
use drd_ui::cell::SignalCell;
use drd_ui::components::{ErrorDisplay, FloodPanel, SceneMap};
use drd_ui::state::{AppState, Services};

const MAP_ID: &str = "flood-station-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    log::info!("starting flood-dashboard against {}", ApiConfig::default().base_url);
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("flood-dashboard-root"))
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
    let services = use_context_provider(|| services);

    let loader = services.backend.clone();
    use_hook(move || {
        spawn(async move {
            let cell = SignalCell(state.flood);
            match driver::load_stations(&cell, &*loader).await {
                Ok(()) => log::info!("loaded {} stations", state.flood.read().stations().len()),
                Err(e) => log::error!("{}", e),
            }
        });
    });

    let backend = services.backend.clone();
    let on_marker_click = move |tag: String| {
        let Some(index) = parse_station_tag(&tag) else {
            return;
        };
        let Some(info) = state.flood.read().stations().get(index).map(|s| s.info()) else {
            log::warn!("click on unknown station {}", tag);
            return;
        };
        let backend = backend.clone();
        spawn(async move {
            let cell = SignalCell(state.flood);
            driver::predict_station(&cell, &*backend, &info).await;
        });
    };

    let wf = state.flood.read();
    let scene = station_scene(&StationView {
        stations: wf.stations(),
        selected: wf.selected(),
        prediction: wf.prediction(),
    });
    let focus = wf.focus();
    drop(wf);

    rsx! {
        document::Stylesheet { href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            h2 { style: "margin: 0 0 12px 0;", "River Flood Forecast" }
            div {
                style: "display: grid; grid-template-columns: 1fr minmax(300px, 380px); gap: 16px; align-items: start;",
                SceneMap {
                    id: MAP_ID.to_string(),
                    scene,
                    focus,
                    on_marker_click,
                    min_height: 600,
                }
                FloodPanel {}
            }
        }
    }
}
