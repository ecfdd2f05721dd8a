//! Selected station, its flood prediction and the "use my location" flow.

use crate::cell::SignalCell;
use crate::components::{ErrorDisplay, LoadingSpinner};
use crate::geolocation::BrowserGeolocator;
use crate::state::{AppState, Services};
use dioxus::prelude::*;
use drd_map::style::flood_status_color;
use drd_orchestrator::driver;

const CARD_STYLE: &str =
    "padding: 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin: 8px 0; font-size: 13px;";

#[component]
pub fn FloodPanel() -> Element {
    let mut state = use_context::<AppState>();
    let services = use_context::<Services>();

    let on_locate = move |_| {
        spawn(async move {
            let cell = SignalCell(state.flood);
            match driver::locate_nearest(&cell, &BrowserGeolocator).await {
                Ok(Some(station)) => log::info!("nearest station is {}", station.name),
                Ok(None) => {}
                Err(e) => log::warn!("locate failed: {}", e),
            }
        });
    };

    let backend = services.backend.clone();
    let on_confirm = move |_| {
        let backend = backend.clone();
        spawn(async move {
            let cell = SignalCell(state.flood);
            if let Err(e) = driver::confirm_candidate(&cell, &*backend).await {
                log::info!("nothing to confirm: {}", e);
            }
        });
    };

    let wf = state.flood.read();
    let stations_loading = wf.stations_loading();
    let station_count = wf.stations().len();
    let selected = wf.selected().cloned();
    let candidate = wf.candidate().cloned();
    let prediction = wf.prediction().cloned();
    let loading = wf.loading();
    let locating = wf.locating();
    let error = wf.error().map(str::to_string);
    drop(wf);

    let status_color = prediction
        .as_ref()
        .map(|p| flood_status_color(p.status))
        .unwrap_or_default();
    let status_label = prediction
        .as_ref()
        .map(|p| format!("{:?}", p.status).to_uppercase())
        .unwrap_or_default();
    let probability = prediction
        .as_ref()
        .map(|p| format!("{:.1}%", p.probability * 100.0))
        .unwrap_or_default();
    let chart_src = prediction
        .as_ref()
        .and_then(|p| p.chart_image.as_deref())
        .map(|img| {
            if img.starts_with("data:") {
                img.to_string()
            } else {
                format!("data:image/png;base64,{}", img)
            }
        });

    rsx! {
        div {
            style: CARD_STYLE,
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "Flood Forecast" }
            if stations_loading {
                LoadingSpinner { label: "Loading stations...".to_string() }
            } else {
                p { style: "margin: 0 0 8px 0; color: #64748b; font-size: 12px;",
                    "{station_count} stations. Click one on the map to predict."
                }
            }
            div {
                style: "display: flex; gap: 8px;",
                button {
                    disabled: locating || stations_loading,
                    onclick: on_locate,
                    if locating { "Locating..." } else { "Use my location" }
                }
                button {
                    disabled: selected.is_none(),
                    onclick: move |_| state.flood.write().clear_selection(),
                    "Clear selection"
                }
            }
            if let Some(c) = candidate {
                div {
                    style: "margin-top: 8px; padding: 8px; background: #eff6ff; border-radius: 6px;",
                    "Nearest station: "
                    strong { "{c.name}" }
                    " ({c.river}, {c.district}) "
                    button { disabled: loading, onclick: on_confirm, "Predict this station" }
                }
            }
            if let Some(err) = error {
                ErrorDisplay { message: err }
            }
            if let Some(ref s) = selected {
                div {
                    style: "margin-top: 10px;",
                    strong { "{s.name}" }
                    div { style: "color: #64748b; font-size: 12px;", "{s.river} River · {s.district}, {s.state}" }
                    div { style: "color: #94a3b8; font-size: 11px;", "Basin: {s.basin}" }
                }
            }
            if loading {
                LoadingSpinner { label: "Predicting flood risk...".to_string() }
            }
            if let Some(p) = prediction {
                div {
                    style: "margin-top: 10px;",
                    div {
                        style: "display: flex; align-items: center; gap: 8px;",
                        span {
                            style: "padding: 2px 10px; border-radius: 10px; color: white; font-weight: bold; background: {status_color};",
                            "{status_label}"
                        }
                        span { "{p.prediction}" }
                        span { style: "color: #64748b;", "Probability {probability}" }
                    }
                    table {
                        style: "margin-top: 8px; font-family: monospace; font-size: 12px;",
                        tbody {
                            tr { td { "Current level" } td { style: "text-align: right;", "{p.current_water_level:.2} m" } }
                            tr { td { "Warning level" } td { style: "text-align: right;", "{p.warning_level:.2} m" } }
                            tr { td { "Danger level" } td { style: "text-align: right;", "{p.danger_level:.2} m" } }
                        }
                    }
                    SeriesBars { title: "Water level (m)".to_string(), values: p.water_levels.clone(), color: "#0284c7".to_string() }
                    SeriesBars { title: "Rainfall (mm)".to_string(), values: p.rainfall_data.clone(), color: "#0ea5e9".to_string() }
                    if let Some(src) = chart_src {
                        img {
                            style: "margin-top: 8px; width: 100%; border-radius: 6px;",
                            src: "{src}",
                            alt: "Water level history",
                        }
                    }
                    if p.is_mock == Some(true) {
                        p { style: "margin: 6px 0 0 0; color: #b45309; font-size: 11px;",
                            "Live gauge data unavailable; showing simulated readings."
                        }
                    }
                }
            }
        }
    }
}

/// Tiny bar strip for a numeric series; nothing is drawn for an empty series.
#[component]
fn SeriesBars(title: String, values: Vec<f64>, color: String) -> Element {
    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    if values.is_empty() || max <= 0.0 {
        return rsx! {};
    }
    let bars: Vec<(usize, String)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i, format!("{:.0}%", (v / max * 100.0).max(2.0))))
        .collect();

    rsx! {
        div {
            style: "margin-top: 8px;",
            div { style: "color: #64748b; font-size: 11px; margin-bottom: 2px;", "{title}" }
            div {
                style: "display: flex; align-items: flex-end; gap: 2px; height: 48px;",
                for (i, height) in bars {
                    div {
                        key: "{i}",
                        style: "flex: 1; height: {height}; background: {color}; border-radius: 2px 2px 0 0;",
                    }
                }
            }
        }
    }
}
