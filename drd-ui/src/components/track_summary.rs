//! Forecast result: trajectory statistics and predicted positions.

use crate::components::LoadingSpinner;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn TrackSummary() -> Element {
    let state = use_context::<AppState>();
    let wf = state.cyclone.read();
    let loading = wf.track_loading();
    let track = wf.track().cloned();
    drop(wf);

    if loading {
        return rsx! { LoadingSpinner { label: "Forecasting track...".to_string() } };
    }
    let Some(track) = track else {
        return rsx! {};
    };
    let stats = track.trajectory_stats;
    let rows: Vec<(u32, String, String, String)> = track
        .predicted_positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let confidence = p
                .confidence
                .map(|c| format!("{:.0}%", c * 100.0))
                .unwrap_or_else(|| "-".to_string());
            (
                p.step.unwrap_or(i as u32 + 1),
                format!("{:.4}", p.latitude),
                format!("{:.4}", p.longitude),
                confidence,
            )
        })
        .collect();

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin: 8px 0; font-size: 13px;",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "Predicted Track" }
            div {
                style: "display: flex; gap: 24px; margin-bottom: 8px;",
                div {
                    div { style: "color: #64748b; font-size: 11px;", "Average speed" }
                    strong { "{stats.avg_speed:.2}" }
                }
                div {
                    div { style: "color: #64748b; font-size: 11px;", "Total distance" }
                    strong { "{stats.total_distance_km:.1} km" }
                }
            }
            table {
                style: "width: 100%; border-collapse: collapse; font-family: monospace; font-size: 12px;",
                thead {
                    tr {
                        th { style: "text-align: left;", "Step" }
                        th { style: "text-align: right;", "Lat" }
                        th { style: "text-align: right;", "Lon" }
                        th { style: "text-align: right;", "Confidence" }
                    }
                }
                tbody {
                    for (step, lat, lon, confidence) in rows {
                        tr {
                            key: "{step}",
                            td { "{step}" }
                            td { style: "text-align: right;", "{lat}" }
                            td { style: "text-align: right;", "{lon}" }
                            td { style: "text-align: right;", "{confidence}" }
                        }
                    }
                }
            }
        }
    }
}
