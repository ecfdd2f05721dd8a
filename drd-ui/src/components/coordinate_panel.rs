//! Historical track entry: typed points, JSON import, remove and clear.

use crate::state::AppState;
use dioxus::prelude::*;
use drd_orchestrator::MIN_TRACK_POINTS;

const INPUT_STYLE: &str =
    "padding: 6px 8px; border: 1px solid #cbd5e1; border-radius: 4px; width: 110px; font-size: 13px;";
const BUTTON_STYLE: &str =
    "padding: 6px 12px; border: none; border-radius: 4px; background: #2563eb; color: white; cursor: pointer; font-size: 13px;";

#[component]
pub fn CoordinatePanel() -> Element {
    let mut state = use_context::<AppState>();
    let mut lat = use_signal(String::new);
    let mut lon = use_signal(String::new);
    let mut import_text = use_signal(String::new);

    let (enabled, points) = {
        let wf = state.cyclone.read();
        (wf.track_inputs_enabled(), wf.coordinates().to_vec())
    };
    let count = points.len();

    let on_add = move |_| {
        let added = state.cyclone.write().add_coordinate(&lat(), &lon());
        if added.is_ok() {
            lat.set(String::new());
            lon.set(String::new());
        }
    };

    let on_import = move |_| {
        let text = import_text();
        if state.cyclone.write().import_coordinates(&text).is_ok() {
            import_text.set(String::new());
        }
    };

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin: 8px 0;",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "Historical Track" }
            if !enabled {
                p {
                    style: "margin: 0 0 8px 0; font-size: 12px; color: #64748b;",
                    "Run an intensity prediction to unlock coordinate entry."
                }
            }
            div {
                style: "display: flex; gap: 8px; align-items: center;",
                input {
                    style: INPUT_STYLE,
                    placeholder: "Latitude",
                    disabled: !enabled,
                    value: "{lat}",
                    oninput: move |evt| lat.set(evt.value()),
                }
                input {
                    style: INPUT_STYLE,
                    placeholder: "Longitude",
                    disabled: !enabled,
                    value: "{lon}",
                    oninput: move |evt| lon.set(evt.value()),
                }
                button { style: BUTTON_STYLE, disabled: !enabled, onclick: on_add, "Add" }
            }
            details {
                style: "margin-top: 8px; font-size: 12px;",
                summary { "Paste a JSON list" }
                textarea {
                    style: "width: 100%; min-height: 60px; font-family: monospace; font-size: 12px;",
                    disabled: !enabled,
                    placeholder: "[[12.5, 86.1], {{\"lat\": 13.0, \"lon\": 85.7}}]",
                    value: "{import_text}",
                    oninput: move |evt| import_text.set(evt.value()),
                }
                button { style: BUTTON_STYLE, disabled: !enabled, onclick: on_import, "Import" }
            }
            ol {
                style: "margin: 8px 0; padding-left: 20px; font-size: 13px; font-family: monospace;",
                for (i, p) in points.into_iter().enumerate() {
                    li {
                        key: "{i}",
                        "{p.latitude:.4}, {p.longitude:.4} "
                        button {
                            style: "border: none; background: none; color: #dc2626; cursor: pointer;",
                            onclick: move |_| {
                                state.cyclone.write().remove_coordinate(i);
                            },
                            "✕"
                        }
                    }
                }
            }
            div {
                style: "display: flex; justify-content: space-between; align-items: center; font-size: 12px; color: #64748b;",
                span { "{count} point(s), {MIN_TRACK_POINTS} needed for a forecast" }
                button {
                    style: "padding: 4px 10px; border: 1px solid #cbd5e1; border-radius: 4px; background: white; cursor: pointer;",
                    disabled: count == 0,
                    onclick: move |_| state.cyclone.write().clear(),
                    "Clear"
                }
            }
        }
    }
}
