//! Earthquake risk form.

use crate::cell::SignalCell;
use crate::components::{ErrorDisplay, LoadingSpinner};
use crate::geolocation::BrowserGeolocator;
use crate::state::{AppState, Services};
use dioxus::prelude::*;
use drd_orchestrator::{driver, Geolocator};

const FIELD_STYLE: &str =
    "padding: 6px 8px; border: 1px solid #cbd5e1; border-radius: 4px; width: 120px; font-size: 13px;";

#[component]
pub fn EarthquakePanel() -> Element {
    let mut state = use_context::<AppState>();
    let services = use_context::<Services>();
    let mut locate_error = use_signal(|| None::<String>);

    let on_locate = move |_| {
        spawn(async move {
            match BrowserGeolocator.current_position().await {
                Ok(position) => {
                    locate_error.set(None);
                    state.earthquake.write().form.set_position(position);
                }
                Err(e) => locate_error.set(Some(e.to_string())),
            }
        });
    };

    let backend = services.backend.clone();
    let on_predict = move |_| {
        let backend = backend.clone();
        spawn(async move {
            let cell = SignalCell(state.earthquake);
            if let Err(e) = driver::predict_earthquake(&cell, &*backend).await {
                log::info!("earthquake not requested: {}", e);
            }
        });
    };

    let wf = state.earthquake.read();
    let form = wf.form.clone();
    let loading = wf.loading();
    let result = wf.result().map(str::to_string);
    let error = wf.error().map(str::to_string).or_else(|| locate_error());
    drop(wf);

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin: 8px 0; font-size: 13px;",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "Earthquake Risk" }
            div {
                style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(130px, 1fr)); gap: 8px;",
                input {
                    style: FIELD_STYLE,
                    r#type: "number",
                    placeholder: "Latitude",
                    value: "{form.latitude}",
                    oninput: move |evt| state.earthquake.write().form.latitude = evt.value(),
                }
                input {
                    style: FIELD_STYLE,
                    r#type: "number",
                    placeholder: "Longitude",
                    value: "{form.longitude}",
                    oninput: move |evt| state.earthquake.write().form.longitude = evt.value(),
                }
                input {
                    style: FIELD_STYLE,
                    r#type: "number",
                    placeholder: "Depth (km)",
                    value: "{form.depth}",
                    oninput: move |evt| state.earthquake.write().form.depth = evt.value(),
                }
                input {
                    style: FIELD_STYLE,
                    r#type: "number",
                    placeholder: "Year",
                    value: "{form.year}",
                    oninput: move |evt| state.earthquake.write().form.year = evt.value(),
                }
                select {
                    style: FIELD_STYLE,
                    value: "{form.month}",
                    onchange: move |evt| state.earthquake.write().form.month = evt.value(),
                    option { value: "", "Month" }
                    for m in 1..=12u32 {
                        option { value: "{m}", "{m}" }
                    }
                }
            }
            div {
                style: "display: flex; gap: 8px; margin-top: 10px;",
                button { onclick: on_locate, "Use my location" }
                button { disabled: loading, onclick: on_predict,
                    if loading { "Predicting..." } else { "Predict" }
                }
                button {
                    onclick: move |_| {
                        locate_error.set(None);
                        state.earthquake.write().clear();
                    },
                    "Clear"
                }
            }
            if loading {
                LoadingSpinner { label: "Estimating risk...".to_string() }
            }
            if let Some(err) = error {
                ErrorDisplay { message: err }
            }
            if let Some(text) = result {
                p { style: "margin: 10px 0 0 0; font-weight: bold;", "{text}" }
            }
        }
    }
}
