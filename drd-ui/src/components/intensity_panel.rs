//! Satellite image upload, intensity result and forecast controls.

use crate::cell::SignalCell;
use crate::components::{ErrorDisplay, LoadingSpinner};
use crate::state::{AppState, Services};
use dioxus::prelude::*;
use drd_api::Upload;
use drd_map::style::risk_level_color;
use drd_orchestrator::cyclone::MAX_NUM_STEPS;
use drd_orchestrator::driver;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[component]
pub fn IntensityPanel() -> Element {
    let mut state = use_context::<AppState>();
    let services = use_context::<Services>();

    let on_file = move |evt: Event<FormData>| async move {
        let Some(file) = evt.files().into_iter().next() else {
            state.cyclone.write().select_image(None);
            return;
        };
        match file.read_bytes().await {
            Ok(bytes) => {
                let upload = Upload::new(file.name(), bytes.to_vec());
                state.cyclone.write().select_image(Some(upload));
            }
            Err(e) => log::warn!("could not read {}: {}", file.name(), e),
        }
    };

    let backend = services.backend.clone();
    let on_predict = move |_| {
        let backend = backend.clone();
        spawn(async move {
            let cell = SignalCell(state.cyclone);
            if let Err(e) = driver::predict_intensity(&cell, &*backend).await {
                log::info!("intensity not requested: {}", e);
            }
        });
    };

    let wf = state.cyclone.read();
    let loading = wf.intensity_loading();
    let result = wf.intensity().cloned();
    let file_name = wf.image().map(|i| i.file_name.clone());
    let error = wf.error().map(str::to_string);
    drop(wf);
    let badge = result
        .as_ref()
        .map(|r| risk_level_color(&r.risk_level))
        .unwrap_or_default();

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin: 8px 0;",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "Cyclone Intensity" }
            input { r#type: "file", accept: "image/*", onchange: on_file }
            if let Some(name) = file_name {
                div { style: "font-size: 12px; color: #64748b; margin-top: 4px;", "{name}" }
            }
            button {
                style: "margin-top: 8px; padding: 6px 12px; border: none; border-radius: 4px; background: #7c3aed; color: white; cursor: pointer;",
                disabled: loading,
                onclick: on_predict,
                if loading { "Analyzing..." } else { "Predict Intensity" }
            }
            if loading {
                LoadingSpinner { label: "Running intensity model...".to_string() }
            }
            if let Some(err) = error {
                ErrorDisplay { message: err }
            }
            if let Some(r) = result {
                div {
                    style: "margin-top: 10px; display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px; font-size: 13px;",
                    div {
                        div { style: "color: #64748b; font-size: 11px;", "Intensity" }
                        strong { "{r.intensity_value} knots" }
                    }
                    div {
                        div { style: "color: #64748b; font-size: 11px;", "Category" }
                        strong { "{r.category}" }
                    }
                    div {
                        div { style: "color: #64748b; font-size: 11px;", "Risk" }
                        span {
                            style: "padding: 2px 8px; border-radius: 10px; color: white; background: {badge};",
                            "{r.risk_level}"
                        }
                    }
                }
            }
        }
    }
}

/// Month, step count and heading, plus the track and combined predict buttons.
#[component]
pub fn ForecastControls() -> Element {
    let mut state = use_context::<AppState>();
    let services = use_context::<Services>();

    let track_backend = services.backend.clone();
    let on_track = move |_| {
        let backend = track_backend.clone();
        spawn(async move {
            let cell = SignalCell(state.cyclone);
            if let Err(e) = driver::predict_track(&cell, &*backend).await {
                log::info!("track not requested: {}", e);
            }
        });
    };

    let combined_backend = services.backend.clone();
    let on_combined = move |_| {
        let backend = combined_backend.clone();
        spawn(async move {
            let cell = SignalCell(state.cyclone);
            if let Err(e) = driver::predict_combined(&cell, &*backend).await {
                log::info!("nothing requested: {}", e);
            }
        });
    };

    let wf = state.cyclone.read();
    let enabled = wf.track_inputs_enabled();
    let month = wf.month().unwrap_or(0);
    let steps = wf.num_steps();
    let speed = wf.storm_speed();
    let busy = wf.track_loading() || wf.intensity_loading();
    drop(wf);

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin: 8px 0; font-size: 13px;",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "Track Forecast" }
            div {
                style: "display: flex; gap: 12px; flex-wrap: wrap; align-items: center;",
                label {
                    "Month "
                    select {
                        disabled: !enabled,
                        value: "{month}",
                        onchange: move |evt| {
                            let m = evt.value().parse::<u32>().ok().filter(|m| *m > 0);
                            let _ = state.cyclone.write().set_month(m);
                        },
                        option { value: "0", "Current month" }
                        for (number, name) in (1..=12).zip(MONTHS) {
                            option { value: "{number}", "{name}" }
                        }
                    }
                }
                label {
                    "Steps "
                    input {
                        r#type: "number",
                        min: "1",
                        max: "{MAX_NUM_STEPS}",
                        disabled: !enabled,
                        value: "{steps}",
                        onchange: move |evt| {
                            if let Ok(n) = evt.value().parse::<u32>() {
                                let _ = state.cyclone.write().set_num_steps(n);
                            }
                        },
                    }
                }
                label {
                    "Heading (°) "
                    input {
                        r#type: "number",
                        placeholder: "auto",
                        disabled: !enabled,
                        onchange: move |evt| {
                            let dir = evt.value().trim().parse::<f64>().ok();
                            state.cyclone.write().set_storm_dir(dir);
                        },
                    }
                }
                span { style: "color: #64748b;", "Storm speed: {speed} kt" }
            }
            div {
                style: "display: flex; gap: 8px; margin-top: 10px;",
                button { disabled: !enabled || busy, onclick: on_track, "Predict Track" }
                button { disabled: busy, onclick: on_combined, "Run Prediction" }
            }
        }
    }
}
