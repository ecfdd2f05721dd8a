//! HDF5 upload and landslide risk imagery.

use crate::cell::SignalCell;
use crate::components::{ErrorDisplay, LoadingSpinner};
use crate::state::{AppState, Services};
use dioxus::prelude::*;
use drd_api::Upload;
use drd_map::style::risk_level_color;
use drd_orchestrator::driver;

#[component]
pub fn LandslidePanel() -> Element {
    let mut state = use_context::<AppState>();
    let services = use_context::<Services>();

    let on_file = move |evt: Event<FormData>| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        match file.read_bytes().await {
            Ok(bytes) => {
                let upload = Upload::new(file.name(), bytes.to_vec());
                if let Err(e) = state.landslide.write().select_file(upload) {
                    log::info!("rejected {}: {}", file.name(), e);
                }
            }
            Err(e) => log::warn!("could not read {}: {}", file.name(), e),
        }
    };

    let backend = services.backend.clone();
    let on_predict = move |_| {
        let backend = backend.clone();
        spawn(async move {
            let cell = SignalCell(state.landslide);
            if let Err(e) = driver::predict_landslide(&cell, &*backend).await {
                log::info!("landslide not requested: {}", e);
            }
        });
    };

    let wf = state.landslide.read();
    let label = wf.file_label().to_string();
    let loading = wf.loading();
    let error = wf.error().map(str::to_string);
    let result = wf.result().cloned();
    drop(wf);

    let images = result
        .as_ref()
        .map(|r| {
            vec![
                ("RGB", r.rgb_data_url()),
                ("Mask", r.mask_data_url()),
                ("Overlay", r.overlay_data_url()),
            ]
        })
        .unwrap_or_default();
    let summary = result.as_ref().map(|r| r.summary());
    let badge = result
        .as_ref()
        .map(|r| risk_level_color(&r.risk_level))
        .unwrap_or_default();

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin: 8px 0; font-size: 13px;",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "Landslide Risk" }
            label {
                style: "display: inline-block; padding: 6px 12px; border: 1px dashed #94a3b8; border-radius: 4px; cursor: pointer;",
                "{label}"
                input {
                    style: "display: none;",
                    r#type: "file",
                    accept: ".h5,.hdf5",
                    onchange: on_file,
                }
            }
            div {
                style: "display: flex; gap: 8px; margin-top: 10px;",
                button { disabled: loading, onclick: on_predict,
                    if loading { "Analyzing..." } else { "Predict" }
                }
                button { onclick: move |_| state.landslide.write().reset(), "Reset" }
            }
            if loading {
                LoadingSpinner { label: "Running landslide model...".to_string() }
            }
            if let Some(err) = error {
                ErrorDisplay { message: err }
            }
            if let Some(text) = summary {
                p {
                    style: "margin: 10px 0 6px 0;",
                    "Risk: "
                    span {
                        style: "padding: 2px 8px; border-radius: 10px; color: white; background: {badge};",
                        "{text}"
                    }
                }
            }
            div {
                style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px;",
                for (title, src) in images {
                    figure {
                        key: "{title}",
                        style: "margin: 0;",
                        img { style: "width: 100%; border-radius: 4px;", src: "{src}", alt: "{title}" }
                        figcaption { style: "text-align: center; font-size: 11px; color: #64748b;", "{title}" }
                    }
                }
            }
        }
    }
}
