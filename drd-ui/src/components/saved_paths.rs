//! Save, load and delete named cyclone paths.

use crate::state::{AppState, Services};
use dioxus::prelude::*;

#[component]
pub fn SavedPathsPanel() -> Element {
    let mut state = use_context::<AppState>();
    let services = use_context::<Services>();
    let mut name = use_signal(String::new);

    let initial = services.store.clone();
    use_hook(move || state.saved_paths.set(initial.list()));

    let save_store = services.store.clone();
    let on_save = move |_| {
        let coordinates = state.cyclone.read().coordinates().to_vec();
        match save_store.save(&name(), &coordinates) {
            Ok(saved) => {
                log::info!("saved path {}", saved.name);
                name.set(String::new());
                state.store_error.set(None);
                state.saved_paths.set(save_store.list());
            }
            Err(e) => state.store_error.set(Some(e.to_string())),
        }
    };

    let enabled = state.cyclone.read().track_inputs_enabled();
    let paths = state.saved_paths.read().clone();

    rsx! {
        div {
            style: "padding: 12px; border: 1px solid #e2e8f0; border-radius: 8px; margin: 8px 0;",
            h3 { style: "margin: 0 0 8px 0; font-size: 15px;", "Saved Paths" }
            div {
                style: "display: flex; gap: 8px;",
                input {
                    style: "flex: 1; padding: 6px 8px; border: 1px solid #cbd5e1; border-radius: 4px; font-size: 13px;",
                    placeholder: "Path name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                button {
                    style: "padding: 6px 12px; border: none; border-radius: 4px; background: #059669; color: white; cursor: pointer; font-size: 13px;",
                    onclick: on_save,
                    "Save"
                }
            }
            if let Some(err) = (state.store_error)() {
                p { style: "margin: 6px 0; color: #b91c1c; font-size: 12px;", "{err}" }
            }
            if paths.is_empty() {
                p { style: "margin: 8px 0 0 0; color: #94a3b8; font-size: 12px;", "No saved paths yet." }
            }
            ul {
                style: "list-style: none; margin: 8px 0 0 0; padding: 0; font-size: 13px;",
                for path in paths {
                    SavedPathRow {
                        key: "{path.id}",
                        id: path.id,
                        name: path.name.clone(),
                        points: path.coordinates.len(),
                        timestamp: path.timestamp.clone(),
                        can_load: enabled,
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct SavedPathRowProps {
    id: i64,
    name: String,
    points: usize,
    timestamp: String,
    can_load: bool,
}

#[component]
fn SavedPathRow(props: SavedPathRowProps) -> Element {
    let mut state = use_context::<AppState>();
    let services = use_context::<Services>();
    let id = props.id;

    let load_store = services.store.clone();
    let on_load = move |_| {
        if let Some(coordinates) = load_store.load(id) {
            let _ = state.cyclone.write().replace_coordinates(coordinates);
        }
    };

    let delete_store = services.store.clone();
    let on_delete = move |_| match delete_store.delete(id) {
        Ok(()) => state.saved_paths.set(delete_store.list()),
        Err(e) => state.store_error.set(Some(e.to_string())),
    };

    rsx! {
        li {
            style: "display: flex; justify-content: space-between; align-items: center; padding: 6px 0; border-bottom: 1px solid #f1f5f9;",
            div {
                strong { "{props.name}" }
                div { style: "font-size: 11px; color: #94a3b8;", "{props.points} points · {props.timestamp}" }
            }
            div {
                style: "display: flex; gap: 6px;",
                button { disabled: !props.can_load, onclick: on_load, "Load" }
                button { style: "color: #dc2626;", onclick: on_delete, "Delete" }
            }
        }
    }
}
