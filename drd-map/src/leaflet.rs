//! Leaflet-backed [`MapSurface`] driven through `js_sys::eval()`.
//!
//! `assets/js/leaflet-bridge.js` defines `window.drdMap`, which creates the
//! map lazily once Leaflet and the container element exist and queues any
//! calls made before that. Each call here serializes its arguments to JSON and
//! invokes the bridge inside a try/catch.

use crate::surface::{LayerId, MapSurface, MarkerSpec, PolylineSpec, Viewport};
use drd_geo::Coordinate;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

static BRIDGE_JS: &str = include_str!("../assets/js/leaflet-bridge.js");

/// Leaflet itself; the host page must load both before maps appear.
pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Execute JS, swallowing and logging any exception.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('DRD map call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate the bridge at global scope. Call once at app startup.
pub fn load_bridge() {
    let _ = js_sys::eval(BRIDGE_JS);
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("could not serialize map call: {}", e);
        "null".to_string()
    })
}

/// A Leaflet map inside the element with id `container_id`.
pub struct LeafletSurface {
    container_id: String,
    next_id: u64,
}

impl LeafletSurface {
    /// Create (or re-attach to) the map in `container_id` at `initial` view.
    pub fn new(container_id: &str, initial: &Viewport) -> Self {
        call_js(&format!(
            "window.drdMap.init({}, {});",
            json(&container_id),
            json(initial)
        ));
        Self {
            container_id: container_id.to_string(),
            next_id: 0,
        }
    }

    fn invoke(&self, method: &str, args: &str) {
        call_js(&format!(
            "window.drdMap.{}({}, {});",
            method,
            json(&self.container_id),
            args
        ));
    }

    /// Route clicks on markers carrying a click tag to `handler`.
    ///
    /// Only one handler is live per page; a later call replaces it.
    pub fn on_marker_click(&self, handler: impl FnMut(String) + 'static) {
        let closure = Closure::<dyn FnMut(String)>::new(handler);
        let set = js_sys::Reflect::set(
            &js_sys::global(),
            &JsValue::from_str("__drdMarkerClick"),
            closure.as_ref(),
        );
        if set.is_err() {
            log::warn!("could not register marker click handler");
        }
        // Lives as long as the page.
        closure.forget();
    }

    /// Remove the map and every layer on it.
    pub fn destroy(&self) {
        self.invoke("destroy", "null");
    }
}

impl MapSurface for LeafletSurface {
    fn add_marker(&mut self, marker: &MarkerSpec) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.invoke("addMarker", &format!("{}, {}", id.0, json(marker)));
        id
    }

    fn add_polyline(&mut self, line: &PolylineSpec) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.invoke("addPolyline", &format!("{}, {}", id.0, json(line)));
        id
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.invoke("removeLayer", &id.0.to_string());
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.invoke("setViewport", &json(viewport));
    }

    fn fly_to(&mut self, center: Coordinate, zoom: u8) {
        self.invoke("flyTo", &format!("{}, {}", json(&center), zoom));
    }

    fn open_popup(&mut self, id: LayerId, delay_ms: u32) {
        self.invoke("openPopup", &format!("{}, {}", id.0, delay_ms));
    }
}
