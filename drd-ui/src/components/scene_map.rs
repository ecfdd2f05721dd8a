//! Leaflet map host that keeps itself in step with a [`Scene`].

use dioxus::prelude::*;
use drd_geo::Coordinate;
use drd_map::leaflet::{self, LeafletSurface};
use drd_map::{MapSynchronizer, Scene, Viewport, DEFAULT_BOUNDS, FIT_PADDING, FOCUS_ZOOM};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Props, Clone, PartialEq)]
pub struct SceneMapProps {
    /// DOM id Leaflet renders into.
    pub id: String,
    pub scene: Scene,
    /// Fly here (and open the popup of a marker at this point) when it changes.
    #[props(default)]
    pub focus: Option<Coordinate>,
    /// Receives the click tag of clicked markers.
    #[props(default)]
    pub on_marker_click: Option<EventHandler<String>>,
    #[props(default = 500)]
    pub min_height: u32,
}

#[component]
pub fn SceneMap(props: SceneMapProps) -> Element {
    let id = props.id.clone();
    let on_click = props.on_marker_click;
    let sync = use_hook(move || {
        leaflet::load_bridge();
        let initial = Viewport::Fit {
            bounds: DEFAULT_BOUNDS,
            padding: FIT_PADDING,
        };
        let surface = LeafletSurface::new(&id, &initial);
        if let Some(handler) = on_click {
            surface.on_marker_click(move |tag| handler.call(tag));
        }
        Rc::new(RefCell::new(MapSynchronizer::new(surface)))
    });

    let scene_sync = sync.clone();
    use_effect(use_reactive((&props.scene,), move |(scene,)| {
        scene_sync.borrow_mut().sync(&scene);
    }));

    let focus_sync = sync.clone();
    use_effect(use_reactive((&props.focus,), move |(focus,)| {
        if let Some(point) = focus {
            focus_sync.borrow_mut().focus(point, FOCUS_ZOOM);
        }
    }));

    let drop_sync = sync.clone();
    use_drop(move || {
        let mut sync = drop_sync.borrow_mut();
        sync.teardown();
        sync.surface().destroy();
    });

    let style = format!(
        "min-height: {}px; height: {}px; width: 100%; border-radius: 8px; overflow: hidden;",
        props.min_height, props.min_height
    );
    rsx! {
        div { id: "{props.id}", style: "{style}" }
    }
}
