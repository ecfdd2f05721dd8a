//! Applies scenes to a surface, owning exactly the layers it created.

use crate::scene::{Layer, Scene};
use crate::surface::{LayerId, MapSurface};
use crate::{POPUP_DELAY_MS, POSITION_TOLERANCE};
use drd_geo::Coordinate;

struct Owned {
    id: LayerId,
    /// Set for markers, so a focus request can find its popup.
    marker_at: Option<Coordinate>,
}

pub struct MapSynchronizer<S: MapSurface> {
    surface: S,
    owned: Vec<Owned>,
}

impl<S: MapSurface> MapSynchronizer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            owned: Vec::new(),
        }
    }

    /// Replace everything drawn by the previous sync with `scene`.
    pub fn sync(&mut self, scene: &Scene) {
        self.teardown();
        for layer in &scene.layers {
            let owned = match layer {
                Layer::Marker(marker) => Owned {
                    id: self.surface.add_marker(marker),
                    marker_at: Some(marker.position),
                },
                Layer::Polyline(line) => Owned {
                    id: self.surface.add_polyline(line),
                    marker_at: None,
                },
            };
            self.owned.push(owned);
        }
        if let Some(viewport) = &scene.viewport {
            self.surface.set_viewport(viewport);
        }
        log::debug!("map synced: {} layers", self.owned.len());
    }

    /// Remove every layer this synchronizer added. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        for owned in self.owned.drain(..) {
            self.surface.remove_layer(owned.id);
        }
    }

    /// Fly to `point` and, once the pan settles, open the popup of the owned
    /// marker at that point if there is one.
    pub fn focus(&mut self, point: Coordinate, zoom: u8) {
        self.surface.fly_to(point, zoom);
        let hit = self.owned.iter().find(|o| {
            o.marker_at
                .map(|at| at.near(&point, POSITION_TOLERANCE))
                .unwrap_or(false)
        });
        if let Some(owned) = hit {
            self.surface.open_popup(owned.id, POPUP_DELAY_MS);
        }
    }

    pub fn layer_count(&self) -> usize {
        self.owned.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<S: MapSurface> Drop for MapSynchronizer<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{station_scene, track_scene, StationView, TrackView};
    use crate::surface::{MarkerSpec, PolylineSpec, Viewport};
    use drd_api::Station;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        AddMarker(LayerId),
        AddPolyline(LayerId),
        Remove(LayerId),
        Viewport(Viewport),
        FlyTo(Coordinate, u8),
        OpenPopup(LayerId, u32),
    }

    /// Records calls; starts with one foreign layer standing in for the tiles.
    #[derive(Clone, Default)]
    struct Recorder {
        next: Rc<RefCell<u64>>,
        live: Rc<RefCell<BTreeSet<u64>>>,
        calls: Rc<RefCell<Vec<Call>>>,
    }

    const TILE_LAYER: u64 = 1000;

    impl Recorder {
        fn new() -> Self {
            let r = Self::default();
            r.live.borrow_mut().insert(TILE_LAYER);
            r
        }

        fn alloc(&self) -> LayerId {
            let mut next = self.next.borrow_mut();
            *next += 1;
            self.live.borrow_mut().insert(*next);
            LayerId(*next)
        }
    }

    impl MapSurface for Recorder {
        fn add_marker(&mut self, _marker: &MarkerSpec) -> LayerId {
            let id = self.alloc();
            self.calls.borrow_mut().push(Call::AddMarker(id));
            id
        }

        fn add_polyline(&mut self, _line: &PolylineSpec) -> LayerId {
            let id = self.alloc();
            self.calls.borrow_mut().push(Call::AddPolyline(id));
            id
        }

        fn remove_layer(&mut self, id: LayerId) {
            self.live.borrow_mut().remove(&id.0);
            self.calls.borrow_mut().push(Call::Remove(id));
        }

        fn set_viewport(&mut self, viewport: &Viewport) {
            self.calls.borrow_mut().push(Call::Viewport(viewport.clone()));
        }

        fn fly_to(&mut self, center: Coordinate, zoom: u8) {
            self.calls.borrow_mut().push(Call::FlyTo(center, zoom));
        }

        fn open_popup(&mut self, id: LayerId, delay_ms: u32) {
            self.calls.borrow_mut().push(Call::OpenPopup(id, delay_ms));
        }
    }

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    #[test]
    fn test_resync_removes_previous_layers_first() {
        let rec = Recorder::new();
        let mut sync = MapSynchronizer::new(rec.clone());
        let hist = [c(12.0, 86.0), c(13.0, 85.0)];
        let view = TrackView {
            historical: &hist,
            ..Default::default()
        };

        sync.sync(&track_scene(&view));
        assert_eq!(sync.layer_count(), 3);
        rec.calls.borrow_mut().clear();

        sync.sync(&track_scene(&view));
        let calls = rec.calls.borrow();
        assert!(calls[..3].iter().all(|c| matches!(c, Call::Remove(_))));
        assert!(calls[3..6]
            .iter()
            .all(|c| matches!(c, Call::AddMarker(_) | Call::AddPolyline(_))));
        assert!(matches!(calls[6], Call::Viewport(Viewport::Fit { .. })));
        assert_eq!(rec.live.borrow().len(), 4);
    }

    #[test]
    fn test_teardown_leaves_foreign_layers() {
        let rec = Recorder::new();
        let mut sync = MapSynchronizer::new(rec.clone());
        let hist = [c(1.0, 1.0), c(2.0, 2.0), c(3.0, 3.0)];
        sync.sync(&track_scene(&TrackView {
            historical: &hist,
            current: Some(hist[2]),
            ..Default::default()
        }));
        sync.teardown();
        sync.teardown();
        let live: Vec<_> = rec.live.borrow().iter().copied().collect();
        assert_eq!(live, vec![TILE_LAYER]);
    }

    #[test]
    fn test_drop_cleans_up() {
        let rec = Recorder::new();
        {
            let mut sync = MapSynchronizer::new(rec.clone());
            sync.sync(&track_scene(&TrackView {
                current: Some(c(5.0, 5.0)),
                ..Default::default()
            }));
        }
        assert_eq!(rec.live.borrow().len(), 1);
    }

    #[test]
    fn test_focus_opens_matching_popup() {
        let rec = Recorder::new();
        let mut sync = MapSynchronizer::new(rec.clone());
        let stations = [
            Station {
                name: "Patna".into(),
                station_name: String::new(),
                latitude: 25.6,
                longitude: 85.1,
                state: String::new(),
                district: String::new(),
                basin: String::new(),
                river: String::new(),
            },
        ];
        sync.sync(&station_scene(&StationView {
            stations: &stations,
            ..Default::default()
        }));
        rec.calls.borrow_mut().clear();

        sync.focus(c(25.60005, 85.1), 8);
        let calls = rec.calls.borrow();
        assert_eq!(calls[0], Call::FlyTo(c(25.60005, 85.1), 8));
        assert!(matches!(calls[1], Call::OpenPopup(_, 600)));
    }

    #[test]
    fn test_focus_elsewhere_only_flies() {
        let rec = Recorder::new();
        let mut sync = MapSynchronizer::new(rec.clone());
        sync.focus(c(0.0, 0.0), 8);
        assert_eq!(rec.calls.borrow().len(), 1);
    }
}
