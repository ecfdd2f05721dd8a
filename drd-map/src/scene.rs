//! Pure scene builders: workflow state in, layers and viewport out.

use crate::style::{
    flood_status_color, intensity_color, EARTHQUAKE_COLOR, HISTORICAL_TRACK_COLOR,
    PREDICTED_TRACK_COLOR, PREDICTED_TRACK_DASH, STATION_FILL,
};
use crate::surface::{Bounds, MarkerSpec, MarkerStyle, PolylineSpec, Viewport};
use crate::{DEFAULT_BOUNDS, DEFAULT_ZOOM, FIT_PADDING, FOCUS_ZOOM};
use drd_api::{FloodPrediction, Station, StationInfo};
use drd_geo::{Coordinate, TrackPoint};

const STATION_TAG_PREFIX: &str = "station:";

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(MarkerSpec),
    Polyline(PolylineSpec),
}

/// Everything the synchronizer draws in one pass, in drawing order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub layers: Vec<Layer>,
    /// `None` leaves the view where the user put it.
    pub viewport: Option<Viewport>,
}

impl Scene {
    pub fn markers(&self) -> impl Iterator<Item = &MarkerSpec> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Marker(m) => Some(m),
            Layer::Polyline(_) => None,
        })
    }

    pub fn polylines(&self) -> impl Iterator<Item = &PolylineSpec> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Polyline(p) => Some(p),
            Layer::Marker(_) => None,
        })
    }
}

/// Inputs of the cyclone track map.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackView<'a> {
    pub historical: &'a [Coordinate],
    pub predicted: &'a [TrackPoint],
    pub current: Option<Coordinate>,
    pub intensity: Option<f64>,
    /// Used only when there are no points to fit.
    pub center: Option<Coordinate>,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn lat_lon_lines(p: &Coordinate) -> String {
    format!("Lat: {:.4}<br/>Lon: {:.4}", p.latitude, p.longitude)
}

fn intensity_dot(knots: Option<f64>) -> MarkerStyle {
    MarkerStyle::Dot {
        color: intensity_color(knots).to_string(),
    }
}

pub fn track_scene(view: &TrackView<'_>) -> Scene {
    let mut layers = Vec::new();
    let predicted: Vec<Coordinate> = view.predicted.iter().map(TrackPoint::position).collect();

    if view.historical.len() > 1 {
        layers.push(Layer::Polyline(PolylineSpec {
            points: view.historical.to_vec(),
            color: HISTORICAL_TRACK_COLOR.to_string(),
            weight: 3,
            opacity: 0.7,
            dash: None,
        }));
    }
    if predicted.len() > 1 {
        layers.push(Layer::Polyline(PolylineSpec {
            points: predicted.clone(),
            color: PREDICTED_TRACK_COLOR.to_string(),
            weight: 3,
            opacity: 0.7,
            dash: Some(PREDICTED_TRACK_DASH.to_string()),
        }));
    }

    for (i, p) in view.historical.iter().enumerate() {
        layers.push(Layer::Marker(MarkerSpec::new(*p, MarkerStyle::Pin).popup(format!(
            "Historical Point {}<br/>{}",
            i + 1,
            lat_lon_lines(p)
        ))));
    }
    for (i, p) in view.predicted.iter().enumerate() {
        let step = p.step.unwrap_or(i as u32 + 1);
        let position = p.position();
        layers.push(Layer::Marker(
            MarkerSpec::new(position, intensity_dot(view.intensity)).popup(format!(
                "Predicted Step {}<br/>{}",
                step,
                lat_lon_lines(&position)
            )),
        ));
    }

    // Drawn last so it sits on top.
    if let Some(current) = view.current {
        let mut popup = format!("<strong>Current Position</strong><br/>{}", lat_lon_lines(&current));
        if let Some(knots) = view.intensity.filter(|k| *k > 0.0) {
            popup.push_str(&format!("<br/>Intensity: {} knots", knots));
        }
        layers.push(Layer::Marker(
            MarkerSpec::new(current, intensity_dot(view.intensity)).popup(popup),
        ));
    }

    let all: Vec<Coordinate> = view.historical.iter().copied().chain(predicted).collect();
    let viewport = match (Bounds::enclosing(&all), view.center) {
        (Some(bounds), _) => Viewport::Fit {
            bounds,
            padding: FIT_PADDING,
        },
        (None, Some(center)) => Viewport::Center {
            center,
            zoom: DEFAULT_ZOOM,
        },
        (None, None) => Viewport::Fit {
            bounds: DEFAULT_BOUNDS,
            padding: FIT_PADDING,
        },
    };

    Scene {
        layers,
        viewport: Some(viewport),
    }
}

/// Inputs of the flood station map.
#[derive(Debug, Clone, Copy, Default)]
pub struct StationView<'a> {
    pub stations: &'a [Station],
    pub selected: Option<&'a StationInfo>,
    pub prediction: Option<&'a FloodPrediction>,
}

/// Click tag for the station at `index` in the catalog.
pub fn station_tag(index: usize) -> String {
    format!("{}{}", STATION_TAG_PREFIX, index)
}

/// Inverse of [`station_tag`].
pub fn parse_station_tag(tag: &str) -> Option<usize> {
    tag.strip_prefix(STATION_TAG_PREFIX)?.parse().ok()
}

pub fn station_scene(view: &StationView<'_>) -> Scene {
    let mut layers = Vec::with_capacity(view.stations.len() + 1);
    for (i, s) in view.stations.iter().enumerate() {
        let popup = format!(
            "<strong>{}</strong><br/>{} River<br/>{}, {}",
            escape(s.display_name()),
            escape(&s.river),
            escape(&s.district),
            escape(&s.state)
        );
        layers.push(Layer::Marker(
            MarkerSpec::new(
                Coordinate::new(s.latitude, s.longitude),
                MarkerStyle::Circle {
                    fill: STATION_FILL.to_string(),
                    radius: 6,
                },
            )
            .popup(popup)
            .click_tag(station_tag(i)),
        ));
    }

    let mut viewport = None;
    if let Some(prediction) = view.prediction {
        let pin = prediction
            .station_info
            .as_ref()
            .map(|info| (info.name.clone(), Coordinate::new(info.latitude, info.longitude)))
            .or_else(|| view.selected.map(|s| (s.name.clone(), s.position())));
        if let Some((name, position)) = pin {
            let color = flood_status_color(prediction.status);
            let popup = format!(
                "<strong>{}</strong><br/><strong style=\"color: {};\">{:?}</strong><br/>Probability: {:.1}%<br/>Level: {:.2}m",
                escape(&name),
                color,
                prediction.status,
                prediction.probability * 100.0,
                prediction.current_water_level
            );
            layers.push(Layer::Marker(
                MarkerSpec::new(
                    position,
                    MarkerStyle::Highlight {
                        color: color.to_string(),
                    },
                )
                .popup(popup),
            ));
            viewport = Some(Viewport::Center {
                center: position,
                zoom: FOCUS_ZOOM,
            });
        }
    }

    Scene { layers, viewport }
}

/// Single pin at the earthquake form's location.
pub fn earthquake_scene(position: Option<Coordinate>) -> Scene {
    match position {
        Some(p) => Scene {
            layers: vec![Layer::Marker(
                MarkerSpec::new(
                    p,
                    MarkerStyle::Dot {
                        color: EARTHQUAKE_COLOR.to_string(),
                    },
                )
                .popup(lat_lon_lines(&p)),
            )],
            viewport: Some(Viewport::Center {
                center: p,
                zoom: DEFAULT_ZOOM,
            }),
        },
        None => Scene::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drd_api::FloodStatus;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    #[test]
    fn test_empty_track_falls_back_to_default_bounds() {
        let scene = track_scene(&TrackView::default());
        assert!(scene.layers.is_empty());
        assert_eq!(
            scene.viewport,
            Some(Viewport::Fit {
                bounds: DEFAULT_BOUNDS,
                padding: 50
            })
        );
    }

    #[test]
    fn test_explicit_center_when_no_points() {
        let scene = track_scene(&TrackView {
            center: Some(c(20.0, 77.0)),
            ..Default::default()
        });
        assert_eq!(
            scene.viewport,
            Some(Viewport::Center {
                center: c(20.0, 77.0),
                zoom: 6
            })
        );
    }

    #[test]
    fn test_single_point_has_no_polyline() {
        let hist = [c(12.0, 85.0)];
        let scene = track_scene(&TrackView {
            historical: &hist,
            current: Some(hist[0]),
            ..Default::default()
        });
        assert_eq!(scene.polylines().count(), 0);
        assert_eq!(scene.markers().count(), 2);
    }

    #[test]
    fn test_full_track_layers_and_fit() {
        let hist = [c(12.0, 86.0), c(13.0, 85.0), c(14.0, 84.0)];
        let pred = [
            TrackPoint::from(c(15.0, 83.0)),
            TrackPoint {
                latitude: 16.0,
                longitude: 82.0,
                step: Some(2),
                confidence: Some(0.8),
            },
        ];
        let scene = track_scene(&TrackView {
            historical: &hist,
            predicted: &pred,
            current: Some(hist[2]),
            intensity: Some(70.0),
            center: None,
        });

        let lines: Vec<_> = scene.polylines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].dash, None);
        assert_eq!(lines[1].dash.as_deref(), Some("10, 5"));

        let markers: Vec<_> = scene.markers().collect();
        assert_eq!(markers.len(), 6);
        assert_eq!(markers[3].style, MarkerStyle::Dot { color: "#f97316".into() });
        let top = markers.last().unwrap();
        assert_eq!(top.position, c(14.0, 84.0));
        assert!(top.popup.as_deref().unwrap().contains("Intensity: 70 knots"));
        assert!(markers[0].popup.as_deref().unwrap().starts_with("Historical Point 1<br/>Lat: 12.0000"));
        assert!(markers[4].popup.as_deref().unwrap().starts_with("Predicted Step 2"));

        assert_eq!(
            scene.viewport,
            Some(Viewport::Fit {
                bounds: Bounds {
                    south_west: c(12.0, 82.0),
                    north_east: c(16.0, 86.0)
                },
                padding: 50
            })
        );
    }

    #[test]
    fn test_scene_is_pure() {
        let hist = [c(1.0, 2.0), c(3.0, 4.0)];
        let view = TrackView {
            historical: &hist,
            ..Default::default()
        };
        assert_eq!(track_scene(&view), track_scene(&view));
    }

    fn station(name: &str, lat: f64, lon: f64) -> Station {
        Station {
            name: name.into(),
            station_name: String::new(),
            latitude: lat,
            longitude: lon,
            state: "Bihar".into(),
            district: "Patna".into(),
            basin: "Ganga".into(),
            river: "Ganga".into(),
        }
    }

    #[test]
    fn test_station_scene_tags_and_pin() {
        let stations = [station("Patna", 25.6, 85.1), station("Buxar", 25.5, 83.9)];
        let selected = stations[1].info();
        let prediction = FloodPrediction {
            status: FloodStatus::Warning,
            probability: 0.625,
            current_water_level: 49.5,
            ..Default::default()
        };
        let scene = station_scene(&StationView {
            stations: &stations,
            selected: Some(&selected),
            prediction: Some(&prediction),
        });

        let markers: Vec<_> = scene.markers().collect();
        assert_eq!(markers.len(), 3);
        assert_eq!(markers[1].click_tag.as_deref(), Some("station:1"));
        assert_eq!(parse_station_tag("station:1"), Some(1));
        assert_eq!(parse_station_tag("pin"), None);

        let pin = markers[2];
        assert_eq!(pin.style, MarkerStyle::Highlight { color: "#F59E0B".into() });
        assert!(pin.popup.as_deref().unwrap().contains("Probability: 62.5%"));
        assert_eq!(
            scene.viewport,
            Some(Viewport::Center {
                center: c(25.5, 83.9),
                zoom: 8
            })
        );
    }

    #[test]
    fn test_station_scene_without_prediction_keeps_view() {
        let stations = [station("Patna", 25.6, 85.1)];
        let scene = station_scene(&StationView {
            stations: &stations,
            ..Default::default()
        });
        assert_eq!(scene.viewport, None);
        assert_eq!(scene.markers().count(), 1);
    }

    #[test]
    fn test_earthquake_scene() {
        assert_eq!(earthquake_scene(None), Scene::default());
        let scene = earthquake_scene(Some(c(28.6, 77.2)));
        assert_eq!(scene.markers().count(), 1);
    }
}
