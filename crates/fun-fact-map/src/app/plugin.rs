//! Walkers plugin drawing the points of interest on the map
//!
//! Every catalog entry gets a small dot that can be clicked to select it; the
//! selected entry gets the large marker.

use egui::{Color32, Pos2, Stroke};
use fun_fact_lib::{Coordinate, Marker};
use std::sync::{Arc, Mutex};
use walkers::{Plugin, Projector};

/// Radius of the selected marker (30 px disc)
const MARKER_RADIUS: f32 = 15.0;
const PLACE_RADIUS: f32 = 5.0;
/// How far from a dot a click still counts as hitting it
const CLICK_TOLERANCE: f32 = 15.0;

const MARKER_FILL: Color32 = Color32::RED;
const PLACE_FILL: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);

/// Id of the place clicked on the map, picked up by the app after the frame
pub type ClickedPlace = Arc<Mutex<Option<String>>>;

pub struct PlacesPlugin {
    places: Vec<(String, Coordinate)>,
    selected: Option<Marker>,
    clicked: ClickedPlace,
}

impl PlacesPlugin {
    pub fn new(
        places: Vec<(String, Coordinate)>,
        selected: Option<Marker>,
        clicked: ClickedPlace,
    ) -> Self {
        Self {
            places,
            selected,
            clicked,
        }
    }

    fn screen_position(projector: &Projector, coordinate: Coordinate) -> Pos2 {
        let screen_vec =
            projector.project(walkers::lat_lon(coordinate.latitude, coordinate.longitude));
        Pos2::new(screen_vec.x, screen_vec.y)
    }
}

impl Plugin for PlacesPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        profiling::scope!("PlacesPlugin::run");

        let painter = ui.painter();
        let selected_id = self.selected.as_ref().map(|marker| marker.id.as_str());

        let screen_places: Vec<(&str, Pos2)> = self
            .places
            .iter()
            .map(|(id, coordinate)| (id.as_str(), Self::screen_position(projector, *coordinate)))
            .collect();

        for (id, position) in &screen_places {
            if Some(*id) == selected_id {
                continue;
            }
            painter.circle(
                *position,
                PLACE_RADIUS,
                PLACE_FILL,
                Stroke::new(1.5, Color32::WHITE),
            );
        }

        if let Some(marker) = &self.selected {
            let position = Self::screen_position(projector, marker.coordinate);
            painter.circle(
                position,
                MARKER_RADIUS,
                MARKER_FILL,
                Stroke::new(2.0, Color32::WHITE),
            );
        }

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(id) = nearest_within(&screen_places, pointer, CLICK_TOLERANCE)
        {
            tracing::debug!("Clicked place {}", id);
            if let Ok(mut clicked) = self.clicked.lock() {
                *clicked = Some(id.to_string());
            }
        }
    }
}

/// Id of the closest point to `pointer`, if within `tolerance` pixels
fn nearest_within<'a>(places: &[(&'a str, Pos2)], pointer: Pos2, tolerance: f32) -> Option<&'a str> {
    places
        .iter()
        .map(|(id, position)| (*id, position.distance(pointer)))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
