//! Map presentation derived from the session state
//!
//! The presenter holds no state of its own: the camera and the marker are
//! recomputed from [`SessionState`] whenever it changes.

use crate::{Coordinate, SessionState};

/// Zoom level used for every camera target
pub const DEFAULT_ZOOM: f64 = 12.0;

/// The map's view target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Coordinate,
    pub zoom: f64,
}

/// Annotation drawn at the selected point
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub title: String,
    pub coordinate: Coordinate,
}

/// Camera centered on the selection, or on the user when nothing is selected
pub fn camera(state: &SessionState, zoom: f64) -> Camera {
    let center = state
        .selection
        .as_ref()
        .map(|point| point.coordinate())
        .unwrap_or(state.user_position);

    Camera { center, zoom }
}

/// Marker for the selected point, if any
pub fn marker(state: &SessionState) -> Option<Marker> {
    state.selection.as_ref().map(|point| Marker {
        id: point.id.clone(),
        title: point.title.clone(),
        coordinate: point.coordinate(),
    })
}

/// Distance from the user to the selection in meters
pub fn distance_to_selection(state: &SessionState) -> Option<f64> {
    state
        .selection
        .as_ref()
        .map(|point| state.user_position.distance_to(&point.coordinate()))
}
