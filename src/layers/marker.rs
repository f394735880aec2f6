use crate::{
    core::{constants::MIN_HIT_RADIUS, geo::LatLng, geo::Point, viewport::Viewport},
    style::MarkerStyle,
    ui::popup::{Popup, PopupContent},
};
use serde::{Deserialize, Serialize};

/// Circle drawn at a geographic position with a fixed pixel radius
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleMarker {
    pub id: String,
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: PopupContent,
}

impl CircleMarker {
    pub fn new(
        id: impl Into<String>,
        position: LatLng,
        style: MarkerStyle,
        popup: PopupContent,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            style,
            popup,
        }
    }

    pub fn radius(&self) -> f64 {
        self.style.radius
    }

    /// Centre of the marker in container pixels
    pub fn screen_position(&self, viewport: &Viewport) -> Point {
        viewport.lat_lng_to_pixel(&self.position)
    }

    /// Whether a container pixel lies on the marker. Tiny markers still get a
    /// few pixels of slack so they stay clickable.
    pub fn hit_test(&self, viewport: &Viewport, pixel: &Point) -> bool {
        let radius = self.style.radius.max(MIN_HIT_RADIUS);
        self.screen_position(viewport).distance_to(pixel) <= radius
    }

    pub fn to_popup(&self) -> Popup {
        Popup::new(self.id.clone(), self.position, self.popup.clone())
    }
}
