use crate::{
    core::{
        config::MapOptions,
        constants::EARTHQUAKE_LAYER_ID,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    layers::{earthquake::EarthquakeLayer, manager::LayerManager, marker::CircleMarker},
    ui::{controls::LayerControl, legend::Legend, popup::PopupManager},
    Result,
};

/// The composed earthquake map: one context object owning the view, the
/// layers and the controls drawn on top of them.
pub struct QuakeMap {
    pub viewport: Viewport,
    pub layers: LayerManager,
    pub layer_control: LayerControl,
    pub legend: Legend,
    pub popups: PopupManager,
    options: MapOptions,
}

impl QuakeMap {
    pub(crate) fn from_parts(options: MapOptions, layers: LayerManager) -> Self {
        let mut viewport = Viewport::new(options.center, options.zoom, Point::new(800.0, 600.0));
        viewport.set_zoom_limits(options.min_zoom, options.max_zoom);
        viewport.set_zoom(options.zoom);

        Self {
            viewport,
            layers,
            layer_control: LayerControl::default(),
            legend: Legend::default(),
            popups: PopupManager::new(),
            options,
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }

    /// Moves the map content by `delta` screen pixels
    pub fn pan_by(&mut self, delta: Point) {
        self.viewport.pan(delta);
    }

    /// Changes zoom by `delta` levels keeping `focus` (container pixels)
    /// fixed, or the centre when no focus is given
    pub fn zoom_around(&mut self, delta: f64, focus: Option<Point>) {
        let target = self.viewport.zoom + delta;
        self.viewport.zoom_to(target, focus);
    }

    /// The earthquake overlay, if the map has one
    pub fn earthquakes(&self) -> Option<&EarthquakeLayer> {
        self.layers.get_layer_as::<EarthquakeLayer>(EARTHQUAKE_LAYER_ID)
    }

    /// Topmost earthquake marker under a container pixel. Hidden overlays
    /// cannot be hit.
    pub fn marker_at(&self, pixel: &Point) -> Option<&CircleMarker> {
        let layer = self.earthquakes()?;
        if !crate::layers::base::LayerTrait::is_visible(layer) {
            return None;
        }
        layer.marker_at(&self.viewport, pixel)
    }

    /// Handles a click: opens the popup of the marker under the pointer, or
    /// closes the open popup when the click hits empty map. Returns true when
    /// a popup was opened.
    pub fn click(&mut self, pixel: &Point) -> bool {
        let popup = self.marker_at(pixel).map(CircleMarker::to_popup);
        match popup {
            Some(popup) => {
                self.popups.open(popup);
                true
            }
            None => {
                self.popups.close();
                false
            }
        }
    }

    pub fn set_base_layer(&mut self, layer_id: &str) -> Result<()> {
        self.layers.set_active_base(layer_id)
    }

    pub fn set_earthquakes_visible(&mut self, visible: bool) -> Result<()> {
        if !visible {
            self.popups.close();
        }
        self.layers.set_overlay_visible(EARTHQUAKE_LAYER_ID, visible)
    }

    /// Attribution lines of the visible layers
    pub fn attributions(&self) -> Vec<&str> {
        self.layers.attributions()
    }
}

impl std::fmt::Debug for QuakeMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuakeMap")
            .field("viewport", &self.viewport)
            .field("layers", &self.layers.len())
            .field("active_base", &self.layers.active_base())
            .finish()
    }
}
