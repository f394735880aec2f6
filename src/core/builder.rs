//! Map builder for fluent configuration
//!
//! [`MapBuilder`] assembles a [`QuakeMap`] from base layers and overlays;
//! [`compose_earthquake_map`] is the standard composition with the three
//! base maps and the earthquake overlay.

use crate::{
    core::{config::MapOptions, geo::LatLng, map::QuakeMap},
    layers::{
        base::{LayerRole, LayerTrait},
        earthquake::EarthquakeLayer,
        manager::LayerManager,
        tile::TileLayer,
    },
    ui::{controls::LayerControl, legend::Legend},
    Result,
};

/// Builder for creating and configuring QuakeMap instances
pub struct MapBuilder {
    options: MapOptions,
    base_layers: Vec<Box<dyn LayerTrait>>,
    overlays: Vec<Box<dyn LayerTrait>>,
    layer_control: LayerControl,
    legend: Legend,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            options: MapOptions::default(),
            base_layers: Vec::new(),
            overlays: Vec::new(),
            layer_control: LayerControl::default(),
            legend: Legend::default(),
        }
    }

    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.options.center = center;
        self.options.zoom = zoom;
        self
    }

    /// Set zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.options.min_zoom = min_zoom;
        self.options.max_zoom = max_zoom;
        self
    }

    /// Adds a base layer; the control lists base layers in the order added
    pub fn with_base_layer(mut self, layer: Box<dyn LayerTrait>) -> Self {
        self.base_layers.push(layer);
        self
    }

    pub fn with_overlay(mut self, layer: Box<dyn LayerTrait>) -> Self {
        self.overlays.push(layer);
        self
    }

    pub fn with_layer_control(mut self, control: LayerControl) -> Self {
        self.layer_control = control;
        self
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    /// Validates the options and assembles the map. The base layer named by
    /// `initial_base_layer` is activated when it is a base layer, otherwise
    /// the first one added stays active.
    pub fn build(self) -> Result<QuakeMap> {
        self.options.validate()?;

        let mut layers = LayerManager::new();
        for layer in self.base_layers {
            layers.add_base_layer(layer)?;
        }
        for layer in self.overlays {
            layers.add_overlay(layer)?;
        }

        let initial = self.options.initial_base_layer.as_str();
        if layers.role(initial) == Some(LayerRole::Base) {
            layers.set_active_base(initial)?;
        } else if !layers.base_layers().is_empty() {
            log::warn!("{} is not a base layer, keeping the first", initial);
        }

        let mut map = QuakeMap::from_parts(self.options, layers);
        map.layer_control = self.layer_control;
        map.legend = self.legend;

        log::info!(
            "map composed with {} base layers and {} overlays",
            map.layers.base_layers().len(),
            map.layers.overlays().len()
        );
        Ok(map)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Composes the earthquake map: Satellite, Street Map and Topographic Map
/// base layers, the earthquake overlay, the layer control and the depth
/// legend.
pub fn compose_earthquake_map(
    earthquakes: EarthquakeLayer,
    options: &MapOptions,
) -> Result<QuakeMap> {
    let mut earthquakes = earthquakes;
    earthquakes.set_visible(options.show_earthquakes);

    MapBuilder::new()
        .with_options(options.clone())
        .with_base_layer(Box::new(TileLayer::satellite()))
        .with_base_layer(Box::new(TileLayer::street()))
        .with_base_layer(Box::new(TileLayer::topographic()))
        .with_overlay(Box::new(earthquakes))
        .build()
}
