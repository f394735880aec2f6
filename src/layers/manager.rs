use crate::{
    layers::base::{LayerRole, LayerTrait},
    prelude::HashMap,
    MapError, Result,
};

/// Overlays stack above every base layer
const OVERLAY_Z_INDEX: i32 = 100;

struct Entry {
    layer: Box<dyn LayerTrait>,
    role: LayerRole,
}

/// Owns the map's layers: mutually exclusive base layers plus independently
/// toggled overlays.
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Entry>,
    /// Layer IDs in insertion order, as the layer control lists them
    insertion_order: Vec<String>,
    /// Layer IDs sorted by z-index for rendering
    render_order: Vec<String>,
    active_base: Option<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            insertion_order: Vec::new(),
            render_order: Vec::new(),
            active_base: None,
        }
    }

    /// Adds a base layer. The first one added becomes active; the others
    /// start hidden.
    pub fn add_base_layer(&mut self, mut layer: Box<dyn LayerTrait>) -> Result<()> {
        let is_first = self.active_base.is_none();
        layer.set_visible(is_first);
        let id = layer.id().to_string();
        self.insert(layer, LayerRole::Base)?;
        if is_first {
            self.active_base = Some(id);
        }
        Ok(())
    }

    /// Adds an overlay, keeping its current visibility
    pub fn add_overlay(&mut self, mut layer: Box<dyn LayerTrait>) -> Result<()> {
        if layer.z_index() < OVERLAY_Z_INDEX {
            layer.set_z_index(OVERLAY_Z_INDEX);
        }
        self.insert(layer, LayerRole::Overlay)
    }

    fn insert(&mut self, layer: Box<dyn LayerTrait>, role: LayerRole) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("duplicate layer id {layer_id}")));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), Entry { layer, role });
        self.insertion_order.push(layer_id.clone());

        // Insert in sorted order by z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|e| e.layer.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());
        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Shows the base layer `layer_id` and hides the other base layers
    pub fn set_active_base(&mut self, layer_id: &str) -> Result<()> {
        match self.layers.get(layer_id) {
            Some(entry) if entry.role == LayerRole::Base => {}
            _ => return Err(MapError::Layer(format!("no base layer with id {layer_id}"))),
        }

        for entry in self.layers.values_mut() {
            if entry.role == LayerRole::Base {
                let active = entry.layer.id() == layer_id;
                entry.layer.set_visible(active);
            }
        }
        log::debug!("base layer switched to {}", layer_id);
        self.active_base = Some(layer_id.to_string());
        Ok(())
    }

    pub fn active_base(&self) -> Option<&str> {
        self.active_base.as_deref()
    }

    pub fn set_overlay_visible(&mut self, layer_id: &str, visible: bool) -> Result<()> {
        match self.layers.get_mut(layer_id) {
            Some(entry) if entry.role == LayerRole::Overlay => {
                entry.layer.set_visible(visible);
                Ok(())
            }
            _ => Err(MapError::Layer(format!("no overlay with id {layer_id}"))),
        }
    }

    pub fn role(&self, layer_id: &str) -> Option<LayerRole> {
        self.layers.get(layer_id).map(|e| e.role)
    }

    /// Base layers in insertion order
    pub fn base_layers(&self) -> Vec<&dyn LayerTrait> {
        self.in_insertion_order(LayerRole::Base)
    }

    /// Overlays in insertion order
    pub fn overlays(&self) -> Vec<&dyn LayerTrait> {
        self.in_insertion_order(LayerRole::Overlay)
    }

    fn in_insertion_order(&self, role: LayerRole) -> Vec<&dyn LayerTrait> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.layers.get(id))
            .filter(|e| e.role == role)
            .map(|e| e.layer.as_ref())
            .collect()
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|e| e.layer.as_ref())
    }

    /// Gets a layer by ID as its concrete type
    pub fn get_layer_as<T: 'static>(&self, layer_id: &str) -> Option<&T> {
        self.get_layer(layer_id)?.as_any().downcast_ref::<T>()
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers
            .get_mut(layer_id)
            .map(|e| f(e.layer.as_mut()))
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|e| e.layer.as_ref()))
            .collect()
    }

    /// Visible layers in render order
    pub fn visible_layers(&self) -> Vec<&dyn LayerTrait> {
        self.layers().into_iter().filter(|l| l.is_visible()).collect()
    }

    /// Attribution lines of the visible layers, bottom layer first
    pub fn attributions(&self) -> Vec<&str> {
        self.visible_layers()
            .into_iter()
            .filter_map(|l| l.attribution())
            .collect()
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{earthquake::EarthquakeLayer, tile::TileLayer};

    fn manager() -> LayerManager {
        let mut manager = LayerManager::new();
        manager.add_base_layer(Box::new(TileLayer::satellite())).unwrap();
        manager.add_base_layer(Box::new(TileLayer::street())).unwrap();
        manager.add_base_layer(Box::new(TileLayer::topographic())).unwrap();
        manager.add_overlay(Box::new(EarthquakeLayer::empty())).unwrap();
        manager
    }

    fn visible_ids(manager: &LayerManager) -> Vec<&str> {
        manager.visible_layers().iter().map(|l| l.id()).collect()
    }

    #[test]
    fn test_first_base_layer_is_active() {
        let manager = manager();
        assert_eq!(manager.active_base(), Some("satellite"));
        assert_eq!(visible_ids(&manager), vec!["satellite", "earthquakes"]);
    }

    #[test]
    fn test_base_layers_are_exclusive() {
        let mut manager = manager();
        manager.set_active_base("topographic").unwrap();

        assert_eq!(manager.active_base(), Some("topographic"));
        assert_eq!(visible_ids(&manager), vec!["topographic", "earthquakes"]);
    }

    #[test]
    fn test_overlay_toggles_independently() {
        let mut manager = manager();
        manager.set_overlay_visible("earthquakes", false).unwrap();
        assert_eq!(visible_ids(&manager), vec!["satellite"]);

        manager.set_active_base("street").unwrap();
        manager.set_overlay_visible("earthquakes", true).unwrap();
        assert_eq!(visible_ids(&manager), vec!["street", "earthquakes"]);
    }

    #[test]
    fn test_role_mismatch_is_an_error() {
        let mut manager = manager();
        assert!(manager.set_active_base("earthquakes").is_err());
        assert!(manager.set_overlay_visible("street", false).is_err());
        assert!(manager.set_active_base("missing").is_err());
        assert_eq!(manager.active_base(), Some("satellite"));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut manager = manager();
        let result = manager.add_base_layer(Box::new(TileLayer::street()));
        assert!(matches!(result, Err(MapError::Layer(_))));
        assert_eq!(manager.len(), 4);
    }

    #[test]
    fn test_control_order_and_render_order() {
        let manager = manager();
        let bases: Vec<_> = manager.base_layers().iter().map(|l| l.name()).collect();
        let overlays: Vec<_> = manager.overlays().iter().map(|l| l.name()).collect();
        assert_eq!(bases, vec!["Satellite", "Street Map", "Topographic Map"]);
        assert_eq!(overlays, vec!["Earthquakes"]);

        let last = manager.layers().last().map(|l| l.id());
        assert_eq!(last, Some("earthquakes"));
    }

    #[test]
    fn test_get_layer_as() {
        let manager = manager();
        assert!(manager.get_layer_as::<EarthquakeLayer>("earthquakes").is_some());
        assert!(manager.get_layer_as::<TileLayer>("earthquakes").is_none());
        assert_eq!(
            manager
                .get_layer_as::<TileLayer>("street")
                .map(|l| l.max_native_zoom()),
            Some(19)
        );
    }

    #[test]
    fn test_attributions_follow_visibility() {
        let mut manager = manager();
        assert_eq!(
            manager.attributions(),
            vec!["Tiles courtesy of the U.S. Geological Survey"]
        );
        manager.set_active_base("street").unwrap();
        assert_eq!(manager.attributions(), vec!["© OpenStreetMap contributors"]);
    }
}
