use crate::layers::manager::LayerManager;
use serde::{Deserialize, Serialize};

#[cfg(feature = "egui")]
use egui::{Align2, Pos2, Rect, Ui, Vec2};

/// Corner of the map a control is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    /// Anchor point inside `container` (inset by `margin`) and the pivot that
    /// keeps the control inside the map
    #[cfg(feature = "egui")]
    pub fn anchor(&self, container: Rect, margin: f32) -> (Pos2, Align2) {
        match self {
            ControlPosition::TopLeft => (container.min + Vec2::splat(margin), Align2::LEFT_TOP),
            ControlPosition::TopRight => (
                container.right_top() + Vec2::new(-margin, margin),
                Align2::RIGHT_TOP,
            ),
            ControlPosition::BottomLeft => (
                container.left_bottom() + Vec2::new(margin, -margin),
                Align2::LEFT_BOTTOM,
            ),
            ControlPosition::BottomRight => {
                (container.max - Vec2::splat(margin), Align2::RIGHT_BOTTOM)
            }
        }
    }
}

/// One row of the layer control
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

/// Layer switcher: radio buttons for base layers, checkboxes for overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerControl {
    pub position: ControlPosition,
    /// Collapsed controls show only a button that expands them
    pub collapsed: bool,
    pub margin: f32,
}

impl Default for LayerControl {
    fn default() -> Self {
        Self {
            position: ControlPosition::TopRight,
            collapsed: false,
            margin: 10.0,
        }
    }
}

impl LayerControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }

    /// Base layer rows in insertion order; exactly the active one is selected
    pub fn base_entries(&self, layers: &LayerManager) -> Vec<LayerEntry> {
        let active = layers.active_base();
        layers
            .base_layers()
            .into_iter()
            .map(|l| LayerEntry {
                id: l.id().to_string(),
                label: l.name().to_string(),
                selected: Some(l.id()) == active,
            })
            .collect()
    }

    /// Overlay rows in insertion order, selected when visible
    pub fn overlay_entries(&self, layers: &LayerManager) -> Vec<LayerEntry> {
        layers
            .overlays()
            .into_iter()
            .map(|l| LayerEntry {
                id: l.id().to_string(),
                label: l.name().to_string(),
                selected: l.is_visible(),
            })
            .collect()
    }

    /// Draws the control over `map_rect`. Returns true when the user changed
    /// the layer selection.
    #[cfg(feature = "egui")]
    pub fn show(&mut self, ui: &Ui, map_rect: Rect, layers: &mut LayerManager) -> bool {
        let bases = self.base_entries(layers);
        let overlays = self.overlay_entries(layers);
        let (pos, pivot) = self.position.anchor(map_rect, self.margin);
        let mut changed = false;

        egui::Area::new(egui::Id::new("quakemap_layer_control"))
            .fixed_pos(pos)
            .pivot(pivot)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    if self.collapsed {
                        if ui.button("Layers").clicked() {
                            self.collapsed = false;
                        }
                        return;
                    }

                    for entry in &bases {
                        if ui.radio(entry.selected, entry.label.as_str()).clicked()
                            && !entry.selected
                        {
                            match layers.set_active_base(&entry.id) {
                                Ok(()) => changed = true,
                                Err(e) => log::warn!("{}", e),
                            }
                        }
                    }

                    if !overlays.is_empty() {
                        ui.separator();
                    }

                    for entry in &overlays {
                        let mut visible = entry.selected;
                        if ui.checkbox(&mut visible, entry.label.as_str()).changed() {
                            match layers.set_overlay_visible(&entry.id, visible) {
                                Ok(()) => changed = true,
                                Err(e) => log::warn!("{}", e),
                            }
                        }
                    }
                });
            });

        changed
    }
}
