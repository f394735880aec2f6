use crate::{
    core::constants::LEGEND_TITLE,
    style::{depth::DEPTH_SCALE, depth_color, Color},
    ui::controls::ControlPosition,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "egui")]
use egui::{Rect, Sense, Ui, Vec2};

/// One swatch of the legend
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Depth legend. Entries come from the same bracket table that colours the
/// markers, so the two cannot drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub position: ControlPosition,
    pub margin: f32,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            title: LEGEND_TITLE.to_string(),
            position: ControlPosition::BottomRight,
            margin: 10.0,
        }
    }
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ascending by grade. Each swatch samples the colour one kilometre
    /// past its grade so it lands inside the bracket it labels.
    pub fn entries(&self) -> Vec<LegendEntry> {
        DEPTH_SCALE
            .grades()
            .enumerate()
            .filter_map(|(i, grade)| {
                Some(LegendEntry {
                    label: DEPTH_SCALE.label(i)?,
                    color: depth_color(grade + 1.0),
                })
            })
            .collect()
    }

    #[cfg(feature = "egui")]
    pub fn show(&self, ui: &Ui, map_rect: Rect) {
        let (pos, pivot) = self.position.anchor(map_rect, self.margin);

        egui::Area::new(egui::Id::new("quakemap_legend"))
            .fixed_pos(pos)
            .pivot(pivot)
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.strong(&self.title);
                    for entry in self.entries() {
                        ui.horizontal(|ui| {
                            let (swatch, _) =
                                ui.allocate_exact_size(Vec2::new(18.0, 14.0), Sense::hover());
                            ui.painter().rect_filled(swatch, 0.0, entry.color);
                            ui.label(&entry.label);
                        });
                    }
                });
            });
    }
}
