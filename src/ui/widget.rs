//! egui widget that draws and drives a [`QuakeMap`].

use crate::{
    core::{constants::WHEEL_PX_PER_ZOOM_LEVEL, geo::Point, map::QuakeMap},
    layers::{base::LayerTrait, earthquake::EarthquakeLayer, tile::TileLayer},
    tiles::{TileCache, TileKey, TileLoader},
    ui::popup::PopupStyle,
};
use egui::{
    Align2, Color32, ColorImage, FontId, Painter, Pos2, Rect, Response, Sense, Stroke,
    TextureHandle, TextureOptions, Ui, Vec2,
};

const BACKGROUND: Color32 = Color32::from_rgb(221, 221, 221);
const UV_FULL: Rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));

/// Tile textures plus the loader feeding them
struct TileStore {
    cache: TileCache<TextureHandle>,
    loader: TileLoader,
}

impl TileStore {
    /// Uploads tiles that finished downloading since the last frame
    fn receive(&mut self, ctx: &egui::Context) {
        for (key, tile) in self.loader.poll() {
            let image = ColorImage::from_rgba_unmultiplied([tile.width, tile.height], &tile.rgba);
            let name = format!("{}/{}/{}/{}", key.layer_id, key.coord.z, key.coord.x, key.coord.y);
            let texture = ctx.load_texture(name, image, TextureOptions::LINEAR);
            self.cache.insert(key, texture);
        }
    }
}

/// Interactive earthquake map. Drag to pan, scroll or pinch to zoom around the
/// pointer, click a marker to open its popup.
pub struct MapWidget {
    map: QuakeMap,
    tiles: TileStore,
    popup_style: PopupStyle,
}

impl MapWidget {
    pub fn new(map: QuakeMap, ctx: &egui::Context) -> Self {
        let repaint = ctx.clone();
        let loader = TileLoader::new(map.options().max_tile_requests)
            .with_notify(move || repaint.request_repaint());
        let cache = TileCache::new(map.options().tile_cache_size);

        Self {
            map,
            tiles: TileStore { cache, loader },
            popup_style: PopupStyle::default(),
        }
    }

    pub fn map(&self) -> &QuakeMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut QuakeMap {
        &mut self.map
    }

    /// Lays the map out over the available space and draws it
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.map
            .set_size(Point::new(rect.width() as f64, rect.height() as f64));

        self.handle_input(ui, rect, &response);
        self.tiles.receive(ui.ctx());

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);
        self.paint_base_layer(&painter, rect);
        self.paint_markers(&painter, rect);
        self.paint_attribution(&painter, rect);

        if let Some(popup) = self.map.popups.current() {
            let anchor = self.map.viewport.lat_lng_to_pixel(&popup.position);
            popup.paint(ui, to_screen(rect, &anchor), &self.popup_style);
        }

        self.show_zoom_buttons(ui, rect);
        if self.map.layer_control.show(ui, rect, &mut self.map.layers) {
            self.on_layers_changed();
        }
        self.map.legend.show(ui, rect);

        response
    }

    /// Retries failed tiles for the new selection and drops a popup whose
    /// overlay was hidden.
    fn on_layers_changed(&mut self) {
        self.tiles.loader.clear_failed();
        if !self.map.earthquakes().is_some_and(|l| l.is_visible()) {
            self.map.popups.close();
        }
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        if response.dragged() {
            let delta = response.drag_delta();
            if delta != Vec2::ZERO {
                self.map.pan_by(Point::new(delta.x as f64, delta.y as f64));
            }
        }

        if response.hovered() {
            let (scroll, pinch, hover) =
                ui.input(|i| (i.raw_scroll_delta.y, i.zoom_delta(), i.pointer.hover_pos()));
            let focus = hover.map(|p| to_container(rect, p));

            if scroll.abs() > 0.1 {
                self.map
                    .zoom_around(scroll as f64 / WHEEL_PX_PER_ZOOM_LEVEL, focus);
            }
            if (pinch - 1.0).abs() > f32::EPSILON {
                self.map.zoom_around((pinch as f64).log2(), focus);
            }
        }

        if let Some(pos) = response.interact_pointer_pos() {
            let pixel = to_container(rect, pos);
            if response.double_clicked() {
                self.map.zoom_around(1.0, Some(pixel));
            } else if response.clicked() {
                self.map.click(&pixel);
            }
        }
    }

    fn paint_base_layer(&mut self, painter: &Painter, rect: Rect) {
        let Some(active) = self.map.layers.active_base() else {
            return;
        };
        let Some(layer) = self.map.layers.get_layer_as::<TileLayer>(active) else {
            return;
        };
        if !layer.is_visible() {
            return;
        }

        let tint = Color32::WHITE.gamma_multiply(layer.opacity());
        for tile in self.map.viewport.visible_tiles(layer.max_native_zoom()) {
            let key = TileKey::new(layer.id(), tile.coord);
            let tile_rect = Rect::from_min_size(
                to_screen(rect, &tile.min),
                Vec2::splat(tile.size as f32),
            );

            if let Some(texture) = self.tiles.cache.get(&key) {
                painter.image(texture.id(), tile_rect, UV_FULL, tint);
            } else if !self.tiles.loader.is_pending(&key) && !self.tiles.loader.has_failed(&key) {
                let url = layer.tile_url(tile.coord);
                self.tiles.loader.request(key, url);
            }
        }
    }

    fn paint_markers(&self, painter: &Painter, rect: Rect) {
        let Some(layer) = self.map.earthquakes() else {
            return;
        };
        if !layer.is_visible() {
            return;
        }
        paint_earthquakes(painter, rect, &self.map, layer);
    }

    fn paint_attribution(&self, painter: &Painter, rect: Rect) {
        let text = self.map.attributions().join(" | ");
        if text.is_empty() {
            return;
        }
        let galley =
            painter.layout_no_wrap(text, FontId::proportional(10.0), Color32::from_gray(60));
        let min = rect.left_bottom() + Vec2::new(0.0, -galley.size().y - 4.0);
        let background = Rect::from_min_size(min, galley.size() + Vec2::new(8.0, 4.0));
        painter.rect_filled(background, 0.0, Color32::from_white_alpha(200));
        painter.galley(min + Vec2::new(4.0, 2.0), galley, Color32::from_gray(60));
    }

    fn show_zoom_buttons(&mut self, ui: &Ui, rect: Rect) {
        let mut delta = 0.0;
        egui::Area::new(egui::Id::new("quakemap_zoom"))
            .fixed_pos(rect.min + Vec2::splat(10.0))
            .pivot(Align2::LEFT_TOP)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let size = Vec2::splat(24.0);
                    if ui.add_sized(size, egui::Button::new("+")).clicked() {
                        delta = 1.0;
                    }
                    if ui.add_sized(size, egui::Button::new("−")).clicked() {
                        delta = -1.0;
                    }
                });
            });
        if delta != 0.0 {
            self.map.zoom_around(delta, None);
        }
    }
}

fn paint_earthquakes(painter: &Painter, rect: Rect, map: &QuakeMap, layer: &EarthquakeLayer) {
    let opacity = layer.opacity();
    for marker in layer.markers() {
        let center = to_screen(rect, &marker.screen_position(&map.viewport));
        let radius = marker.radius() as f32;
        if !rect.expand(radius).contains(center) {
            continue;
        }

        let style = &marker.style;
        let fill: Color32 = style.fill_color.with_opacity(style.fill_opacity * opacity).into();
        let stroke_color: Color32 = style
            .stroke_color
            .with_opacity(style.stroke_opacity * opacity)
            .into();
        painter.circle(center, radius, fill, Stroke::new(style.stroke_weight, stroke_color));
    }
}

fn to_screen(rect: Rect, pixel: &Point) -> Pos2 {
    rect.min + Vec2::new(pixel.x as f32, pixel.y as f32)
}

fn to_container(rect: Rect, pos: Pos2) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}
