use crate::core::{
    constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, TILE_SIZE},
    geo::{LatLng, Point, TileCoord},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level (fractional zooms are allowed)
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

/// A tile that intersects the viewport, with its placement in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    /// Tile to fetch (column wrapped onto the grid)
    pub coord: TileCoord,
    /// Top-left corner in container pixels
    pub min: Point,
    /// Edge length in container pixels
    pub size: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center: Self::normalize_center(center),
            zoom: zoom.clamp(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM),
            size,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = Self::normalize_center(center);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Projects a LatLng to world pixel coordinates (EPSG:3857) at the given
    /// zoom level, or the current one.
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let world = TILE_SIZE as f64 * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * world;
        let y = (1.0 - (PI / 4.0 + lat_rad / 2.0).tan().ln() / PI) / 2.0 * world;

        Point::new(x, y)
    }

    /// Unprojects world pixel coordinates back to LatLng
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let world = TILE_SIZE as f64 * 2_f64.powf(zoom.unwrap_or(self.zoom));

        let lng = pixel.x / world * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * pixel.y / world);
        let lat = n.sinh().atan().to_degrees();

        LatLng::new(lat, lng)
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let origin = self.top_left_world();
        self.project(lat_lng, None).subtract(&origin)
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let world = pixel.add(&self.top_left_world());
        self.unproject(&world, None)
    }

    /// World pixel coordinate of the container's top-left corner
    fn top_left_world(&self) -> Point {
        self.project(&self.center, None)
            .subtract(&self.size.multiply(0.5))
    }

    /// Pans the viewport so the content moves by `delta` screen pixels
    pub fn pan(&mut self, delta: Point) {
        let center_px = self.project(&self.center, None).subtract(&delta);
        let new_center = self.unproject(&center_px, None);
        self.set_center(new_center);
    }

    /// Zooms the viewport to a specific level, keeping `focus_point` (container
    /// pixels) fixed on screen when given.
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < 1e-6 {
            return;
        }

        match focus_point {
            Some(focus_screen) => {
                let focus_lat_lng = self.pixel_to_lat_lng(&focus_screen);
                self.zoom = new_zoom;
                let drifted = self.lat_lng_to_pixel(&focus_lat_lng);
                self.pan(focus_screen.subtract(&drifted));
            }
            None => self.zoom = new_zoom,
        }
    }

    /// Integer zoom used to fetch tiles, never above `max_native_zoom`
    pub fn tile_zoom(&self, max_native_zoom: u8) -> u8 {
        (self.zoom.round().max(0.0) as u8).min(max_native_zoom)
    }

    /// Enumerates the tiles covering the viewport. Tiles from a lower native
    /// zoom are scaled up to the current fractional zoom.
    pub fn visible_tiles(&self, max_native_zoom: u8) -> Vec<VisibleTile> {
        let tile_zoom = self.tile_zoom(max_native_zoom);
        let tile_px = TILE_SIZE as f64 * 2_f64.powf(self.zoom - tile_zoom as f64);
        let origin = self.top_left_world();

        let first_x = (origin.x / tile_px).floor() as i64;
        let first_y = (origin.y / tile_px).floor() as i64;
        let last_x = ((origin.x + self.size.x) / tile_px).ceil() as i64 - 1;
        let last_y = ((origin.y + self.size.y) / tile_px).ceil() as i64 - 1;

        let mut tiles = Vec::new();
        for y in first_y..=last_y {
            for x in first_x..=last_x {
                if let Some(coord) = TileCoord::wrapped(x, y, tile_zoom) {
                    tiles.push(VisibleTile {
                        coord,
                        min: Point::new(
                            x as f64 * tile_px - origin.x,
                            y as f64 * tile_px - origin.y,
                        ),
                        size: tile_px,
                    });
                }
            }
        }
        tiles
    }

    /// Longitude is left unwrapped so panning past the antimeridian keeps
    /// markers at their own longitude; tile columns wrap instead.
    fn normalize_center(center: LatLng) -> LatLng {
        LatLng::new(LatLng::clamp_lat(center.lat), center.lng)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 1.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(LatLng::new(47.0, -100.0), 3.5, Point::new(800.0, 600.0));

        assert_eq!(viewport.zoom, 3.5);
        assert_eq!(viewport.center.lat, 47.0);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_center_maps_to_middle_of_container() {
        let viewport = Viewport::new(LatLng::new(47.0, -100.0), 3.5, Point::new(800.0, 600.0));
        let px = viewport.lat_lng_to_pixel(&viewport.center);

        assert!((px.x - 400.0).abs() < 1e-6);
        assert!((px.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_coordinate_round_trip() {
        let viewport = Viewport::new(LatLng::new(10.0, 20.0), 5.0, Point::new(512.0, 512.0));
        let original = LatLng::new(12.5, 18.25);
        let back = viewport.pixel_to_lat_lng(&viewport.lat_lng_to_pixel(&original));

        assert!((back.lat - original.lat).abs() < 1e-9);
        assert!((back.lng - original.lng).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_pan_moves_content_with_pointer() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 2.0, Point::new(512.0, 512.0));
        let target = LatLng::new(5.0, 5.0);
        let before = viewport.lat_lng_to_pixel(&target);

        viewport.pan(Point::new(30.0, -20.0));
        let after = viewport.lat_lng_to_pixel(&target);

        assert!((after.x - before.x - 30.0).abs() < 1e-6);
        assert!((after.y - before.y + 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_pan_across_antimeridian_keeps_markers_in_place() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 178.0), 3.5, Point::new(800.0, 600.0));
        let quake = LatLng::new(0.0, 175.0);
        let before = viewport.lat_lng_to_pixel(&quake);

        viewport.pan(Point::new(-40.0, 0.0));
        let after = viewport.lat_lng_to_pixel(&quake);

        assert!(viewport.center.lng > 180.0);
        assert!((after.x - (before.x - 40.0)).abs() < 1e-6);
        assert!(after.x > 0.0 && after.x < viewport.size.x);
    }

    #[test]
    fn test_tiles_wrap_past_antimeridian() {
        let viewport = Viewport::new(LatLng::new(0.0, 185.0), 2.0, Point::new(512.0, 512.0));
        let tiles = viewport.visible_tiles(19);

        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.coord.is_valid()));
    }

    #[test]
    fn test_zoom_keeps_focus_point_fixed() {
        let mut viewport = Viewport::new(LatLng::new(47.0, -100.0), 3.5, Point::new(800.0, 600.0));
        let focus = Point::new(100.0, 150.0);
        let under_pointer = viewport.pixel_to_lat_lng(&focus);

        viewport.zoom_to(5.0, Some(focus));
        let moved = viewport.lat_lng_to_pixel(&under_pointer);

        assert_eq!(viewport.zoom, 5.0);
        assert!(moved.distance_to(&focus) < 1e-6);
    }

    #[test]
    fn test_visible_tiles_cover_container() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));
        let tiles = viewport.visible_tiles(19);

        // zoom 1 is a 2x2 grid that exactly fills a 512px container
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.coord.z == 1 && t.size == 256.0));
        assert!(tiles.iter().any(|t| t.min == Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_fractional_zoom_scales_tiles() {
        let viewport = Viewport::new(LatLng::new(47.0, -100.0), 3.5, Point::new(800.0, 600.0));
        let tiles = viewport.visible_tiles(16);

        // 3.5 rounds to native zoom 4, drawn at half size
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.coord.z == 4));
        assert!(tiles.iter().all(|t| (t.size - 128.0 * 2_f64.sqrt()).abs() < 1e-9));
        assert!(tiles.iter().all(|t| t.coord.is_valid()));
    }

    #[test]
    fn test_tile_zoom_respects_native_limit() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 18.0, Point::new(256.0, 256.0));
        assert_eq!(viewport.tile_zoom(16), 16);
        assert_eq!(viewport.tile_zoom(19), 18);
    }
}
