//! Engine-wide constants: feed endpoint, tile geometry and marker styling.

use crate::style::Color;

/// Base of the USGS real-time summary feeds.
pub const USGS_FEED_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// All earthquakes from the past day.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";

/// User agent sent with feed and tile requests; public tile servers reject
/// anonymous clients.
pub const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// Initial map centre (latitude, longitude).
pub const DEFAULT_CENTER: (f64, f64) = (47.0, -100.0);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 3.5;

pub const DEFAULT_MIN_ZOOM: f64 = 1.0;
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// Marker radius in pixels per unit of magnitude.
pub const MAGNITUDE_RADIUS_SCALE: f64 = 5.0;

pub const MARKER_STROKE_COLOR: Color = Color::rgb(0, 0, 0);
pub const MARKER_STROKE_WEIGHT: f32 = 1.0;
pub const MARKER_STROKE_OPACITY: f32 = 1.0;
pub const MARKER_FILL_OPACITY: f32 = 0.8;

/// Markers smaller than this are still clickable within this many pixels.
pub const MIN_HIT_RADIUS: f64 = 3.0;

pub const LEGEND_TITLE: &str = "Depth(km)";

/// Layer ids used by the composed earthquake map.
pub const SATELLITE_LAYER_ID: &str = "satellite";
pub const STREET_LAYER_ID: &str = "street";
pub const TOPOGRAPHIC_LAYER_ID: &str = "topographic";
pub const EARTHQUAKE_LAYER_ID: &str = "earthquakes";

/// Screen pixels of wheel scroll per zoom level.
pub const WHEEL_PX_PER_ZOOM_LEVEL: f64 = 60.0;
