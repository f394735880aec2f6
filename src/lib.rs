//! # quakemap
//!
//! Real-time earthquake map built in the spirit of a Leaflet page.
//!
//! The crate loads the USGS earthquake GeoJSON feed, turns every event into a
//! circle marker (radius keyed to magnitude, fill keyed to depth) and composes
//! those markers with three switchable raster base maps, a layer control and a
//! depth legend. With the `egui` feature the composed map can be drawn and
//! explored through [`ui::widget::MapWidget`].
//!
//! The pipeline is linear: [`data::loader`] → [`layers::earthquake`] →
//! [`core::builder`].

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod runtime;
pub mod style;
pub mod tiles;
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::{compose_earthquake_map, MapBuilder},
    config::{FeedConfig, FeedMagnitude, FeedPeriod, MapOptions},
    geo::{LatLng, Point, TileCoord},
    map::QuakeMap,
    viewport::Viewport,
};

pub use data::{
    feed::{EarthquakeFeature, FeatureCollection},
    loader::{load_features, FeedSource, FileFeedSource, HttpFeedSource},
};

pub use layers::{
    base::LayerTrait, earthquake::EarthquakeLayer, manager::LayerManager, marker::CircleMarker,
    tile::TileLayer,
};

pub use style::{depth::DEPTH_SCALE, depth_color, marker_size, Color, MarkerStyle};

pub use ui::{controls::LayerControl, legend::Legend, popup::Popup};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Invalid feature: {0}")]
    InvalidFeature(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
