//! Prelude module for common quakemap types and traits
//!
//! Re-exports the most commonly used items for `use quakemap::prelude::*;`

pub use crate::core::{
    builder::{compose_earthquake_map, MapBuilder},
    config::{FeedConfig, FeedMagnitude, FeedPeriod, MapOptions},
    geo::{LatLng, Point, TileCoord},
    map::QuakeMap,
    viewport::Viewport,
};

pub use crate::data::{
    feed::{EarthquakeFeature, FeatureCollection},
    loader::{load_features, FeedSource, FileFeedSource, HttpFeedSource},
};

pub use crate::layers::{
    base::{LayerRole, LayerTrait, LayerType},
    earthquake::EarthquakeLayer,
    manager::LayerManager,
    marker::CircleMarker,
    tile::TileLayer,
};

pub use crate::style::{depth::DEPTH_SCALE, depth_color, marker_size, Color, MarkerStyle};

pub use crate::tiles::{TileCache, TileKey, TileLoader, TileSource};

pub use crate::runtime::LoadHandle;

pub use crate::ui::{
    controls::{ControlPosition, LayerControl},
    legend::Legend,
    popup::{Popup, PopupContent},
};

#[cfg(feature = "egui")]
pub use crate::ui::widget::MapWidget;

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;
