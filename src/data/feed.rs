//! Typed view of the USGS earthquake GeoJSON feed.
//!
//! Only the members the map consumes are modelled; unknown members are
//! ignored so the feed can grow without breaking parsing.

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Root `FeatureCollection` of a summary feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<EarthquakeFeature>,
}

/// Feed-level metadata block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedMetadata {
    /// Generation time, epoch milliseconds
    #[serde(default)]
    pub generated: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// One earthquake event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeFeature {
    #[serde(default)]
    pub id: Option<String>,
    pub properties: EarthquakeProperties,
    /// Events without a location carry `"geometry": null`
    #[serde(default)]
    pub geometry: Option<PointGeometry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EarthquakeProperties {
    /// Magnitude; the feed publishes `null` for some events
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub place: Option<String>,
    /// Origin time, epoch milliseconds
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    /// Event page on the USGS site
    #[serde(default)]
    pub url: Option<String>,
}

/// GeoJSON point with `[longitude, latitude, depth_km]`. Any member may be
/// `null` in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    pub coordinates: Vec<Option<f64>>,
}

impl PointGeometry {
    pub fn new(coordinates: &[f64]) -> Self {
        Self {
            coordinates: coordinates.iter().copied().map(Some).collect(),
        }
    }
}

impl EarthquakeFeature {
    pub fn magnitude(&self) -> Option<f64> {
        self.properties.mag
    }

    /// Depth in kilometres (third coordinate)
    pub fn depth(&self) -> Option<f64> {
        self.geometry.as_ref()?.coordinates.get(2).copied().flatten()
    }

    pub fn position(&self) -> Option<LatLng> {
        match self.geometry.as_ref()?.coordinates.as_slice() {
            [Some(lng), Some(lat), ..] => LatLng::from_position(&[*lng, *lat]),
            _ => None,
        }
    }

    pub fn place(&self) -> Option<&str> {
        self.properties.place.as_deref()
    }

    pub fn time_millis(&self) -> Option<i64> {
        self.properties.time
    }
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
