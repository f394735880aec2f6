//! Configuration for the map view and the earthquake feed.
//!
//! Defaults reproduce the reference view: all earthquakes of the past day,
//! centred on North America at zoom 3.5 over satellite imagery.

use crate::core::{
    constants::{
        DEFAULT_CENTER, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM, SATELLITE_LAYER_ID,
        USGS_FEED_BASE,
    },
    geo::LatLng,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Options for the composed map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Id of the base layer shown on load
    pub initial_base_layer: String,
    /// Whether the earthquake overlay is shown on load
    pub show_earthquakes: bool,
    /// Number of decoded tiles kept as textures
    pub tile_cache_size: usize,
    /// Upper bound on concurrent tile downloads
    pub max_tile_requests: usize,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            initial_base_layer: SATELLITE_LAYER_ID.to_string(),
            show_earthquakes: true,
            tile_cache_size: 256,
            max_tile_requests: 8,
        }
    }
}

impl MapOptions {
    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} is above max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !self.center.is_valid() {
            return Err(MapError::Config(format!(
                "center {:?} is outside the valid coordinate range",
                self.center
            )));
        }
        if self.tile_cache_size == 0 || self.max_tile_requests == 0 {
            return Err(MapError::Config(
                "tile cache size and request limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Time window covered by a USGS summary feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedPeriod {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

impl FeedPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedPeriod::Hour => "hour",
            FeedPeriod::Day => "day",
            FeedPeriod::Week => "week",
            FeedPeriod::Month => "month",
        }
    }
}

impl fmt::Display for FeedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedPeriod {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(FeedPeriod::Hour),
            "day" => Ok(FeedPeriod::Day),
            "week" => Ok(FeedPeriod::Week),
            "month" => Ok(FeedPeriod::Month),
            other => Err(MapError::Config(format!("unknown feed period: {other}"))),
        }
    }
}

/// Minimum magnitude class of a USGS summary feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMagnitude {
    Significant,
    #[serde(rename = "4.5")]
    M4_5,
    #[serde(rename = "2.5")]
    M2_5,
    #[serde(rename = "1.0")]
    M1_0,
    #[default]
    All,
}

impl FeedMagnitude {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedMagnitude::Significant => "significant",
            FeedMagnitude::M4_5 => "4.5",
            FeedMagnitude::M2_5 => "2.5",
            FeedMagnitude::M1_0 => "1.0",
            FeedMagnitude::All => "all",
        }
    }
}

impl fmt::Display for FeedMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedMagnitude {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "significant" => Ok(FeedMagnitude::Significant),
            "4.5" => Ok(FeedMagnitude::M4_5),
            "2.5" => Ok(FeedMagnitude::M2_5),
            "1.0" | "1" => Ok(FeedMagnitude::M1_0),
            "all" => Ok(FeedMagnitude::All),
            other => Err(MapError::Config(format!("unknown feed magnitude: {other}"))),
        }
    }
}

/// Which feed to load
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    pub period: FeedPeriod,
    pub magnitude: FeedMagnitude,
    /// Full URL that replaces the USGS summary address
    pub url_override: Option<String>,
}

impl FeedConfig {
    pub fn new(period: FeedPeriod, magnitude: FeedMagnitude) -> Self {
        Self {
            period,
            magnitude,
            url_override: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url_override = Some(url.into());
        self
    }

    /// Resolved feed URL
    pub fn url(&self) -> String {
        match &self.url_override {
            Some(url) => url.clone(),
            None => format!(
                "{}/{}_{}.geojson",
                USGS_FEED_BASE,
                self.magnitude.as_str(),
                self.period.as_str()
            ),
        }
    }
}
