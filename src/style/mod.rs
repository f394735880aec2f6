//! Visual encodings for earthquake markers.
//!
//! Magnitude drives the marker radius through [`marker_size`]; depth drives
//! the fill colour through [`depth_color`], which reads the shared
//! [`depth::DEPTH_SCALE`] table that the legend also renders.

pub mod depth;

use crate::core::constants::{
    MAGNITUDE_RADIUS_SCALE, MARKER_FILL_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_OPACITY,
    MARKER_STROKE_WEIGHT,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "egui")]
use egui::Color32;

pub use depth::depth_color;

/// Serializable RGBA color, written and parsed as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(MapError::Config(format!("invalid hex color: {hex}")));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| MapError::Config(format!("invalid hex color: {hex}")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Uppercase `#RRGGBB`; alpha is not part of the hex form
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Same color with alpha scaled by `opacity` (0.0 to 1.0)
    pub fn with_opacity(&self, opacity: f32) -> Self {
        let alpha = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self::new(self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "egui")]
impl From<Color> for Color32 {
    fn from(color: Color) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

/// Style of one circle marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Radius in screen pixels
    pub radius: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_weight: f32,
    pub stroke_opacity: f32,
    pub fill_opacity: f32,
}

impl MarkerStyle {
    /// Style of an earthquake marker with the given magnitude and depth (km)
    pub fn for_event(magnitude: f64, depth: f64) -> Self {
        Self {
            radius: marker_size(magnitude),
            fill_color: depth_color(depth),
            ..Self::default()
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 0.0,
            fill_color: depth::DEPTH_SCALE.brackets()[0].color,
            stroke_color: MARKER_STROKE_COLOR,
            stroke_weight: MARKER_STROKE_WEIGHT,
            stroke_opacity: MARKER_STROKE_OPACITY,
            fill_opacity: MARKER_FILL_OPACITY,
        }
    }
}

/// Marker radius for a magnitude: five pixels per unit.
///
/// Negative and non-finite magnitudes give a zero radius instead of an
/// unusable negative one.
pub fn marker_size(magnitude: f64) -> f64 {
    if magnitude.is_finite() && magnitude > 0.0 {
        magnitude * MAGNITUDE_RADIUS_SCALE
    } else {
        0.0
    }
}
