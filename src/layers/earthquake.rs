//! Turns feed features into the earthquake overlay.

use crate::{
    core::constants::EARTHQUAKE_LAYER_ID,
    core::geo::{LatLng, Point},
    core::viewport::Viewport,
    data::feed::EarthquakeFeature,
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        marker::CircleMarker,
    },
    style::MarkerStyle,
    ui::popup::PopupContent,
    MapError, Result,
};

/// One circle marker per earthquake, kept in feed order
#[derive(Debug, Clone)]
pub struct EarthquakeLayer {
    properties: LayerProperties,
    markers: Vec<CircleMarker>,
    skipped: usize,
}

impl EarthquakeLayer {
    /// Maps every feature to a marker. Features that cannot be placed or
    /// styled are logged and left out.
    pub fn from_features(features: &[EarthquakeFeature]) -> Self {
        let mut markers = Vec::with_capacity(features.len());
        let mut skipped = 0;

        for (index, feature) in features.iter().enumerate() {
            match marker_for_feature(feature, index) {
                Ok(marker) => markers.push(marker),
                Err(e) => {
                    log::warn!("skipping feature {}: {}", index, e);
                    skipped += 1;
                }
            }
        }

        log::debug!("built {} earthquake markers ({} skipped)", markers.len(), skipped);

        Self {
            properties: LayerProperties::new(
                EARTHQUAKE_LAYER_ID.to_string(),
                "Earthquakes".to_string(),
                LayerType::Marker,
            ),
            markers,
            skipped,
        }
    }

    pub fn empty() -> Self {
        Self::from_features(&[])
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of features rejected while mapping
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Topmost marker under a container pixel. Later markers are drawn over
    /// earlier ones, so the search runs back to front.
    pub fn marker_at(&self, viewport: &Viewport, pixel: &Point) -> Option<&CircleMarker> {
        self.markers
            .iter()
            .rev()
            .find(|marker| marker.hit_test(viewport, pixel))
    }
}

impl Default for EarthquakeLayer {
    fn default() -> Self {
        Self::empty()
    }
}

impl LayerTrait for EarthquakeLayer {
    crate::impl_layer_trait!(properties);
}

/// Builds the marker for one feature. The id falls back to the feature's
/// position in the feed when the feed does not provide one.
pub fn marker_for_feature(feature: &EarthquakeFeature, index: usize) -> Result<CircleMarker> {
    let id = feature
        .id
        .clone()
        .unwrap_or_else(|| format!("feature-{index}"));

    let magnitude = feature
        .magnitude()
        .ok_or_else(|| MapError::InvalidFeature(format!("{id} has no magnitude")))?;
    let depth = feature
        .depth()
        .ok_or_else(|| MapError::InvalidFeature(format!("{id} has no depth")))?;
    let position: LatLng = feature.position().ok_or_else(|| {
        MapError::InvalidFeature(format!("{id} has no usable longitude/latitude"))
    })?;

    let popup = PopupContent::new(feature.place(), feature.time_millis(), magnitude, depth);

    Ok(CircleMarker::new(
        id,
        position,
        MarkerStyle::for_event(magnitude, depth),
        popup,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feed::{EarthquakeProperties, PointGeometry};

    fn feature(id: &str, mag: Option<f64>, coordinates: Vec<f64>) -> EarthquakeFeature {
        EarthquakeFeature {
            id: Some(id.to_string()),
            properties: EarthquakeProperties {
                mag,
                place: Some(format!("{id} place")),
                time: Some(0),
                ..Default::default()
            },
            geometry: Some(PointGeometry::new(&coordinates)),
        }
    }

    #[test]
    fn test_marker_for_feature() {
        let f = feature("ci1", Some(5.2), vec![-122.4, 37.8, 12.5]);
        let marker = marker_for_feature(&f, 0).unwrap();

        assert_eq!(marker.id, "ci1");
        assert_eq!(marker.position, LatLng::new(37.8, -122.4));
        assert_eq!(marker.radius(), 26.0);
        assert_eq!(marker.style.fill_color.to_hex(), "#FEB24C");
        assert_eq!(marker.popup.title, "ci1 place");
    }

    #[test]
    fn test_missing_magnitude_is_rejected() {
        let f = feature("x", None, vec![0.0, 0.0, 5.0]);
        assert!(matches!(
            marker_for_feature(&f, 0),
            Err(MapError::InvalidFeature(_))
        ));
    }

    #[test]
    fn test_missing_depth_is_rejected() {
        let f = feature("x", Some(1.0), vec![0.0, 0.0]);
        assert!(matches!(
            marker_for_feature(&f, 0),
            Err(MapError::InvalidFeature(_))
        ));
    }

    #[test]
    fn test_layer_keeps_feed_order_and_counts_skips() {
        let features = vec![
            feature("a", Some(1.0), vec![10.0, 10.0, 1.0]),
            feature("bad", None, vec![0.0, 0.0, 1.0]),
            feature("b", Some(2.0), vec![20.0, 20.0, 2.0]),
            feature("c", Some(3.0), vec![30.0, 30.0, f64::NAN]),
        ];
        let layer = EarthquakeLayer::from_features(&features);

        let ids: Vec<_> = layer.markers().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(layer.skipped(), 1);
    }

    #[test]
    fn test_missing_id_uses_index() {
        let mut f = feature("a", Some(1.0), vec![1.0, 1.0, 1.0]);
        f.id = None;
        assert_eq!(marker_for_feature(&f, 7).unwrap().id, "feature-7");
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let features = vec![
            feature("a", Some(4.5), vec![140.0, 35.0, 30.0]),
            feature("b", Some(0.8), vec![-150.0, 61.0, 80.0]),
        ];
        let first = EarthquakeLayer::from_features(&features);
        let second = EarthquakeLayer::from_features(&features);
        assert_eq!(first.markers(), second.markers());
    }

    #[test]
    fn test_empty_layer() {
        let layer = EarthquakeLayer::empty();
        assert!(layer.is_empty());
        assert_eq!(layer.id(), "earthquakes");
        assert_eq!(layer.name(), "Earthquakes");
        assert_eq!(layer.layer_type(), LayerType::Marker);
    }

    #[test]
    fn test_marker_at_prefers_topmost() {
        let features = vec![
            feature("under", Some(5.0), vec![0.0, 0.0, 1.0]),
            feature("over", Some(5.0), vec![0.0, 0.0, 1.0]),
        ];
        let layer = EarthquakeLayer::from_features(&features);
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 2.0, Point::new(200.0, 200.0));

        let hit = layer.marker_at(&viewport, &Point::new(100.0, 100.0));
        assert_eq!(hit.map(|m| m.id.as_str()), Some("over"));
        assert!(layer.marker_at(&viewport, &Point::new(0.0, 0.0)).is_none());
    }
}
