use crate::core::constants::{SATELLITE_LAYER_ID, STREET_LAYER_ID, TOPOGRAPHIC_LAYER_ID};
use crate::core::geo::TileCoord;
use crate::layers::base::{LayerProperties, LayerTrait, LayerType};
use crate::tiles::source::{TileSource, UrlTemplateSource};

const SATELLITE_URL: &str =
    "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/{z}/{y}/{x}";
const STREET_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TOPOGRAPHIC_URL: &str = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png";

const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Raster base map backed by a slippy-map tile server
pub struct TileLayer {
    properties: LayerProperties,
    source: UrlTemplateSource,
    attribution: String,
    max_native_zoom: u8,
}

impl TileLayer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        source: UrlTemplateSource,
        attribution: impl Into<String>,
        max_native_zoom: u8,
    ) -> Self {
        Self {
            properties: LayerProperties::new(id.into(), name.into(), LayerType::Tile),
            source,
            attribution: attribution.into(),
            max_native_zoom,
        }
    }

    /// USGS imagery
    pub fn satellite() -> Self {
        Self::new(
            SATELLITE_LAYER_ID,
            "Satellite",
            UrlTemplateSource::new(SATELLITE_URL),
            "Tiles courtesy of the U.S. Geological Survey",
            16,
        )
    }

    /// OpenStreetMap standard style
    pub fn street() -> Self {
        Self::new(
            STREET_LAYER_ID,
            "Street Map",
            UrlTemplateSource::new(STREET_URL).with_subdomains(["a", "b", "c"]),
            OSM_ATTRIBUTION,
            19,
        )
    }

    /// OpenTopoMap relief style
    pub fn topographic() -> Self {
        Self::new(
            TOPOGRAPHIC_LAYER_ID,
            "Topographic Map",
            UrlTemplateSource::new(TOPOGRAPHIC_URL).with_subdomains(["a", "b", "c"]),
            format!("Map data: {OSM_ATTRIBUTION}, SRTM | Map style: © OpenTopoMap (CC-BY-SA)"),
            17,
        )
    }

    /// Highest zoom the server has imagery for; deeper zooms upscale these tiles
    pub fn max_native_zoom(&self) -> u8 {
        self.max_native_zoom
    }

    pub fn source(&self) -> &UrlTemplateSource {
        &self.source
    }

    pub fn tile_url(&self, coord: TileCoord) -> String {
        self.source.url(coord)
    }
}

impl std::fmt::Debug for TileLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileLayer")
            .field("id", &self.properties.id)
            .field("template", &self.source.template())
            .field("max_native_zoom", &self.max_native_zoom)
            .finish()
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(properties);

    fn attribution(&self) -> Option<&str> {
        Some(&self.attribution)
    }
}
