use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Leaflet-style URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplateSource {
    template: String,
    subdomains: Vec<String>,
}

impl UrlTemplateSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: Vec::new(),
        }
    }

    /// Subdomains rotated through `{s}` to spread requests across hosts
    pub fn with_subdomains<I, S>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    fn subdomain(&self, coord: TileCoord) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let idx = ((coord.x as usize) + (coord.y as usize)) % self.subdomains.len();
        &self.subdomains[idx]
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{s}", self.subdomain(coord))
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subdomain_rotation() {
        let source = UrlTemplateSource::new("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
            .with_subdomains(["a", "b", "c"]);

        assert_eq!(
            source.url(TileCoord::new(0, 0, 3)),
            "https://a.tile.openstreetmap.org/3/0/0.png"
        );
        assert_eq!(
            source.url(TileCoord::new(1, 0, 3)),
            "https://b.tile.openstreetmap.org/3/1/0.png"
        );
        assert_eq!(
            source.url(TileCoord::new(1, 1, 3)),
            "https://c.tile.openstreetmap.org/3/1/1.png"
        );
    }

    #[test]
    fn test_row_before_column_template() {
        let source = UrlTemplateSource::new(
            "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/{z}/{y}/{x}",
        );

        assert_eq!(
            source.url(TileCoord::new(5, 9, 4)),
            "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/4/9/5"
        );
    }
}
