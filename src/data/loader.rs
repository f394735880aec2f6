use crate::{
    core::{config::FeedConfig, constants::USER_AGENT},
    data::feed::{EarthquakeFeature, FeatureCollection},
    Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::path::PathBuf;

/// Shared async HTTP client; building it once avoids repeating TLS and
/// connection pool setup for every load.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Anything that can produce one earthquake feature collection.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Performs a single read of the feed. Failures are returned as is; there
    /// is no retry.
    async fn fetch(&self) -> Result<FeatureCollection>;

    /// Human readable origin, used in logs and the UI
    fn describe(&self) -> String;
}

/// Reads a GeoJSON feed over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    url: String,
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: HTTP_CLIENT.clone(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self::from_config(&FeedConfig::default())
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<FeatureCollection> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads a GeoJSON feed saved on disk
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    async fn fetch(&self) -> Result<FeatureCollection> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Loads the feed once and hands back its features in feed order.
pub async fn load_features(source: &dyn FeedSource) -> Result<Vec<EarthquakeFeature>> {
    let collection = source.fetch().await.map_err(|e| {
        log::error!("failed to load feed {}: {}", source.describe(), e);
        e
    })?;

    let title = collection
        .metadata
        .as_ref()
        .and_then(|m| m.title.clone())
        .unwrap_or_else(|| source.describe());
    log::info!("loaded {} earthquakes from {}", collection.len(), title);

    Ok(collection.features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;
    use std::io::Write;

    const TWO_EVENTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": "a",
             "properties": {"mag": 1.2, "place": "First", "time": 1},
             "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.0]}},
            {"type": "Feature", "id": "b",
             "properties": {"mag": 3.4, "place": "Second", "time": 2},
             "geometry": {"type": "Point", "coordinates": [4.0, 5.0, 6.0]}}
        ]
    }"#;

    #[tokio::test]
    async fn test_file_source_preserves_feed_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_EVENTS.as_bytes()).unwrap();

        let source = FileFeedSource::new(file.path());
        let features = load_features(&source).await.unwrap();

        let ids: Vec<_> = features.iter().map(|f| f.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_file_source_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"type\": \"FeatureCollection\", \"features\": [").unwrap();

        let source = FileFeedSource::new(file.path());
        let result = load_features(&source).await;
        assert!(matches!(result, Err(MapError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileFeedSource::new("/nonexistent/quakes.geojson");
        assert!(matches!(source.fetch().await, Err(MapError::Io(_))));
    }

    #[test]
    fn test_default_http_source_targets_usgs() {
        let source = HttpFeedSource::default();
        assert_eq!(source.url(), crate::core::constants::DEFAULT_FEED_URL);
        assert_eq!(source.describe(), source.url());
    }
}
