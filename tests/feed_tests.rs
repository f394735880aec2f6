use quakemap::{load_features, FeedConfig, FeedSource, HttpFeedSource, MapError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Feed loading against a local HTTP server
#[cfg(test)]
mod feed_tests {
    use super::*;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"title": "USGS All Earthquakes, Past Day", "count": 2},
        "features": [
            {"type": "Feature", "id": "ak1",
             "properties": {"mag": 1.8, "place": "10 km N of Anchorage, Alaska", "time": 1700000000000},
             "geometry": {"type": "Point", "coordinates": [-149.9, 61.3, 35.2]}},
            {"type": "Feature", "id": "us2",
             "properties": {"mag": null, "place": "Mid-Atlantic Ridge", "time": 1700000100000},
             "geometry": {"type": "Point", "coordinates": [-30.1, 10.2, 10.0]}}
        ]
    }"#;

    async fn serve(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/all_day.geojson"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    fn source_for(server: &MockServer) -> HttpFeedSource {
        let config = FeedConfig::default().with_url(format!("{}/all_day.geojson", server.uri()));
        HttpFeedSource::from_config(&config)
    }

    #[tokio::test]
    async fn test_loads_features_in_feed_order() {
        let server = serve(200, FEED).await;
        let features = load_features(&source_for(&server)).await.unwrap();

        let ids: Vec<_> = features.iter().filter_map(|f| f.id.as_deref()).collect();
        assert_eq!(ids, vec!["ak1", "us2"]);
        assert_eq!(features[0].depth(), Some(35.2));
        assert_eq!(features[1].magnitude(), None);
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let server = serve(500, "unavailable").await;
        let result = load_features(&source_for(&server)).await;
        assert!(matches!(result, Err(MapError::Network(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = serve(200, "<html>maintenance</html>").await;
        let result = source_for(&server).fetch().await;
        assert!(matches!(result, Err(MapError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let source = HttpFeedSource::new("http://127.0.0.1:9/all_day.geojson");
        let result = source.fetch().await;
        assert!(matches!(result, Err(MapError::Network(_))));
    }
}
