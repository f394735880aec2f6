pub mod feed;
pub mod loader;

pub use feed::{EarthquakeFeature, FeatureCollection, FeedMetadata};
pub use loader::{load_features, FeedSource, FileFeedSource, HttpFeedSource};
