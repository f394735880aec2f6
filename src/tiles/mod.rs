pub mod cache;
pub mod loader;
pub mod source;

// Re-exports for convenience
pub use cache::{TileCache, TileKey};
pub use loader::{decode_tile, DecodedTile, TileLoader};
pub use source::{TileSource, UrlTemplateSource};
