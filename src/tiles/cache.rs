use crate::core::geo::TileCoord;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Identifies one tile of one layer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub layer_id: String,
    pub coord: TileCoord,
}

impl TileKey {
    pub fn new(layer_id: impl Into<String>, coord: TileCoord) -> Self {
        Self {
            layer_id: layer_id.into(),
            coord,
        }
    }
}

/// In-memory tile store using LRU eviction. The UI keeps textures in it; the
/// value type is left open so the cache itself does not depend on egui.
#[derive(Debug)]
pub struct TileCache<T> {
    cache: LruCache<TileKey, T>,
}

impl<T> TileCache<T> {
    /// Create a new tile cache with the given capacity (at least one entry)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Get a tile, marking it as recently used
    pub fn get(&mut self, key: &TileKey) -> Option<&T> {
        self.cache.get(key)
    }

    /// Insert a tile, evicting the least recently used one when full
    pub fn insert(&mut self, key: TileKey, value: T) {
        self.cache.put(key, value);
    }

    pub fn contains(&self, key: &TileKey) -> bool {
        self.cache.contains(key)
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}
