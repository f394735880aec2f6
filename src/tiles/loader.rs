use super::cache::TileKey;
use crate::core::constants::USER_AGENT;
use crate::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use fxhash::FxHashSet;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Shared blocking HTTP client with a User-Agent so that public tile servers
/// (OpenStreetMap in particular) don't reject the request.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(20))
        .build()
        .unwrap_or_else(|_| Client::new())
});

const MAX_ATTEMPTS: usize = 2;

/// Failed tiles remembered before the list is reset
const MAX_REMEMBERED_FAILURES: usize = 1024;

/// Tile image decoded to straight RGBA8 pixels
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTile {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Decode PNG/JPEG tile bytes
pub fn decode_tile(bytes: &[u8]) -> Result<DecodedTile> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(DecodedTile {
        width: width as usize,
        height: height as usize,
        rgba: image.into_raw(),
    })
}

/// Outcome of one background tile download
#[derive(Debug)]
pub struct TileResponse {
    pub key: TileKey,
    pub tile: Result<DecodedTile>,
}

type Notify = Arc<dyn Fn() + Send + Sync>;

/// Fetches tiles on background threads and reports decoded images over a
/// channel. Requests are de-duplicated while in flight, and tiles that failed
/// are not asked for again.
pub struct TileLoader {
    tx: Sender<TileResponse>,
    rx: Receiver<TileResponse>,
    pending: FxHashSet<TileKey>,
    failed: FxHashSet<TileKey>,
    max_in_flight: usize,
    notify: Option<Notify>,
}

impl TileLoader {
    pub fn new(max_in_flight: usize) -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            pending: FxHashSet::default(),
            failed: FxHashSet::default(),
            max_in_flight: max_in_flight.max(1),
            notify: None,
        }
    }

    /// Callback invoked from the worker thread once a tile is ready, usually
    /// to wake the UI.
    pub fn with_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Some(Arc::new(notify));
        self
    }

    pub fn is_pending(&self, key: &TileKey) -> bool {
        self.pending.contains(key)
    }

    pub fn has_failed(&self, key: &TileKey) -> bool {
        self.failed.contains(key)
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Start downloading `url` for `key` on a detached thread. Returns false
    /// when the tile is already in flight, has failed before, or the loader
    /// is at its concurrency limit.
    pub fn request(&mut self, key: TileKey, url: String) -> bool {
        if self.pending.contains(&key)
            || self.failed.contains(&key)
            || self.pending.len() >= self.max_in_flight
        {
            return false;
        }

        self.pending.insert(key.clone());
        let tx = self.tx.clone();
        let notify = self.notify.clone();

        thread::spawn(move || {
            let tile = fetch_with_retry(&url).and_then(|bytes| decode_tile(&bytes));
            if let Err(e) = &tile {
                log::error!("giving up on tile {} ({}): {}", url, key.layer_id, e);
            }
            let _ = tx.send(TileResponse { key, tile });
            if let Some(notify) = notify {
                notify();
            }
        });

        true
    }

    /// Drain finished downloads. Failed tiles are remembered so they are not
    /// re-requested every frame.
    pub fn poll(&mut self) -> Vec<(TileKey, DecodedTile)> {
        let mut ready = Vec::new();
        while let Ok(response) = self.rx.try_recv() {
            self.pending.remove(&response.key);
            match response.tile {
                Ok(tile) => ready.push((response.key, tile)),
                Err(_) => self.remember_failure(response.key),
            }
        }
        ready
    }

    /// Forget earlier failures so they are tried again
    pub fn clear_failed(&mut self) {
        self.failed.clear();
    }

    fn remember_failure(&mut self, key: TileKey) {
        if self.failed.len() >= MAX_REMEMBERED_FAILURES {
            log::debug!("forgetting {} failed tiles", self.failed.len());
            self.failed.clear();
        }
        self.failed.insert(key);
    }
}

impl Default for TileLoader {
    fn default() -> Self {
        Self::new(8)
    }
}

fn fetch_with_retry(url: &str) -> Result<Vec<u8>> {
    let mut attempt = 1;
    loop {
        log::debug!("fetch tile {} attempt {}", url, attempt);
        let result = HTTP_CLIENT
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes());

        match result {
            Ok(bytes) => {
                log::debug!("downloaded tile {} ({} bytes)", url, bytes.len());
                return Ok(bytes.to_vec());
            }
            Err(e) if attempt < MAX_ATTEMPTS => {
                log::warn!("tile {} download failed on attempt {}: {}", url, attempt, e);
                thread::sleep(Duration::from_millis(100));
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::TileCoord;
    use crate::MapError;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageOutputFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png_tile() {
        let tile = decode_tile(&png_bytes()).unwrap();
        assert_eq!(tile.width, 2);
        assert_eq!(tile.height, 2);
        assert_eq!(tile.rgba.len(), 16);
        assert_eq!(&tile.rgba[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_tile(b"<html>not a tile</html>");
        assert!(matches!(result, Err(MapError::ImageDecode(_))));
    }

    #[test]
    fn test_request_limits() {
        let mut loader = TileLoader::new(1);
        let first = TileKey::new("street", TileCoord::new(0, 0, 1));
        let second = TileKey::new("street", TileCoord::new(1, 0, 1));

        // unroutable address; the thread fails in the background
        assert!(loader.request(first.clone(), "http://127.0.0.1:9/0/0/0.png".into()));
        assert!(loader.is_pending(&first));
        assert!(!loader.request(first.clone(), "http://127.0.0.1:9/0/0/0.png".into()));
        assert!(!loader.request(second, "http://127.0.0.1:9/1/0/1.png".into()));
        assert_eq!(loader.in_flight(), 1);
    }

    #[test]
    fn test_failed_tile_is_not_requested_again() {
        let mut loader = TileLoader::new(4);
        let key = TileKey::new("street", TileCoord::new(0, 0, 0));
        assert!(loader.request(key.clone(), "http://127.0.0.1:9/tile.png".into()));

        let deadline = std::time::Instant::now() + Duration::from_secs(30);
        while loader.is_pending(&key) && std::time::Instant::now() < deadline {
            assert!(loader.poll().is_empty());
            thread::sleep(Duration::from_millis(20));
        }

        assert!(loader.has_failed(&key));
        assert!(!loader.request(key.clone(), "http://127.0.0.1:9/tile.png".into()));

        loader.clear_failed();
        assert!(!loader.has_failed(&key));
    }

    #[test]
    fn test_failure_memory_is_bounded() {
        let mut loader = TileLoader::new(4);
        for x in 0..MAX_REMEMBERED_FAILURES as u32 {
            loader.remember_failure(TileKey::new("street", TileCoord::new(x, 0, 12)));
        }
        let first = TileKey::new("street", TileCoord::new(0, 0, 12));
        assert!(loader.has_failed(&first));

        let overflow = TileKey::new("street", TileCoord::new(0, 1, 12));
        loader.remember_failure(overflow.clone());
        assert!(!loader.has_failed(&first));
        assert!(loader.has_failed(&overflow));
    }
}
