use crate::core::constants::{TERRAIN_RGB_BASE, TERRAIN_RGB_STEP};
use crate::core::geo::{LatLng, TileCoord};
use crate::{MapError, Result};
use fxhash::FxBuildHasher;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Elevation samples for one tile, in meters.
///
/// Row-major, row 0 on the tile's northern edge.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightData {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl HeightData {
    pub fn new(width: usize, height: usize, samples: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidHeightData(format!(
                "empty grid {}x{}",
                width, height
            )));
        }
        if samples.len() != width * height {
            return Err(MapError::InvalidHeightData(format!(
                "expected {} samples for {}x{}, got {}",
                width * height,
                width,
                height,
                samples.len()
            )));
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A single-sample grid with the same height everywhere
    pub fn flat(value: f32) -> Self {
        Self {
            width: 1,
            height: 1,
            samples: vec![value],
        }
    }

    /// Decodes Mapbox Terrain-RGB pixels (RGBA, 4 bytes per pixel).
    pub fn from_terrain_rgb(width: usize, height: usize, rgba: &[u8]) -> Result<Self> {
        if rgba.len() != width * height * 4 {
            return Err(MapError::InvalidHeightData(format!(
                "expected {} RGBA bytes for {}x{}, got {}",
                width * height * 4,
                width,
                height,
                rgba.len()
            )));
        }

        let samples = rgba
            .chunks_exact(4)
            .map(|px| {
                let value = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
                (TERRAIN_RGB_BASE + value as f64 * TERRAIN_RGB_STEP) as f32
            })
            .collect();

        Self::new(width, height, samples)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn sample(&self, column: usize, row: usize) -> Option<f32> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.samples.get(row * self.width + column).copied()
    }

    /// Bilinear height at normalized `(u, v)`, clamped into the tile
    pub fn query(&self, u: f64, v: f64) -> f64 {
        let fx = u.clamp(0.0, 1.0) * (self.width - 1) as f64;
        let fy = v.clamp(0.0, 1.0) * (self.height - 1) as f64;

        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;

        let at = |x: usize, y: usize| self.samples[y * self.width + x] as f64;
        let north = at(x0, y0) + (at(x1, y0) - at(x0, y0)) * tx;
        let south = at(x0, y1) + (at(x1, y1) - at(x0, y1)) * tx;
        north + (south - north) * ty
    }
}

/// Load state of a tile property such as its height data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilePropertyState {
    None,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone)]
enum HeightEntry {
    Loading,
    Loaded(Arc<HeightData>),
    Failed(String),
}

/// Height data for active tiles, with LRU eviction
pub struct TileHeightCache {
    cache: LruCache<TileCoord, HeightEntry, FxBuildHasher>,
}

impl TileHeightCache {
    /// Create a new height cache with the given capacity
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::with_hasher(capacity, FxBuildHasher::default()),
        }
    }

    /// Record that height data for `coord` has been requested
    pub fn mark_loading(&mut self, coord: TileCoord) {
        if !matches!(self.cache.peek(&coord), Some(HeightEntry::Loaded(_))) {
            self.cache.put(coord, HeightEntry::Loading);
        }
    }

    /// Store loaded height data for a tile
    pub fn insert(&mut self, coord: TileCoord, data: HeightData) {
        self.cache.put(coord, HeightEntry::Loaded(Arc::new(data)));
    }

    pub fn mark_failed(&mut self, coord: TileCoord, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("height data for tile {} failed: {}", coord, reason);
        self.cache.put(coord, HeightEntry::Failed(reason));
    }

    pub fn state(&self, coord: &TileCoord) -> TilePropertyState {
        match self.cache.peek(coord) {
            None => TilePropertyState::None,
            Some(HeightEntry::Loading) => TilePropertyState::Loading,
            Some(HeightEntry::Loaded(_)) => TilePropertyState::Loaded,
            Some(HeightEntry::Failed(_)) => TilePropertyState::Error,
        }
    }

    /// Failure reason for a tile in the `Error` state
    pub fn error_reason(&self, coord: &TileCoord) -> Option<&str> {
        match self.cache.peek(coord) {
            Some(HeightEntry::Failed(reason)) => Some(reason),
            _ => None,
        }
    }

    /// Loaded height data for a tile; marks it recently used
    pub fn get(&mut self, coord: &TileCoord) -> Option<Arc<HeightData>> {
        match self.cache.get(coord) {
            Some(HeightEntry::Loaded(data)) => Some(Arc::clone(data)),
            _ => None,
        }
    }

    /// Height in meters at normalized `(u, v)` within `coord`.
    /// Does not affect eviction order.
    pub fn query(&self, coord: &TileCoord, u: f64, v: f64) -> Result<f64> {
        match self.cache.peek(coord) {
            Some(HeightEntry::Loaded(data)) => Ok(data.query(u, v)),
            _ => Err(MapError::HeightDataUnavailable(*coord)),
        }
    }

    /// Height in meters at a geographic position, read from the tile at `zoom`
    pub fn query_lat_lng(&self, lat_lng: &LatLng, zoom: u8) -> Result<f64> {
        let coord = TileCoord::from_lat_lng(lat_lng, zoom);
        let (u, v) = coord
            .mercator_bounds()
            .normalized(&lat_lng.clamped().to_mercator());
        self.query(&coord, u, v)
    }

    pub fn contains(&self, coord: &TileCoord) -> bool {
        self.cache.contains(coord)
    }

    pub fn remove(&mut self, coord: &TileCoord) -> bool {
        self.cache.pop(coord).is_some()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

impl std::fmt::Debug for TileHeightCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileHeightCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl Default for TileHeightCache {
    fn default() -> Self {
        Self::new(crate::core::constants::DEFAULT_HEIGHT_CACHE_SIZE)
    }
}
