//! Core constants shared by the projection and tiling code.
//! Values follow the Web Mercator (EPSG:3857) and slippy-map conventions.

/// Equatorial radius of the WGS84 ellipsoid in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the Mercator world width in meters (π · R).
pub const ORIGIN_SHIFT: f64 = std::f64::consts::PI * EARTH_RADIUS;

/// Full Mercator world width in meters.
pub const WORLD_SIZE: f64 = 2.0 * ORIGIN_SHIFT;

/// Latitude at which the Mercator world becomes square.
pub const LATITUDE_MAX: f64 = 85.0511287798;

pub const LONGITUDE_MAX: f64 = 180.0;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Deepest zoom level a map may be initialized at.
pub const MAX_ZOOM: u8 = 22;

/// Zoom changes smaller than this are treated as no change.
pub const ZOOM_EPSILON: f64 = 1e-5;

/// Default ratio between engine units and a reference tile's Mercator width.
pub const DEFAULT_UNITY_TO_MERCATOR_CONVERSION_FACTOR: f64 = 100.0;

/// Default number of tiles kept in the height cache.
pub const DEFAULT_HEIGHT_CACHE_SIZE: usize = 256;

/// Terrain-RGB decoding: `h = TERRAIN_RGB_BASE + value * TERRAIN_RGB_STEP`.
pub const TERRAIN_RGB_BASE: f64 = -10_000.0;
pub const TERRAIN_RGB_STEP: f64 = 0.1;

/// Width in Mercator meters of a single tile at `zoom`.
pub fn tile_width_meters(zoom: u8) -> f64 {
    WORLD_SIZE / 2_f64.powi(zoom as i32)
}
