//! # mapframe
//!
//! Geographic placement core for slippy maps embedded in 3D and AR scenes.
//!
//! The crate converts between latitude/longitude and a host engine's local
//! space. A [`Map`] picks a Mercator origin (placement strategy), a
//! world-relative scale (scaling strategy) and keeps both in sync with the
//! current center and zoom. Tile fetching and rendering stay with the host.

pub mod core;
pub mod prelude;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::Bounds,
    builder::MapBuilder,
    config::{LocationOptions, MapOptions, MapPreset},
    geo::{LatLng, Point, TileCoord},
    map::{Map, TileChanges},
    placement::{PlacementOptions, PlacementType},
    position::LocalPosition,
    scaling::{ScalingOptions, ScalingType},
    state::MapState,
    transform::{zoom_compensation, MapTransform, RootTransform},
};

pub use tiles::{
    cover::TileExtent,
    height::{HeightData, TileHeightCache, TilePropertyState},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid zoom level: {0}")]
    InvalidZoom(f64),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Height data not loaded for tile {0}")]
    HeightDataUnavailable(TileCoord),

    #[error("Invalid height data: {0}")]
    InvalidHeightData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
