//! Tile-level data the map keeps alongside its geographic frame

pub mod cover;
pub mod height;
