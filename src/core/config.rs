//! Map configuration
//!
//! Options can be built in code, picked from a [`MapPreset`], or loaded
//! from JSON. Every section has defaults, so a JSON document only needs
//! the fields it changes.

use crate::core::constants::{DEFAULT_HEIGHT_CACHE_SIZE, MAX_ZOOM};
use crate::core::geo::LatLng;
use crate::core::placement::PlacementOptions;
use crate::core::scaling::{ScalingOptions, ScalingType};
use crate::tiles::cover::TileExtent;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the map is centered and how far it is zoomed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationOptions {
    pub center: LatLng,
    pub zoom: f64,
}

impl LocationOptions {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 4.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightOptions {
    /// Maximum number of tiles whose height data is kept
    pub cache_size: usize,
}

impl Default for HeightOptions {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_HEIGHT_CACHE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub location: LocationOptions,
    pub scaling: ScalingOptions,
    pub placement: PlacementOptions,
    pub extent: TileExtent,
    pub height: HeightOptions,
}

impl MapOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks values serde cannot: ranges and positivity
    pub fn validate(&self) -> Result<()> {
        let zoom = self.location.zoom;
        if !zoom.is_finite() || zoom < 0.0 || zoom > MAX_ZOOM as f64 {
            return Err(MapError::InvalidZoom(zoom));
        }

        if self.scaling.scaling_type == ScalingType::Custom {
            let factor = self.scaling.unity_to_mercator_conversion_factor;
            if !factor.is_finite() || factor <= 0.0 {
                return Err(MapError::Config(format!(
                    "unity_to_mercator_conversion_factor must be positive, got {}",
                    factor
                )));
            }
        }

        if self.height.cache_size == 0 {
            return Err(MapError::Config("height cache_size must be at least 1".to_string()));
        }

        let active_tiles = self.extent.tile_count();
        if active_tiles > self.height.cache_size as u64 {
            return Err(MapError::Config(format!(
                "height cache_size {} cannot hold the {} tiles of the extent",
                self.height.cache_size, active_tiles
            )));
        }

        Ok(())
    }
}

/// Ready-made option sets for common map setups
#[derive(Debug, Clone, PartialEq)]
pub enum MapPreset {
    /// Miniature map on a table: snapped to the center tile, fixed size in engine units.
    Tabletop,
    /// AR at 1:1 scale: anchored at the exact location, one unit per meter.
    WorldScale,
    Custom(MapOptions),
}

impl MapPreset {
    pub fn resolve(&self) -> MapOptions {
        match self {
            Self::Tabletop => MapOptions {
                scaling: ScalingOptions::default(),
                placement: PlacementOptions::at_tile_center(),
                extent: TileExtent::uniform(1),
                ..MapOptions::default()
            },
            Self::WorldScale => MapOptions {
                location: LocationOptions {
                    zoom: 16.0,
                    ..LocationOptions::default()
                },
                scaling: ScalingOptions::world_scale(),
                placement: PlacementOptions::at_location_center(),
                extent: TileExtent::uniform(2),
                ..MapOptions::default()
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for MapPreset {
    fn default() -> Self {
        Self::Tabletop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::placement::PlacementType;

    #[test]
    fn test_presets() {
        let tabletop = MapPreset::Tabletop.resolve();
        let world = MapPreset::WorldScale.resolve();

        assert_eq!(tabletop.scaling.scaling_type, ScalingType::Custom);
        assert_eq!(tabletop.placement.placement_type, PlacementType::AtTileCenter);

        assert_eq!(world.scaling.scaling_type, ScalingType::WorldScale);
        assert_eq!(world.placement.placement_type, PlacementType::AtLocationCenter);
        assert!(world.extent.west > tabletop.extent.west);

        let custom = MapOptions {
            extent: TileExtent::uniform(0),
            ..MapOptions::default()
        };
        assert_eq!(MapPreset::Custom(custom.clone()).resolve(), custom);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = MapOptions::from_json_str(
            r#"{
                "location": { "center": { "lat": 51.5074, "lng": -0.1278 }, "zoom": 15.5 },
                "scaling": { "scaling_type": "WorldScale" },
                "placement": { "snap_map_to_zero": true }
            }"#,
        )
        .unwrap();

        assert_eq!(options.location.center, LatLng::new(51.5074, -0.1278));
        assert_eq!(options.location.zoom, 15.5);
        assert_eq!(options.scaling.scaling_type, ScalingType::WorldScale);
        assert_eq!(options.placement.placement_type, PlacementType::AtTileCenter);
        assert!(options.placement.snap_map_to_zero);
        assert_eq!(options.extent, TileExtent::default());
        assert_eq!(options.height.cache_size, DEFAULT_HEIGHT_CACHE_SIZE);
    }

    #[test]
    fn test_json_round_trip() {
        let options = MapPreset::WorldScale.resolve();
        let json = options.to_json_string().unwrap();
        assert_eq!(MapOptions::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            MapOptions::from_json_str(r#"{ "location": { "zoom": 40 } }"#),
            Err(MapError::InvalidZoom(_))
        ));
        assert!(matches!(
            MapOptions::from_json_str(
                r#"{ "scaling": { "scaling_type": "Custom", "unity_to_mercator_conversion_factor": 0 } }"#
            ),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            MapOptions::from_json_str(r#"{ "height": { "cache_size": 0 } }"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            MapOptions::from_json_str(
                r#"{ "extent": { "west": 2, "north": 2, "east": 2, "south": 2 }, "height": { "cache_size": 4 } }"#
            ),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            MapOptions::from_json_str(
                r#"{ "extent": { "west": 4294967295, "north": 4294967295, "east": 4294967295, "south": 4294967295 } }"#
            ),
            Err(MapError::Config(_))
        ));
        assert!(MapOptions::from_json_str(
            r#"{ "extent": { "west": 2, "north": 2, "east": 2, "south": 2 }, "height": { "cache_size": 25 } }"#
        )
        .is_ok());
        assert!(matches!(
            MapOptions::from_json_str("{ not json"),
            Err(MapError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            MapOptions::from_json_file("/nonexistent/mapframe.json"),
            Err(MapError::Io(_))
        ));
    }
}
