//! Placement strategies: which Mercator point sits at the local origin.

use crate::core::geo::{LatLng, Point, TileCoord};
use crate::core::state::MapState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementType {
    /// Origin at the center of the tile covering the map center.
    AtTileCenter,
    /// Origin exactly at the map center.
    AtLocationCenter,
}

impl Default for PlacementType {
    fn default() -> Self {
        Self::AtTileCenter
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementOptions {
    pub placement_type: PlacementType,
    /// Shift the map root vertically so terrain under the center tile sits at height 0.
    pub snap_map_to_zero: bool,
}

impl PlacementOptions {
    pub fn at_tile_center() -> Self {
        Self {
            placement_type: PlacementType::AtTileCenter,
            ..Self::default()
        }
    }

    pub fn at_location_center() -> Self {
        Self {
            placement_type: PlacementType::AtLocationCenter,
            ..Self::default()
        }
    }

    /// Mercator origin for a map centered on `center` at integer `zoom`.
    pub fn center_mercator(&self, center: &LatLng, zoom: u8) -> Point {
        match self.placement_type {
            PlacementType::AtTileCenter => {
                TileCoord::from_lat_lng(center, zoom).mercator_bounds().center()
            }
            PlacementType::AtLocationCenter => center.clamped().to_mercator(),
        }
    }

    /// Origin for the center and absolute zoom of `state`
    pub fn set_up_placement(&self, state: &MapState) -> Point {
        self.center_mercator(&state.center, state.absolute_zoom())
    }
}
