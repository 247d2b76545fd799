//! Scaling strategies: how many engine units a Mercator meter is worth.

use crate::core::constants::DEFAULT_UNITY_TO_MERCATOR_CONVERSION_FACTOR;
use crate::core::geo::{LatLng, TileCoord};
use crate::core::state::MapState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingType {
    /// True-to-life scale: one engine unit per ground meter at the center.
    WorldScale,
    /// The reference tile spans `unity_to_mercator_conversion_factor` units.
    Custom,
}

impl Default for ScalingType {
    fn default() -> Self {
        Self::Custom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingOptions {
    pub scaling_type: ScalingType,
    pub unity_to_mercator_conversion_factor: f64,
}

impl ScalingOptions {
    pub fn world_scale() -> Self {
        Self {
            scaling_type: ScalingType::WorldScale,
            ..Self::default()
        }
    }

    pub fn custom(unity_to_mercator_conversion_factor: f64) -> Self {
        Self {
            scaling_type: ScalingType::Custom,
            unity_to_mercator_conversion_factor,
        }
    }

    /// Scale factor for a map centered on `center` at integer `zoom`.
    pub fn world_relative_scale(&self, center: &LatLng, zoom: u8) -> f64 {
        match self.scaling_type {
            // Undo Mercator stretching at the center latitude
            ScalingType::WorldScale => center.lat.to_radians().cos(),
            ScalingType::Custom => {
                let reference_tile = TileCoord::from_lat_lng(center, zoom).mercator_bounds();
                self.unity_to_mercator_conversion_factor / reference_tile.width()
            }
        }
    }

    /// Scale for the center and absolute zoom of `state`
    pub fn set_up_scaling(&self, state: &MapState) -> f64 {
        self.world_relative_scale(&state.center, state.absolute_zoom())
    }
}

impl Default for ScalingOptions {
    fn default() -> Self {
        Self {
            scaling_type: ScalingType::default(),
            unity_to_mercator_conversion_factor: DEFAULT_UNITY_TO_MERCATOR_CONVERSION_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{tile_width_meters, LATITUDE_MAX};

    #[test]
    fn test_world_scale_at_equator_is_one() {
        let scale = ScalingOptions::world_scale().world_relative_scale(&LatLng::new(0.0, 0.0), 0);
        assert!((scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_world_scale_decreases_with_latitude() {
        let options = ScalingOptions::world_scale();
        let mut previous = options.world_relative_scale(&LatLng::new(0.0, 10.0), 12);

        for step in 1..=17 {
            let lat = (step as f64 * 5.0).min(LATITUDE_MAX);
            let north = options.world_relative_scale(&LatLng::new(lat, 10.0), 12);
            let south = options.world_relative_scale(&LatLng::new(-lat, 10.0), 12);

            assert!(north < previous, "scale should shrink at {}°", lat);
            assert!((north - south).abs() < 1e-12);
            previous = north;
        }
    }

    #[test]
    fn test_world_scale_ignores_zoom() {
        let options = ScalingOptions::world_scale();
        let center = LatLng::new(52.52, 13.405);
        assert_eq!(
            options.world_relative_scale(&center, 3),
            options.world_relative_scale(&center, 17)
        );
    }

    #[test]
    fn test_custom_scale_uses_reference_tile_width() {
        let scale = ScalingOptions::custom(1.0).world_relative_scale(&LatLng::new(45.0, -90.0), 2);
        assert!((scale - 1.0 / 10_018_754.171_394_622).abs() < 1e-18);
        assert!((scale * tile_width_meters(2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_up_scaling_matches_state() {
        let scaling = ScalingOptions::custom(10.0);
        let state = MapState::initialize(
            LatLng::new(-22.9068, -43.1729),
            12.4,
            &scaling,
            &crate::core::placement::PlacementOptions::default(),
        )
        .unwrap();
        assert_eq!(scaling.set_up_scaling(&state), state.world_relative_scale);
    }

    #[test]
    fn test_custom_scale_doubles_per_zoom() {
        let options = ScalingOptions::custom(100.0);
        let center = LatLng::new(37.7749, -122.4194);
        let coarse = options.world_relative_scale(&center, 15);
        let fine = options.world_relative_scale(&center, 16);
        assert!((fine / coarse - 2.0).abs() < 1e-9);
    }
}
