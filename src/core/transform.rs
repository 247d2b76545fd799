use crate::core::geo::{LatLng, Point};
use crate::core::position::LocalPosition;
use serde::{Deserialize, Serialize};

/// Corrective factor `2^(initial_zoom - absolute_zoom)`.
///
/// Tile-space units halve with every zoom level while local units stay
/// fixed, so a map that zooms past the level it was set up at needs this
/// to keep local positions stable.
pub fn zoom_compensation(initial_zoom: u8, absolute_zoom: u8) -> f64 {
    2_f64.powi(initial_zoom as i32 - absolute_zoom as i32)
}

/// Geographic ↔ local conversion for one map configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapTransform {
    /// Mercator point that maps to the local origin
    pub origin: Point,
    pub world_relative_scale: f64,
    pub zoom_compensation: f64,
}

impl MapTransform {
    pub fn new(origin: Point, world_relative_scale: f64, zoom_compensation: f64) -> Self {
        Self {
            origin,
            world_relative_scale,
            zoom_compensation,
        }
    }

    /// Local units per Mercator meter
    pub fn effective_scale(&self) -> f64 {
        self.world_relative_scale * self.zoom_compensation
    }

    /// Mercator meters to local units
    pub fn mercator_to_local(&self, point: &Point) -> LocalPosition {
        let relative = point.subtract(&self.origin).multiply(self.effective_scale());
        LocalPosition::on_plane(relative.x, relative.y)
    }

    /// Local position on the map plane to Mercator meters; height is ignored
    pub fn local_to_mercator(&self, position: &LocalPosition) -> Point {
        Point::new(position.x, position.z)
            .divide(self.effective_scale())
            .add(&self.origin)
    }

    /// Projects a coordinate onto the map plane. Latitude is clamped to the
    /// projectable range first.
    pub fn geo_to_local(&self, lat_lng: &LatLng) -> LocalPosition {
        self.mercator_to_local(&lat_lng.clamped().to_mercator())
    }

    pub fn local_to_geo(&self, position: &LocalPosition) -> LatLng {
        LatLng::from_mercator(self.local_to_mercator(position))
    }
}

/// Placement of the map root in world space: uniform scale then translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootTransform {
    pub position: LocalPosition,
    /// Uniform scale factor (1.0 = no scaling)
    pub local_scale: f64,
}

impl Default for RootTransform {
    fn default() -> Self {
        Self {
            position: LocalPosition::zero(),
            local_scale: 1.0,
        }
    }
}

impl RootTransform {
    pub fn new(position: LocalPosition, local_scale: f64) -> Self {
        Self {
            position,
            local_scale,
        }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if this is effectively an identity transform
    pub fn is_identity(&self) -> bool {
        (self.local_scale - 1.0).abs() < 1e-9 && self.position.distance_to(&LocalPosition::zero()) < 1e-9
    }

    /// Map-local point to world space
    pub fn transform_point(&self, point: &LocalPosition) -> LocalPosition {
        point.multiply(self.local_scale).add(&self.position)
    }

    /// World-space point to map-local space
    pub fn inverse_transform_point(&self, point: &LocalPosition) -> LocalPosition {
        point.subtract(&self.position).multiply(1.0 / self.local_scale)
    }
}
