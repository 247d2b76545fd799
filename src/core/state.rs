use crate::core::constants::{MAX_ZOOM, ZOOM_EPSILON};
use crate::core::geo::{LatLng, Point};
use crate::core::placement::PlacementOptions;
use crate::core::scaling::ScalingOptions;
use crate::core::transform::{zoom_compensation, MapTransform};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Snapshot of the map's geographic frame.
///
/// Snapshots are never edited in place; [`MapState::initialize`] and
/// [`MapState::updated`] return a fresh one with the scale and origin
/// recomputed from the strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    pub center: LatLng,
    pub center_mercator: Point,
    /// Fractional zoom requested by the host
    pub zoom: f64,
    /// Integer zoom the map was set up at
    pub initial_zoom: u8,
    pub world_relative_scale: f64,
}

impl MapState {
    pub fn initialize(
        center: LatLng,
        zoom: f64,
        scaling: &ScalingOptions,
        placement: &PlacementOptions,
    ) -> Result<Self> {
        let zoom = validate_zoom(zoom)?;
        let center = validate_center(center)?;
        let initial_zoom = zoom.trunc() as u8;

        Ok(Self::compute(center, zoom, initial_zoom, scaling, placement))
    }

    /// New snapshot for a moved or zoomed map. `initial_zoom` is kept.
    pub fn updated(
        &self,
        center: LatLng,
        zoom: f64,
        scaling: &ScalingOptions,
        placement: &PlacementOptions,
    ) -> Result<Self> {
        let zoom = validate_zoom(zoom)?;
        let center = validate_center(center)?;

        Ok(Self::compute(center, zoom, self.initial_zoom, scaling, placement))
    }

    fn compute(
        center: LatLng,
        zoom: f64,
        initial_zoom: u8,
        scaling: &ScalingOptions,
        placement: &PlacementOptions,
    ) -> Self {
        let mut state = Self {
            center,
            center_mercator: Point::default(),
            zoom,
            initial_zoom,
            world_relative_scale: 1.0,
        };
        // Scaling first, then placement
        state.world_relative_scale = scaling.set_up_scaling(&state);
        state.center_mercator = placement.set_up_placement(&state);
        state
    }

    /// Zoom level of the tiles being rendered
    pub fn absolute_zoom(&self) -> u8 {
        self.zoom.floor() as u8
    }

    pub fn zoom_compensation(&self) -> f64 {
        zoom_compensation(self.initial_zoom, self.absolute_zoom())
    }

    /// True when `zoom` differs from the current zoom by more than the epsilon
    pub fn zoom_differs(&self, zoom: f64) -> bool {
        (self.zoom - zoom).abs() > ZOOM_EPSILON
    }

    pub fn transform(&self) -> MapTransform {
        MapTransform::new(
            self.center_mercator,
            self.world_relative_scale,
            self.zoom_compensation(),
        )
    }
}

fn validate_zoom(zoom: f64) -> Result<f64> {
    if !zoom.is_finite() || zoom < 0.0 || zoom > MAX_ZOOM as f64 {
        return Err(MapError::InvalidZoom(zoom));
    }
    Ok(zoom)
}

fn validate_center(center: LatLng) -> Result<LatLng> {
    if !center.lat.is_finite() || !center.lng.is_finite() {
        return Err(MapError::InvalidCoordinates(format!(
            "non-finite center {}",
            center
        )));
    }
    Ok(center.clamped())
}
