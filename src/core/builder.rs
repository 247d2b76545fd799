//! Map builder for fluent API configuration
//!
//! Starts from a [`MapPreset`] and lets individual options be overridden
//! before the map is created and initialized.

use crate::{
    core::{
        config::{LocationOptions, MapOptions, MapPreset},
        geo::LatLng,
        map::{InitializedListener, Map},
        placement::{PlacementOptions, PlacementType},
        scaling::{ScalingOptions, ScalingType},
        state::MapState,
    },
    tiles::cover::TileExtent,
    Result,
};

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    /// Preset the options start from
    preset: MapPreset,
    location: Option<LocationOptions>,
    scaling: Option<ScalingOptions>,
    placement_type: Option<PlacementType>,
    snap_map_to_zero: Option<bool>,
    extent: Option<TileExtent>,
    height_cache_size: Option<usize>,
    initialized_listeners: Vec<InitializedListener>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self {
            preset: MapPreset::default(),
            location: None,
            scaling: None,
            placement_type: None,
            snap_map_to_zero: None,
            extent: None,
            height_cache_size: None,
            initialized_listeners: Vec::new(),
        }
    }

    /// Set the preset the remaining options are applied on top of
    pub fn with_preset(mut self, preset: MapPreset) -> Self {
        self.preset = preset;
        self
    }

    /// Start from fully specified options
    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.preset = MapPreset::Custom(options);
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.location = Some(LocationOptions::new(center, zoom));
        self
    }

    pub fn with_world_scale(mut self) -> Self {
        self.scaling = Some(ScalingOptions::world_scale());
        self
    }

    /// Scale so the center tile spans `conversion_factor` engine units
    pub fn with_custom_scale(mut self, conversion_factor: f64) -> Self {
        self.scaling = Some(ScalingOptions::custom(conversion_factor));
        self
    }

    pub fn with_scaling(mut self, scaling_type: ScalingType) -> Self {
        let mut scaling = self.scaling.take().unwrap_or_else(|| self.preset.resolve().scaling);
        scaling.scaling_type = scaling_type;
        self.scaling = Some(scaling);
        self
    }

    pub fn with_placement(mut self, placement_type: PlacementType) -> Self {
        self.placement_type = Some(placement_type);
        self
    }

    /// Keep terrain under the center tile at world height 0
    pub fn with_snap_map_to_zero(mut self, enabled: bool) -> Self {
        self.snap_map_to_zero = Some(enabled);
        self
    }

    /// Set how many tiles stay active around the center tile
    pub fn with_extent(mut self, extent: TileExtent) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_height_cache_size(mut self, cache_size: usize) -> Self {
        self.height_cache_size = Some(cache_size);
        self
    }

    /// Register a listener before the first initialization runs
    pub fn on_initialized<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&MapState) + 'static,
    {
        self.initialized_listeners.push(Box::new(listener));
        self
    }

    /// Resolve the preset and overrides into options
    pub fn options(&self) -> MapOptions {
        let mut options = self.preset.resolve();

        if let Some(location) = &self.location {
            options.location = location.clone();
        }
        if let Some(scaling) = &self.scaling {
            options.scaling = scaling.clone();
        }
        if let Some(placement_type) = self.placement_type {
            options.placement = PlacementOptions {
                placement_type,
                ..options.placement
            };
        }
        if let Some(snap) = self.snap_map_to_zero {
            options.placement.snap_map_to_zero = snap;
        }
        if let Some(extent) = self.extent {
            options.extent = extent;
        }
        if let Some(cache_size) = self.height_cache_size {
            options.height.cache_size = cache_size;
        }

        options
    }

    /// Build and initialize the map
    pub fn build(self) -> Result<Map> {
        let options = self.options();
        Map::with_listeners(options, self.initialized_listeners)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience methods for common map configurations
impl MapBuilder {
    /// Tabletop map of `tile_size` engine units per tile
    pub fn tabletop(center: LatLng, zoom: f64, tile_size: f64) -> Self {
        Self::new()
            .with_preset(MapPreset::Tabletop)
            .with_center_and_zoom(center, zoom)
            .with_custom_scale(tile_size)
    }

    /// Life-size AR map anchored at `center`
    pub fn world_scale(center: LatLng, zoom: f64) -> Self {
        Self::new()
            .with_preset(MapPreset::WorldScale)
            .with_center_and_zoom(center, zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_builder_overrides_preset() {
        let options = MapBuilder::new()
            .with_preset(MapPreset::WorldScale)
            .with_placement(PlacementType::AtTileCenter)
            .with_snap_map_to_zero(true)
            .with_extent(TileExtent::uniform(0))
            .with_height_cache_size(4)
            .options();

        assert_eq!(options.scaling.scaling_type, ScalingType::WorldScale);
        assert_eq!(options.placement.placement_type, PlacementType::AtTileCenter);
        assert!(options.placement.snap_map_to_zero);
        assert_eq!(options.extent, TileExtent::uniform(0));
        assert_eq!(options.height.cache_size, 4);
    }

    #[test]
    fn test_with_scaling_keeps_factor() {
        let options = MapBuilder::new()
            .with_custom_scale(250.0)
            .with_scaling(ScalingType::WorldScale)
            .options();

        assert_eq!(options.scaling.scaling_type, ScalingType::WorldScale);
        assert_eq!(options.scaling.unity_to_mercator_conversion_factor, 250.0);
    }

    #[test]
    fn test_tabletop_build() {
        let map = MapBuilder::tabletop(LatLng::new(35.6762, 139.6503), 15.0, 50.0)
            .build()
            .unwrap();

        assert_eq!(map.initial_zoom(), 15);
        assert_eq!(map.options().scaling.unity_to_mercator_conversion_factor, 50.0);
        assert_eq!(map.active_tiles().len(), 9);
    }

    #[test]
    fn test_listener_sees_first_initialization() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let map = MapBuilder::world_scale(LatLng::new(59.3293, 18.0686), 17.0)
            .on_initialized(move |_| counter.set(counter.get() + 1))
            .build()
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(map.initial_zoom(), 17);
    }

    #[test]
    fn test_listeners_run_once_per_initialization() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let mut map = MapBuilder::tabletop(LatLng::new(-1.2921, 36.8219), 9.0, 100.0)
            .on_initialized(move |_| counter.set(counter.get() + 1))
            .build()
            .unwrap();
        assert_eq!(calls.get(), 1);

        map.update_map(LocationOptions::new(LatLng::new(-1.3, 36.9), 10.0))
            .unwrap();
        assert_eq!(calls.get(), 1);

        map.reset_map().unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_build_rejects_invalid_options() {
        assert!(MapBuilder::new()
            .with_center_and_zoom(LatLng::new(0.0, 0.0), 25.0)
            .build()
            .is_err());
        assert!(MapBuilder::new().with_custom_scale(-1.0).build().is_err());
    }
}
