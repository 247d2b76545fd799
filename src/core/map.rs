use crate::{
    core::{
        config::{LocationOptions, MapOptions},
        geo::{LatLng, Point, TileCoord},
        position::LocalPosition,
        state::MapState,
        transform::{MapTransform, RootTransform},
    },
    prelude::HashSet,
    tiles::height::{HeightData, TileHeightCache},
    Result,
};

/// Tiles that entered or left the active set during an update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileChanges {
    pub added: Vec<TileCoord>,
    pub removed: Vec<TileCoord>,
}

impl TileChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

pub(crate) type InitializedListener = Box<dyn FnMut(&MapState)>;

/// Map orchestrator.
///
/// Owns the current [`MapState`] snapshot and replaces it whenever the
/// host moves or zooms the map. Conversions between geographic and world
/// positions go through the snapshot and the map's [`RootTransform`].
pub struct Map {
    options: MapOptions,
    state: MapState,
    root: RootTransform,
    heights: TileHeightCache,
    active_tiles: Vec<TileCoord>,
    /// Center tile still waiting for height data before the root can snap
    pending_snap: Option<TileCoord>,
    initialized_listeners: Vec<InitializedListener>,
}

impl Map {
    /// Creates a map and initializes it at `options.location`
    pub fn new(options: MapOptions) -> Result<Self> {
        Self::with_listeners(options, Vec::new())
    }

    /// Creates a map whose listeners already see the first initialization
    pub(crate) fn with_listeners(
        options: MapOptions,
        initialized_listeners: Vec<InitializedListener>,
    ) -> Result<Self> {
        options.validate()?;
        let state = MapState::initialize(
            options.location.center,
            options.location.zoom,
            &options.scaling,
            &options.placement,
        )?;

        let mut map = Self {
            heights: TileHeightCache::new(options.height.cache_size),
            options,
            state,
            root: RootTransform::identity(),
            active_tiles: Vec::new(),
            pending_snap: None,
            initialized_listeners,
        };
        map.finish_initialization();
        Ok(map)
    }

    /// Registers a callback run after every (re-)initialization
    pub fn on_initialized<F>(&mut self, listener: F)
    where
        F: FnMut(&MapState) + 'static,
    {
        self.initialized_listeners.push(Box::new(listener));
    }

    /// Sets the map up from scratch at `center` and `zoom`.
    ///
    /// The integer part of `zoom` becomes the initial zoom; the root
    /// transform's scale and height offset are reset.
    pub fn initialize(&mut self, center: LatLng, zoom: f64) -> Result<TileChanges> {
        let state = MapState::initialize(
            center,
            zoom,
            &self.options.scaling,
            &self.options.placement,
        )?;

        self.state = state;
        Ok(self.finish_initialization())
    }

    /// Resets the root and tiles for a freshly initialized `self.state`
    fn finish_initialization(&mut self) -> TileChanges {
        self.options.location = LocationOptions::new(self.state.center, self.state.zoom);
        self.root = RootTransform::new(
            LocalPosition::on_plane(self.root.position.x, self.root.position.z),
            1.0,
        );
        self.pending_snap = None;

        let changes = self.refresh_tiles();

        log::info!(
            "map initialized at {} zoom {} (scale {:.6e}, origin {:.1}/{:.1})",
            self.state.center,
            self.state.zoom,
            self.state.world_relative_scale,
            self.state.center_mercator.x,
            self.state.center_mercator.y
        );

        let state = &self.state;
        for listener in self.initialized_listeners.iter_mut() {
            listener(state);
        }

        changes
    }

    /// Moves and/or zooms the map without re-initializing it.
    ///
    /// Scale and origin are recomputed for the new center. When the zoom
    /// changes, the root is scaled by `2^(zoom - initial_zoom)`.
    pub fn update_map(&mut self, location: LocationOptions) -> Result<TileChanges> {
        let zoom_changed = self.state.zoom_differs(location.zoom);
        let zoom = if zoom_changed {
            location.zoom
        } else {
            self.state.zoom
        };

        let state = self.state.updated(
            location.center,
            zoom,
            &self.options.scaling,
            &self.options.placement,
        )?;

        if zoom_changed {
            self.root.local_scale = 2_f64.powf(state.zoom - state.initial_zoom as f64);
        }

        self.options.location = LocationOptions::new(state.center, state.zoom);
        self.state = state;

        log::debug!(
            "map updated to {} zoom {} (absolute {}, compensation {})",
            self.state.center,
            self.state.zoom,
            self.state.absolute_zoom(),
            self.state.zoom_compensation()
        );

        Ok(self.refresh_tiles())
    }

    /// Re-initializes at the current center and integer zoom
    pub fn reset_map(&mut self) -> Result<TileChanges> {
        let location = self.options.location.clone();
        self.initialize(location.center, location.zoom.trunc())
    }

    /// Converts a coordinate to a world-space position.
    ///
    /// With `query_height`, the height comes from the covering tile's
    /// terrain. Tiles without loaded height data give height 0.
    pub fn geo_to_world_position(&self, lat_lng: &LatLng, query_height: bool) -> LocalPosition {
        let transform = self.transform();
        let mut local = transform.geo_to_local(lat_lng);

        if query_height {
            match self.query_height_data(lat_lng) {
                Ok(meters) => local.y = meters * transform.effective_scale(),
                Err(e) => log::warn!("{}; using height 0 at {}", e, lat_lng),
            }
        }

        self.root.transform_point(&local)
    }

    /// Converts a world-space position back to a coordinate. Height is ignored.
    pub fn world_to_geo_position(&self, position: &LocalPosition) -> LatLng {
        let local = self.root.inverse_transform_point(position);
        self.transform().local_to_geo(&local)
    }

    /// Terrain height in meters at `lat_lng`, read from the tile at the absolute zoom
    pub fn query_height_data(&self, lat_lng: &LatLng) -> Result<f64> {
        self.heights
            .query_lat_lng(lat_lng, self.state.absolute_zoom())
    }

    /// Delivers height data for a tile. Completes a pending snap to zero
    /// when this is the tile it waits on.
    pub fn insert_height_data(&mut self, coord: TileCoord, data: HeightData) {
        self.heights.insert(coord, data);

        if self.pending_snap == Some(coord) {
            self.snap_to_tile(coord);
        }
    }

    pub fn mark_height_failed(&mut self, coord: TileCoord, reason: impl Into<String>) {
        self.heights.mark_failed(coord, reason);
    }

    /// Places the map root in world space, keeping its scale
    pub fn set_root_position(&mut self, position: LocalPosition) {
        self.root.position = position;
    }

    fn transform(&self) -> MapTransform {
        self.state.transform()
    }

    fn center_tile(&self) -> TileCoord {
        TileCoord::from_lat_lng(&self.state.center, self.state.absolute_zoom())
    }

    /// Recomputes the active tile set around the center tile
    fn refresh_tiles(&mut self) -> TileChanges {
        let center_tile = self.center_tile();
        let tiles = self.options.extent.tiles_around(&center_tile);

        let current: HashSet<TileCoord> = tiles.iter().copied().collect();
        let previous: HashSet<TileCoord> = self.active_tiles.iter().copied().collect();

        let removed: Vec<TileCoord> = self
            .active_tiles
            .iter()
            .filter(|tile| !current.contains(tile))
            .copied()
            .collect();
        let added: Vec<TileCoord> = tiles
            .iter()
            .filter(|tile| !previous.contains(tile))
            .copied()
            .collect();

        for tile in &removed {
            self.heights.remove(tile);
        }
        for tile in &added {
            self.heights.mark_loading(*tile);
        }
        self.active_tiles = tiles;

        if self.options.placement.snap_map_to_zero {
            self.snap_to_tile(center_tile);
        }

        if !added.is_empty() || !removed.is_empty() {
            log::debug!("tiles: {} added, {} removed", added.len(), removed.len());
        }

        TileChanges { added, removed }
    }

    /// Lifts or lowers the root so the terrain at the tile's center sits at height 0
    fn snap_to_tile(&mut self, coord: TileCoord) {
        match self.heights.query(&coord, 0.5, 0.5) {
            Ok(meters) => {
                let local_height = meters * self.transform().effective_scale();
                self.root.position.y = -local_height * self.root.local_scale;
                self.pending_snap = None;
                log::debug!("snapped map to zero on tile {} ({} m)", coord, meters);
            }
            Err(_) => {
                self.pending_snap = Some(coord);
            }
        }
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn root(&self) -> &RootTransform {
        &self.root
    }

    pub fn heights(&self) -> &TileHeightCache {
        &self.heights
    }

    pub fn active_tiles(&self) -> &[TileCoord] {
        &self.active_tiles
    }

    pub fn pending_snap(&self) -> Option<TileCoord> {
        self.pending_snap
    }

    pub fn center(&self) -> LatLng {
        self.state.center
    }

    pub fn center_mercator(&self) -> Point {
        self.state.center_mercator
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    pub fn absolute_zoom(&self) -> u8 {
        self.state.absolute_zoom()
    }

    pub fn initial_zoom(&self) -> u8 {
        self.state.initial_zoom
    }

    pub fn world_relative_scale(&self) -> f64 {
        self.state.world_relative_scale
    }
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("state", &self.state)
            .field("root", &self.root)
            .field("active_tiles", &self.active_tiles.len())
            .field("pending_snap", &self.pending_snap)
            .finish()
    }
}
