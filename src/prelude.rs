//! Prelude module for common mapframe types
//!
//! This module re-exports the most commonly used types and functions
//! for easy importing with `use mapframe::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    builder::MapBuilder,
    config::{HeightOptions, LocationOptions, MapOptions, MapPreset},
    geo::{LatLng, Point, TileCoord},
    map::{Map, TileChanges},
    placement::{PlacementOptions, PlacementType},
    position::LocalPosition,
    scaling::{ScalingOptions, ScalingType},
    state::MapState,
    transform::{zoom_compensation, MapTransform, RootTransform},
};

pub use crate::tiles::{
    cover::TileExtent,
    height::{HeightData, TileHeightCache, TilePropertyState},
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
