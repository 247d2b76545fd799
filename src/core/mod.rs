pub mod bounds;
pub mod builder;
pub mod config;
pub mod constants;
pub mod geo;
pub mod map;
pub mod placement;
pub mod position;
pub mod scaling;
pub mod state;
pub mod transform;
