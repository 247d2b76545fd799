//! Command line front end for mapframe.
//!
//! ```bash
//! # Local position of a coordinate on a tabletop map around Paris
//! mapframe-app --center 48.8566,2.3522 --zoom 15 to-local 48.8584,2.2945
//!
//! # Back from local x/z to a coordinate, using a JSON config
//! mapframe-app --config map.json to-geo 12.5 -40
//!
//! # Dump the map state
//! mapframe-app --config map.json info
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use mapframe::{LatLng, LocalPosition, Map, MapOptions, MapPreset};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mapframe-app")]
#[command(about = "Convert between coordinates and local map space")]
#[command(version)]
struct Args {
    /// JSON map configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Map center as "lat,lng", overrides the config
    #[arg(long, global = true, allow_hyphen_values = true)]
    center: Option<LatLng>,

    /// Map zoom, overrides the config
    #[arg(short, long, global = true)]
    zoom: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Coordinate to local position
    ToLocal {
        #[arg(allow_hyphen_values = true)]
        lat_lng: LatLng,
    },
    /// Local x/z to coordinate
    ToGeo {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,
    },
    /// Print the map state
    Info,
}

fn load_options(args: &Args) -> anyhow::Result<MapOptions> {
    let mut options = match &args.config {
        Some(path) => MapOptions::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MapPreset::Tabletop.resolve(),
    };

    if let Some(center) = args.center {
        options.location.center = center;
    }
    if let Some(zoom) = args.zoom {
        options.location.zoom = zoom;
    }

    Ok(options)
}

fn main() -> anyhow::Result<()> {
    mapframe::init_logger();
    let args = Args::parse();

    let options = load_options(&args)?;
    let map = Map::new(options).context("failed to initialize map")?;

    let output = match args.command {
        Command::ToLocal { lat_lng } => {
            let position = map.geo_to_world_position(&lat_lng, false);
            json!({ "lat_lng": lat_lng, "position": position })
        }
        Command::ToGeo { x, z } => {
            let position = LocalPosition::on_plane(x, z);
            let lat_lng = map.world_to_geo_position(&position);
            json!({ "position": position, "lat_lng": lat_lng })
        }
        Command::Info => json!({
            "state": map.state(),
            "absolute_zoom": map.absolute_zoom(),
            "zoom_compensation": map.state().zoom_compensation(),
            "active_tiles": map.active_tiles().iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            "options": map.options(),
        }),
    };

    log::debug!("{:?}", map);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
