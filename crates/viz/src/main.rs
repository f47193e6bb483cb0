//! SMLC Cube Viewer
//!
//! Run with: cargo run -p viz
//!
//! Examples:
//!   cargo run -p viz -- --level team
//!   cargo run -p viz -- --config viewer.toml --data assets/data/smlc_data.json

use bevy::prelude::*;
use clap::Parser;
use selection::ViewerConfig;
use std::path::PathBuf;
use viz::{CubeVizPlugin, ViewerSettings};

/// SMLC Cube Viewer
#[derive(Parser, Debug)]
#[command(name = "viz")]
#[command(about = "3D cube viewer for the SMLC level dataset")]
struct Args {
    /// TOML config file (all keys optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the dataset JSON (overrides the config file)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Level selected at startup (overrides the config file)
    #[arg(long)]
    level: Option<String>,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match ViewerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => ViewerConfig::default(),
    };

    if let Some(data) = args.data {
        config.data_path = data;
    }
    if let Some(level) = args.level {
        config.initial_level = level;
    }

    App::new()
        .insert_resource(ViewerSettings(config))
        .add_plugins(CubeVizPlugin)
        .run();
}
