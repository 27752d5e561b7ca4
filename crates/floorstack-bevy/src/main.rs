// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! floorstack-viewer: open a building snapshot in a 3D window

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use floorstack_bevy::{run_native, FloorstackScene};
use floorstack_geometry::{CapTriangulation, LayoutConfig, WindingMode};
use floorstack_metrics::ThresholdTable;
use floorstack_model::{demo::demo_building, Building, WallSegment};
use floorstack_scene::{FloorSelection, PlaybackMode, SceneComposer, DEFAULT_SIMULATION_SEED};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Play {
    Simulated,
    Replay,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "floorstack-viewer", version, about = "Multi-floor building viewer")]
struct Args {
    /// Building snapshot JSON; the built-in demo building when omitted
    model: Option<PathBuf>,

    /// Wall segment JSON, used when the model has no renderable zones
    #[arg(long)]
    walls: Option<PathBuf>,

    /// Threshold table JSON merged over the built-in thresholds
    #[arg(long)]
    thresholds: Option<PathBuf>,

    /// Metric to color zones by
    #[arg(long)]
    metric: Option<String>,

    /// Select one floor instead of the overview
    #[arg(long)]
    floor: Option<usize>,

    /// Show walls from inside the zones
    #[arg(long, default_value_t = false)]
    inward: bool,

    /// Ear-clip zone caps (concave rooms)
    #[arg(long, default_value_t = false)]
    earcut: bool,

    /// Start playback immediately
    #[arg(long, value_enum)]
    play: Option<Play>,

    /// Seed for simulated readings
    #[arg(long, default_value_t = DEFAULT_SIMULATION_SEED)]
    seed: u64,
}

fn load_walls(path: &Path) -> Result<Vec<WallSegment>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading walls {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing walls {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let building = match &args.model {
        Some(path) => Building::load(path)
            .with_context(|| format!("loading model {}", path.display()))?,
        None => demo_building(),
    };
    let walls = match &args.walls {
        Some(path) => load_walls(path)?,
        None => Vec::new(),
    };

    let thresholds = match &args.thresholds {
        Some(path) => ThresholdTable::load(path)
            .with_context(|| format!("loading thresholds {}", path.display()))?,
        None => ThresholdTable::default(),
    };

    let config = LayoutConfig {
        winding: if args.inward {
            WindingMode::Inward
        } else {
            WindingMode::Outward
        },
        cap_triangulation: if args.earcut {
            CapTriangulation::Earcut
        } else {
            CapTriangulation::Fan
        },
        ..LayoutConfig::default()
    };

    let composer = SceneComposer::new(config, thresholds).with_simulation_seed(args.seed);
    let mut scene = FloorstackScene::new(composer, Some(building), walls);

    if let Some(metric) = args.metric.clone().or_else(|| scene.metrics.first().cloned()) {
        scene.composer.set_metric(Some(metric));
    }
    if let Some(floor) = args.floor {
        scene.composer.select_floor(FloorSelection::Floor(floor));
    }
    match args.play {
        Some(Play::Simulated) => scene.composer.start_playback(PlaybackMode::Simulated),
        Some(Play::Replay) => scene.composer.start_playback(PlaybackMode::Replay),
        None => {}
    }

    run_native(scene);
    Ok(())
}
