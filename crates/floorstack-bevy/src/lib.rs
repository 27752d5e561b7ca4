// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # floorstack Bevy viewer
//!
//! Hosts a [`SceneComposer`] in a Bevy app: the composer owns layout and
//! viewer state, this crate mirrors its scene graph as entities and feeds
//! it input and frame time.
//!
//! ```rust,ignore
//! use floorstack_bevy::{run_native, FloorstackScene};
//!
//! let scene = FloorstackScene::new(composer, Some(building), Vec::new());
//! run_native(scene);
//! ```

pub mod camera;
pub mod controls;
pub mod mesh;

pub use camera::{CameraController, CameraMode, CameraPlugin};
pub use controls::{next_metric, step_selection, ControlsPlugin, ControlsSet};
pub use mesh::{standard_material, to_bevy_mesh, FloorRoot, SceneNodeLink, ScenePlugin};

use bevy::prelude::*;
use floorstack_model::{Building, WallSegment};
use floorstack_scene::{SceneComposer, SceneInput};

/// Composer plus the inputs it was laid out from
#[derive(Resource)]
pub struct FloorstackScene {
    pub composer: SceneComposer,
    pub building: Option<Building>,
    pub walls: Vec<WallSegment>,
    /// Metrics offered by the metric cycle key
    pub metrics: Vec<String>,
    /// Entities must be rebuilt from the graph
    pub layout_dirty: bool,
    /// Materials or visibility changed since the last sync
    pub materials_dirty: bool,
    pub show_sensors: bool,
}

impl FloorstackScene {
    /// Lay out `building` (or `walls` when there is no renderable model)
    pub fn new(composer: SceneComposer, building: Option<Building>, walls: Vec<WallSegment>) -> Self {
        let metrics = match &building {
            Some(building) if !building.metric_names().is_empty() => building.metric_names(),
            _ => composer
                .thresholds()
                .metric_names()
                .into_iter()
                .map(String::from)
                .collect(),
        };
        let mut scene = Self {
            composer,
            building,
            walls,
            metrics,
            layout_dirty: true,
            materials_dirty: true,
            show_sensors: true,
        };
        scene.relayout();
        scene
    }

    /// Run a fresh layout pass from the stored inputs
    pub fn relayout(&mut self) {
        self.composer
            .layout(SceneInput::choose(self.building.as_ref(), &self.walls));
        self.layout_dirty = true;
        self.materials_dirty = true;
    }
}

/// Main viewer plugin; expects a [`FloorstackScene`] resource
pub struct FloorstackViewerPlugin;

impl Plugin for FloorstackViewerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CameraPlugin, ControlsPlugin, ScenePlugin));
    }
}

/// Run the desktop viewer until the window closes
pub fn run_native(scene: FloorstackScene) -> AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "floorstack".to_string(),
                resolution: (1280u32, 720u32).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.1, 0.1, 0.15)))
        .insert_resource(scene)
        .add_plugins(FloorstackViewerPlugin)
        .run()
}
