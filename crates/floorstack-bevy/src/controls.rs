// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keyboard controls and playback clock
//!
//! | Key            | Action                                  |
//! |----------------|-----------------------------------------|
//! | `0`            | show every floor                        |
//! | `1`..`9`       | select a floor                          |
//! | `PageUp/Down`  | step the selected floor                 |
//! | `M`            | cycle the active metric                 |
//! | `Left/Right`   | step the time index                     |
//! | `Space`        | toggle simulated playback               |
//! | `R`            | toggle replay of recorded series        |
//! | `I`            | flip wall winding and relayout          |
//! | `S`            | toggle sensor markers                   |

use crate::FloorstackScene;
use bevy::prelude::*;
use floorstack_scene::{FloorSelection, PlaybackMode};

/// System set for scene state changes, ordered before entity sync
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlsSet;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_system, playback_system)
                .chain()
                .in_set(ControlsSet),
        );
    }
}

const FLOOR_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Selection one floor up or down from the current one
///
/// Stepping down from the lowest floor, or up from the top, returns to
/// the all-floors overview.
pub fn step_selection(selection: FloorSelection, floor_count: usize, up: bool) -> FloorSelection {
    if floor_count == 0 {
        return FloorSelection::All;
    }
    let last = floor_count - 1;
    match (selection, up) {
        (FloorSelection::All, true) => FloorSelection::Floor(0),
        (FloorSelection::All, false) => FloorSelection::Floor(last),
        (FloorSelection::Floor(i), true) if i >= last => FloorSelection::All,
        (FloorSelection::Floor(i), true) => FloorSelection::Floor(i + 1),
        (FloorSelection::Floor(i), false) => match i.min(last) {
            0 => FloorSelection::All,
            i => FloorSelection::Floor(i - 1),
        },
    }
}

/// Next entry of `None, metrics[0], .., metrics[n-1], None`
pub fn next_metric(current: Option<&str>, metrics: &[String]) -> Option<String> {
    let next = match current {
        None => 0,
        Some(name) => match metrics.iter().position(|m| m == name) {
            Some(i) => i + 1,
            None => 0,
        },
    };
    metrics.get(next).cloned()
}

/// Time index one step forward or back, saturating at both ends
pub fn step_time(time_index: usize, forward: bool) -> usize {
    if forward {
        time_index.saturating_add(1)
    } else {
        time_index.saturating_sub(1)
    }
}

fn toggle_playback(scene: &mut FloorstackScene, mode: PlaybackMode) {
    let composer = &mut scene.composer;
    if composer.is_playing() && composer.playback_mode() == Some(mode) {
        composer.stop_playback();
    } else {
        composer.start_playback(mode);
    }
}

fn keyboard_system(keyboard: Res<ButtonInput<KeyCode>>, mut scene: ResMut<FloorstackScene>) {
    let floor_count = scene.composer.floor_count();
    let mut changed = false;

    if keyboard.just_pressed(KeyCode::Digit0) {
        scene.composer.select_floor(FloorSelection::All);
        changed = true;
    }
    for (i, key) in FLOOR_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) && i < floor_count {
            scene.composer.select_floor_index(i);
            changed = true;
        }
    }
    for (key, up) in [(KeyCode::PageUp, true), (KeyCode::PageDown, false)] {
        if keyboard.just_pressed(key) {
            let selection = step_selection(scene.composer.selection(), floor_count, up);
            scene.composer.select_floor(selection);
            changed = true;
        }
    }

    if keyboard.just_pressed(KeyCode::KeyM) {
        let metric = next_metric(scene.composer.metric(), &scene.metrics);
        log::info!("Metric: {}", metric.as_deref().unwrap_or("none"));
        scene.composer.set_metric(metric);
        changed = true;
    }

    if keyboard.just_pressed(KeyCode::ArrowRight) {
        let t = step_time(scene.composer.time_index(), true);
        scene.composer.set_time_index(t);
        changed = true;
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        let t = step_time(scene.composer.time_index(), false);
        scene.composer.set_time_index(t);
        changed = true;
    }

    if keyboard.just_pressed(KeyCode::Space) {
        toggle_playback(&mut scene, PlaybackMode::Simulated);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        toggle_playback(&mut scene, PlaybackMode::Replay);
    }

    if keyboard.just_pressed(KeyCode::KeyI) {
        let mut config = scene.composer.config().clone();
        config.winding = config.winding.flipped();
        log::info!("Wall winding: {:?}", config.winding);
        scene.composer.set_config(config);
        scene.relayout();
    }

    if keyboard.just_pressed(KeyCode::KeyS) {
        scene.show_sensors = !scene.show_sensors;
    }

    if changed {
        scene.materials_dirty = true;
    }
}

fn playback_system(time: Res<Time>, mut scene: ResMut<FloorstackScene>) {
    if scene.composer.advance(time.delta()) {
        scene.materials_dirty = true;
    }
}
