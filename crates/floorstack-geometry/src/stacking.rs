// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor stacking
//!
//! Nominal floor elevations in a snapshot are not trusted: two floors may
//! share an elevation or be closer than the floor below is tall. Each floor
//! is raised to at least the top of the floor beneath it plus one slab.

use crate::config::MIN_TOTAL_HEIGHT;
use floorstack_model::Floor;

/// Effective base elevation of every floor, in stack order
///
/// `E[0]` is the first floor's nominal elevation. For `i > 0`,
/// `E[i] = max(elevation[i], E[i-1] + slab_thickness + default_height[i-1])`.
pub fn resolve_elevations(floors: &[Floor], slab_thickness: f64) -> Vec<f64> {
    let mut elevations: Vec<f64> = Vec::with_capacity(floors.len());

    for (i, floor) in floors.iter().enumerate() {
        let effective = match i {
            0 => floor.elevation,
            _ => {
                let below = &floors[i - 1];
                let candidate = elevations[i - 1] + slab_thickness + below.default_height;
                if candidate > floor.elevation {
                    log::debug!(
                        "Raising floor '{}' from {:.3} to {:.3}",
                        floor.id,
                        floor.elevation,
                        candidate
                    );
                }
                floor.elevation.max(candidate)
            }
        };
        elevations.push(effective);
    }

    elevations
}

/// Resolved vertical layout of one layout pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloorStack {
    elevations: Vec<f64>,
    heights: Vec<f64>,
    slab_thickness: f64,
}

impl FloorStack {
    pub fn resolve(floors: &[Floor], slab_thickness: f64) -> Self {
        Self {
            elevations: resolve_elevations(floors, slab_thickness),
            heights: floors.iter().map(|f| f.default_height).collect(),
            slab_thickness,
        }
    }

    /// Stack of a single storey, used for wall-segment input
    pub fn single(elevation: f64, height: f64, slab_thickness: f64) -> Self {
        Self {
            elevations: vec![elevation],
            heights: vec![height],
            slab_thickness,
        }
    }

    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    /// Effective base elevation of floor `index`
    pub fn elevation(&self, index: usize) -> Option<f64> {
        self.elevations.get(index).copied()
    }

    pub fn elevations(&self) -> &[f64] {
        &self.elevations
    }

    /// Top of floor `index`'s default-height walls
    pub fn top_of(&self, index: usize) -> Option<f64> {
        Some(self.elevation(index)? + *self.heights.get(index)?)
    }

    /// Vertical extent `[E - slab, E]` of floor `index`'s slab
    pub fn slab_range(&self, index: usize) -> Option<(f64, f64)> {
        let e = self.elevation(index)?;
        Some((e - self.slab_thickness, e))
    }

    pub fn slab_thickness(&self) -> f64 {
        self.slab_thickness
    }

    /// Height used for camera framing
    ///
    /// Top floor's effective elevation plus one slab plus its default
    /// height, or [`MIN_TOTAL_HEIGHT`] for an empty stack.
    pub fn total_height(&self) -> f64 {
        match (self.elevations.last(), self.heights.last()) {
            (Some(e), Some(h)) => e + self.slab_thickness + h,
            _ => MIN_TOTAL_HEIGHT,
        }
    }
}
