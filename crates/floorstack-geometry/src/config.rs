// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout constants and options

use serde::{Deserialize, Serialize};

/// World units (meters) per plan pixel
pub const GLOBAL_SCALE: f64 = 0.05;

/// Thickness of the floor slab rendered beneath each zone
pub const SLAB_THICKNESS: f64 = 0.1;

/// Smallest horizontal extent used for camera framing
pub const MIN_HORIZONTAL_EXTENT: f64 = 20.0;

/// Building height used for framing when there are no floors
pub const MIN_TOTAL_HEIGHT: f64 = 3.0;

/// Side of the square footprint substituted for a zero-length wall (plan pixels)
pub const MIN_WALL_EXTENT: f64 = 1.0;

/// Wall thickness for the wall-segment input path (plan pixels)
pub const DEFAULT_WALL_THICKNESS: f64 = 6.0;

/// Wall height for the wall-segment input path
pub const DEFAULT_WALL_HEIGHT: f64 = 2.8;

/// Which side of an extrusion's walls faces the viewer
///
/// Only the side faces are affected; caps always face out of the prism.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindingMode {
    /// Walls visible from outside (counter-clockwise input)
    #[default]
    Outward,
    /// Walls visible from inside the zone
    Inward,
}

impl WindingMode {
    /// The other mode
    pub fn flipped(self) -> Self {
        match self {
            WindingMode::Outward => WindingMode::Inward,
            WindingMode::Inward => WindingMode::Outward,
        }
    }
}

/// How polygon caps are split into triangles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapTriangulation {
    /// Fan from vertex 0; exact for convex zones
    #[default]
    Fan,
    /// Ear clipping; handles concave zones
    Earcut,
}

/// Layout pass options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// World units per plan pixel
    pub global_scale: f64,
    /// Slab thickness beneath every zone
    pub slab_thickness: f64,
    /// Side-face orientation for zone extrusions
    pub winding: WindingMode,
    /// Cap triangulation for zones and slabs
    pub cap_triangulation: CapTriangulation,
    /// Wall thickness for wall-segment input (plan pixels)
    pub wall_thickness: f64,
    /// Wall height for wall-segment input
    pub wall_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            global_scale: GLOBAL_SCALE,
            slab_thickness: SLAB_THICKNESS,
            winding: WindingMode::Outward,
            cap_triangulation: CapTriangulation::Fan,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            wall_height: DEFAULT_WALL_HEIGHT,
        }
    }
}

impl LayoutConfig {
    /// Options for walk-through views: walls seen from inside zones
    pub fn interior() -> Self {
        Self {
            winding: WindingMode::Inward,
            ..Self::default()
        }
    }

    /// Options for plans with concave rooms
    pub fn concave() -> Self {
        Self {
            cap_triangulation: CapTriangulation::Earcut,
            ..Self::default()
        }
    }
}
