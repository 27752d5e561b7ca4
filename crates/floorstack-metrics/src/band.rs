// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Metric state bands and their palette

use serde::{Deserialize, Serialize};

/// Linear RGB color, components in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// Move `t` of the way toward `other`
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Discrete metric state, ordered from best to worst
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Band {
    pub const ALL: [Band; 4] = [Band::Green, Band::Yellow, Band::Orange, Band::Red];

    /// Base palette color
    pub const fn color(self) -> Rgb {
        match self {
            Band::Green => Rgb::new(0.2, 0.8, 0.2),
            Band::Yellow => Rgb::new(1.0, 0.85, 0.1),
            Band::Orange => Rgb::new(1.0, 0.55, 0.0),
            Band::Red => Rgb::new(0.9, 0.15, 0.15),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Band::Green => "green",
            Band::Yellow => "yellow",
            Band::Orange => "orange",
            Band::Red => "red",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
