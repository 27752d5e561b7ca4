// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Confidence policy and zone materials
//!
//! Band color says what the metric is doing; confidence says how far that
//! color can be trusted. Low-trust readings are washed toward gray and
//! flagged emissive so they never read as a healthy green.

use crate::{Band, Rgb};
use serde::{Deserialize, Serialize};

/// Gray that low-confidence colors are pulled toward
pub const MID_GRAY: Rgb = Rgb::gray(0.5);

/// Confidence at or above which a color is shown unchanged
pub const HIGH_CONFIDENCE: f64 = 0.8;

/// Confidence at or above which a color is only slightly washed out
pub const MEDIUM_CONFIDENCE: f64 = 0.6;

/// Trust tier of a reading
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// Tier of `confidence`; boundaries resolve to the higher tier
    pub fn of(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE {
            ConfidenceTier::High
        } else if confidence >= MEDIUM_CONFIDENCE {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// Fraction of the way toward [`MID_GRAY`]
    pub const fn desaturation(self) -> f32 {
        match self {
            ConfidenceTier::High => 0.0,
            ConfidenceTier::Medium => 0.3,
            ConfidenceTier::Low => 0.8,
        }
    }

    pub const fn alpha(self) -> f32 {
        match self {
            ConfidenceTier::High => 0.9,
            ConfidenceTier::Medium => 0.75,
            ConfidenceTier::Low => 0.55,
        }
    }
}

/// Final color, opacity and uncertainty flag of a zone
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub color: Rgb,
    pub alpha: f32,
    /// Uncertain-data marker, rendered as an emissive tint
    pub emissive: bool,
}

impl MaterialDescriptor {
    /// Flat gray used whenever a zone has no usable reading
    pub const fn neutral() -> Self {
        Self {
            color: Rgb::gray(0.6),
            alpha: 0.5,
            emissive: false,
        }
    }

    /// Same material with a different opacity
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Blend a band color with the trust placed in it
pub fn apply_confidence(base: Rgb, confidence: f64) -> MaterialDescriptor {
    let tier = ConfidenceTier::of(confidence);
    MaterialDescriptor {
        color: base.lerp(MID_GRAY, tier.desaturation()),
        alpha: tier.alpha(),
        emissive: tier == ConfidenceTier::Low,
    }
}

/// Stored per-zone metric state
///
/// Materials are always recomputed from this, never patched in place.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneState {
    pub band: Band,
    pub confidence: f64,
}

impl ZoneState {
    pub const fn new(band: Band, confidence: f64) -> Self {
        Self { band, confidence }
    }

    pub fn material(&self) -> MaterialDescriptor {
        apply_confidence(self.band.color(), self.confidence)
    }
}

/// Material for an optional zone state
pub fn material_for(state: Option<&ZoneState>) -> MaterialDescriptor {
    state.map_or_else(MaterialDescriptor::neutral, ZoneState::material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tier_boundaries_resolve_upward() {
        assert_eq!(ConfidenceTier::of(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::of(0.79999), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::of(0.6), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::of(0.59999), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::of(0.0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::of(1.0), ConfidenceTier::High);
    }

    #[test]
    fn test_high_confidence_keeps_color() {
        let base = Band::Green.color();
        let material = apply_confidence(base, 0.8);
        assert_eq!(material.color, base);
        assert_relative_eq!(material.alpha, 0.9);
        assert!(!material.emissive);
    }

    #[test]
    fn test_medium_confidence_partly_gray() {
        let material = apply_confidence(Band::Orange.color(), 0.6);
        assert_relative_eq!(material.alpha, 0.75);
        assert!(!material.emissive);
        // Orange green channel 0.55 moves 30% toward 0.5
        assert_relative_eq!(material.color.g, 0.535, epsilon = 1e-6);
        assert_relative_eq!(material.color.r, 0.85, epsilon = 1e-6);
    }

    #[test]
    fn test_low_confidence_flags_uncertainty() {
        let material = apply_confidence(Band::Green.color(), 0.59);
        assert_relative_eq!(material.alpha, 0.55);
        assert!(material.emissive);
        assert_relative_eq!(material.color.r, 0.44, epsilon = 1e-6);
        assert_relative_eq!(material.color.g, 0.56, epsilon = 1e-6);
    }

    #[test]
    fn test_low_trust_green_differs_from_high_trust_green() {
        let trusted = ZoneState::new(Band::Green, 0.95).material();
        let doubtful = ZoneState::new(Band::Green, 0.3).material();
        assert_ne!(trusted, doubtful);
        assert!(doubtful.emissive && !trusted.emissive);
    }

    #[test]
    fn test_missing_state_is_neutral() {
        let material = material_for(None);
        assert_eq!(material, MaterialDescriptor::neutral());
        assert_relative_eq!(material.alpha, 0.5);
        assert_eq!(material.color, Rgb::gray(0.6));

        let state = ZoneState::new(Band::Red, 0.9);
        assert_eq!(material_for(Some(&state)), state.material());
    }
}
