// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for loading building models

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while loading or saving a building snapshot
#[derive(Error, Debug)]
pub enum ModelError {
    /// Malformed JSON or a field of the wrong shape
    #[error("Invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal diagnostics reported by [`crate::Building::validate`]
///
/// None of these stop a layout pass; they describe input that will be
/// skipped or rendered with a fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelWarning {
    /// Zone polygon has fewer than 3 points and will not be rendered
    DegeneratePolygon { floor: String, zone: String, points: usize },
    /// Floor height is zero or negative
    NonPositiveHeight { floor: String, height: f64 },
    /// Zone height override is zero or negative
    NonPositiveOverride { zone: String, height: f64 },
    /// A reading's confidence lies outside [0, 1]
    ConfidenceOutOfRange { zone: String, metric: String, index: usize },
    /// Two zones share the same id
    DuplicateZoneId(String),
    /// Sensor references a zone that does not exist on its floor
    UnknownSensorZone { sensor: String, zone: String },
}

impl std::fmt::Display for ModelWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelWarning::DegeneratePolygon {
                floor,
                zone,
                points,
            } => write!(
                f,
                "zone '{}' on floor '{}' has {} points (need 3)",
                zone, floor, points
            ),
            ModelWarning::NonPositiveHeight { floor, height } => {
                write!(f, "floor '{}' has non-positive height {}", floor, height)
            }
            ModelWarning::NonPositiveOverride { zone, height } => write!(
                f,
                "zone '{}' has non-positive height override {}",
                zone, height
            ),
            ModelWarning::ConfidenceOutOfRange {
                zone,
                metric,
                index,
            } => write!(
                f,
                "zone '{}' metric '{}' reading {} has confidence outside [0, 1]",
                zone, metric, index
            ),
            ModelWarning::DuplicateZoneId(id) => write!(f, "duplicate zone id '{}'", id),
            ModelWarning::UnknownSensorZone { sensor, zone } => {
                write!(f, "sensor '{}' links to unknown zone '{}'", sensor, zone)
            }
        }
    }
}
