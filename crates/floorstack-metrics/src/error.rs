// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for threshold configuration

use thiserror::Error;

/// Result type alias for metric configuration
pub type Result<T> = std::result::Result<T, MetricsError>;

#[derive(Error, Debug)]
pub enum MetricsError {
    /// Breakpoints must satisfy green <= yellow <= orange <= red
    #[error(
        "Thresholds for '{metric}' are not ascending: green {green}, yellow {yellow}, orange {orange}, red {red}"
    )]
    UnorderedThresholds {
        metric: String,
        green: f64,
        yellow: f64,
        orange: f64,
        red: f64,
    },

    /// A breakpoint is NaN or infinite
    #[error("Threshold for '{metric}' is not finite")]
    NonFiniteThreshold { metric: String },

    /// Malformed threshold JSON
    #[error("Invalid threshold JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
