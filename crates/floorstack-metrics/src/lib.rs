// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # floorstack Metrics
//!
//! Maps time-indexed sensor readings onto zone materials.
//!
//! A reading goes through two independent steps:
//!
//! 1. **Classification**: the value is compared against the metric's four
//!    ascending breakpoints ([`ThresholdTable::classify`]) giving a [`Band`]
//! 2. **Confidence**: the band color is kept, washed toward gray or flagged
//!    as uncertain depending on how much the reading is trusted
//!    ([`apply_confidence`])
//!
//! The result of step 1 plus the confidence is stored as a [`ZoneState`];
//! [`ZoneState::material`] recomputes the [`MaterialDescriptor`] whenever it
//! is needed. Zones without data get [`MaterialDescriptor::neutral`].
//!
//! ```rust,ignore
//! use floorstack_metrics::{evaluate_zone, RecordedSource, ThresholdTable, material_for};
//!
//! let table = ThresholdTable::default();
//! let state = evaluate_zone(&mut RecordedSource, &table, &zone, "co2", 3);
//! let material = material_for(state.as_ref());
//! ```

pub mod band;
pub mod error;
pub mod material;
pub mod source;
pub mod thresholds;

pub use band::{Band, Rgb};
pub use error::{MetricsError, Result};
pub use material::{
    apply_confidence, material_for, ConfidenceTier, MaterialDescriptor, ZoneState,
    HIGH_CONFIDENCE, MEDIUM_CONFIDENCE, MID_GRAY,
};
pub use source::{evaluate_zone, RecordedSource, SimulatedSource, ValueSource};
pub use thresholds::{MetricThresholds, ThresholdTable, BUILTIN_THRESHOLDS, DEFAULT_THRESHOLDS};
