// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-metric threshold tables
//!
//! Four ascending breakpoints split a metric's range into half-open bands:
//! `(-inf, green)` is green, `[green, yellow)` yellow, `[yellow, orange)`
//! orange and everything from `orange` up is red. The `red` breakpoint does
//! not affect classification; it bounds the simulated value range.

use crate::error::{MetricsError, Result};
use crate::Band;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Ascending breakpoints for one metric
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricThresholds {
    pub green: f64,
    pub yellow: f64,
    pub orange: f64,
    pub red: f64,
}

impl MetricThresholds {
    /// Validated thresholds
    pub fn new(green: f64, yellow: f64, orange: f64, red: f64) -> Result<Self> {
        let thresholds = Self::from_breakpoints(green, yellow, orange, red);
        thresholds.check("custom")?;
        Ok(thresholds)
    }

    const fn from_breakpoints(green: f64, yellow: f64, orange: f64, red: f64) -> Self {
        Self {
            green,
            yellow,
            orange,
            red,
        }
    }

    /// Ensure breakpoints are finite and non-decreasing
    pub fn check(&self, metric: &str) -> Result<()> {
        let values = [self.green, self.yellow, self.orange, self.red];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MetricsError::NonFiniteThreshold {
                metric: metric.to_string(),
            });
        }
        if values.windows(2).any(|w| w[0] > w[1]) {
            return Err(MetricsError::UnorderedThresholds {
                metric: metric.to_string(),
                green: self.green,
                yellow: self.yellow,
                orange: self.orange,
                red: self.red,
            });
        }
        Ok(())
    }

    /// Band of `value`; first strict `<` match wins
    #[inline]
    pub fn classify(&self, value: f64) -> Band {
        if value < self.green {
            Band::Green
        } else if value < self.yellow {
            Band::Yellow
        } else if value < self.orange {
            Band::Orange
        } else {
            Band::Red
        }
    }

    /// Upper bound of simulated values
    pub fn simulation_ceiling(&self) -> f64 {
        1.5 * self.red
    }
}

/// Fallback for metrics without an entry
pub const DEFAULT_THRESHOLDS: MetricThresholds =
    MetricThresholds::from_breakpoints(0.25, 0.5, 0.75, 1.0);

/// Built-in metrics and their breakpoints
pub const BUILTIN_THRESHOLDS: [(&str, MetricThresholds); 5] = [
    (
        "co2",
        MetricThresholds::from_breakpoints(800.0, 1000.0, 1400.0, 2000.0),
    ),
    (
        "temperature",
        MetricThresholds::from_breakpoints(22.0, 24.0, 26.0, 28.0),
    ),
    (
        "humidity",
        MetricThresholds::from_breakpoints(40.0, 50.0, 60.0, 70.0),
    ),
    (
        "occupancy",
        MetricThresholds::from_breakpoints(0.25, 0.5, 0.75, 0.9),
    ),
    (
        "noise",
        MetricThresholds::from_breakpoints(45.0, 55.0, 65.0, 75.0),
    ),
];

/// Metric name → thresholds, with a default for unknown metrics
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTable {
    metrics: FxHashMap<String, MetricThresholds>,
    default: MetricThresholds,
}

/// On-disk form: entries merged over the built-in table
#[derive(Debug, Default, Deserialize, Serialize)]
struct ThresholdFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<MetricThresholds>,
    #[serde(default)]
    metrics: BTreeMap<String, MetricThresholds>,
}

impl ThresholdTable {
    /// Table with only the default thresholds
    pub fn empty() -> Self {
        Self {
            metrics: FxHashMap::default(),
            default: DEFAULT_THRESHOLDS,
        }
    }

    /// Parse a JSON table and merge it over the built-in metrics
    ///
    /// ```json
    /// { "default": { "green": 1, "yellow": 2, "orange": 3, "red": 4 },
    ///   "metrics": { "pm25": { "green": 12, "yellow": 35, "orange": 55, "red": 150 } } }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ThresholdFile = serde_json::from_str(json)?;
        let mut table = Self::default();
        if let Some(default) = file.default {
            default.check("default")?;
            table.default = default;
        }
        for (metric, thresholds) in file.metrics {
            table.insert(metric, thresholds)?;
        }
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        log::info!(
            "Loaded {} metric thresholds from {}",
            table.metrics.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String> {
        let file = ThresholdFile {
            default: Some(self.default),
            metrics: self
                .metrics
                .iter()
                .map(|(name, t)| (name.clone(), *t))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Add or replace a metric's thresholds
    pub fn insert(&mut self, metric: impl Into<String>, thresholds: MetricThresholds) -> Result<()> {
        let metric = metric.into();
        thresholds.check(&metric)?;
        self.metrics.insert(metric, thresholds);
        Ok(())
    }

    pub fn contains(&self, metric: &str) -> bool {
        self.metrics.contains_key(metric)
    }

    /// Thresholds for `metric`, or the default set when unknown
    pub fn get(&self, metric: &str) -> &MetricThresholds {
        match self.metrics.get(metric) {
            Some(t) => t,
            None => {
                log::trace!("No thresholds for '{}', using default", metric);
                &self.default
            }
        }
    }

    pub fn default_thresholds(&self) -> &MetricThresholds {
        &self.default
    }

    pub fn classify(&self, metric: &str, value: f64) -> Band {
        self.get(metric).classify(value)
    }

    /// Known metric names, sorted
    pub fn metric_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.metrics.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (metric, thresholds) in BUILTIN_THRESHOLDS {
            table.metrics.insert(metric.to_string(), thresholds);
        }
        table
    }
}
