// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building → floor → zone hierarchy

use crate::{ModelError, ModelWarning, Polygon, Reading, Result};
use serde::{Deserialize, Serialize};
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

fn default_plan_scale() -> f64 {
    1.0
}

fn default_floor_height() -> f64 {
    2.8
}

/// A polygonal room or area on a floor
///
/// Zones are the unit of metric visualization: each one is extruded into a
/// prism and colored from its own timeseries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub polygon: Polygon,
    /// Extrusion height for this zone only; the floor default applies otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_override: Option<f64>,
    /// Metric name → ordered samples
    #[serde(default)]
    pub timeseries: BTreeMap<String, Vec<Reading>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, polygon: Polygon) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            polygon,
            ..Default::default()
        }
    }

    /// Builder-style height override
    pub fn with_height(mut self, height: f64) -> Self {
        self.height_override = Some(height);
        self
    }

    /// Builder-style timeseries for one metric
    pub fn with_series(mut self, metric: impl Into<String>, readings: Vec<Reading>) -> Self {
        self.timeseries.insert(metric.into(), readings);
        self
    }

    /// Sample for `metric` at `time_index`, `None` when missing or out of range
    pub fn reading(&self, metric: &str, time_index: usize) -> Option<Reading> {
        self.timeseries
            .get(metric)
            .and_then(|series| series.get(time_index))
            .copied()
    }

    /// Number of recorded samples for `metric`
    pub fn series_len(&self, metric: &str) -> usize {
        self.timeseries.get(metric).map_or(0, Vec::len)
    }

    /// Height used for extrusion on a floor with the given default
    pub fn extrusion_height(&self, floor_default: f64) -> f64 {
        self.height_override.unwrap_or(floor_default)
    }
}

/// Sensor placed in a floor's space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    pub label: String,
    /// Plan x, height above the floor base, plan y
    pub position: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

/// A storey of the building
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
    /// Nominal base height; the stack resolver may raise it
    #[serde(default)]
    pub elevation: f64,
    #[serde(default = "default_floor_height")]
    pub default_height: f64,
    /// Plan pixels per meter
    #[serde(default = "default_plan_scale")]
    pub plan_scale: f64,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

impl Floor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, elevation: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            elevation,
            default_height: height,
            plan_scale: 1.0,
            zones: Vec::new(),
            sensors: Vec::new(),
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn with_sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.push(sensor);
        self
    }

    /// Zones with at least three polygon points
    pub fn renderable_zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(|z| z.polygon.is_renderable())
    }

    pub fn find_zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }
}

/// Whole building snapshot, floors ordered bottom to top
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

impl Building {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            floors: Vec::new(),
        }
    }

    pub fn with_floor(mut self, floor: Floor) -> Self {
        self.floors.push(floor);
        self
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let building = Self::from_json(&text)?;
        log::info!(
            "Loaded building '{}' from {}: {} floors, {} zones",
            building.name,
            path.display(),
            building.floor_count(),
            building.zone_count()
        );
        Ok(building)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ModelError::from)
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn zone_count(&self) -> usize {
        self.floors.iter().map(|f| f.zones.len()).sum()
    }

    /// Whether any zone can be extruded
    pub fn has_renderable_zones(&self) -> bool {
        self.floors.iter().any(|f| f.renderable_zones().next().is_some())
    }

    /// Longest recorded series for `metric` across all zones
    pub fn max_series_len(&self, metric: &str) -> usize {
        self.floors
            .iter()
            .flat_map(|f| f.zones.iter())
            .map(|z| z.series_len(metric))
            .max()
            .unwrap_or(0)
    }

    /// Sorted, de-duplicated metric names present in any zone
    pub fn metric_names(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self
            .floors
            .iter()
            .flat_map(|f| f.zones.iter())
            .flat_map(|z| z.timeseries.keys())
            .collect();
        names.into_iter().cloned().collect()
    }

    /// Collect non-fatal diagnostics about the snapshot
    pub fn validate(&self) -> Vec<ModelWarning> {
        let mut warnings = Vec::new();
        let mut seen_ids = FxHashSet::default();

        for floor in &self.floors {
            if floor.default_height <= 0.0 {
                warnings.push(ModelWarning::NonPositiveHeight {
                    floor: floor.id.clone(),
                    height: floor.default_height,
                });
            }

            for zone in &floor.zones {
                if !seen_ids.insert(zone.id.as_str()) {
                    warnings.push(ModelWarning::DuplicateZoneId(zone.id.clone()));
                }
                if !zone.polygon.is_renderable() {
                    warnings.push(ModelWarning::DegeneratePolygon {
                        floor: floor.id.clone(),
                        zone: zone.id.clone(),
                        points: zone.polygon.len(),
                    });
                }
                if let Some(h) = zone.height_override {
                    if h <= 0.0 {
                        warnings.push(ModelWarning::NonPositiveOverride {
                            zone: zone.id.clone(),
                            height: h,
                        });
                    }
                }
                for (metric, series) in &zone.timeseries {
                    for (index, reading) in series.iter().enumerate() {
                        if !(0.0..=1.0).contains(&reading.confidence) {
                            warnings.push(ModelWarning::ConfidenceOutOfRange {
                                zone: zone.id.clone(),
                                metric: metric.clone(),
                                index,
                            });
                        }
                    }
                }
            }

            for sensor in &floor.sensors {
                if let Some(zone_id) = &sensor.zone_id {
                    if floor.find_zone(zone_id).is_none() {
                        warnings.push(ModelWarning::UnknownSensorZone {
                            sensor: sensor.id.clone(),
                            zone: zone_id.clone(),
                        });
                    }
                }
            }
        }

        warnings
    }
}
