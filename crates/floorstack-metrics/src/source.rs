// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Where metric values come from
//!
//! The color algorithm never changes between recorded playback and the demo
//! animation; only the [`ValueSource`] feeding it does.

use crate::{MetricThresholds, ThresholdTable, ZoneState};
use floorstack_model::{Reading, Zone};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lowest confidence the simulation produces
pub const SIMULATED_MIN_CONFIDENCE: f64 = 0.5;

/// Produces a reading for a (zone, metric, time index) triple
pub trait ValueSource {
    /// `None` means missing data
    fn sample(
        &mut self,
        zone: &Zone,
        metric: &str,
        time_index: usize,
        thresholds: &MetricThresholds,
    ) -> Option<Reading>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Reads the zone's recorded timeseries
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordedSource;

impl ValueSource for RecordedSource {
    fn sample(
        &mut self,
        zone: &Zone,
        metric: &str,
        time_index: usize,
        _thresholds: &MetricThresholds,
    ) -> Option<Reading> {
        zone.reading(metric, time_index)
    }

    fn name(&self) -> &'static str {
        "recorded"
    }
}

/// Uniform random values for demo animation
///
/// Values are drawn from `[0, 1.5 × red]` and confidence from
/// `[0.5, 1.0]`. Time index is ignored, so it is never out of range.
#[derive(Clone, Debug)]
pub struct SimulatedSource {
    rng: ChaCha8Rng,
}

impl SimulatedSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ValueSource for SimulatedSource {
    fn sample(
        &mut self,
        _zone: &Zone,
        _metric: &str,
        _time_index: usize,
        thresholds: &MetricThresholds,
    ) -> Option<Reading> {
        let ceiling = thresholds.simulation_ceiling();
        let (low, high) = if ceiling >= 0.0 {
            (0.0, ceiling)
        } else {
            (ceiling, 0.0)
        };
        let value = self.rng.random_range(low..=high);
        let confidence = self.rng.random_range(SIMULATED_MIN_CONFIDENCE..=1.0);
        Some(Reading::new(value, confidence))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// Classify one zone's reading into its stored state
///
/// Non-finite values count as missing. Confidence is clamped to [0, 1].
pub fn evaluate_zone(
    source: &mut dyn ValueSource,
    table: &ThresholdTable,
    zone: &Zone,
    metric: &str,
    time_index: usize,
) -> Option<ZoneState> {
    let thresholds = table.get(metric);
    let reading = source.sample(zone, metric, time_index, thresholds)?;
    if !reading.value.is_finite() {
        log::debug!(
            "Zone '{}' has a non-finite {} value at {}",
            zone.id,
            metric,
            time_index
        );
        return None;
    }
    let confidence = if reading.confidence.is_nan() {
        0.0
    } else {
        reading.confidence.clamp(0.0, 1.0)
    };
    Some(ZoneState::new(thresholds.classify(reading.value), confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Band;
    use floorstack_model::Polygon;

    fn zone() -> Zone {
        Zone::new("z", "Zone", Polygon::rectangle(0.0, 0.0, 10.0, 10.0)).with_series(
            "co2",
            vec![Reading::new(600.0, 0.95), Reading::new(1200.0, 0.7)],
        )
    }

    #[test]
    fn test_recorded_reads_series() {
        let table = ThresholdTable::default();
        let mut source = RecordedSource;
        let state = evaluate_zone(&mut source, &table, &zone(), "co2", 1).unwrap();
        assert_eq!(state.band, Band::Orange);
        assert_eq!(state.confidence, 0.7);
    }

    #[test]
    fn test_recorded_out_of_range_is_missing() {
        let table = ThresholdTable::default();
        let mut source = RecordedSource;
        assert!(evaluate_zone(&mut source, &table, &zone(), "co2", 2).is_none());
        assert!(evaluate_zone(&mut source, &table, &zone(), "humidity", 0).is_none());
    }

    #[test]
    fn test_simulated_ranges() {
        let table = ThresholdTable::default();
        let thresholds = table.get("co2");
        let mut source = SimulatedSource::new(7);
        for t in 0..500 {
            let reading = source.sample(&zone(), "co2", t * 1000, thresholds).unwrap();
            assert!((0.0..=3000.0).contains(&reading.value));
            assert!((0.5..=1.0).contains(&reading.confidence));
        }
    }

    #[test]
    fn test_simulated_is_seeded() {
        let thresholds = *ThresholdTable::default().get("temperature");
        let mut a = SimulatedSource::new(42);
        let mut b = SimulatedSource::new(42);
        for t in 0..10 {
            assert_eq!(
                a.sample(&zone(), "temperature", t, &thresholds),
                b.sample(&zone(), "temperature", t, &thresholds)
            );
        }
    }

    #[test]
    fn test_simulated_covers_every_band() {
        let table = ThresholdTable::default();
        let mut source = SimulatedSource::new(1);
        let mut seen = Vec::new();
        for t in 0..400 {
            let state = evaluate_zone(&mut source, &table, &zone(), "co2", t).unwrap();
            if !seen.contains(&state.band) {
                seen.push(state.band);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_non_finite_value_is_missing() {
        let table = ThresholdTable::default();
        let zone = Zone::new("z", "Zone", Polygon::rectangle(0.0, 0.0, 1.0, 1.0))
            .with_series("co2", vec![Reading::new(f64::NAN, 1.0), Reading::new(500.0, 7.0)]);
        let mut source = RecordedSource;
        assert!(evaluate_zone(&mut source, &table, &zone, "co2", 0).is_none());
        let state = evaluate_zone(&mut source, &table, &zone, "co2", 1).unwrap();
        assert_eq!(state.confidence, 1.0);
    }
}
