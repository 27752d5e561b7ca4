// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generated demo building
//!
//! Stands in for a live data source: three floors of rooms with 24-sample
//! timeseries for `co2`, `temperature`, `humidity` and `occupancy`. The
//! output is deterministic so tests and screenshots stay stable.

use crate::{Building, Floor, Point2D, Polygon, Reading, Sensor, Zone};

/// Samples per generated series
pub const DEMO_SERIES_LEN: usize = 24;

/// Build the demo snapshot
pub fn demo_building() -> Building {
    let ground = Floor::new("floor-0", "Ground Floor", 0.0, 3.2)
        .with_zone(room("lobby", "Lobby", Polygon::rectangle(0.0, 0.0, 240.0, 160.0), 0))
        .with_zone(room("cafe", "Cafe", Polygon::rectangle(240.0, 0.0, 160.0, 160.0), 1))
        .with_zone(
            room(
                "atrium",
                "Atrium",
                Polygon::new(vec![
                    Point2D::new(0.0, 160.0),
                    Point2D::new(400.0, 160.0),
                    Point2D::new(400.0, 260.0),
                    Point2D::new(200.0, 300.0),
                    Point2D::new(0.0, 260.0),
                ]),
                2,
            )
            .with_height(3.0),
        )
        .with_sensor(sensor("s-lobby", "Lobby CO2", [120.0, 2.2, 80.0], "lobby"))
        .with_sensor(sensor("s-cafe", "Cafe climate", [320.0, 2.2, 80.0], "cafe"));

    // Nominal elevation left at 0: the stack resolver places it
    let first = Floor::new("floor-1", "First Floor", 0.0, 2.8)
        .with_zone(room("office-a", "Open Office A", Polygon::rectangle(0.0, 0.0, 200.0, 160.0), 3))
        .with_zone(room("office-b", "Open Office B", Polygon::rectangle(200.0, 0.0, 200.0, 160.0), 4))
        .with_zone(room("meeting-1", "Meeting 1", Polygon::rectangle(0.0, 160.0, 120.0, 100.0), 5))
        .with_zone(room("meeting-2", "Meeting 2", Polygon::rectangle(120.0, 160.0, 120.0, 100.0), 6))
        .with_sensor(sensor("s-office-a", "Office A", [100.0, 2.0, 80.0], "office-a"))
        .with_sensor(sensor("s-meeting-1", "Meeting 1", [60.0, 2.0, 210.0], "meeting-1"));

    let second = Floor::new("floor-2", "Second Floor", 6.5, 2.8)
        .with_zone(room("lab", "Lab", Polygon::rectangle(0.0, 0.0, 260.0, 200.0), 7))
        .with_zone(room("server", "Server Room", Polygon::rectangle(260.0, 0.0, 140.0, 120.0), 8))
        .with_zone(room("storage", "Storage", Polygon::rectangle(260.0, 120.0, 140.0, 80.0), 9))
        .with_sensor(sensor("s-server", "Server Room", [330.0, 2.0, 60.0], "server"));

    Building::new("demo", "Demo Office")
        .with_floor(ground)
        .with_floor(first)
        .with_floor(second)
}

fn sensor(id: &str, label: &str, position: [f64; 3], zone: &str) -> Sensor {
    Sensor {
        id: id.into(),
        label: label.into(),
        position,
        zone_id: Some(zone.into()),
    }
}

fn room(id: &str, name: &str, polygon: Polygon, seed: usize) -> Zone {
    Zone::new(id, name, polygon)
        .with_series("co2", series(seed, 450.0, 1300.0))
        .with_series("temperature", series(seed + 11, 19.0, 29.0))
        .with_series("humidity", series(seed + 23, 30.0, 75.0))
        .with_series("occupancy", series(seed + 37, 0.0, 1.0))
}

/// Smooth daily-looking curve between `low` and `high`
fn series(seed: usize, low: f64, high: f64) -> Vec<Reading> {
    let phase = seed as f64 * 0.7;
    (0..DEMO_SERIES_LEN)
        .map(|t| {
            let t = t as f64;
            let wave = 0.5 + 0.5 * (t / DEMO_SERIES_LEN as f64 * std::f64::consts::TAU + phase).sin();
            let value = low + (high - low) * wave;
            // Confidence cycles through every trust tier over a day
            let confidence = 0.45 + 0.55 * (0.5 + 0.5 * (t * 0.9 + phase * 1.3).cos());
            Reading::new(value, confidence.clamp(0.0, 1.0))
        })
        .collect()
}
