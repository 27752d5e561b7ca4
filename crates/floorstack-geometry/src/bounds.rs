// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan bounds, centering and camera framing

use crate::config::{MIN_HORIZONTAL_EXTENT, MIN_TOTAL_HEIGHT};
use crate::{LayoutConfig, Point3};
use floorstack_model::{Floor, Point2D, WallSegment};

/// Closest the orbit camera may get to its target
pub const MIN_CAMERA_RADIUS: f64 = 2.0;

/// Axis-aligned box in plan space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PlanBounds {
    /// Zero box at the origin, used when there is nothing to frame
    pub fn empty() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Self {
        Self::from_scaled(points.into_iter().map(|p| (p.x, p.y)))
    }

    /// Bounds of every renderable zone, each scaled by its floor's plan scale
    pub fn from_floors(floors: &[Floor]) -> Self {
        Self::from_scaled(floors.iter().flat_map(|floor| {
            floor.renderable_zones().flat_map(move |zone| {
                zone.polygon
                    .points
                    .iter()
                    .map(move |p| (p.x * floor.plan_scale, p.y * floor.plan_scale))
            })
        }))
    }

    pub fn from_walls(walls: &[WallSegment]) -> Self {
        Self::from_points(walls.iter().flat_map(|w| [&w.start, &w.end]))
    }

    fn from_scaled(points: impl Iterator<Item = (f64, f64)>) -> Self {
        let mut bounds: Option<Self> = None;
        for (x, y) in points {
            let b = bounds.get_or_insert(Self {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            });
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        bounds.unwrap_or_else(Self::empty)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

impl Default for PlanBounds {
    fn default() -> Self {
        Self::empty()
    }
}

/// Orbit camera limits
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    pub target: Point3<f64>,
    pub min_radius: f64,
    pub max_radius: f64,
    pub initial_distance: f64,
}

/// Everything the renderer needs to place and frame one layout pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    pub bounds: PlanBounds,
    /// World (x, z) translation that centers the building on the origin
    pub center_offset: [f64; 2],
    pub max_horizontal_extent: f64,
    pub total_height: f64,
    pub camera: CameraFrame,
}

impl SceneFrame {
    /// Frame a plan box and building height
    pub fn compute(bounds: PlanBounds, total_height: f64, config: &LayoutConfig) -> Self {
        let (cx, cy) = bounds.center();
        let center_offset = [-cx * config.global_scale, -cy * config.global_scale];

        let max_horizontal_extent = (bounds.width().max(bounds.height()) * config.global_scale)
            .max(MIN_HORIZONTAL_EXTENT);

        let total_height = if total_height > 0.0 {
            total_height
        } else {
            MIN_TOTAL_HEIGHT
        };

        let camera = CameraFrame {
            target: Point3::new(0.0, total_height / 2.0, 0.0),
            min_radius: MIN_CAMERA_RADIUS,
            max_radius: 4.0 * max_horizontal_extent,
            initial_distance: 1.5 * max_horizontal_extent.max(total_height),
        };

        Self {
            bounds,
            center_offset,
            max_horizontal_extent,
            total_height,
            camera,
        }
    }

    /// Frame a model given its resolved stack height
    pub fn for_building(floors: &[Floor], total_height: f64, config: &LayoutConfig) -> Self {
        Self::compute(PlanBounds::from_floors(floors), total_height, config)
    }

    /// Frame wall-segment input, one storey of `config.wall_height`
    pub fn for_walls(walls: &[WallSegment], config: &LayoutConfig) -> Self {
        let height = if walls.is_empty() {
            MIN_TOTAL_HEIGHT
        } else {
            config.wall_height
        };
        Self::compute(PlanBounds::from_walls(walls), height, config)
    }

    /// Frame for an empty scene
    pub fn empty(config: &LayoutConfig) -> Self {
        Self::compute(PlanBounds::empty(), MIN_TOTAL_HEIGHT, config)
    }
}

/// Shorthand for [`SceneFrame::compute`]
pub fn frame(bounds: PlanBounds, total_height: f64, config: &LayoutConfig) -> SceneFrame {
    SceneFrame::compute(bounds, total_height, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use floorstack_model::{Polygon, Zone};

    #[test]
    fn test_empty_input_uses_fallbacks() {
        let bounds = PlanBounds::from_floors(&[]);
        assert_eq!(bounds, PlanBounds::empty());
        assert_eq!(PlanBounds::from_walls(&[]), PlanBounds::empty());

        let frame = SceneFrame::empty(&LayoutConfig::default());
        assert_relative_eq!(frame.max_horizontal_extent, MIN_HORIZONTAL_EXTENT);
        assert_relative_eq!(frame.total_height, MIN_TOTAL_HEIGHT);
        assert_eq!(frame.center_offset, [0.0, 0.0]);
        assert_relative_eq!(frame.camera.target.y, 1.5);
        assert_relative_eq!(frame.camera.max_radius, 80.0);
        assert_relative_eq!(frame.camera.initial_distance, 30.0);
    }

    #[test]
    fn test_floor_bounds_use_plan_scale() {
        let mut floor = Floor::new("f0", "Ground", 0.0, 2.8)
            .with_zone(Zone::new("a", "A", Polygon::rectangle(10.0, 20.0, 100.0, 50.0)));
        floor.plan_scale = 2.0;
        let bounds = PlanBounds::from_floors(&[floor]);
        assert_relative_eq!(bounds.min_x, 20.0);
        assert_relative_eq!(bounds.min_y, 40.0);
        assert_relative_eq!(bounds.max_x, 220.0);
        assert_relative_eq!(bounds.max_y, 140.0);
    }

    #[test]
    fn test_degenerate_zones_do_not_widen_bounds() {
        let floor = Floor::new("f0", "Ground", 0.0, 2.8)
            .with_zone(Zone::new("a", "A", Polygon::rectangle(0.0, 0.0, 10.0, 10.0)))
            .with_zone(Zone::new(
                "line",
                "Line",
                Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(5000.0, 0.0)]),
            ));
        let bounds = PlanBounds::from_floors(&[floor]);
        assert_relative_eq!(bounds.max_x, 10.0);
    }

    #[test]
    fn test_large_building_frame() {
        let bounds = PlanBounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1000.0,
            max_y: 400.0,
        };
        let frame = SceneFrame::compute(bounds, 12.0, &LayoutConfig::default());
        assert_relative_eq!(frame.center_offset[0], -25.0);
        assert_relative_eq!(frame.center_offset[1], -10.0);
        assert_relative_eq!(frame.max_horizontal_extent, 50.0);
        assert_relative_eq!(frame.camera.target.y, 6.0);
        assert_relative_eq!(frame.camera.min_radius, MIN_CAMERA_RADIUS);
        assert_relative_eq!(frame.camera.max_radius, 200.0);
        assert_relative_eq!(frame.camera.initial_distance, 75.0);
    }

    #[test]
    fn test_tall_building_distance_follows_height() {
        let frame = frame(PlanBounds::empty(), 60.0, &LayoutConfig::default());
        assert_relative_eq!(frame.camera.initial_distance, 90.0);
    }

    #[test]
    fn test_wall_bounds() {
        let walls = [
            WallSegment::new(Point2D::new(0.0, 0.0), Point2D::new(200.0, 0.0)),
            WallSegment::new(Point2D::new(200.0, 0.0), Point2D::new(200.0, 100.0)),
        ];
        let frame = SceneFrame::for_walls(&walls, &LayoutConfig::default());
        assert_relative_eq!(frame.center_offset[0], -5.0);
        assert_relative_eq!(frame.center_offset[1], -2.5);
        assert_relative_eq!(frame.total_height, 2.8);
    }
}
