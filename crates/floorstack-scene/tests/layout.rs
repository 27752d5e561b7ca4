// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout pass: stacking, geometry grouping and resource release

use approx::assert_relative_eq;
use floorstack_geometry::{MIN_HORIZONTAL_EXTENT, SLAB_THICKNESS};
use floorstack_model::{demo, Building, Floor, Point2D, Polygon, WallSegment, Zone};
use floorstack_scene::{LayoutSource, NodeKind, SceneComposer, SceneInput};

fn two_floor_building() -> Building {
    Building::new("b", "Two storeys")
        .with_floor(
            Floor::new("f0", "Ground", 0.0, 2.8)
                .with_zone(Zone::new("a", "A", Polygon::rectangle(0.0, 0.0, 200.0, 100.0))),
        )
        .with_floor(
            Floor::new("f1", "First", 0.0, 2.8)
                .with_zone(Zone::new("b", "B", Polygon::rectangle(0.0, 0.0, 200.0, 100.0))),
        )
}

/// (min_y, max_y) over every mesh of one floor
fn floor_y_range(composer: &SceneComposer, floor: usize) -> (f32, f32) {
    composer
        .render_items()
        .iter()
        .filter(|item| item.floor == floor)
        .filter_map(|item| item.mesh.bounds())
        .fold((f32::MAX, f32::MIN), |(lo, hi), (min, max)| {
            (lo.min(min[1]), hi.max(max[1]))
        })
}

#[test]
fn two_coincident_floors_are_stacked_without_overlap() {
    let mut composer = SceneComposer::default();
    composer.layout(SceneInput::Model(&two_floor_building()));

    assert_relative_eq!(composer.stack().elevation(1).unwrap(), 2.9, epsilon = 1e-9);

    let (_, ground_top) = floor_y_range(&composer, 0);
    let (first_bottom, first_top) = floor_y_range(&composer, 1);
    assert_relative_eq!(ground_top, 2.8, epsilon = 1e-5);
    // First floor slab sits on the ground floor walls
    assert_relative_eq!(first_bottom, 2.8, epsilon = 1e-5);
    assert_relative_eq!(first_top, 5.7, epsilon = 1e-5);
    assert!(first_bottom >= ground_top - 1e-5);
}

#[test]
fn each_zone_gets_walls_and_slab_under_its_floor() {
    let mut composer = SceneComposer::default();
    composer.layout(SceneInput::Model(&two_floor_building()));

    assert_eq!(composer.layout_source(), LayoutSource::Model);
    assert_eq!(composer.floor_count(), 2);
    // 2 floor nodes + 2 × (walls + slab)
    assert_eq!(composer.graph().live_count(), 6);

    let floor_node = composer.floor_node(1).unwrap();
    let (walls, slab) = composer.zone_nodes("b").unwrap();
    assert_eq!(composer.graph().children(floor_node), &[walls, slab]);

    let slab_node = composer.graph().get(slab).unwrap();
    let (min, max) = slab_node.mesh.as_ref().unwrap().bounds().unwrap();
    assert_relative_eq!(min[1] as f64, 2.9 - SLAB_THICKNESS, epsilon = 1e-5);
    assert_relative_eq!(max[1] as f64, 2.9, epsilon = 1e-5);
}

#[test]
fn building_is_centered_on_origin() {
    let mut composer = SceneComposer::default();
    composer.layout(SceneInput::Model(&two_floor_building()));

    let frame = composer.frame();
    assert_relative_eq!(frame.center_offset[0], -5.0);
    assert_relative_eq!(frame.center_offset[1], -2.5);
    assert_relative_eq!(frame.max_horizontal_extent, MIN_HORIZONTAL_EXTENT);
    assert_relative_eq!(frame.total_height, 5.8, epsilon = 1e-9);

    let (walls, _) = composer.zone_nodes("a").unwrap();
    let mesh = composer.graph().get(walls).unwrap().mesh.as_ref().unwrap();
    let (min, max) = mesh.bounds().unwrap();
    assert_relative_eq!(min[0], -5.0, epsilon = 1e-5);
    assert_relative_eq!(max[0], 5.0, epsilon = 1e-5);
    assert_relative_eq!(min[2], -2.5, epsilon = 1e-5);
    assert_relative_eq!(max[2], 2.5, epsilon = 1e-5);
}

#[test]
fn height_override_changes_extrusion_only() {
    let building = Building::new("b", "Atrium")
        .with_floor(
            Floor::new("f0", "Ground", 0.0, 3.0).with_zone(
                Zone::new("atrium", "Atrium", Polygon::rectangle(0.0, 0.0, 10.0, 10.0))
                    .with_height(6.0),
            ),
        )
        .with_floor(
            Floor::new("f1", "First", 0.0, 3.0)
                .with_zone(Zone::new("x", "X", Polygon::rectangle(0.0, 0.0, 10.0, 10.0))),
        );
    let mut composer = SceneComposer::default();
    composer.layout(SceneInput::Model(&building));

    assert_relative_eq!(composer.stack().elevation(1).unwrap(), 3.1, epsilon = 1e-9);
    let (walls, _) = composer.zone_nodes("atrium").unwrap();
    let (_, max) = composer
        .graph()
        .get(walls)
        .unwrap()
        .mesh
        .as_ref()
        .unwrap()
        .bounds()
        .unwrap();
    assert_relative_eq!(max[1], 6.0, epsilon = 1e-5);
}

#[test]
fn degenerate_zones_are_skipped() {
    let building = Building::new("b", "Partial").with_floor(
        Floor::new("f0", "Ground", 0.0, 2.8)
            .with_zone(Zone::new("ok", "Ok", Polygon::rectangle(0.0, 0.0, 10.0, 10.0)))
            .with_zone(Zone::new(
                "line",
                "Line",
                Polygon::new(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)]),
            )),
    );
    let mut composer = SceneComposer::default();
    composer.layout(SceneInput::Model(&building));

    assert!(composer.zone_nodes("ok").is_some());
    assert!(composer.zone_nodes("line").is_none());
    assert_eq!(composer.graph().live_count(), 3);
}

#[test]
fn relayout_releases_previous_pass() {
    let building = demo::demo_building();
    let mut composer = SceneComposer::default();

    composer.layout(SceneInput::Model(&building));
    let live = composer.graph().live_count();
    let capacity = composer.graph().capacity();
    let old_floor = composer.floor_node(0).unwrap();
    assert_eq!(live, building.floor_count() + 2 * building.zone_count());

    for _ in 0..5 {
        composer.layout(SceneInput::Model(&building));
        assert_eq!(composer.graph().live_count(), live);
    }
    // Slots are reused rather than grown
    assert_eq!(composer.graph().capacity(), capacity);
    assert!(composer.graph().get(old_floor).is_none());
}

#[test]
fn model_without_zones_falls_back_to_walls() {
    let walls = [
        WallSegment::new(Point2D::new(0.0, 0.0), Point2D::new(400.0, 0.0)),
        WallSegment::new(Point2D::new(400.0, 0.0), Point2D::new(400.0, 300.0)),
        // Zero-length wall still yields a solid
        WallSegment::new(Point2D::new(50.0, 50.0), Point2D::new(50.0, 50.0)),
    ];
    let empty = Building::new("e", "No zones").with_floor(Floor::new("f0", "Ground", 0.0, 2.8));

    let mut composer = SceneComposer::default();
    composer.layout_building(&empty, &walls);

    assert_eq!(composer.layout_source(), LayoutSource::Walls);
    assert_eq!(composer.floor_count(), 1);
    let items = composer.render_items();
    assert_eq!(items.len(), 3);
    for item in &items {
        assert!(matches!(item.kind, NodeKind::Wall { .. }));
        assert_eq!(item.mesh.vertex_count(), 8);
        let (_, max) = item.mesh.bounds().unwrap();
        assert_relative_eq!(max[1], 2.8, epsilon = 1e-5);
    }
}

#[test]
fn nothing_to_render_yields_empty_scene() {
    let mut composer = SceneComposer::default();
    composer.layout(SceneInput::Model(&two_floor_building()));
    composer.layout(SceneInput::Empty);

    assert_eq!(composer.layout_source(), LayoutSource::Empty);
    assert_eq!(composer.graph().live_count(), 0);
    assert!(composer.render_items().is_empty());
    assert!(composer.sensor_markers().is_empty());
    assert_relative_eq!(composer.frame().max_horizontal_extent, MIN_HORIZONTAL_EXTENT);
    assert_relative_eq!(composer.frame().camera.target.y, 1.5);
}

#[test]
fn sensors_follow_effective_elevation() {
    let building = demo::demo_building();
    let mut composer = SceneComposer::default();
    composer.layout(SceneInput::Model(&building));

    let markers = composer.sensor_markers();
    let office = markers
        .iter()
        .find(|m| m.sensor_id == "s-office-a")
        .unwrap();
    let elevation = composer.stack().elevation(1).unwrap();
    assert_relative_eq!(office.position[1], elevation + 2.0, epsilon = 1e-9);
    assert!(elevation > 0.0);
}
