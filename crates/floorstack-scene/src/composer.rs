// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout pass, material pass and scene state
//!
//! [`SceneComposer::layout`] is the only operation that builds geometry.
//! Changing the selected floor, the metric or the time index re-runs the
//! material pass over stored zone states and leaves meshes untouched.

use crate::graph::{NodeId, NodeKind, RenderMaterial, SceneGraph, SceneNode};
use crate::playback::{PeriodicTask, PlaybackMode, DEFAULT_TICK_INTERVAL};
use floorstack_geometry::{
    extrude, extrude_wall, slab, FloorStack, LayoutConfig, Placement, SceneFrame, WindingMode,
};
use floorstack_metrics::{
    evaluate_zone, material_for, RecordedSource, SimulatedSource, ThresholdTable, ValueSource,
    ZoneState,
};
use floorstack_model::{Building, MeshBuffer, Point2D, WallSegment};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wall alpha multiplier for the selected floor
pub const SELECTED_WALL_ALPHA_FACTOR: f32 = 0.25;

/// Seed of the simulated value source
pub const DEFAULT_SIMULATION_SEED: u64 = 0x5eed;

/// Geometry source for a layout pass
#[derive(Clone, Copy, Debug)]
pub enum SceneInput<'a> {
    Model(&'a Building),
    Walls(&'a [WallSegment]),
    Empty,
}

impl<'a> SceneInput<'a> {
    /// Prefer the model when it has a renderable zone, then walls
    pub fn choose(building: Option<&'a Building>, walls: &'a [WallSegment]) -> Self {
        match building {
            Some(building) if building.has_renderable_zones() => SceneInput::Model(building),
            _ if !walls.is_empty() => SceneInput::Walls(walls),
            _ => SceneInput::Empty,
        }
    }
}

/// Which floor the viewer is focused on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorSelection {
    /// Every floor shown opaque
    #[default]
    All,
    /// Floors above hidden, this floor's walls see-through
    Floor(usize),
}

/// How a floor is drawn relative to the selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FloorRole {
    Overview,
    Below,
    Selected,
    Above,
}

impl FloorRole {
    fn of(floor: usize, selected: Option<usize>) -> Self {
        match selected {
            None => FloorRole::Overview,
            Some(s) if floor < s => FloorRole::Below,
            Some(s) if floor == s => FloorRole::Selected,
            Some(_) => FloorRole::Above,
        }
    }
}

/// Material of one node under a floor role
fn resolve_material(kind: &NodeKind, role: FloorRole, state: Option<&ZoneState>) -> RenderMaterial {
    let descriptor = material_for(state);
    let alpha = match (role, kind) {
        (FloorRole::Selected, NodeKind::ZoneWalls { .. } | NodeKind::Wall { .. }) => {
            descriptor.alpha * SELECTED_WALL_ALPHA_FACTOR
        }
        (FloorRole::Overview, _) => descriptor.alpha,
        _ => 1.0,
    };
    RenderMaterial {
        color: descriptor.color.to_array(),
        alpha,
        emissive: descriptor.emissive,
        visible: role != FloorRole::Above,
    }
}

/// Which layout path produced the current scene
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutSource {
    Model,
    Walls,
    Empty,
}

#[derive(Clone, Debug)]
struct ZoneEntry {
    zone_index: usize,
    walls: NodeId,
    slab: NodeId,
}

#[derive(Clone, Debug)]
struct FloorEntry {
    node: NodeId,
    zones: Vec<ZoneEntry>,
}

#[derive(Clone, Debug)]
struct Playback {
    task: PeriodicTask,
    mode: PlaybackMode,
}

/// Metric context of a state pass
struct StateContext<'a> {
    thresholds: &'a ThresholdTable,
    metric: Option<&'a str>,
    time_index: usize,
}

/// Store a fresh [`ZoneState`] on every zone's walls and slab nodes
fn evaluate_states(
    building: Option<&Building>,
    floors: &[FloorEntry],
    graph: &mut SceneGraph,
    context: &StateContext<'_>,
    source: &mut dyn ValueSource,
) {
    let Some(building) = building else {
        return;
    };
    for (entry, floor) in floors.iter().zip(&building.floors) {
        for zone_entry in &entry.zones {
            let Some(zone) = floor.zones.get(zone_entry.zone_index) else {
                continue;
            };
            let state = context.metric.and_then(|metric| {
                evaluate_zone(
                    &mut *source,
                    context.thresholds,
                    zone,
                    metric,
                    context.time_index,
                )
            });
            for id in [zone_entry.walls, zone_entry.slab] {
                if let Some(node) = graph.get_mut(id) {
                    node.state = state;
                }
            }
        }
    }
}

/// Mesh node handed to the renderer
#[derive(Clone, Copy, Debug)]
pub struct RenderItem<'a> {
    pub node: NodeId,
    pub parent: Option<NodeId>,
    pub floor: usize,
    pub kind: &'a NodeKind,
    pub mesh: &'a MeshBuffer,
    pub material: RenderMaterial,
}

/// Sensor position in world space
#[derive(Clone, Debug, PartialEq)]
pub struct SensorMarker {
    pub sensor_id: String,
    pub label: String,
    pub floor: usize,
    pub zone_id: Option<String>,
    pub position: [f64; 3],
    pub visible: bool,
}

/// Owner of the scene graph and all viewer state
pub struct SceneComposer {
    config: LayoutConfig,
    thresholds: ThresholdTable,
    graph: SceneGraph,
    floors: Vec<FloorEntry>,
    zone_lookup: FxHashMap<String, (usize, usize)>,
    building: Option<Building>,
    source: LayoutSource,
    stack: FloorStack,
    frame: SceneFrame,
    selection: FloorSelection,
    metric: Option<String>,
    time_index: usize,
    playback: Option<Playback>,
    simulation: SimulatedSource,
}

impl SceneComposer {
    pub fn new(config: LayoutConfig, thresholds: ThresholdTable) -> Self {
        let frame = SceneFrame::empty(&config);
        Self {
            config,
            thresholds,
            graph: SceneGraph::new(),
            floors: Vec::new(),
            zone_lookup: FxHashMap::default(),
            building: None,
            source: LayoutSource::Empty,
            stack: FloorStack::default(),
            frame,
            selection: FloorSelection::All,
            metric: None,
            time_index: 0,
            playback: None,
            simulation: SimulatedSource::new(DEFAULT_SIMULATION_SEED),
        }
    }

    /// Reseed the simulated value source
    pub fn with_simulation_seed(mut self, seed: u64) -> Self {
        self.simulation = SimulatedSource::new(seed);
        self
    }

    /// Rebuild all geometry from `input`
    ///
    /// Every node of the previous pass is released before any new node is
    /// allocated.
    pub fn layout(&mut self, input: SceneInput<'_>) {
        self.release();

        match input {
            SceneInput::Model(building) if building.has_renderable_zones() => {
                self.layout_model(building)
            }
            SceneInput::Model(building) => {
                log::warn!(
                    "Building '{}' has no renderable zones, nothing to lay out",
                    building.id
                );
                self.layout_empty();
            }
            SceneInput::Walls(walls) if !walls.is_empty() => self.layout_walls(walls),
            _ => self.layout_empty(),
        }

        self.refresh_states();
    }

    /// Lay out a model, falling back to `walls` when it has no zones
    pub fn layout_building(&mut self, building: &Building, walls: &[WallSegment]) {
        self.layout(SceneInput::choose(Some(building), walls));
    }

    fn release(&mut self) {
        let freed: usize = self
            .floors
            .drain(..)
            .map(|floor| self.graph.despawn_recursive(floor.node))
            .sum();
        // Nodes not reachable from a floor would leak across passes
        let stray = self.graph.clear();
        if freed + stray > 0 {
            log::debug!("Released {} scene nodes", freed + stray);
        }
        self.zone_lookup.clear();
        self.building = None;
    }

    fn layout_model(&mut self, building: &Building) {
        for warning in building.validate() {
            log::warn!("Model diagnostic: {}", warning);
        }

        let config = &self.config;
        self.stack = FloorStack::resolve(&building.floors, config.slab_thickness);
        self.frame = SceneFrame::for_building(&building.floors, self.stack.total_height(), config);

        let mut zone_count = 0;
        for (floor_index, floor) in building.floors.iter().enumerate() {
            let elevation = self.stack.elevation(floor_index).unwrap_or(floor.elevation);
            let placement = Placement::for_floor(&self.frame, floor, config);

            let floor_node = self.graph.spawn_root(SceneNode::new(
                NodeKind::Floor {
                    index: floor_index,
                    elevation,
                },
                floor_index,
            ));
            let mut entry = FloorEntry {
                node: floor_node,
                zones: Vec::with_capacity(floor.zones.len()),
            };

            for (zone_index, zone) in floor.zones.iter().enumerate() {
                if !zone.polygon.is_renderable() {
                    log::warn!(
                        "Skipping zone '{}' on floor '{}': {} polygon points",
                        zone.id,
                        floor.id,
                        zone.polygon.len()
                    );
                    continue;
                }

                let height = zone.extrusion_height(floor.default_height);
                let walls_mesh = extrude(
                    &zone.polygon,
                    height,
                    elevation,
                    &placement,
                    config.winding,
                    config.cap_triangulation,
                );
                let slab_mesh = slab(
                    &zone.polygon,
                    elevation - config.slab_thickness,
                    config.slab_thickness,
                    &placement,
                    config.cap_triangulation,
                );

                let walls_node = self.graph.spawn_child(
                    floor_node,
                    SceneNode::new(
                        NodeKind::ZoneWalls {
                            zone_id: zone.id.clone(),
                        },
                        floor_index,
                    )
                    .with_mesh(walls_mesh),
                );
                let slab_node = self.graph.spawn_child(
                    floor_node,
                    SceneNode::new(
                        NodeKind::ZoneSlab {
                            zone_id: zone.id.clone(),
                        },
                        floor_index,
                    )
                    .with_mesh(slab_mesh),
                );

                if let (Some(walls), Some(slab)) = (walls_node, slab_node) {
                    entry.zones.push(ZoneEntry {
                        zone_index,
                        walls,
                        slab,
                    });
                    self.zone_lookup
                        .entry(zone.id.clone())
                        .or_insert((floor_index, entry.zones.len() - 1));
                    zone_count += 1;
                }
            }

            self.floors.push(entry);
        }

        log::info!(
            "Laid out {} zones on {} floors ({:.2} m tall)",
            zone_count,
            building.floors.len(),
            self.stack.total_height()
        );

        self.building = Some(building.clone());
        self.source = LayoutSource::Model;
    }

    fn layout_walls(&mut self, walls: &[WallSegment]) {
        let config = &self.config;
        self.stack = FloorStack::single(0.0, config.wall_height, config.slab_thickness);
        self.frame = SceneFrame::for_walls(walls, config);
        let placement = Placement::for_walls(&self.frame, config);

        let floor_node = self.graph.spawn_root(SceneNode::new(
            NodeKind::Floor {
                index: 0,
                elevation: 0.0,
            },
            0,
        ));

        for (segment, wall) in walls.iter().enumerate() {
            let mesh = extrude_wall(
                wall,
                config.wall_thickness,
                config.wall_height,
                0.0,
                &placement,
            );
            self.graph.spawn_child(
                floor_node,
                SceneNode::new(NodeKind::Wall { segment }, 0).with_mesh(mesh),
            );
        }

        log::info!("Laid out {} wall segments", walls.len());

        self.floors.push(FloorEntry {
            node: floor_node,
            zones: Vec::new(),
        });
        self.source = LayoutSource::Walls;
    }

    fn layout_empty(&mut self) {
        self.stack = FloorStack::default();
        self.frame = SceneFrame::empty(&self.config);
        self.source = LayoutSource::Empty;
    }

    /// Re-evaluate zone states, then re-run the material pass
    ///
    /// Simulated playback draws from the random source; otherwise the
    /// recorded series are read at the current time index.
    fn refresh_states(&mut self) {
        let simulated = self
            .playback
            .as_ref()
            .is_some_and(|playback| playback.mode == PlaybackMode::Simulated);

        let Self {
            building,
            floors,
            graph,
            thresholds,
            metric,
            time_index,
            simulation,
            ..
        } = self;
        let mut recorded = RecordedSource;
        let source: &mut dyn ValueSource = if simulated { simulation } else { &mut recorded };
        let context = StateContext {
            thresholds,
            metric: metric.as_deref(),
            time_index: *time_index,
        };
        evaluate_states(building.as_ref(), floors, graph, &context, source);

        self.apply_materials();
    }

    /// Recompute every node's material from stored state and the selection
    fn apply_materials(&mut self) {
        let selected = self.selected_floor();
        for (floor_index, entry) in self.floors.iter().enumerate() {
            let role = FloorRole::of(floor_index, selected);
            if let Some(node) = self.graph.get_mut(entry.node) {
                node.material.visible = role != FloorRole::Above;
            }
            let children = self.graph.children(entry.node).to_vec();
            for child in children {
                if let Some(node) = self.graph.get_mut(child) {
                    node.material = resolve_material(&node.kind, role, node.state.as_ref());
                }
            }
        }
    }

    pub fn select_floor(&mut self, selection: FloorSelection) {
        self.selection = selection;
        self.apply_materials();
    }

    pub fn select_floor_index(&mut self, index: usize) {
        self.select_floor(FloorSelection::Floor(index));
    }

    /// Active metric; `None` renders every zone neutral
    pub fn set_metric(&mut self, metric: Option<String>) {
        self.metric = metric;
        self.refresh_states();
    }

    pub fn set_time_index(&mut self, time_index: usize) {
        self.time_index = time_index;
        self.refresh_states();
    }

    /// Replace any running playback with a new one
    pub fn start_playback(&mut self, mode: PlaybackMode) {
        self.start_playback_with_interval(mode, DEFAULT_TICK_INTERVAL);
    }

    pub fn start_playback_with_interval(&mut self, mode: PlaybackMode, interval: Duration) {
        self.stop_playback();
        log::info!("Starting {:?} playback every {:?}", mode, interval);
        self.playback = Some(Playback {
            task: PeriodicTask::start(interval),
            mode,
        });
    }

    /// Cancel playback; no tick fires after this returns
    pub fn stop_playback(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            playback.task.cancel();
            log::info!(
                "Stopped {:?} playback after {} ticks",
                playback.mode,
                playback.task.ticks()
            );
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|playback| playback.task.is_active())
    }

    pub fn playback_mode(&self) -> Option<PlaybackMode> {
        self.playback.as_ref().map(|playback| playback.mode)
    }

    /// Advance playback by host frame time, returning whether a tick fired
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(playback) = self.playback.as_mut() else {
            return false;
        };
        if !playback.task.advance(dt) {
            return false;
        }
        let mode = playback.mode;

        match mode {
            PlaybackMode::Simulated => self.refresh_states(),
            PlaybackMode::Replay => {
                let len = match (&self.building, &self.metric) {
                    (Some(building), Some(metric)) => building.max_series_len(metric),
                    _ => 0,
                };
                self.time_index = if len == 0 {
                    0
                } else {
                    (self.time_index % len + 1) % len
                };
                self.refresh_states();
            }
        }
        true
    }

    /// Selected floor after clamping to the floor count
    pub fn selected_floor(&self) -> Option<usize> {
        match self.selection {
            FloorSelection::All => None,
            FloorSelection::Floor(_) if self.floors.is_empty() => None,
            FloorSelection::Floor(index) => Some(index.min(self.floors.len() - 1)),
        }
    }

    pub fn selection(&self) -> FloorSelection {
        self.selection
    }

    pub fn metric(&self) -> Option<&str> {
        self.metric.as_deref()
    }

    pub fn time_index(&self) -> usize {
        self.time_index
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Change layout options; takes effect on the next layout pass
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    pub fn winding(&self) -> WindingMode {
        self.config.winding
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: ThresholdTable) {
        self.thresholds = thresholds;
        self.refresh_states();
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn frame(&self) -> &SceneFrame {
        &self.frame
    }

    pub fn stack(&self) -> &FloorStack {
        &self.stack
    }

    pub fn layout_source(&self) -> LayoutSource {
        self.source
    }

    pub fn building(&self) -> Option<&Building> {
        self.building.as_ref()
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floor_node(&self, index: usize) -> Option<NodeId> {
        self.floors.get(index).map(|entry| entry.node)
    }

    /// Walls and slab nodes of a zone
    pub fn zone_nodes(&self, zone_id: &str) -> Option<(NodeId, NodeId)> {
        let &(floor, slot) = self.zone_lookup.get(zone_id)?;
        let entry = self.floors.get(floor)?.zones.get(slot)?;
        Some((entry.walls, entry.slab))
    }

    pub fn zone_state(&self, zone_id: &str) -> Option<ZoneState> {
        let (walls, _) = self.zone_nodes(zone_id)?;
        self.graph.get(walls)?.state
    }

    /// Every mesh node with its current material
    pub fn render_items(&self) -> Vec<RenderItem<'_>> {
        self.graph
            .iter()
            .filter_map(|(node, scene_node)| {
                Some(RenderItem {
                    node,
                    parent: scene_node.parent(),
                    floor: scene_node.floor,
                    kind: &scene_node.kind,
                    mesh: scene_node.mesh.as_ref()?,
                    material: scene_node.material,
                })
            })
            .collect()
    }

    /// Sensors placed at their floor's effective elevation
    ///
    /// A sensor's `[x, y, z]` is plan x, height above the floor, plan y.
    pub fn sensor_markers(&self) -> Vec<SensorMarker> {
        let Some(building) = &self.building else {
            return Vec::new();
        };
        let selected = self.selected_floor();
        let mut markers = Vec::new();
        for (floor_index, floor) in building.floors.iter().enumerate() {
            let Some(elevation) = self.stack.elevation(floor_index) else {
                continue;
            };
            let placement = Placement::for_floor(&self.frame, floor, &self.config);
            for sensor in &floor.sensors {
                let (x, z) = placement.apply(&Point2D::new(
                    sensor.position[0],
                    sensor.position[2],
                ));
                markers.push(SensorMarker {
                    sensor_id: sensor.id.clone(),
                    label: sensor.label.clone(),
                    floor: floor_index,
                    zone_id: sensor.zone_id.clone(),
                    position: [x, elevation + sensor.position[1], z],
                    visible: FloorRole::of(floor_index, selected) != FloorRole::Above,
                });
            }
        }
        markers
    }
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new(LayoutConfig::default(), ThresholdTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorstack_metrics::Band;
    use floorstack_model::{Floor, Polygon, Reading, Zone};

    fn two_floors() -> Building {
        Building::new("b", "Two floors")
            .with_floor(
                Floor::new("f0", "Ground", 0.0, 2.8).with_zone(
                    Zone::new("a", "A", Polygon::rectangle(0.0, 0.0, 100.0, 100.0)).with_series(
                        "co2",
                        vec![Reading::new(500.0, 0.9), Reading::new(1500.0, 0.5)],
                    ),
                ),
            )
            .with_floor(
                Floor::new("f1", "First", 0.0, 2.8)
                    .with_zone(Zone::new("b", "B", Polygon::rectangle(0.0, 0.0, 100.0, 100.0))),
            )
    }

    #[test]
    fn test_input_preference() {
        let walls = [WallSegment::new(Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0))];
        let building = two_floors();
        assert!(matches!(
            SceneInput::choose(Some(&building), &walls),
            SceneInput::Model(_)
        ));
        let empty = Building::new("e", "Empty").with_floor(Floor::new("f", "F", 0.0, 3.0));
        assert!(matches!(
            SceneInput::choose(Some(&empty), &walls),
            SceneInput::Walls(_)
        ));
        assert!(matches!(SceneInput::choose(None, &[]), SceneInput::Empty));
    }

    #[test]
    fn test_material_roles() {
        let state = ZoneState::new(Band::Red, 0.9);
        let walls = NodeKind::ZoneWalls { zone_id: "a".into() };
        let slab = NodeKind::ZoneSlab { zone_id: "a".into() };

        let selected = resolve_material(&walls, FloorRole::Selected, Some(&state));
        assert!((selected.alpha - 0.9 * 0.25).abs() < 1e-6);
        assert!(selected.visible);
        assert_eq!(resolve_material(&slab, FloorRole::Selected, Some(&state)).alpha, 1.0);
        assert_eq!(resolve_material(&walls, FloorRole::Below, Some(&state)).alpha, 1.0);
        let overview = resolve_material(&walls, FloorRole::Overview, Some(&state));
        assert!((overview.alpha - 0.9).abs() < 1e-6);
        assert!(!resolve_material(&walls, FloorRole::Above, Some(&state)).visible);
    }

    #[test]
    fn test_selected_wall_alpha_stays_in_see_through_range() {
        let walls = NodeKind::ZoneWalls { zone_id: "a".into() };
        for confidence in [0.0, 0.59, 0.6, 0.79, 0.8, 1.0] {
            let state = ZoneState::new(Band::Green, confidence);
            let alpha = resolve_material(&walls, FloorRole::Selected, Some(&state)).alpha;
            assert!((0.1..=0.25).contains(&alpha), "{}", alpha);
        }
        let alpha = resolve_material(&walls, FloorRole::Selected, None).alpha;
        assert!((0.1..=0.25).contains(&alpha));
    }

    #[test]
    fn test_metric_states_follow_time_index() {
        let mut composer = SceneComposer::default();
        composer.layout(SceneInput::Model(&two_floors()));
        assert_eq!(composer.zone_state("a"), None);

        composer.set_metric(Some("co2".into()));
        assert_eq!(composer.zone_state("a"), Some(ZoneState::new(Band::Green, 0.9)));
        // Zone without series stays neutral
        assert_eq!(composer.zone_state("b"), None);

        composer.set_time_index(1);
        assert_eq!(composer.zone_state("a"), Some(ZoneState::new(Band::Red, 0.5)));

        composer.set_time_index(2);
        assert_eq!(composer.zone_state("a"), None);
    }

    #[test]
    fn test_replay_wraps_time_index() {
        let mut composer = SceneComposer::default();
        composer.layout(SceneInput::Model(&two_floors()));
        composer.set_metric(Some("co2".into()));
        composer.start_playback(PlaybackMode::Replay);

        assert!(composer.advance(Duration::from_millis(500)));
        assert_eq!(composer.time_index(), 1);
        assert!(composer.advance(Duration::from_millis(500)));
        assert_eq!(composer.time_index(), 0);
    }

    #[test]
    fn test_simulated_playback_fills_every_zone() {
        let mut composer = SceneComposer::default().with_simulation_seed(3);
        composer.layout(SceneInput::Model(&two_floors()));
        composer.set_metric(Some("co2".into()));
        composer.set_time_index(99);
        assert_eq!(composer.zone_state("a"), None);

        composer.start_playback(PlaybackMode::Simulated);
        assert!(!composer.advance(Duration::from_millis(100)));
        assert!(composer.advance(Duration::from_millis(400)));
        let state = composer.zone_state("b").unwrap();
        assert!((0.5..=1.0).contains(&state.confidence));
    }

    #[test]
    fn test_restart_replaces_task() {
        let mut composer = SceneComposer::default();
        composer.start_playback(PlaybackMode::Simulated);
        composer.advance(Duration::from_millis(400));
        composer.start_playback(PlaybackMode::Replay);
        // Elapsed time of the replaced task does not carry over
        assert!(!composer.advance(Duration::from_millis(400)));
        assert_eq!(composer.playback_mode(), Some(PlaybackMode::Replay));
    }
}
