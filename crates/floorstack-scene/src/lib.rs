// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # floorstack Scene
//!
//! Composes a [`Building`](floorstack_model::Building) into a per-floor scene
//! graph and owns the viewer state around it: selected floor, active metric,
//! time index and playback.
//!
//! ## Passes
//!
//! - **Layout** ([`SceneComposer::layout`]): releases the previous graph,
//!   stacks floors, extrudes zones and slabs and groups them under one
//!   node per floor
//! - **State** (metric or time change): classifies each zone's reading into
//!   a stored [`ZoneState`](floorstack_metrics::ZoneState)
//! - **Material** (any state or selection change): recomputes every node's
//!   [`RenderMaterial`] from stored state; floors below the selection are
//!   opaque, the selected floor's walls are see-through and floors above
//!   are hidden
//!
//! ```rust,ignore
//! use floorstack_scene::{SceneComposer, SceneInput, FloorSelection};
//!
//! let mut scene = SceneComposer::default();
//! scene.layout(SceneInput::Model(&building));
//! scene.set_metric(Some("co2".into()));
//! scene.select_floor(FloorSelection::Floor(1));
//! for item in scene.render_items() {
//!     renderer.draw(item.mesh, item.material);
//! }
//! ```

pub mod composer;
pub mod graph;
pub mod playback;

pub use composer::{
    FloorSelection, LayoutSource, RenderItem, SceneComposer, SceneInput, SensorMarker,
    DEFAULT_SIMULATION_SEED, SELECTED_WALL_ALPHA_FACTOR,
};
pub use graph::{NodeId, NodeKind, RenderMaterial, SceneGraph, SceneNode};
pub use playback::{PeriodicTask, PlaybackMode, DEFAULT_TICK_INTERVAL};
