// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # floorstack Geometry
//!
//! Turns plan-space zone polygons into stacked, watertight 3D solids.
//!
//! ## Overview
//!
//! - **Stacking**: resolve each floor's effective elevation so floors never
//!   overlap ([`resolve_elevations`], [`FloorStack`])
//! - **Extrusion**: lift a polygon into a closed prism, plus a thin slab
//!   beneath it ([`extrude`], [`slab`], [`extrude_wall`])
//! - **Triangulation**: fan or earcut cap triangulation and normals computed
//!   from the final triangle list
//! - **Framing**: plan bounds, centering offset and camera limits
//!   ([`SceneFrame`])
//!
//! All functions are pure and infallible: degenerate input yields a
//! degenerate but valid mesh.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use floorstack_geometry::{extrude, LayoutConfig, Placement, WindingMode, CapTriangulation};
//! use floorstack_model::Polygon;
//!
//! let room = Polygon::rectangle(0.0, 0.0, 4.0, 3.0);
//! let mesh = extrude(&room, 2.8, 0.0, &Placement::identity(),
//!     WindingMode::Outward, CapTriangulation::Fan);
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```

pub mod bounds;
pub mod config;
pub mod extrusion;
pub mod stacking;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

// Re-export main types
pub use bounds::{frame, CameraFrame, PlanBounds, SceneFrame, MIN_CAMERA_RADIUS};
pub use config::{
    CapTriangulation, LayoutConfig, WindingMode, DEFAULT_WALL_HEIGHT, DEFAULT_WALL_THICKNESS,
    GLOBAL_SCALE, MIN_HORIZONTAL_EXTENT, MIN_TOTAL_HEIGHT, MIN_WALL_EXTENT, SLAB_THICKNESS,
};
pub use extrusion::{extrude, extrude_wall, slab, Placement};
pub use stacking::{resolve_elevations, FloorStack};
pub use triangulation::{compute_normals, fan_triangulate, triangulate_cap};
