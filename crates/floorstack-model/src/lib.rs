// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! floorstack Model - Shared data types for building layout and metric overlays
//!
//! This crate holds the snapshot that every other floorstack crate consumes:
//! a [`Building`] made of ordered [`Floor`]s, each owning polygonal [`Zone`]s
//! with per-metric sensor timeseries. It also defines [`MeshBuffer`], the
//! flattened vertex/index layout handed to the renderer.
//!
//! # Example
//!
//! ```ignore
//! use floorstack_model::{Building, demo};
//!
//! let building = demo::demo_building();
//! for floor in &building.floors {
//!     println!("{}: {} zones", floor.name, floor.zones.len());
//! }
//! ```

pub mod demo;
pub mod error;
pub mod mesh;
pub mod spatial;
pub mod types;

// Re-export all public types
pub use error::*;
pub use mesh::*;
pub use spatial::*;
pub use types::*;
