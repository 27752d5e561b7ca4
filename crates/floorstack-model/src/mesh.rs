// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Renderer-facing mesh buffers

use serde::{Deserialize, Serialize};

/// Triangle mesh ready for the display layer
///
/// Attributes are flattened: three floats per position and normal, two per
/// UV. World space is Y-up.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffer {
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals as flattened [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Texture coordinates as flattened [u, v, u, v, ...]
    pub uvs: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create mesh with pre-allocated capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> [f32; 3] {
        let idx = i * 3;
        [
            self.positions[idx],
            self.positions[idx + 1],
            self.positions[idx + 2],
        ]
    }

    /// Normal of vertex `i`
    pub fn normal(&self, i: usize) -> [f32; 3] {
        let idx = i * 3;
        [self.normals[idx], self.normals[idx + 1], self.normals[idx + 2]]
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.is_empty() {
            return None;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in self.positions.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some((min, max))
    }
}
