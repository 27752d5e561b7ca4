// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prism extrusion of zone polygons, floor slabs and wall segments
//!
//! A prism over an `n`-gon has `2n` welded vertices: the bottom ring
//! (`0..n`) followed by the top ring (`n..2n`). Plan x maps to world X,
//! plan y maps to world Z, and elevations map to world Y.
//!
//! For counter-clockwise input the bottom cap fan `(0, i, i + 1)` faces
//! down and the reversed top fan faces up. Side faces follow the
//! [`WindingMode`] passed by the caller.

use crate::config::MIN_WALL_EXTENT;
use crate::triangulation::{compute_normals, triangulate_cap};
use crate::{CapTriangulation, LayoutConfig, Point2, SceneFrame, WindingMode};
use floorstack_model::{Floor, MeshBuffer, Point2D, Polygon, WallSegment};

/// Plan-to-world horizontal transform
///
/// `world = plan × scale + offset`, where `scale` already combines the
/// floor's plan scale with the global scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_z: f64,
}

impl Placement {
    pub fn new(scale: f64, offset_x: f64, offset_z: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_z,
        }
    }

    /// Plan coordinates used directly as world coordinates
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Placement of a floor's zones inside a centered scene
    pub fn for_floor(frame: &SceneFrame, floor: &Floor, config: &LayoutConfig) -> Self {
        Self::new(
            floor.plan_scale * config.global_scale,
            frame.center_offset[0],
            frame.center_offset[1],
        )
    }

    /// Placement for wall-segment input (plan scale 1)
    pub fn for_walls(frame: &SceneFrame, config: &LayoutConfig) -> Self {
        Self::new(
            config.global_scale,
            frame.center_offset[0],
            frame.center_offset[1],
        )
    }

    /// World (x, z) of a plan point
    #[inline]
    pub fn apply(&self, p: &Point2D) -> (f64, f64) {
        (
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_z,
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

/// How texture coordinates are assigned to ring vertices
#[derive(Clone, Copy)]
enum UvMapping {
    /// u along the perimeter, v = 0 bottom / 1 top
    Perimeter,
    /// Raw plan coordinates, identical on both rings
    Plan,
}

/// Extrude a zone polygon into a closed vertical prism
///
/// The bottom ring sits at `base_elevation` and the top ring at
/// `base_elevation + height`. Normals are computed from the final triangle
/// list, so they follow whichever `winding` was requested.
pub fn extrude(
    polygon: &Polygon,
    height: f64,
    base_elevation: f64,
    placement: &Placement,
    winding: WindingMode,
    caps: CapTriangulation,
) -> MeshBuffer {
    build_prism(
        &polygon.points,
        base_elevation,
        base_elevation + height,
        placement,
        winding,
        caps,
        UvMapping::Perimeter,
    )
}

/// Thin closed prism under a zone
///
/// Same structure as [`extrude`] with `height = thickness`, always
/// outward-facing. UVs are the raw polygon coordinates so textures tile
/// identically regardless of where the building is centered.
pub fn slab(
    polygon: &Polygon,
    base_elevation: f64,
    thickness: f64,
    placement: &Placement,
    caps: CapTriangulation,
) -> MeshBuffer {
    build_prism(
        &polygon.points,
        base_elevation,
        base_elevation + thickness,
        placement,
        WindingMode::Outward,
        caps,
        UvMapping::Plan,
    )
}

/// Extrude a wall segment with the given plan thickness
///
/// A zero-length segment becomes a small square solid at its start point
/// instead of a zero-volume mesh.
pub fn extrude_wall(
    segment: &WallSegment,
    thickness: f64,
    height: f64,
    base_elevation: f64,
    placement: &Placement,
) -> MeshBuffer {
    let footprint = wall_footprint(segment, thickness);
    build_prism(
        &footprint,
        base_elevation,
        base_elevation + height,
        placement,
        WindingMode::Outward,
        CapTriangulation::Fan,
        UvMapping::Perimeter,
    )
}

/// Counter-clockwise rectangle around a wall's centerline
fn wall_footprint(segment: &WallSegment, thickness: f64) -> Vec<Point2D> {
    let start = segment.start;
    let end = segment.end;
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = (dx * dx + dy * dy).sqrt();

    if length < 1e-9 {
        log::debug!(
            "Zero-length wall at ({}, {}), substituting fallback solid",
            start.x,
            start.y
        );
        return Polygon::rectangle(start.x, start.y, MIN_WALL_EXTENT, MIN_WALL_EXTENT).points;
    }

    let half = thickness.max(MIN_WALL_EXTENT) / 2.0;
    let perp_x = -dy / length * half;
    let perp_y = dx / length * half;

    vec![
        Point2D::new(start.x - perp_x, start.y - perp_y),
        Point2D::new(end.x - perp_x, end.y - perp_y),
        Point2D::new(end.x + perp_x, end.y + perp_y),
        Point2D::new(start.x + perp_x, start.y + perp_y),
    ]
}

fn build_prism(
    ring: &[Point2D],
    bottom_y: f64,
    top_y: f64,
    placement: &Placement,
    winding: WindingMode,
    caps: CapTriangulation,
    uv_mapping: UvMapping,
) -> MeshBuffer {
    let n = ring.len();
    if n < 3 {
        return MeshBuffer::new();
    }

    // 2 caps of (n - 2) triangles + 2 triangles per side
    let mut mesh = MeshBuffer::with_capacity(2 * n, (4 * n - 4) * 3);

    let u_coords = match uv_mapping {
        UvMapping::Perimeter => perimeter_fractions(ring),
        UvMapping::Plan => Vec::new(),
    };

    for (ring_y, v) in [(bottom_y, 0.0f32), (top_y, 1.0f32)] {
        for (i, p) in ring.iter().enumerate() {
            let (x, z) = placement.apply(p);
            mesh.positions
                .extend_from_slice(&[x as f32, ring_y as f32, z as f32]);
            match uv_mapping {
                UvMapping::Perimeter => mesh.uvs.extend_from_slice(&[u_coords[i], v]),
                UvMapping::Plan => mesh.uvs.extend_from_slice(&[p.x as f32, p.y as f32]),
            }
        }
    }

    let plan: Vec<Point2<f64>> = ring.iter().map(|p| Point2::new(p.x, p.y)).collect();
    let cap = triangulate_cap(&plan, caps);
    let top = n as u32;

    for tri in cap.chunks_exact(3) {
        let (a, b, c) = (tri[0] as u32, tri[1] as u32, tri[2] as u32);
        // Bottom cap as given
        mesh.indices.extend_from_slice(&[a, b, c]);
        // Top cap reversed
        mesh.indices.extend_from_slice(&[top + a, top + c, top + b]);
    }

    for i in 0..n {
        let j = (i + 1) % n;
        let (bi, bj) = (i as u32, j as u32);
        let (ti, tj) = (top + bi, top + bj);
        match winding {
            WindingMode::Outward => {
                mesh.indices.extend_from_slice(&[bi, ti, tj]);
                mesh.indices.extend_from_slice(&[bi, tj, bj]);
            }
            WindingMode::Inward => {
                mesh.indices.extend_from_slice(&[bi, bj, tj]);
                mesh.indices.extend_from_slice(&[bi, tj, ti]);
            }
        }
    }

    mesh.normals = compute_normals(&mesh.positions, &mesh.indices);
    mesh
}

/// Cumulative perimeter position of each ring vertex in [0, 1)
fn perimeter_fractions(ring: &[Point2D]) -> Vec<f32> {
    let n = ring.len();
    let total: f64 = (0..n).map(|i| ring[i].distance(&ring[(i + 1) % n])).sum();
    let mut fractions = Vec::with_capacity(n);
    let mut walked = 0.0;
    for i in 0..n {
        fractions.push(if total > 0.0 {
            (walked / total) as f32
        } else {
            0.0
        });
        walked += ring[i].distance(&ring[(i + 1) % n]);
    }
    fractions
}
