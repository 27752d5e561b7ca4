// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cap triangulation and vertex normals
//!
//! Caps are triangulated in plan space; every triangle keeps the orientation
//! of the input ring so the extrusion code can decide facing by index order
//! alone.

use crate::{CapTriangulation, Point2, Vector3};

/// Check if a polygon is convex (all cross products have same sign)
#[inline]
pub fn is_convex(points: &[Point2<f64>]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current_sign = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current_sign;
            } else if sign != current_sign {
                return false;
            }
        }
    }

    true
}

/// Fan triangulation from vertex 0: `(0, i, i + 1)`
#[inline]
pub fn fan_triangulate(n: usize) -> Vec<usize> {
    if n < 3 {
        return Vec::new();
    }
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..n - 1 {
        indices.push(0);
        indices.push(i);
        indices.push(i + 1);
    }
    indices
}

/// Triangulate a cap ring, returning indices into `points`
///
/// `Earcut` falls back to the fan if ear clipping fails; triangles are
/// re-oriented to match the ring's own winding.
pub fn triangulate_cap(points: &[Point2<f64>], mode: CapTriangulation) -> Vec<usize> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    // Triangle and convex rings: the fan is exact
    if mode == CapTriangulation::Fan || n == 3 || is_convex(points) {
        return fan_triangulate(n);
    }

    let mut vertices = Vec::with_capacity(n * 2);
    for p in points {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    let mut indices = match earcutr::earcut(&vertices, &[], 2) {
        Ok(indices) if indices.len() == (n - 2) * 3 => indices,
        Ok(indices) => {
            log::warn!(
                "Earcut produced {} triangles for a {}-gon, using fan",
                indices.len() / 3,
                n
            );
            return fan_triangulate(n);
        }
        Err(e) => {
            log::warn!("Earcut failed ({:?}), using fan", e);
            return fan_triangulate(n);
        }
    };

    let ring_sign = ring_area(points).signum();
    for tri in indices.chunks_exact_mut(3) {
        let a = &points[tri[0]];
        let b = &points[tri[1]];
        let c = &points[tri[2]];
        let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        if cross.signum() != ring_sign {
            tri.swap(1, 2);
        }
    }

    indices
}

/// Twice the signed area of a ring
fn ring_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Vertex normals accumulated from a triangle list
///
/// Each face contributes its area-weighted normal to its three corners.
/// Vertices whose accumulated normal vanishes default to +Y.
pub fn compute_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut accum = vec![Vector3::<f32>::zeros(); vertex_count];

    let vertex = |i: usize| Vector3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]);

    for tri in indices.chunks_exact(3) {
        let i0 = tri[0] as usize;
        let i1 = tri[1] as usize;
        let i2 = tri[2] as usize;

        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            continue;
        }

        let p0 = vertex(i0);
        let edge1 = vertex(i1) - p0;
        let edge2 = vertex(i2) - p0;
        let face_normal = edge1.cross(&edge2);

        accum[i0] += face_normal;
        accum[i1] += face_normal;
        accum[i2] += face_normal;
    }

    let mut normals = Vec::with_capacity(vertex_count * 3);
    for n in accum {
        let len = n.norm();
        let n = if len > 1e-8 {
            n / len
        } else {
            Vector3::new(0.0, 1.0, 0.0)
        };
        normals.extend_from_slice(&[n.x, n.y, n.z]);
    }
    normals
}
