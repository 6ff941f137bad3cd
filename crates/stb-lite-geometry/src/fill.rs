// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangulated fills for planar elements
//!
//! Slabs, walls and parapets are drawn as filled planes with their openings
//! cut out. The outline is flattened into its own plane and handed to
//! earcutr.

use nalgebra::{Point2, Point3, Vector3};

use crate::{Error, Result};

/// Triangle mesh of a planar fill, in viewer metres
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FillMesh {
    /// Outer vertices followed by the vertices of each hole
    pub positions: Vec<Point3<f32>>,
    /// Triangle indices into `positions`
    pub indices: Vec<u32>,
}

impl FillMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[inline]
fn is_convex(points: &[Point2<f64>]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut sign = 0i8;
    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];
        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);
        if cross.abs() > 1e-10 {
            let current = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current;
            } else if sign != current {
                return false;
            }
        }
    }
    true
}

#[inline]
fn fan_triangulate(n: usize) -> Vec<usize> {
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..n - 1 {
        indices.extend_from_slice(&[0, i, i + 1]);
    }
    indices
}

/// Unit normal of a polygon (Newell's method), `+Z` when collapsed
pub fn polygon_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    if n < 3 {
        return Vector3::z();
    }

    let mut normal = Vector3::<f64>::zeros();
    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    if normal.norm() > 1e-10 {
        normal.normalize()
    } else {
        Vector3::z()
    }
}

/// In-plane basis `(u, v)` for a plane normal
fn plane_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    let reference = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let u = normal.cross(&reference).normalize();
    let v = normal.cross(&u).normalize();
    (u, v)
}

fn project(
    points: &[Point3<f64>],
    u: &Vector3<f64>,
    v: &Vector3<f64>,
    origin: &Point3<f64>,
) -> Vec<Point2<f64>> {
    points
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(u), d.dot(v))
        })
        .collect()
}

/// Triangulate a planar outline with holes
///
/// Holes with fewer than three vertices are ignored.
pub fn triangulate_fill(outer: &[Point3<f64>], holes: &[Vec<Point3<f64>>]) -> Result<FillMesh> {
    if outer.len() < 3 {
        return Err(Error::invalid_count(3, outer.len()));
    }

    let normal = polygon_normal(outer);
    let (u, v) = plane_basis(&normal);
    let origin = outer[0];
    let outer_2d = project(outer, &u, &v, &origin);

    let valid_holes: Vec<&Vec<Point3<f64>>> = holes.iter().filter(|h| h.len() >= 3).collect();

    let indices = if valid_holes.is_empty() {
        match outer_2d.len() {
            3 => vec![0, 1, 2],
            4 => vec![0, 1, 2, 0, 2, 3],
            n if n <= 8 && is_convex(&outer_2d) => fan_triangulate(n),
            _ => earcut(&outer_2d, &[])?,
        }
    } else {
        let holes_2d: Vec<Vec<Point2<f64>>> = valid_holes
            .iter()
            .map(|h| project(h, &u, &v, &origin))
            .collect();
        earcut(&outer_2d, &holes_2d)?
    };

    let positions = outer
        .iter()
        .chain(valid_holes.iter().flat_map(|h| h.iter()))
        .map(|p| Point3::new(p.x as f32, p.y as f32, p.z as f32))
        .collect();

    Ok(FillMesh {
        positions,
        indices: indices.into_iter().map(|i| i as u32).collect(),
    })
}

fn earcut(outer: &[Point2<f64>], holes: &[Vec<Point2<f64>>]) -> Result<Vec<usize>> {
    let total = outer.len() + holes.iter().map(Vec::len).sum::<usize>();
    let mut vertices = Vec::with_capacity(total * 2);
    for p in outer {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    let mut hole_indices = Vec::with_capacity(holes.len());
    for hole in holes {
        hole_indices.push(vertices.len() / 2);
        for p in hole {
            vertices.push(p.x);
            vertices.push(p.y);
        }
    }

    earcutr::earcut(&vertices, &hole_indices, 2).map_err(|e| Error::triangulation(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64, z: f64) -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(size, 0.0, z),
            Point3::new(size, size, z),
            Point3::new(0.0, size, z),
        ]
    }

    #[test]
    fn test_quad_fill() {
        let mesh = triangulate_fill(&square(2.0, 3.0), &[]).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions.len(), 4);
        assert_relative_eq!(mesh.positions[2].z, 3.0);
    }

    #[test]
    fn test_fill_with_hole() {
        let hole = vec![
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(1.0, 0.5, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let mesh = triangulate_fill(&square(2.0, 0.0), &[hole]).unwrap();
        assert_eq!(mesh.positions.len(), 8);
        // A square ring triangulates into eight triangles
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_too_few_vertices() {
        let err = triangulate_fill(&square(1.0, 0.0)[..2], &[]).unwrap_err();
        assert_eq!(err, Error::invalid_count(3, 2));
    }

    #[test]
    fn test_vertical_normal() {
        let wall = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 3.0),
        ];
        let normal = polygon_normal(&wall);
        assert_relative_eq!(normal.y.abs(), 1.0, epsilon = 1e-9);
    }
}
