// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element geometry per shape family
//!
//! Model coordinates are millimetres; everything produced here is in viewer
//! metres (`SCALE_FACTOR`).

use nalgebra::{Point3, Vector3};
use stb_lite_model::{ModelElement, ModelResolver, OpeningSpec, Position, ShapeSpec};

use crate::{triangulate_fill, Error, FillMesh, Result};

/// Millimetres to metres
pub const SCALE_FACTOR: f64 = 0.001;

/// Outline used for hit testing
#[derive(Clone, Debug, PartialEq)]
pub enum BoundingGeometry {
    /// Planar outline with holes
    Polygon {
        outer: Vec<Point3<f32>>,
        holes: Vec<Vec<Point3<f32>>>,
    },
    /// Line segment
    Segment {
        start: Point3<f32>,
        end: Point3<f32>,
    },
    /// Single point
    Point(Point3<f32>),
}

impl BoundingGeometry {
    /// Points of the outer boundary (holes excluded)
    pub fn outer_points(&self) -> Vec<Point3<f32>> {
        match self {
            BoundingGeometry::Polygon { outer, .. } => outer.clone(),
            BoundingGeometry::Segment { start, end } => vec![*start, *end],
            BoundingGeometry::Point(p) => vec![*p],
        }
    }
}

/// Display and picking geometry of one element
#[derive(Clone, Debug, PartialEq)]
pub struct ElementGeometry {
    /// Polylines drawn as wires; polygon rings are closed implicitly
    pub outlines: Vec<Vec<Point3<f32>>>,
    /// Outline used for picking
    pub bounding: BoundingGeometry,
    /// Filled surface for planar elements
    pub fill: Option<FillMesh>,
    /// Positions of the analysis nodes the element hangs from
    pub analysis_nodes: Vec<Point3<f32>>,
}

#[inline]
fn mm(p: Position) -> Point3<f64> {
    Point3::new(p[0], p[1], p[2])
}

/// Model millimetres to viewer metres
#[inline]
pub fn to_viewer(p: &Point3<f64>) -> Point3<f32> {
    Point3::new(
        (p.x * SCALE_FACTOR) as f32,
        (p.y * SCALE_FACTOR) as f32,
        (p.z * SCALE_FACTOR) as f32,
    )
}

fn scaled(p: &Point3<f64>) -> Point3<f64> {
    Point3::from(p.coords * SCALE_FACTOR)
}

/// Horizontal unit vector to the right of `start -> end` seen from above
fn lateral_direction(start: &Point3<f64>, end: &Point3<f64>) -> Result<Vector3<f64>> {
    let lateral = (end - start).cross(&Vector3::z());
    lateral
        .try_normalize(1e-12)
        .ok_or_else(|| Error::degenerate("member direction is vertical or zero"))
}

/// Build the geometry of an element
pub fn build_element_geometry(
    element: &dyn ModelElement,
    resolver: &dyn ModelResolver,
) -> Result<ElementGeometry> {
    let shape = element.shape(resolver)?;
    let mut geometry = build_shape(&shape.spec)?;
    geometry.analysis_nodes = shape
        .analysis_nodes
        .iter()
        .map(|p| to_viewer(&mm(*p)))
        .collect();
    Ok(geometry)
}

/// Build the geometry of one shape family
pub fn build_shape(spec: &ShapeSpec) -> Result<ElementGeometry> {
    match spec {
        ShapeSpec::Point(p) => Ok(point(&mm(*p))),
        ShapeSpec::Segment { start, end } => Ok(segment(&mm(*start), &mm(*end))),
        ShapeSpec::OffsetSegment {
            start,
            end,
            lateral,
        } => {
            let (start, end) = (mm(*start), mm(*end));
            let shift = lateral_direction(&start, &end)? * *lateral;
            Ok(segment(&(start + shift), &(end + shift)))
        }
        ShapeSpec::Planar { vertices, openings } => {
            let vertices: Vec<Point3<f64>> = vertices.iter().map(|v| mm(*v)).collect();
            let holes = opening_holes(&vertices, openings)?;
            planar(&vertices, &holes)
        }
        ShapeSpec::Upstand {
            start,
            end,
            lateral,
            height,
        } => {
            let (start, end) = (mm(*start), mm(*end));
            let shift = lateral_direction(&start, &end)? * *lateral;
            let rise = Vector3::new(0.0, 0.0, *height);
            let bottom_start = start + shift;
            let bottom_end = end + shift;
            let corners = [
                bottom_start,
                bottom_end,
                bottom_end + rise,
                bottom_start + rise,
            ];
            planar(&corners, &[])
        }
        ShapeSpec::Pair { first, second } => {
            let first = [mm(first[0]), mm(first[1])];
            let second = [mm(second[0]), mm(second[1])];
            Ok(ElementGeometry {
                outlines: vec![
                    vec![to_viewer(&first[0]), to_viewer(&first[1])],
                    vec![to_viewer(&second[0]), to_viewer(&second[1])],
                ],
                bounding: BoundingGeometry::Segment {
                    start: to_viewer(&first[0]),
                    end: to_viewer(&second[1]),
                },
                fill: None,
                analysis_nodes: Vec::new(),
            })
        }
    }
}

fn point(p: &Point3<f64>) -> ElementGeometry {
    let p = to_viewer(p);
    ElementGeometry {
        outlines: vec![vec![p]],
        bounding: BoundingGeometry::Point(p),
        fill: None,
        analysis_nodes: Vec::new(),
    }
}

fn segment(start: &Point3<f64>, end: &Point3<f64>) -> ElementGeometry {
    let (start, end) = (to_viewer(start), to_viewer(end));
    ElementGeometry {
        outlines: vec![vec![start, end]],
        bounding: BoundingGeometry::Segment { start, end },
        fill: None,
        analysis_nodes: Vec::new(),
    }
}

fn planar(vertices: &[Point3<f64>], holes: &[Vec<Point3<f64>>]) -> Result<ElementGeometry> {
    let fill = if vertices.len() >= 3 {
        let outer: Vec<Point3<f64>> = vertices.iter().map(scaled).collect();
        let holes: Vec<Vec<Point3<f64>>> = holes
            .iter()
            .map(|h| h.iter().map(scaled).collect())
            .collect();
        Some(triangulate_fill(&outer, &holes)?)
    } else {
        None
    };

    let outer: Vec<Point3<f32>> = vertices.iter().map(to_viewer).collect();
    let holes: Vec<Vec<Point3<f32>>> = holes
        .iter()
        .map(|h| h.iter().map(to_viewer).collect())
        .collect();

    let mut outlines = Vec::with_capacity(holes.len() + 1);
    outlines.push(outer.clone());
    outlines.extend(holes.iter().cloned());

    Ok(ElementGeometry {
        outlines,
        bounding: BoundingGeometry::Polygon { outer, holes },
        fill,
        analysis_nodes: Vec::new(),
    })
}

/// Rectangular holes placed in the local basis of a planar outline
///
/// Local X runs from the first vertex to the second. Local Y lies in the
/// plane, perpendicular to X, on the side of the last vertex.
pub fn opening_holes(
    vertices: &[Point3<f64>],
    openings: &[OpeningSpec],
) -> Result<Vec<Vec<Point3<f64>>>> {
    if openings.is_empty() {
        return Ok(Vec::new());
    }
    if vertices.len() < 3 {
        return Err(Error::invalid_count(3, vertices.len()));
    }

    let v1 = vertices[0];
    let v2 = vertices[1];
    let vn = vertices[vertices.len() - 1];

    let x_axis = (v2 - v1)
        .try_normalize(1e-12)
        .ok_or_else(|| Error::degenerate("first edge has zero length"))?;
    let normal = (v2 - v1)
        .cross(&(vn - v1))
        .try_normalize(1e-12)
        .ok_or_else(|| Error::degenerate("outline vertices are collinear"))?;
    let mut y_axis = normal.cross(&x_axis).normalize();
    if y_axis.dot(&(vn - v1)) < 0.0 {
        y_axis = -y_axis;
    }

    Ok(openings
        .iter()
        .map(|open| {
            let first = v1 + x_axis * open.position_x + y_axis * open.position_y;
            let second = first + x_axis * open.length_x;
            let third = second + y_axis * open.length_y;
            let fourth = first + y_axis * open.length_y;
            vec![first, second, third, fourth]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect_slab(openings: Vec<OpeningSpec>) -> ShapeSpec {
        ShapeSpec::Planar {
            vertices: vec![
                [0.0, 0.0, 3000.0],
                [6000.0, 0.0, 3000.0],
                [6000.0, 4000.0, 3000.0],
                [0.0, 4000.0, 3000.0],
            ],
            openings,
        }
    }

    #[test]
    fn test_segment_is_scaled() {
        let geometry = build_shape(&ShapeSpec::Segment {
            start: [1000.0, 0.0, 0.0],
            end: [1000.0, 0.0, 3500.0],
        })
        .unwrap();
        let BoundingGeometry::Segment { start, end } = geometry.bounding else {
            panic!("expected segment");
        };
        assert_relative_eq!(start.x, 1.0);
        assert_relative_eq!(end.z, 3.5);
        assert!(geometry.fill.is_none());
    }

    #[test]
    fn test_slab_opening_placement() {
        let geometry = build_shape(&rect_slab(vec![OpeningSpec {
            position_x: 1000.0,
            position_y: 500.0,
            length_x: 800.0,
            length_y: 600.0,
        }]))
        .unwrap();
        let BoundingGeometry::Polygon { outer, holes } = &geometry.bounding else {
            panic!("expected polygon");
        };
        assert_eq!(outer.len(), 4);
        assert_eq!(holes.len(), 1);
        let hole = &holes[0];
        assert_relative_eq!(hole[0].x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(hole[0].y, 0.5, epsilon = 1e-6);
        assert_relative_eq!(hole[2].x, 1.8, epsilon = 1e-6);
        assert_relative_eq!(hole[2].y, 1.1, epsilon = 1e-6);
        assert_relative_eq!(hole[2].z, 3.0, epsilon = 1e-6);
        assert_eq!(geometry.outlines.len(), 2);
        assert_eq!(geometry.fill.as_ref().unwrap().positions.len(), 8);
    }

    #[test]
    fn test_opening_y_axis_follows_last_vertex() {
        // Clockwise outline seen from above: local Y must still point to the last vertex
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(6000.0, 0.0, 0.0),
            Point3::new(6000.0, -4000.0, 0.0),
            Point3::new(0.0, -4000.0, 0.0),
        ];
        let holes = opening_holes(
            &vertices,
            &[OpeningSpec {
                position_x: 0.0,
                position_y: 1000.0,
                length_x: 100.0,
                length_y: 100.0,
            }],
        )
        .unwrap();
        assert_relative_eq!(holes[0][0].y, -1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_openings_need_three_vertices() {
        let err = build_shape(&ShapeSpec::Planar {
            vertices: vec![[0.0, 0.0, 0.0], [1000.0, 0.0, 0.0]],
            openings: vec![OpeningSpec {
                position_x: 0.0,
                position_y: 0.0,
                length_x: 1.0,
                length_y: 1.0,
            }],
        })
        .unwrap_err();
        assert_eq!(err, Error::invalid_count(3, 2));
    }

    #[test]
    fn test_upstand_corners() {
        let geometry = build_shape(&ShapeSpec::Upstand {
            start: [0.0, 0.0, 0.0],
            end: [4000.0, 0.0, 0.0],
            lateral: 100.0,
            height: 1100.0,
        })
        .unwrap();
        let outer = geometry.bounding.outer_points();
        // Right of +X seen from above is -Y
        assert_relative_eq!(outer[0].y, -0.1, epsilon = 1e-6);
        assert_relative_eq!(outer[1].x, 4.0, epsilon = 1e-6);
        assert_relative_eq!(outer[2].z, 1.1, epsilon = 1e-6);
        assert_relative_eq!(outer[3].x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_strip_footing_shift() {
        let geometry = build_shape(&ShapeSpec::OffsetSegment {
            start: [0.0, 0.0, -1000.0],
            end: [0.0, 5000.0, -1000.0],
            lateral: 250.0,
        })
        .unwrap();
        let points = geometry.bounding.outer_points();
        assert_relative_eq!(points[0].x, 0.25, epsilon = 1e-6);
        assert_relative_eq!(points[1].y, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_vertical_offset_segment_is_degenerate() {
        let err = build_shape(&ShapeSpec::OffsetSegment {
            start: [0.0, 0.0, 0.0],
            end: [0.0, 0.0, 1000.0],
            lateral: 10.0,
        })
        .unwrap_err();
        assert!(matches!(err, Error::Degenerate(_)));
    }

    #[test]
    fn test_pair_pick_outline() {
        let geometry = build_shape(&ShapeSpec::Pair {
            first: [[0.0, 0.0, -2000.0], [0.0, 0.0, -500.0]],
            second: [[0.0, 0.0, -500.0], [0.0, 0.0, 0.0]],
        })
        .unwrap();
        assert_eq!(geometry.outlines.len(), 2);
        let points = geometry.bounding.outer_points();
        assert_relative_eq!(points[0].z, -2.0);
        assert_relative_eq!(points[1].z, 0.0);
    }
}
