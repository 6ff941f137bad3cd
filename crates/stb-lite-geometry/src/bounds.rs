// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model bounding box

use nalgebra::{Point3, Vector3};
use stb_lite_model::StbNode;

use crate::SCALE_FACTOR;

/// Axis-aligned bounds of all nodes, in viewer metres
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelBounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl ModelBounds {
    /// Bounds of the node coordinates; `None` for an empty node table
    pub fn from_nodes(nodes: &[StbNode]) -> Option<Self> {
        let first = nodes.first()?;
        let mut min = [first.x, first.y, first.z];
        let mut max = min;
        for node in &nodes[1..] {
            for (axis, value) in [node.x, node.y, node.z].into_iter().enumerate() {
                min[axis] = min[axis].min(value);
                max[axis] = max[axis].max(value);
            }
        }
        let scale = |p: [f64; 3]| {
            Point3::new(
                (p[0] * SCALE_FACTOR) as f32,
                (p[1] * SCALE_FACTOR) as f32,
                (p[2] * SCALE_FACTOR) as f32,
            )
        };
        Some(Self {
            min: scale(min),
            max: scale(max),
        })
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Size along each axis
    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Largest of the three extents
    pub fn max_extent(&self) -> f32 {
        self.extents().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn node(id: &str, x: f64, y: f64, z: f64) -> StbNode {
        StbNode {
            id: id.into(),
            guid: None,
            x,
            y,
            z,
            kind: None,
            id_member: None,
        }
    }

    #[test]
    fn test_bounds_from_nodes() {
        let bounds = ModelBounds::from_nodes(&[
            node("1", 0.0, 0.0, 0.0),
            node("2", 12000.0, 8000.0, 3500.0),
            node("3", -2000.0, 1000.0, 7000.0),
        ])
        .unwrap();
        assert_relative_eq!(bounds.min.x, -2.0);
        assert_relative_eq!(bounds.max.y, 8.0);
        assert_relative_eq!(bounds.center().x, 5.0);
        assert_relative_eq!(bounds.max_extent(), 14.0);
    }

    #[test]
    fn test_empty_nodes() {
        assert!(ModelBounds::from_nodes(&[]).is_none());
    }
}
