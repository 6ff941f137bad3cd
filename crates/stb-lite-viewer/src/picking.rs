// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Screen-space picking
//!
//! Every enabled element is hit-tested against the pointer in screen space:
//! polygons by the bounding box of their projected outline, segments and
//! points by pixel distance. Among the hits, the element whose surface is
//! nearest in the depth buffer wins.

use nalgebra::Point2;
use stb_lite_geometry::BoundingGeometry;

use crate::camera::CameraProjector;
use crate::scene::SceneElement;
use crate::settings::PickingSettings;

/// Reads the rendered depth buffer at a screen position
pub trait DepthSampler {
    /// Normalized depth in `[0, 1]`; values outside the valid range mean
    /// nothing was drawn there
    fn depth_at(&mut self, x: f32, y: f32) -> f32;
}

impl<F> DepthSampler for F
where
    F: FnMut(f32, f32) -> f32,
{
    fn depth_at(&mut self, x: f32, y: f32) -> f32 {
        self(x, y)
    }
}

/// Distance from `p` to the segment `a`-`b`
pub fn distance_to_segment(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f32 {
    let ab = b - a;
    let length_sq = ab.norm_squared();
    if length_sq == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / length_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Pointer picking over scene elements
#[derive(Clone, Copy, Debug)]
pub struct PickingEngine {
    settings: PickingSettings,
}

impl PickingEngine {
    pub fn new(settings: &PickingSettings) -> Self {
        Self {
            settings: *settings,
        }
    }

    /// Element under the pointer, nearest first
    ///
    /// Ties in depth keep the element seen first.
    pub fn pick<'s>(
        &self,
        pointer: Point2<f32>,
        projector: &CameraProjector,
        elements: impl IntoIterator<Item = &'s SceneElement>,
        depth: &mut dyn DepthSampler,
    ) -> Option<&'s SceneElement> {
        if !self.settings.enabled {
            return None;
        }

        let mut best: Option<(&'s SceneElement, f32)> = None;
        for element in elements {
            if !element.enabled || !self.hit_test(pointer, projector, &element.geometry.bounding) {
                continue;
            }

            let outer = element.geometry.bounding.outer_points();
            let Some(anchor) = outer.first().and_then(|p| projector.project_to_screen(p)) else {
                continue;
            };
            let z = depth.depth_at(anchor.x, anchor.y);
            if z <= self.settings.near_depth || z >= self.settings.far_depth {
                continue;
            }

            if best.map_or(true, |(_, nearest)| z < nearest) {
                best = Some((element, z));
            }
        }

        if let Some((element, z)) = best {
            log::debug!("Picked {} at depth {}", element.element, z);
        }
        best.map(|(element, _)| element)
    }

    /// Whether the pointer lies on the projected outline
    pub fn hit_test(
        &self,
        pointer: Point2<f32>,
        projector: &CameraProjector,
        bounding: &BoundingGeometry,
    ) -> bool {
        let threshold = self.settings.pick_threshold;
        let outer = bounding.outer_points();
        match outer.len() {
            0 => false,
            1 => projector
                .project_to_screen(&outer[0])
                .is_some_and(|p| (pointer - p).norm() < threshold),
            2 => {
                match (
                    projector.project_to_screen(&outer[0]),
                    projector.project_to_screen(&outer[1]),
                ) {
                    (Some(a), Some(b)) => distance_to_segment(pointer, a, b) < threshold,
                    _ => false,
                }
            }
            _ => {
                let mut projected = outer.iter().filter_map(|p| projector.project_to_screen(p));
                let Some(first) = projected.next() else {
                    return false;
                };
                let (min, max) = projected.fold((first, first), |(min, max), p| {
                    (min.inf(&p), max.sup(&p))
                });
                pointer.x >= min.x && pointer.x <= max.x && pointer.y >= min.y && pointer.y <= max.y
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraState, Viewport};
    use crate::scene::SceneElement;
    use crate::ViewPreset;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use stb_lite_geometry::{ElementGeometry, ModelBounds};
    use stb_lite_model::{ElementKind, ElementRef};

    /// Plan over a 10 m square in a 100 px viewport: 7 px per metre,
    /// model centre at (50, 50)
    fn projector() -> CameraProjector {
        let mut camera = CameraState::fit(ModelBounds {
            min: Point3::origin(),
            max: Point3::new(10.0, 10.0, 0.0),
        });
        camera.apply_preset(
            &ViewPreset {
                name: "Story: 1FL".into(),
                target: Point3::new(5.0, 5.0, 0.0),
                direction: -Vector3::z(),
                up: Vector3::y(),
            },
            false,
        );
        CameraProjector::new(&camera, Viewport::new(100.0, 100.0))
    }

    fn element(id: &str, bounding: BoundingGeometry) -> SceneElement {
        SceneElement::new(
            ElementRef::new(ElementKind::Slab, id),
            ElementGeometry {
                outlines: vec![bounding.outer_points()],
                bounding,
                fill: None,
                analysis_nodes: Vec::new(),
            },
        )
    }

    fn square(id: &str, from: f32, to: f32) -> SceneElement {
        element(
            id,
            BoundingGeometry::Polygon {
                outer: vec![
                    Point3::new(from, from, 0.0),
                    Point3::new(to, from, 0.0),
                    Point3::new(to, to, 0.0),
                    Point3::new(from, to, 0.0),
                ],
                holes: Vec::new(),
            },
        )
    }

    fn column_at_x5() -> SceneElement {
        element(
            "1",
            BoundingGeometry::Segment {
                start: Point3::new(5.0, 0.0, 0.0),
                end: Point3::new(5.0, 10.0, 0.0),
            },
        )
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert_relative_eq!(distance_to_segment(Point2::new(5.0, 3.0), a, b), 3.0);
        // Beyond the end clamps to the endpoint
        assert_relative_eq!(distance_to_segment(Point2::new(13.0, 4.0), a, b), 5.0);
        // Zero length
        assert_relative_eq!(distance_to_segment(Point2::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_segment_threshold() {
        let engine = PickingEngine::new(&PickingSettings::default());
        let projector = projector();
        let column = column_at_x5();
        let elements = [column];
        let mut depth = |_: f32, _: f32| 0.5;

        let hit = engine.pick(Point2::new(59.0, 50.0), &projector, &elements, &mut depth);
        assert_eq!(hit.map(|e| e.element.id.as_str()), Some("1"));

        let miss = engine.pick(Point2::new(61.0, 50.0), &projector, &elements, &mut depth);
        assert!(miss.is_none());
    }

    #[test]
    fn test_point_threshold() {
        let engine = PickingEngine::new(&PickingSettings::default());
        let projector = projector();
        let node = BoundingGeometry::Point(Point3::new(5.0, 5.0, 0.0));
        assert!(engine.hit_test(Point2::new(56.0, 56.0), &projector, &node));
        assert!(!engine.hit_test(Point2::new(58.0, 58.0), &projector, &node));
    }

    #[test]
    fn test_polygon_box_is_inclusive() {
        let engine = PickingEngine::new(&PickingSettings::default());
        let projector = projector();
        let slab = square("1", 1.0, 6.0).geometry.bounding;
        // Screen box spans (22, 43) to (57, 78)
        assert!(engine.hit_test(Point2::new(30.0, 60.0), &projector, &slab));
        let corner = projector
            .project_to_screen(&Point3::new(1.0, 1.0, 0.0))
            .unwrap();
        assert!(engine.hit_test(corner, &projector, &slab));
        assert!(!engine.hit_test(Point2::new(60.0, 60.0), &projector, &slab));
    }

    #[test]
    fn test_nearest_depth_wins() {
        let engine = PickingEngine::new(&PickingSettings::default());
        let projector = projector();
        // First outline points land at (22, 78) and (43, 57)
        let elements = [square("far", 1.0, 6.0), square("near", 4.0, 9.0)];
        let mut depth = |x: f32, _: f32| if (x - 22.0).abs() < 0.5 { 0.6 } else { 0.3 };

        let hit = engine.pick(Point2::new(45.0, 45.0), &projector, &elements, &mut depth);
        assert_eq!(hit.map(|e| e.element.id.as_str()), Some("near"));

        // Picking again with nothing changed gives the same answer
        let again = engine.pick(Point2::new(45.0, 45.0), &projector, &elements, &mut depth);
        assert_eq!(again.map(|e| e.element.id.as_str()), Some("near"));
    }

    #[test]
    fn test_equal_depth_keeps_first() {
        let engine = PickingEngine::new(&PickingSettings::default());
        let projector = projector();
        let elements = [square("a", 1.0, 6.0), square("b", 4.0, 9.0)];
        let mut depth = |_: f32, _: f32| 0.4;

        let hit = engine.pick(Point2::new(45.0, 45.0), &projector, &elements, &mut depth);
        assert_eq!(hit.map(|e| e.element.id.as_str()), Some("a"));
    }

    #[test]
    fn test_background_depth_is_ignored() {
        let engine = PickingEngine::new(&PickingSettings::default());
        let projector = projector();
        let elements = [column_at_x5()];
        let mut depth = |_: f32, _: f32| 1.0;

        let hit = engine.pick(Point2::new(50.0, 50.0), &projector, &elements, &mut depth);
        assert!(hit.is_none());
    }

    #[test]
    fn test_depth_bounds_are_exclusive() {
        let engine = PickingEngine::new(&PickingSettings::default());
        let projector = projector();
        let elements = [column_at_x5()];
        let pointer = Point2::new(50.0, 50.0);

        for z in [0.00001_f32, 0.000001, 0.99999] {
            let mut depth = move |_: f32, _: f32| z;
            let hit = engine.pick(pointer, &projector, &elements, &mut depth);
            assert!(hit.is_none(), "depth {} should be rejected", z);
        }

        for z in [0.00002_f32, 0.99998] {
            let mut depth = move |_: f32, _: f32| z;
            let hit = engine.pick(pointer, &projector, &elements, &mut depth);
            assert_eq!(hit.map(|e| e.element.id.as_str()), Some("1"), "depth {}", z);
        }
    }

    #[test]
    fn test_disabled_elements_are_skipped() {
        let projector = projector();
        let mut hidden = column_at_x5();
        hidden.enabled = false;
        let elements = [hidden];
        let mut depth = |_: f32, _: f32| 0.5;

        let engine = PickingEngine::new(&PickingSettings::default());
        assert!(engine
            .pick(Point2::new(50.0, 50.0), &projector, &elements, &mut depth)
            .is_none());

        let off = PickingEngine::new(&PickingSettings {
            enabled: false,
            ..Default::default()
        });
        let elements = [column_at_x5()];
        assert!(off
            .pick(Point2::new(50.0, 50.0), &projector, &elements, &mut depth)
            .is_none());
    }
}
