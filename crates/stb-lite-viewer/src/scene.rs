// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Displayable elements and the rendering seam

use nalgebra::Matrix4;
use rustc_hash::FxHashMap;
use stb_lite_geometry::ElementGeometry;
use stb_lite_model::ElementRef;

use crate::settings::{CategorySettings, Color};

/// One element as shown in the viewport
#[derive(Clone, Debug, PartialEq)]
pub struct SceneElement {
    pub element: ElementRef,
    pub geometry: ElementGeometry,
    /// Hidden elements are neither drawn nor picked
    pub enabled: bool,
    pub color: Color,
}

impl SceneElement {
    pub fn new(element: ElementRef, geometry: ElementGeometry) -> Self {
        Self {
            element,
            geometry,
            enabled: true,
            color: [1.0; 4],
        }
    }
}

/// Elements of the loaded model, in registration order
#[derive(Clone, Debug, Default)]
pub struct Scene {
    elements: Vec<SceneElement>,
    index: FxHashMap<ElementRef, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element; a repeated identity replaces the earlier entry
    pub fn insert(&mut self, element: SceneElement) {
        match self.index.get(&element.element) {
            Some(&i) => self.elements[i] = element,
            None => {
                self.index.insert(element.element.clone(), self.elements.len());
                self.elements.push(element);
            }
        }
    }

    pub fn get(&self, element: &ElementRef) -> Option<&SceneElement> {
        self.index.get(element).map(|&i| &self.elements[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.index.clear();
    }

    /// Refresh visibility and colour from category settings
    pub fn apply_settings(&mut self, settings: &CategorySettings) {
        for element in &mut self.elements {
            let style = settings.style(element.element.kind);
            element.enabled = style.visible;
            element.color = style.color;
        }
    }
}

/// Draws scene elements; implemented by the host graphics layer
pub trait Renderer {
    /// Draw one enabled element with its effective colour
    fn draw(
        &mut self,
        element: &SceneElement,
        color: Color,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use stb_lite_geometry::BoundingGeometry;
    use stb_lite_model::ElementKind;

    fn point_element(kind: ElementKind, id: &str) -> SceneElement {
        let p = Point3::new(1.0, 2.0, 3.0);
        SceneElement::new(
            ElementRef::new(kind, id),
            ElementGeometry {
                outlines: vec![vec![p]],
                bounding: BoundingGeometry::Point(p),
                fill: None,
                analysis_nodes: vec![p],
            },
        )
    }

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut scene = Scene::new();
        scene.insert(point_element(ElementKind::Node, "1"));
        scene.insert(point_element(ElementKind::Column, "1"));
        let mut again = point_element(ElementKind::Node, "1");
        again.enabled = false;
        scene.insert(again);

        assert_eq!(scene.len(), 2);
        let kinds: Vec<ElementKind> = scene.iter().map(|e| e.element.kind).collect();
        assert_eq!(kinds, vec![ElementKind::Node, ElementKind::Column]);
        assert!(!scene.get(&ElementRef::new(ElementKind::Node, "1")).unwrap().enabled);
    }

    #[test]
    fn test_apply_settings() {
        let mut scene = Scene::new();
        scene.insert(point_element(ElementKind::Slab, "5"));
        scene.insert(point_element(ElementKind::Node, "1"));

        let mut settings = CategorySettings::default();
        settings.set_visible(ElementKind::Slab, false);
        scene.apply_settings(&settings);

        let slab = scene.get(&ElementRef::new(ElementKind::Slab, "5")).unwrap();
        assert!(!slab.enabled);
        let node = scene.get(&ElementRef::new(ElementKind::Node, "1")).unwrap();
        assert!(node.enabled);
        assert_eq!(node.color, [0.0, 0.0, 1.0, 1.0]);
    }
}
