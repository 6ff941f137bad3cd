// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer session
//!
//! [`ViewerSession`] owns one loaded document together with everything
//! derived from it: the model tree, the element registry, the selection and
//! the camera. A UI layer drives it with pointer and tree events and drains
//! [`ViewerEvent`]s to learn what to redraw or report.

use nalgebra::Point2;
use stb_lite_geometry::{build_element_geometry, ModelBounds};
use stb_lite_inspect::{ModelGraphWalker, Panel, PropertyDetailBuilder, TreeNode};
use stb_lite_model::{ElementRef, ModelElement, StBridge, StbResolver};

use crate::camera::{CameraProjector, CameraState, Viewport};
use crate::picking::{DepthSampler, PickingEngine};
use crate::presets::{view_presets, ViewPreset};
use crate::scene::{Renderer, Scene, SceneElement};
use crate::selection::{SelectionChange, SelectionSynchronizer};
use crate::settings::ViewerSettings;
use crate::{Result, ViewerError};

/// Notice issued by "show details" without a selection
pub const NO_SELECTION_NOTICE: &str = "No member is selected.";

/// Something the UI layer should react to
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    ModelLoaded { element_count: usize },
    ModelCleared,
    SelectionChanged(SelectionChange),
    RedrawRequested,
    /// User-facing message for a recovered fault
    Notice(String),
}

/// One loaded model and the viewer state around it
#[derive(Debug, Default)]
pub struct ViewerSession {
    document: Option<StBridge>,
    tree: TreeNode,
    scene: Scene,
    selection: SelectionSynchronizer,
    camera: CameraState,
    presets: Vec<ViewPreset>,
    settings: ViewerSettings,
    events: Vec<ViewerEvent>,
}

impl ViewerSession {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Parse and load a document
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let document = StBridge::from_json(json)?;
        self.load(document);
        Ok(())
    }

    /// Replace the current model
    ///
    /// Elements whose geometry cannot be built are reported and left out of
    /// the viewport; they stay in the tree.
    pub fn load(&mut self, document: StBridge) {
        let mut notices: Vec<String> = Vec::new();
        let mut elements: Vec<&dyn ModelElement> = Vec::new();
        let tree = ModelGraphWalker::new(&mut notices).build_tree(&document, &mut elements, None);

        let resolver = StbResolver::new(&document.model);
        let mut scene = Scene::new();
        for element in elements {
            let element_ref = element.element_ref();
            match build_element_geometry(element, &resolver) {
                Ok(geometry) => scene.insert(SceneElement::new(element_ref, geometry)),
                Err(err) => {
                    log::warn!("Skipping {}: {}", element_ref, err);
                    notices.push(format!("Cannot display {}: {}", element_ref, err));
                }
            }
        }
        scene.apply_settings(&self.settings.categories);

        let camera = ModelBounds::from_nodes(&document.model.nodes)
            .map(CameraState::fit)
            .unwrap_or_default();
        let presets = view_presets(&document.model, &camera.bounds);

        log::info!(
            "Loaded model with {} nodes, {} displayable elements and {} view presets",
            document.model.nodes.len(),
            scene.len(),
            presets.len()
        );

        let element_count = scene.len();
        self.document = Some(document);
        self.tree = tree;
        self.scene = scene;
        self.camera = camera;
        self.presets = presets;
        let change = self.selection.clear();

        self.events.push(ViewerEvent::ModelLoaded { element_count });
        self.events.push(ViewerEvent::SelectionChanged(change));
        self.events
            .extend(notices.into_iter().map(ViewerEvent::Notice));
        self.events.push(ViewerEvent::RedrawRequested);
    }

    /// Drop the model and everything derived from it
    pub fn clear(&mut self) {
        self.document = None;
        self.tree = TreeNode::default();
        self.scene.clear();
        self.presets.clear();
        self.camera = CameraState::default();
        let change = self.selection.clear();

        self.events.push(ViewerEvent::ModelCleared);
        self.events.push(ViewerEvent::SelectionChanged(change));
        self.events.push(ViewerEvent::RedrawRequested);
    }

    pub fn document(&self) -> Option<&StBridge> {
        self.document.as_ref()
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selected(&self) -> Option<&ElementRef> {
        self.selection.selected()
    }

    /// Register a selection callback
    pub fn on_selection_changed(&mut self, subscriber: impl FnMut(&SelectionChange) + 'static) {
        self.selection.subscribe(subscriber);
    }

    /// Detail text of the tree node at `path`
    pub fn node_details(&self, path: &[usize]) -> Option<&str> {
        self.tree.node_at(path).map(|node| node.details.as_str())
    }

    /// Tree node clicked
    pub fn select_tree_node(&mut self, path: &[usize]) -> Option<&ElementRef> {
        if let Some(change) = self.selection.select_from_tree(&mut self.tree, path) {
            self.events.push(ViewerEvent::SelectionChanged(change));
            self.events.push(ViewerEvent::RedrawRequested);
        }
        self.selection.selected()
    }

    /// Pointer clicked in the viewport; a miss deselects
    pub fn pick(
        &mut self,
        pointer: Point2<f32>,
        viewport: Viewport,
        depth: &mut dyn DepthSampler,
    ) -> Option<ElementRef> {
        let projector = CameraProjector::new(&self.camera, viewport);
        let winner = PickingEngine::new(&self.settings.picking)
            .pick(pointer, &projector, self.scene.iter(), depth)
            .map(|element| element.element.clone());

        let change = self
            .selection
            .select_from_viewport(&mut self.tree, winner.clone());
        self.events.push(ViewerEvent::SelectionChanged(change));
        self.events.push(ViewerEvent::RedrawRequested);
        winner
    }

    /// Panels of the selected element
    ///
    /// Without a selection a notice is issued and `None` returned. A failed
    /// cross reference is reported and the panels built before it are
    /// returned.
    pub fn show_details(&mut self) -> Option<Vec<Panel>> {
        let Some(selected) = self.selection.selected().cloned() else {
            self.events
                .push(ViewerEvent::Notice(NO_SELECTION_NOTICE.to_string()));
            return None;
        };
        let Some((document, element)) = self
            .document
            .as_ref()
            .and_then(|doc| doc.find_element(&selected).map(|element| (doc, element)))
        else {
            log::warn!("Selected element {} is not in the model", selected);
            self.events
                .push(ViewerEvent::Notice(NO_SELECTION_NOTICE.to_string()));
            return None;
        };

        let resolver = StbResolver::new(&document.model);
        let mut notices: Vec<String> = Vec::new();
        let mut panels = Vec::new();
        let result = PropertyDetailBuilder::new(&resolver, &mut notices)
            .build_element_panels(element, &mut panels);
        if let Err(err) = result {
            log::warn!("Details of {} are incomplete: {}", selected, err);
            notices.push(err.to_string());
        }
        self.events
            .extend(notices.into_iter().map(ViewerEvent::Notice));
        Some(panels)
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Replace the settings and refresh every element's style
    pub fn apply_settings(&mut self, settings: ViewerSettings) {
        self.settings = settings;
        self.scene.apply_settings(&self.settings.categories);
        self.events.push(ViewerEvent::RedrawRequested);
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera
    }

    pub fn presets(&self) -> &[ViewPreset] {
        &self.presets
    }

    /// Switch to a preset view, optionally looking from the opposite side
    pub fn apply_preset(&mut self, index: usize, invert: bool) -> Result<()> {
        let preset = self
            .presets
            .get(index)
            .ok_or(ViewerError::UnknownPreset(index))?;
        self.camera.apply_preset(preset, invert);
        self.events.push(ViewerEvent::RedrawRequested);
        Ok(())
    }

    /// Draw every enabled element, the selected one in the selection colour
    pub fn render(&self, renderer: &mut dyn Renderer, viewport: Viewport) {
        let projector = CameraProjector::new(&self.camera, viewport);
        let selection_color = self.settings.categories.selection_color;
        for element in self.scene.iter().filter(|e| e.enabled) {
            let color = if self.selection.is_selected(&element.element) {
                selection_color
            } else {
                element.color
            };
            renderer.draw(element, color, &projector.view, &projector.projection);
        }
    }

    /// Events since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }
}
