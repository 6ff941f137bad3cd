// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera state and projection
//!
//! Model space is Z-up. Perspective views derive their up vector from the
//! vertical axis, the way CAD viewers do, while orthographic views carry an
//! explicit up direction (`+Y` for plans, `+Z` for elevations).

use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};
use stb_lite_geometry::{ModelBounds, SCALE_FACTOR};

use crate::ViewPreset;

/// Fixed vertical field of view of the perspective camera
pub const PERSPECTIVE_FOV_DEGREES: f32 = 45.0;

/// Smallest near clip distance of the orthographic camera
const MIN_NEAR_CLIP: f32 = 0.01;

/// Ratio restored whenever a view preset is applied
const DEFAULT_RATIO: f32 = 0.7;

/// Projection mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

/// Orthographic parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoSettings {
    /// Distance in front of the target plane (mm)
    pub near: f32,
    /// Distance behind the target plane (mm)
    pub far: f32,
    /// Fraction of the screen the model spans
    pub ratio: f32,
    /// Up direction on screen
    pub up: Vector3<f32>,
}

impl Default for OrthoSettings {
    fn default() -> Self {
        Self {
            near: 1000.0,
            far: 1000.0,
            ratio: DEFAULT_RATIO,
            up: Vector3::y(),
        }
    }
}

/// Perspective parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveSettings {
    /// Camera distance from the target
    pub distance: f32,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Default for PerspectiveSettings {
    fn default() -> Self {
        Self {
            distance: 10.0,
            near_clip: 0.1,
            far_clip: 1000.0,
        }
    }
}

/// Everything needed to build view and projection matrices
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub target: Point3<f32>,
    /// From the camera towards the target
    pub direction: Vector3<f32>,
    pub mode: ProjectionMode,
    pub ortho: OrthoSettings,
    pub perspective: PerspectiveSettings,
    /// Model extents used to size orthographic views
    pub bounds: ModelBounds,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::fit(ModelBounds {
            min: Point3::origin(),
            max: Point3::new(10.0, 10.0, 10.0),
        })
    }
}

impl CameraState {
    /// Default camera for a model: looking at its centre from above the
    /// `(-X, +Y)` corner, in perspective
    pub fn fit(bounds: ModelBounds) -> Self {
        Self {
            target: bounds.center(),
            direction: Vector3::new(-1.0, 1.0, -1.0).normalize(),
            mode: ProjectionMode::Perspective,
            ortho: OrthoSettings::default(),
            perspective: PerspectiveSettings {
                distance: bounds.max_extent() * 1.5,
                ..Default::default()
            },
            bounds,
        }
    }

    pub fn is_ortho(&self) -> bool {
        self.mode == ProjectionMode::Orthographic
    }

    /// Switch to an orthographic preset view
    pub fn apply_preset(&mut self, preset: &ViewPreset, invert: bool) {
        self.mode = ProjectionMode::Orthographic;
        self.target = preset.target;
        self.direction = if invert {
            -preset.direction
        } else {
            preset.direction
        };
        self.ortho.up = preset.up;
        self.ortho.ratio = DEFAULT_RATIO;
    }

    /// Model width and height as seen by the orthographic camera
    ///
    /// Plan views (looking straight down) see X by Y; any other direction
    /// sees the larger horizontal extent by the height.
    pub fn ortho_extents(&self) -> (f32, f32) {
        let size = self.bounds.extents();
        if self.direction == -Vector3::z() {
            (size.x, size.y)
        } else {
            (size.x.max(size.y), size.z)
        }
    }

    /// Orthographic view volume size fitted to a viewport aspect ratio
    pub fn ortho_size(&self, aspect: f32) -> (f32, f32) {
        let (width, height) = self.ortho_extents();
        if aspect > 1.0 {
            let w = width / self.ortho.ratio;
            (w, w / aspect)
        } else {
            let h = height / self.ortho.ratio;
            (h * aspect, h)
        }
    }

    /// Camera position
    pub fn eye(&self) -> Point3<f32> {
        match self.mode {
            ProjectionMode::Orthographic => {
                self.target - self.direction * self.ortho.near * SCALE_FACTOR as f32
            }
            ProjectionMode::Perspective => {
                self.target - self.direction * self.perspective.distance
            }
        }
    }
}

/// Screen rectangle in pixels, origin at the top left
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// View and projection matrices for one camera state and viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraProjector {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    view_projection: Matrix4<f32>,
    viewport: Viewport,
}

impl CameraProjector {
    pub fn new(camera: &CameraState, viewport: Viewport) -> Self {
        let (view, projection) = match camera.mode {
            ProjectionMode::Orthographic => orthographic(camera, viewport.aspect()),
            ProjectionMode::Perspective => perspective(camera, viewport.aspect()),
        };
        Self {
            view,
            projection,
            view_projection: projection * view,
            viewport,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Project a viewer-space point to screen pixels
    ///
    /// Returns `None` when the homogeneous divisor is zero.
    pub fn project_to_screen(&self, point: &Point3<f32>) -> Option<Point2<f32>> {
        let clip = self.view_projection * Vector4::new(point.x, point.y, point.z, 1.0);
        if clip.w == 0.0 {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let vp = &self.viewport;
        Some(Point2::new(
            (ndc_x + 1.0) / 2.0 * vp.width + vp.x,
            (1.0 - ndc_y) / 2.0 * vp.height + vp.y,
        ))
    }
}

fn orthographic(camera: &CameraState, aspect: f32) -> (Matrix4<f32>, Matrix4<f32>) {
    let scale = SCALE_FACTOR as f32;
    let eye = camera.eye();
    let view = Matrix4::look_at_rh(&eye, &camera.target, &camera.ortho.up);

    let (width, height) = camera.ortho_size(aspect);
    let distance = (eye - camera.target).norm();
    let near = (distance - camera.ortho.near * scale).max(MIN_NEAR_CLIP);
    let far = distance + camera.ortho.far * scale;
    let projection = Matrix4::new_orthographic(
        -width / 2.0,
        width / 2.0,
        -height / 2.0,
        height / 2.0,
        near,
        far,
    );
    (view, projection)
}

fn perspective(camera: &CameraState, aspect: f32) -> (Matrix4<f32>, Matrix4<f32>) {
    let forward = camera.direction.normalize();
    // Right comes from the vertical axis; straight up or down has none
    let up = match Vector3::z().cross(&forward).try_normalize(1e-6) {
        Some(right) => forward.cross(&right),
        None => Vector3::y(),
    };
    let view = Matrix4::look_at_rh(&camera.eye(), &camera.target, &up);
    let projection = Matrix4::new_perspective(
        aspect,
        PERSPECTIVE_FOV_DEGREES.to_radians(),
        camera.perspective.near_clip,
        camera.perspective.far_clip,
    );
    (view, projection)
}
