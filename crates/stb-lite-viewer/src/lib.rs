// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # STB-Lite Viewer
//!
//! Viewer core for ST-Bridge structural models: camera projection, screen
//! space picking, a single selection shared by the model tree and the 3D
//! view, category styles and view presets. Drawing is left to the host
//! through the [`Renderer`] trait, and the depth buffer is read through
//! [`DepthSampler`], so everything here runs without a graphics device.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stb_lite_viewer::{ViewerSession, ViewerSettings, Viewport};
//!
//! let mut session = ViewerSession::new(ViewerSettings::default());
//! session.load_json(&json)?;
//!
//! let viewport = Viewport::new(800.0, 600.0);
//! session.render(&mut renderer, viewport);
//! if let Some(element) = session.pick(pointer, viewport, &mut |x, y| gpu.read_depth(x, y)) {
//!     println!("Selected {}", element);
//! }
//! for event in session.drain_events() {
//!     // forward notices and redraw requests to the UI
//! }
//! ```

pub mod camera;
pub mod error;
pub mod picking;
pub mod presets;
pub mod scene;
pub mod selection;
pub mod session;
pub mod settings;

pub use camera::{
    CameraProjector, CameraState, OrthoSettings, PerspectiveSettings, ProjectionMode, Viewport,
    PERSPECTIVE_FOV_DEGREES,
};
pub use error::{Result, ViewerError};
pub use picking::{distance_to_segment, DepthSampler, PickingEngine};
pub use presets::{story_preset, view_presets, ViewPreset};
pub use scene::{Renderer, Scene, SceneElement};
pub use selection::{SelectionChange, SelectionSource, SelectionSynchronizer};
pub use session::{ViewerEvent, ViewerSession, NO_SELECTION_NOTICE};
pub use settings::{CategorySettings, CategoryStyle, Color, PickingSettings, ViewerSettings};
