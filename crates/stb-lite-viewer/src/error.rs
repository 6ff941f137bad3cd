// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the viewer core

use stb_lite_model::ModelError;
use thiserror::Error;

/// Viewer result type
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Viewer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewerError {
    /// Model lookup or introspection failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Element geometry could not be built
    #[error(transparent)]
    Geometry(#[from] stb_lite_geometry::Error),

    /// Settings could not be read or written
    #[error("Settings error: {0}")]
    Settings(String),

    /// Operation needs a loaded model
    #[error("No model is loaded")]
    NoModel,

    /// View preset index out of range
    #[error("View preset {0} does not exist")]
    UnknownPreset(usize),
}

impl ViewerError {
    /// Create a settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        ViewerError::Settings(msg.into())
    }
}
