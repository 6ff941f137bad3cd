// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry construction

use stb_lite_model::ModelError;
use thiserror::Error;

/// Geometry construction result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Node, section or attribute lookup failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Too few vertices for the requested construction
    #[error("Need at least {required} vertices, got {actual}")]
    InvalidGeometryCount { required: usize, actual: usize },

    /// Zero-length direction or collapsed plane
    #[error("Degenerate geometry: {0}")]
    Degenerate(String),

    /// Triangulation error
    #[error("Triangulation error: {0}")]
    Triangulation(String),
}

impl Error {
    /// Create a vertex count error
    pub fn invalid_count(required: usize, actual: usize) -> Self {
        Error::InvalidGeometryCount { required, actual }
    }

    /// Create a degenerate geometry error
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Error::Degenerate(msg.into())
    }

    /// Create a triangulation error
    pub fn triangulation(msg: impl Into<String>) -> Self {
        Error::Triangulation(msg.into())
    }

    /// Whether the failure is a missing cross reference
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Model(e) if e.is_not_found())
    }
}
