// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model inspection and cross-reference lookups

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while inspecting or resolving an ST-Bridge model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The field table of an object could not be produced
    #[error("Cannot inspect {type_name}: {message}")]
    IntrospectionFault { type_name: String, message: String },

    /// A referenced catalog entry, section, joint or node does not exist
    #[error("{table} '{key}' not found")]
    CrossReferenceNotFound { table: String, key: String },

    /// Attribute content that cannot be interpreted
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ModelError {
    /// Create an introspection fault
    pub fn introspection(type_name: impl Into<String>, msg: impl Into<String>) -> Self {
        ModelError::IntrospectionFault {
            type_name: type_name.into(),
            message: msg.into(),
        }
    }

    /// Create a cross-reference miss
    pub fn not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        ModelError::CrossReferenceNotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ModelError::InvalidValue {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Whether this error is a missing cross reference
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::CrossReferenceNotFound { .. })
    }
}
