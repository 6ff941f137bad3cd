// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # STB-Lite Geometry
//!
//! Display and picking geometry for ST-Bridge elements. Each element adapter
//! from `stb-lite-model` describes itself as one of a few shape families;
//! this crate turns those into viewer-space outlines, hit-test boundaries
//! and triangulated fills.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stb_lite_geometry::build_element_geometry;
//! use stb_lite_model::StbResolver;
//!
//! let resolver = StbResolver::new(&doc.model);
//! let geometry = build_element_geometry(&doc.model.members.slabs[0], &resolver)?;
//! println!("{} holes", geometry.outlines.len() - 1);
//! ```

pub mod bounds;
pub mod error;
pub mod fill;
pub mod shape;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use bounds::ModelBounds;
pub use error::{Error, Result};
pub use fill::{polygon_normal, triangulate_fill, FillMesh};
pub use shape::{
    build_element_geometry, build_shape, opening_holes, to_viewer, BoundingGeometry,
    ElementGeometry, SCALE_FACTOR,
};
