// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STB-Lite Model - ST-Bridge schema types and field tables
//!
//! This crate holds the parsed object graph of an ST-Bridge structural model
//! and the capabilities the viewer builds on.
//!
//! # Architecture
//!
//! - [`Inspect`] - Compile-time field table of every schema type, used for
//!   tree building and property panels
//! - [`ModelElement`] - Elements that have a shape, can be picked and carry
//!   additional section and joint panels
//! - [`ModelResolver`] - Node, catalog and steel-shape lookups
//!
//! # Example
//!
//! ```ignore
//! use stb_lite_model::{StBridge, StbResolver, ModelElement};
//!
//! let doc = StBridge::from_json(&json)?;
//! let resolver = StbResolver::new(&doc.model);
//! for column in &doc.model.members.columns {
//!     let shape = column.shape(&resolver)?;
//!     println!("{}: {:?}", column.element_ref(), shape.spec);
//! }
//! ```

pub mod axis;
pub mod document;
pub mod element;
pub mod error;
pub mod extension;
pub mod inspect;
pub mod joint;
pub mod member;
pub mod node;
pub mod resolver;
pub mod section;
pub mod steel;
pub mod types;

// Re-export all public types
pub use axis::*;
pub use document::*;
pub use element::*;
pub use error::*;
pub use extension::*;
pub use inspect::*;
pub use joint::*;
pub use member::*;
pub use node::*;
pub use resolver::*;
pub use section::*;
pub use steel::*;
pub use types::*;
