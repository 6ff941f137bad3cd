// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # STB-Lite Inspect
//!
//! Generic introspection over ST-Bridge model graphs, driven by the field
//! tables every schema type declares through
//! [`Inspect`](stb_lite_model::Inspect).
//!
//! - [`ModelGraphWalker`] turns a document into a navigable [`TreeNode`]
//!   tree with per-node detail text, collecting the model elements on the way.
//! - [`PropertyDetailBuilder`] assembles the member, section and joint
//!   [`Panel`]s of one element, resolving node and catalog references.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stb_lite_inspect::{ModelGraphWalker, PropertyDetailBuilder};
//! use stb_lite_model::StbResolver;
//!
//! let mut notices = Vec::new();
//! let mut elements = Vec::new();
//! let tree = ModelGraphWalker::new(&mut notices).build_tree(&doc, &mut elements, None);
//!
//! let resolver = StbResolver::new(&doc.model);
//! let mut panels = Vec::new();
//! PropertyDetailBuilder::new(&resolver, &mut notices)
//!     .build_element_panels(elements[0], &mut panels)?;
//! ```

pub mod notice;
pub mod property;
pub mod walker;

pub use notice::{DiscardNotices, NoticeSink};
pub use property::{Panel, PropertyDetailBuilder, PropertyRecord};
pub use walker::{ModelGraphWalker, TreeNode, TreeNodeIter};
