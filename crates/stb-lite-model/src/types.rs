// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core identifiers and enumerations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Model-space coordinate in millimetres
pub type Position = [f64; 3];

/// Closed set of element variants shown in the viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Node,
    Column,
    Post,
    Girder,
    Beam,
    Brace,
    Slab,
    Wall,
    Parapet,
    Footing,
    StripFooting,
    Pile,
    FoundationColumn,
}

impl ElementKind {
    /// All variants in registration order
    pub const ALL: [ElementKind; 13] = [
        ElementKind::Node,
        ElementKind::Column,
        ElementKind::Post,
        ElementKind::Girder,
        ElementKind::Beam,
        ElementKind::Brace,
        ElementKind::Slab,
        ElementKind::Wall,
        ElementKind::Parapet,
        ElementKind::Footing,
        ElementKind::StripFooting,
        ElementKind::Pile,
        ElementKind::FoundationColumn,
    ];

    /// Schema type name of the variant
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementKind::Node => "StbNode",
            ElementKind::Column => "StbColumn",
            ElementKind::Post => "StbPost",
            ElementKind::Girder => "StbGirder",
            ElementKind::Beam => "StbBeam",
            ElementKind::Brace => "StbBrace",
            ElementKind::Slab => "StbSlab",
            ElementKind::Wall => "StbWall",
            ElementKind::Parapet => "StbParapet",
            ElementKind::Footing => "StbFooting",
            ElementKind::StripFooting => "StbStripFooting",
            ElementKind::Pile => "StbPile",
            ElementKind::FoundationColumn => "StbFoundationColumn",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Identity of one model element, unique within a loaded model
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub id: String,
}

impl ElementRef {
    /// Create a new element reference
    pub fn new(kind: ElementKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind, self.id)
    }
}

/// Structural discriminant (`kind_structure`) of a member
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KindStructure {
    #[serde(rename = "RC")]
    Rc,
    #[serde(rename = "S")]
    S,
    #[serde(rename = "SRC")]
    Src,
    #[serde(rename = "CFT")]
    Cft,
    #[serde(rename = "DECK")]
    Deck,
    #[serde(rename = "PRECAST")]
    Precast,
    #[serde(rename = "PC")]
    Pc,
    #[serde(rename = "UNDEFINED")]
    Undefined,
}

impl KindStructure {
    /// Schema spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            KindStructure::Rc => "RC",
            KindStructure::S => "S",
            KindStructure::Src => "SRC",
            KindStructure::Cft => "CFT",
            KindStructure::Deck => "DECK",
            KindStructure::Precast => "PRECAST",
            KindStructure::Pc => "PC",
            KindStructure::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for KindStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ref_display() {
        let r = ElementRef::new(ElementKind::Column, "12");
        assert_eq!(r.to_string(), "StbColumn #12");
    }

    #[test]
    fn test_kind_structure_serde() {
        let kind: KindStructure = serde_json::from_str("\"CFT\"").unwrap();
        assert_eq!(kind, KindStructure::Cft);
        assert_eq!(kind.to_string(), "CFT");
    }
}
