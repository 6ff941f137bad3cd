// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model element capability
//!
//! Each element variant is a thin adapter: it names the nodes and offsets
//! that feed one of a few shape families, and the catalog tables that hold
//! its section and joint data. Geometry construction and panel assembly
//! live in the geometry and inspect crates.

use crate::{ElementKind, ElementRef, Inspect, KindStructure, ModelResolver, Position, Result};

/// Title of the member panel
pub const MEMBER_PANEL: &str = "Member";
/// Title of the cross-section panel
pub const SECTION_PANEL: &str = "Section";
/// Title of the start (or bottom) joint panel
pub const JOINT_START_PANEL: &str = "Joint start";
/// Title of the end (or top) joint panel
pub const JOINT_END_PANEL: &str = "Joint end";

/// Catalog table a cross reference points into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    SecColumnRc,
    SecColumnS,
    SecColumnSrc,
    SecColumnCft,
    SecBeamRc,
    SecBeamS,
    SecBeamSrc,
    SecBraceS,
    SecSlabRc,
    SecSlabDeck,
    SecSlabPrecast,
    SecWallRc,
    SecParapetRc,
    SecFoundationRc,
    SecPileRc,
    SecPileS,
    SecPilePrecast,
    SecOpenRc,
    /// Column joints (shape H, T and cross searched in that order)
    JointColumn,
    /// Beam joints (shape H)
    JointBeam,
}

impl Table {
    /// Schema name of the table
    pub fn name(&self) -> &'static str {
        match self {
            Table::SecColumnRc => "StbSecColumn_RC",
            Table::SecColumnS => "StbSecColumn_S",
            Table::SecColumnSrc => "StbSecColumn_SRC",
            Table::SecColumnCft => "StbSecColumn_CFT",
            Table::SecBeamRc => "StbSecBeam_RC",
            Table::SecBeamS => "StbSecBeam_S",
            Table::SecBeamSrc => "StbSecBeam_SRC",
            Table::SecBraceS => "StbSecBrace_S",
            Table::SecSlabRc => "StbSecSlab_RC",
            Table::SecSlabDeck => "StbSecSlabDeck",
            Table::SecSlabPrecast => "StbSecSlabPrecast",
            Table::SecWallRc => "StbSecWall_RC",
            Table::SecParapetRc => "StbSecParapet_RC",
            Table::SecFoundationRc => "StbSecFoundation_RC",
            Table::SecPileRc => "StbSecPile_RC",
            Table::SecPileS => "StbSecPile_S",
            Table::SecPilePrecast => "StbSecPilePrecast",
            Table::SecOpenRc => "StbSecOpen_RC",
            Table::JointColumn => "StbJointColumn",
            Table::JointBeam => "StbJointBeamShapeH",
        }
    }

    /// Column section table for a structural kind
    pub fn column_section(kind: KindStructure) -> Option<Table> {
        match kind {
            KindStructure::Rc => Some(Table::SecColumnRc),
            KindStructure::S => Some(Table::SecColumnS),
            KindStructure::Src => Some(Table::SecColumnSrc),
            KindStructure::Cft => Some(Table::SecColumnCft),
            _ => None,
        }
    }

    /// Beam section table for a structural kind
    pub fn beam_section(kind: KindStructure) -> Option<Table> {
        match kind {
            KindStructure::Rc => Some(Table::SecBeamRc),
            KindStructure::S => Some(Table::SecBeamS),
            KindStructure::Src => Some(Table::SecBeamSrc),
            _ => None,
        }
    }
}

/// Reference from an element to a catalog entry
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CrossRef {
    pub table: Table,
    pub key: String,
}

impl CrossRef {
    pub fn new(table: Table, key: impl Into<String>) -> Self {
        Self {
            table,
            key: key.into(),
        }
    }
}

/// One additional detail panel and the catalog entries that fill it
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSource {
    pub title: &'static str,
    pub targets: Vec<CrossRef>,
}

impl PanelSource {
    /// Panel backed by a single entry
    pub fn single(title: &'static str, table: Table, key: impl Into<String>) -> Self {
        Self {
            title,
            targets: vec![CrossRef::new(table, key)],
        }
    }

    /// Section panel, present only when the structural kind maps to a table
    pub fn section(table: Option<Table>, key: &str) -> Option<Self> {
        table.map(|t| Self::single(SECTION_PANEL, t, key))
    }
}

/// Rectangular opening in the local basis of a planar member (mm)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpeningSpec {
    pub position_x: f64,
    pub position_y: f64,
    pub length_x: f64,
    pub length_y: f64,
}

/// Shape family of an element, in model millimetres
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeSpec {
    /// Single point
    Point(Position),
    /// Straight member between two points
    Segment { start: Position, end: Position },
    /// Straight member shifted sideways by `lateral` (horizontal normal)
    OffsetSegment {
        start: Position,
        end: Position,
        lateral: f64,
    },
    /// Planar outline with rectangular openings
    Planar {
        vertices: Vec<Position>,
        openings: Vec<OpeningSpec>,
    },
    /// Vertical rectangle rising `height` above a laterally shifted line
    Upstand {
        start: Position,
        end: Position,
        lateral: f64,
        height: f64,
    },
    /// Two collinear segments picked as one
    Pair {
        first: [Position; 2],
        second: [Position; 2],
    },
}

/// Shape plus the analysis nodes it hangs from
#[derive(Clone, Debug, PartialEq)]
pub struct ElementShape {
    pub spec: ShapeSpec,
    pub analysis_nodes: Vec<Position>,
}

/// A structural element that can be shown, picked and inspected
pub trait ModelElement: Inspect {
    /// Element variant
    fn kind(&self) -> ElementKind;

    /// Element id, unique per variant
    fn element_id(&self) -> &str;

    /// Identity used by selection and the tree
    fn element_ref(&self) -> ElementRef {
        ElementRef::new(self.kind(), self.element_id())
    }

    /// Shape family and analysis nodes
    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape>;

    /// Additional panels in display order
    fn additional_panels(&self) -> Vec<PanelSource> {
        Vec::new()
    }
}
