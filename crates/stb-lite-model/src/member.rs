// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural members
//!
//! Columns and posts share one definition, as do girders and beams; the
//! variant is carried by a zero-sized tag type.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::{
    ElementKind, ElementShape, Field, Inspect, KindStructure, ModelElement, ModelError,
    ModelResolver, OpeningSpec, PanelSource, Position, Result, ShapeSpec, Table,
    JOINT_END_PANEL, JOINT_START_PANEL, SECTION_PANEL,
};

/// Marker for member variants that share a layout
pub trait MemberTag {
    const TYPE_NAME: &'static str;
    const KIND: ElementKind;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnTag;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PostTag;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GirderTag;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BeamTag;

impl MemberTag for ColumnTag {
    const TYPE_NAME: &'static str = "StbColumn";
    const KIND: ElementKind = ElementKind::Column;
}

impl MemberTag for PostTag {
    const TYPE_NAME: &'static str = "StbPost";
    const KIND: ElementKind = ElementKind::Post;
}

impl MemberTag for GirderTag {
    const TYPE_NAME: &'static str = "StbGirder";
    const KIND: ElementKind = ElementKind::Girder;
}

impl MemberTag for BeamTag {
    const TYPE_NAME: &'static str = "StbBeam";
    const KIND: ElementKind = ElementKind::Beam;
}

fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or_default()
}

/// Member running from a bottom node to a top node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StbVerticalMember<T: MemberTag> {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_node_bottom: String,
    pub id_node_top: String,
    #[serde(default)]
    pub rotate: Option<f64>,
    pub id_section: String,
    pub kind_structure: KindStructure,
    #[serde(rename = "offset_bottom_X", default)]
    pub offset_bottom_x: Option<f64>,
    #[serde(rename = "offset_bottom_Y", default)]
    pub offset_bottom_y: Option<f64>,
    #[serde(rename = "offset_bottom_Z", default)]
    pub offset_bottom_z: Option<f64>,
    #[serde(rename = "offset_top_X", default)]
    pub offset_top_x: Option<f64>,
    #[serde(rename = "offset_top_Y", default)]
    pub offset_top_y: Option<f64>,
    #[serde(rename = "offset_top_Z", default)]
    pub offset_top_z: Option<f64>,
    #[serde(default)]
    pub condition_bottom: Option<String>,
    #[serde(default)]
    pub condition_top: Option<String>,
    #[serde(default)]
    pub joint_id_bottom: Option<String>,
    #[serde(default)]
    pub joint_id_top: Option<String>,
    #[serde(skip)]
    pub tag: PhantomData<T>,
}

pub type StbColumn = StbVerticalMember<ColumnTag>;
pub type StbPost = StbVerticalMember<PostTag>;

impl<T: MemberTag> Inspect for StbVerticalMember<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::node_ref("id_node_bottom", &self.id_node_bottom),
            Field::node_ref("id_node_top", &self.id_node_top),
            Field::specified("rotate", self.rotate),
            Field::attr("id_section", &self.id_section),
            Field::attr("kind_structure", self.kind_structure),
            Field::specified("offset_bottom_X", self.offset_bottom_x),
            Field::specified("offset_bottom_Y", self.offset_bottom_y),
            Field::specified("offset_bottom_Z", self.offset_bottom_z),
            Field::specified("offset_top_X", self.offset_top_x),
            Field::specified("offset_top_Y", self.offset_top_y),
            Field::specified("offset_top_Z", self.offset_top_z),
            Field::optional("condition_bottom", self.condition_bottom.as_ref()),
            Field::optional("condition_top", self.condition_top.as_ref()),
            Field::optional("joint_id_bottom", self.joint_id_bottom.as_ref()),
            Field::optional("joint_id_top", self.joint_id_top.as_ref()),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl<T: MemberTag> ModelElement for StbVerticalMember<T> {
    fn kind(&self) -> ElementKind {
        T::KIND
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        let bottom = resolver.require_node(&self.id_node_bottom)?;
        let top = resolver.require_node(&self.id_node_top)?;
        Ok(ElementShape {
            spec: ShapeSpec::Segment {
                start: bottom.offset_by(
                    or_zero(self.offset_bottom_x),
                    or_zero(self.offset_bottom_y),
                    or_zero(self.offset_bottom_z),
                ),
                end: top.offset_by(
                    or_zero(self.offset_top_x),
                    or_zero(self.offset_top_y),
                    or_zero(self.offset_top_z),
                ),
            },
            analysis_nodes: vec![bottom.position(), top.position()],
        })
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        let mut panels: Vec<PanelSource> = PanelSource::section(
            Table::column_section(self.kind_structure),
            &self.id_section,
        )
        .into_iter()
        .collect();
        if let Some(joint) = &self.joint_id_bottom {
            panels.push(PanelSource::single(JOINT_START_PANEL, Table::JointColumn, joint));
        }
        if let Some(joint) = &self.joint_id_top {
            panels.push(PanelSource::single(JOINT_END_PANEL, Table::JointColumn, joint));
        }
        panels
    }
}

/// Member running from a start node to an end node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StbHorizontalMember<T: MemberTag> {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_node_start: String,
    pub id_node_end: String,
    #[serde(default)]
    pub rotate: Option<f64>,
    pub id_section: String,
    pub kind_structure: KindStructure,
    #[serde(rename = "isFoundation", default)]
    pub is_foundation: Option<bool>,
    #[serde(rename = "offset_start_X", default)]
    pub offset_start_x: Option<f64>,
    #[serde(rename = "offset_start_Y", default)]
    pub offset_start_y: Option<f64>,
    #[serde(rename = "offset_start_Z", default)]
    pub offset_start_z: Option<f64>,
    #[serde(rename = "offset_end_X", default)]
    pub offset_end_x: Option<f64>,
    #[serde(rename = "offset_end_Y", default)]
    pub offset_end_y: Option<f64>,
    #[serde(rename = "offset_end_Z", default)]
    pub offset_end_z: Option<f64>,
    #[serde(default)]
    pub joint_id_start: Option<String>,
    #[serde(default)]
    pub joint_id_end: Option<String>,
    #[serde(skip)]
    pub tag: PhantomData<T>,
}

pub type StbGirder = StbHorizontalMember<GirderTag>;
pub type StbBeam = StbHorizontalMember<BeamTag>;

impl<T: MemberTag> Inspect for StbHorizontalMember<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::node_ref("id_node_start", &self.id_node_start),
            Field::node_ref("id_node_end", &self.id_node_end),
            Field::specified("rotate", self.rotate),
            Field::attr("id_section", &self.id_section),
            Field::attr("kind_structure", self.kind_structure),
            Field::optional("isFoundation", self.is_foundation),
            Field::specified("offset_start_X", self.offset_start_x),
            Field::specified("offset_start_Y", self.offset_start_y),
            Field::specified("offset_start_Z", self.offset_start_z),
            Field::specified("offset_end_X", self.offset_end_x),
            Field::specified("offset_end_Y", self.offset_end_y),
            Field::specified("offset_end_Z", self.offset_end_z),
            Field::optional("joint_id_start", self.joint_id_start.as_ref()),
            Field::optional("joint_id_end", self.joint_id_end.as_ref()),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl<T: MemberTag> ModelElement for StbHorizontalMember<T> {
    fn kind(&self) -> ElementKind {
        T::KIND
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        let start = resolver.require_node(&self.id_node_start)?;
        let end = resolver.require_node(&self.id_node_end)?;
        Ok(ElementShape {
            spec: ShapeSpec::Segment {
                start: start.offset_by(
                    or_zero(self.offset_start_x),
                    or_zero(self.offset_start_y),
                    or_zero(self.offset_start_z),
                ),
                end: end.offset_by(
                    or_zero(self.offset_end_x),
                    or_zero(self.offset_end_y),
                    or_zero(self.offset_end_z),
                ),
            },
            analysis_nodes: vec![start.position(), end.position()],
        })
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        let mut panels: Vec<PanelSource> =
            PanelSource::section(Table::beam_section(self.kind_structure), &self.id_section)
                .into_iter()
                .collect();
        if let Some(joint) = &self.joint_id_start {
            panels.push(PanelSource::single(JOINT_START_PANEL, Table::JointBeam, joint));
        }
        if let Some(joint) = &self.joint_id_end {
            panels.push(PanelSource::single(JOINT_END_PANEL, Table::JointBeam, joint));
        }
        panels
    }
}

/// Brace between two nodes, shifted by aim offsets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbBrace {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_node_start: String,
    pub id_node_end: String,
    #[serde(default)]
    pub rotate: Option<f64>,
    pub id_section: String,
    pub kind_structure: KindStructure,
    #[serde(default)]
    pub feature_brace: Option<String>,
    #[serde(rename = "aim_offset_start_X", default)]
    pub aim_offset_start_x: Option<f64>,
    #[serde(rename = "aim_offset_start_Y", default)]
    pub aim_offset_start_y: Option<f64>,
    #[serde(rename = "aim_offset_start_Z", default)]
    pub aim_offset_start_z: Option<f64>,
    #[serde(rename = "aim_offset_end_X", default)]
    pub aim_offset_end_x: Option<f64>,
    #[serde(rename = "aim_offset_end_Y", default)]
    pub aim_offset_end_y: Option<f64>,
    #[serde(rename = "aim_offset_end_Z", default)]
    pub aim_offset_end_z: Option<f64>,
}

impl Inspect for StbBrace {
    fn type_name(&self) -> &'static str {
        "StbBrace"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::node_ref("id_node_start", &self.id_node_start),
            Field::node_ref("id_node_end", &self.id_node_end),
            Field::specified("rotate", self.rotate),
            Field::attr("id_section", &self.id_section),
            Field::attr("kind_structure", self.kind_structure),
            Field::optional("feature_brace", self.feature_brace.as_ref()),
            Field::specified("aim_offset_start_X", self.aim_offset_start_x),
            Field::specified("aim_offset_start_Y", self.aim_offset_start_y),
            Field::specified("aim_offset_start_Z", self.aim_offset_start_z),
            Field::specified("aim_offset_end_X", self.aim_offset_end_x),
            Field::specified("aim_offset_end_Y", self.aim_offset_end_y),
            Field::specified("aim_offset_end_Z", self.aim_offset_end_z),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbBrace {
    fn kind(&self) -> ElementKind {
        ElementKind::Brace
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        let start = resolver.require_node(&self.id_node_start)?;
        let end = resolver.require_node(&self.id_node_end)?;
        Ok(ElementShape {
            spec: ShapeSpec::Segment {
                start: start.offset_by(
                    or_zero(self.aim_offset_start_x),
                    or_zero(self.aim_offset_start_y),
                    or_zero(self.aim_offset_start_z),
                ),
                end: end.offset_by(
                    or_zero(self.aim_offset_end_x),
                    or_zero(self.aim_offset_end_y),
                    or_zero(self.aim_offset_end_z),
                ),
            },
            analysis_nodes: vec![start.position(), end.position()],
        })
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        let table = match self.kind_structure {
            KindStructure::S => Some(Table::SecBraceS),
            _ => None,
        };
        PanelSource::section(table, &self.id_section)
            .into_iter()
            .collect()
    }
}

/// Marker for the two per-node offset list variants
pub trait OffsetTag {
    const TYPE_NAME: &'static str;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WallOffsetTag;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlabOffsetTag;

impl OffsetTag for WallOffsetTag {
    const TYPE_NAME: &'static str = "StbWallOffset";
}

impl OffsetTag for SlabOffsetTag {
    const TYPE_NAME: &'static str = "StbSlabOffset";
}

/// Offset of one polygon vertex from its node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StbNodeOffset<T: OffsetTag> {
    pub id_node: String,
    #[serde(rename = "offset_X")]
    pub offset_x: f64,
    #[serde(rename = "offset_Y")]
    pub offset_y: f64,
    #[serde(rename = "offset_Z")]
    pub offset_z: f64,
    #[serde(skip)]
    pub tag: PhantomData<T>,
}

pub type StbWallOffset = StbNodeOffset<WallOffsetTag>;
pub type StbSlabOffset = StbNodeOffset<SlabOffsetTag>;

impl<T: OffsetTag> StbNodeOffset<T> {
    /// Create an offset entry
    pub fn new(id_node: impl Into<String>, offset: [f64; 3]) -> Self {
        Self {
            id_node: id_node.into(),
            offset_x: offset[0],
            offset_y: offset[1],
            offset_z: offset[2],
            tag: PhantomData,
        }
    }

    /// Offset components
    pub fn components(&self) -> [f64; 3] {
        [self.offset_x, self.offset_y, self.offset_z]
    }
}

impl<T: OffsetTag> Inspect for StbNodeOffset<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::node_ref("id_node", &self.id_node),
            Field::attr("offset_X", self.offset_x),
            Field::attr("offset_Y", self.offset_y),
            Field::attr("offset_Z", self.offset_z),
        ])
    }
}

/// Opening reference listed on a planar member
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbOpenId {
    pub id: String,
}

impl Inspect for StbOpenId {
    fn type_name(&self) -> &'static str {
        "StbOpenId"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::attr("id", &self.id)])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// Placement of an opening on a slab or wall
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbOpenArrangement {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub id_member: String,
    pub kind_member: String,
    pub id_section: String,
    #[serde(rename = "position_X")]
    pub position_x: f64,
    #[serde(rename = "position_Y")]
    pub position_y: f64,
    #[serde(default)]
    pub rotate: Option<f64>,
}

impl Inspect for StbOpenArrangement {
    fn type_name(&self) -> &'static str {
        "StbOpenArrangement"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::optional("name", self.name.as_ref()),
            Field::attr("id_member", &self.id_member),
            Field::attr("kind_member", &self.kind_member),
            Field::attr("id_section", &self.id_section),
            Field::attr("position_X", self.position_x),
            Field::attr("position_Y", self.position_y),
            Field::specified("rotate", self.rotate),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl StbOpenArrangement {
    /// Kind of the member the opening is placed in
    pub fn member_kind(&self) -> Option<ElementKind> {
        match self.kind_member.as_str() {
            "SLAB" => Some(ElementKind::Slab),
            "WALL" => Some(ElementKind::Wall),
            _ => None,
        }
    }
}

/// Split a node-id order into ids
pub fn parse_node_id_order(order: &str) -> Result<Vec<&str>> {
    let ids: Vec<&str> = order.split_whitespace().collect();
    if ids.is_empty() {
        return Err(ModelError::invalid_value("StbNodeIdOrder", "no node ids"));
    }
    Ok(ids)
}

/// Polygon vertices, analysis nodes and openings of a planar member
fn planar_shape<T: OffsetTag>(
    resolver: &dyn ModelResolver,
    kind: ElementKind,
    member_id: &str,
    order: &str,
    offsets: &[StbNodeOffset<T>],
) -> Result<ElementShape> {
    let ids = parse_node_id_order(order)?;
    let mut vertices = Vec::with_capacity(ids.len());
    let mut analysis_nodes = Vec::with_capacity(ids.len());
    for id in ids {
        let node = resolver.require_node(id)?;
        let vertex: Position = match offsets.iter().find(|o| o.id_node == id) {
            Some(offset) => node.offset_by(offset.offset_x, offset.offset_y, offset.offset_z),
            None => node.position(),
        };
        vertices.push(vertex);
        analysis_nodes.push(node.position());
    }

    let mut openings = Vec::new();
    for open in resolver.openings_of(kind, member_id) {
        let section = resolver.open_section(&open.id_section)?;
        openings.push(OpeningSpec {
            position_x: open.position_x,
            position_y: open.position_y,
            length_x: section.length_x,
            length_y: section.length_y,
        });
    }

    Ok(ElementShape {
        spec: ShapeSpec::Planar { vertices, openings },
        analysis_nodes,
    })
}

/// Floor slab
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbSlab {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_section: String,
    pub kind_structure: KindStructure,
    #[serde(default)]
    pub kind_slab: Option<String>,
    #[serde(default)]
    pub direction_load: Option<String>,
    #[serde(rename = "isFoundation", default)]
    pub is_foundation: Option<bool>,
    #[serde(rename = "StbNodeIdOrder")]
    pub node_id_order: String,
    #[serde(rename = "StbSlabOffsetList", default)]
    pub offsets: Vec<StbSlabOffset>,
    #[serde(rename = "StbOpenIdList", default)]
    pub open_ids: Vec<StbOpenId>,
}

impl Inspect for StbSlab {
    fn type_name(&self) -> &'static str {
        "StbSlab"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("id_section", &self.id_section),
            Field::attr("kind_structure", self.kind_structure),
            Field::optional("kind_slab", self.kind_slab.as_ref()),
            Field::optional("direction_load", self.direction_load.as_ref()),
            Field::optional("isFoundation", self.is_foundation),
            Field::node_id_order(&self.node_id_order),
            Field::slab_offsets(&self.offsets),
            Field::open_ids(&self.open_ids),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbSlab {
    fn kind(&self) -> ElementKind {
        ElementKind::Slab
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        planar_shape(resolver, ElementKind::Slab, &self.id, &self.node_id_order, &self.offsets)
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        let table = match self.kind_structure {
            KindStructure::Rc => Some(Table::SecSlabRc),
            KindStructure::Deck => Some(Table::SecSlabDeck),
            KindStructure::Precast => Some(Table::SecSlabPrecast),
            _ => None,
        };
        PanelSource::section(table, &self.id_section)
            .into_iter()
            .collect()
    }
}

/// Wall
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbWall {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_section: String,
    pub kind_structure: KindStructure,
    #[serde(default)]
    pub kind_layout: Option<String>,
    #[serde(default)]
    pub kind_wall: Option<String>,
    #[serde(rename = "StbNodeIdOrder")]
    pub node_id_order: String,
    #[serde(rename = "StbWallOffsetList", default)]
    pub offsets: Vec<StbWallOffset>,
    #[serde(rename = "StbOpenIdList", default)]
    pub open_ids: Vec<StbOpenId>,
}

impl Inspect for StbWall {
    fn type_name(&self) -> &'static str {
        "StbWall"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("id_section", &self.id_section),
            Field::attr("kind_structure", self.kind_structure),
            Field::optional("kind_layout", self.kind_layout.as_ref()),
            Field::optional("kind_wall", self.kind_wall.as_ref()),
            Field::node_id_order(&self.node_id_order),
            Field::wall_offsets(&self.offsets),
            Field::open_ids(&self.open_ids),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbWall {
    fn kind(&self) -> ElementKind {
        ElementKind::Wall
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        planar_shape(resolver, ElementKind::Wall, &self.id, &self.node_id_order, &self.offsets)
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        let table = match self.kind_structure {
            KindStructure::Rc => Some(Table::SecWallRc),
            _ => None,
        };
        PanelSource::section(table, &self.id_section)
            .into_iter()
            .collect()
    }
}

/// Parapet standing on a line between two nodes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbParapet {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_section: String,
    pub kind_structure: KindStructure,
    #[serde(default)]
    pub kind_layout: Option<String>,
    pub id_node_start: String,
    pub id_node_end: String,
    /// Lateral shift, positive to the right of start to end seen from above
    #[serde(default)]
    pub offset: f64,
    /// Height of the upstand
    pub level: f64,
}

impl Inspect for StbParapet {
    fn type_name(&self) -> &'static str {
        "StbParapet"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("id_section", &self.id_section),
            Field::attr("kind_structure", self.kind_structure),
            Field::optional("kind_layout", self.kind_layout.as_ref()),
            Field::node_ref("id_node_start", &self.id_node_start),
            Field::node_ref("id_node_end", &self.id_node_end),
            Field::attr("offset", self.offset),
            Field::attr("level", self.level),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbParapet {
    fn kind(&self) -> ElementKind {
        ElementKind::Parapet
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        let start = resolver.require_node(&self.id_node_start)?;
        let end = resolver.require_node(&self.id_node_end)?;
        Ok(ElementShape {
            spec: ShapeSpec::Upstand {
                start: start.position(),
                end: end.position(),
                lateral: self.offset,
                height: self.level,
            },
            analysis_nodes: vec![start.position(), end.position()],
        })
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        let table = match self.kind_structure {
            KindStructure::Rc => Some(Table::SecParapetRc),
            _ => None,
        };
        PanelSource::section(table, &self.id_section)
            .into_iter()
            .collect()
    }
}

/// Isolated footing under one node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbFooting {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_node: String,
    #[serde(default)]
    pub rotate: f64,
    pub id_section: String,
    #[serde(rename = "offset_X", default)]
    pub offset_x: f64,
    #[serde(rename = "offset_Y", default)]
    pub offset_y: f64,
    pub level_bottom: f64,
}

impl Inspect for StbFooting {
    fn type_name(&self) -> &'static str {
        "StbFooting"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::node_ref("id_node", &self.id_node),
            Field::attr("rotate", self.rotate),
            Field::attr("id_section", &self.id_section),
            Field::attr("offset_X", self.offset_x),
            Field::attr("offset_Y", self.offset_y),
            Field::attr("level_bottom", self.level_bottom),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbFooting {
    fn kind(&self) -> ElementKind {
        ElementKind::Footing
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        let node = resolver.require_node(&self.id_node)?;
        Ok(ElementShape {
            spec: ShapeSpec::Point(node.offset_by(self.offset_x, self.offset_y, self.level_bottom)),
            analysis_nodes: vec![node.position()],
        })
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        vec![PanelSource::single(
            SECTION_PANEL,
            Table::SecFoundationRc,
            &self.id_section,
        )]
    }
}

/// Continuous footing along a line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbStripFooting {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_node_start: String,
    pub id_node_end: String,
    pub id_section: String,
    pub kind_structure: KindStructure,
    /// Lateral shift, positive to the right of start to end seen from above
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub level: Option<f64>,
}

impl Inspect for StbStripFooting {
    fn type_name(&self) -> &'static str {
        "StbStripFooting"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::node_ref("id_node_start", &self.id_node_start),
            Field::node_ref("id_node_end", &self.id_node_end),
            Field::attr("id_section", &self.id_section),
            Field::attr("kind_structure", self.kind_structure),
            Field::attr("offset", self.offset),
            Field::specified("level", self.level),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbStripFooting {
    fn kind(&self) -> ElementKind {
        ElementKind::StripFooting
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        let start = resolver.require_node(&self.id_node_start)?;
        let end = resolver.require_node(&self.id_node_end)?;
        Ok(ElementShape {
            spec: ShapeSpec::OffsetSegment {
                start: start.position(),
                end: end.position(),
                lateral: self.offset,
            },
            analysis_nodes: vec![start.position(), end.position()],
        })
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        vec![PanelSource::single(
            SECTION_PANEL,
            Table::SecFoundationRc,
            &self.id_section,
        )]
    }
}

/// Pile hanging below a node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbPile {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_node: String,
    pub id_section: String,
    pub kind_structure: KindStructure,
    #[serde(default)]
    pub kind_pile: Option<String>,
    pub length_all: f64,
    #[serde(rename = "offset_X", default)]
    pub offset_x: f64,
    #[serde(rename = "offset_Y", default)]
    pub offset_y: f64,
    pub level_top: f64,
}

impl Inspect for StbPile {
    fn type_name(&self) -> &'static str {
        "StbPile"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::node_ref("id_node", &self.id_node),
            Field::attr("id_section", &self.id_section),
            Field::attr("kind_structure", self.kind_structure),
            Field::optional("kind_pile", self.kind_pile.as_ref()),
            Field::attr("length_all", self.length_all),
            Field::attr("offset_X", self.offset_x),
            Field::attr("offset_Y", self.offset_y),
            Field::attr("level_top", self.level_top),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbPile {
    fn kind(&self) -> ElementKind {
        ElementKind::Pile
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        let node = resolver.require_node(&self.id_node)?;
        let top = node.offset_by(self.offset_x, self.offset_y, self.level_top);
        let bottom = [top[0], top[1], top[2] - self.length_all];
        Ok(ElementShape {
            spec: ShapeSpec::Segment { start: top, end: bottom },
            analysis_nodes: vec![node.position()],
        })
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        let table = match self.kind_structure {
            KindStructure::Rc => Some(Table::SecPileRc),
            KindStructure::S => Some(Table::SecPileS),
            KindStructure::Pc => Some(Table::SecPilePrecast),
            _ => None,
        };
        PanelSource::section(table, &self.id_section)
            .into_iter()
            .collect()
    }
}

/// Foundation column: a foundation part below and a wall-rise part above one node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbFoundationColumn {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub id_node: String,
    pub kind_structure: KindStructure,
    #[serde(rename = "id_section_FD", default)]
    pub id_section_fd: Option<String>,
    #[serde(rename = "id_section_WR", default)]
    pub id_section_wr: Option<String>,
    #[serde(default)]
    pub rotate: f64,
    #[serde(rename = "offset_FD_X", default)]
    pub offset_fd_x: f64,
    #[serde(rename = "offset_FD_Y", default)]
    pub offset_fd_y: f64,
    #[serde(rename = "offset_WR_X", default)]
    pub offset_wr_x: f64,
    #[serde(rename = "offset_WR_Y", default)]
    pub offset_wr_y: f64,
    #[serde(rename = "offset_Z", default)]
    pub offset_z: f64,
    #[serde(rename = "length_FD")]
    pub length_fd: f64,
    #[serde(rename = "length_WR")]
    pub length_wr: f64,
}

impl Inspect for StbFoundationColumn {
    fn type_name(&self) -> &'static str {
        "StbFoundationColumn"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::node_ref("id_node", &self.id_node),
            Field::attr("kind_structure", self.kind_structure),
            Field::optional("id_section_FD", self.id_section_fd.as_ref()),
            Field::optional("id_section_WR", self.id_section_wr.as_ref()),
            Field::attr("rotate", self.rotate),
            Field::attr("offset_FD_X", self.offset_fd_x),
            Field::attr("offset_FD_Y", self.offset_fd_y),
            Field::attr("offset_WR_X", self.offset_wr_x),
            Field::attr("offset_WR_Y", self.offset_wr_y),
            Field::attr("offset_Z", self.offset_z),
            Field::attr("length_FD", self.length_fd),
            Field::attr("length_WR", self.length_wr),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbFoundationColumn {
    fn kind(&self) -> ElementKind {
        ElementKind::FoundationColumn
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, resolver: &dyn ModelResolver) -> Result<ElementShape> {
        let node = resolver.require_node(&self.id_node)?;
        let fd_top = node.offset_by(self.offset_fd_x, self.offset_fd_y, self.offset_z);
        let fd_bottom = [fd_top[0], fd_top[1], fd_top[2] - self.length_fd];
        let wr_bottom = node.offset_by(self.offset_wr_x, self.offset_wr_y, self.offset_z);
        let wr_top = [wr_bottom[0], wr_bottom[1], wr_bottom[2] + self.length_wr];
        Ok(ElementShape {
            spec: ShapeSpec::Pair {
                first: [fd_bottom, fd_top],
                second: [wr_bottom, wr_top],
            },
            analysis_nodes: vec![node.position()],
        })
    }

    fn additional_panels(&self) -> Vec<PanelSource> {
        if self.kind_structure != KindStructure::Rc {
            return Vec::new();
        }
        let targets: Vec<_> = [&self.id_section_fd, &self.id_section_wr]
            .into_iter()
            .flatten()
            .map(|id| crate::CrossRef::new(Table::SecColumnRc, id))
            .collect();
        if targets.is_empty() {
            return Vec::new();
        }
        vec![PanelSource {
            title: SECTION_PANEL,
            targets,
        }]
    }
}

/// All members of the model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbMembers {
    #[serde(rename = "StbColumns", default)]
    pub columns: Vec<StbColumn>,
    #[serde(rename = "StbPosts", default)]
    pub posts: Vec<StbPost>,
    #[serde(rename = "StbGirders", default)]
    pub girders: Vec<StbGirder>,
    #[serde(rename = "StbBeams", default)]
    pub beams: Vec<StbBeam>,
    #[serde(rename = "StbBraces", default)]
    pub braces: Vec<StbBrace>,
    #[serde(rename = "StbSlabs", default)]
    pub slabs: Vec<StbSlab>,
    #[serde(rename = "StbWalls", default)]
    pub walls: Vec<StbWall>,
    #[serde(rename = "StbParapets", default)]
    pub parapets: Vec<StbParapet>,
    #[serde(rename = "StbFootings", default)]
    pub footings: Vec<StbFooting>,
    #[serde(rename = "StbStripFootings", default)]
    pub strip_footings: Vec<StbStripFooting>,
    #[serde(rename = "StbPiles", default)]
    pub piles: Vec<StbPile>,
    #[serde(rename = "StbFoundationColumns", default)]
    pub foundation_columns: Vec<StbFoundationColumn>,
    #[serde(rename = "StbOpenArrangements", default)]
    pub open_arrangements: Vec<StbOpenArrangement>,
}

impl StbMembers {
    /// Find a member element by kind and id
    pub fn find(&self, kind: ElementKind, id: &str) -> Option<&dyn ModelElement> {
        fn by_id<'a, T: ModelElement>(items: &'a [T], id: &str) -> Option<&'a dyn ModelElement> {
            items
                .iter()
                .find(|m| m.element_id() == id)
                .map(|m| m as &dyn ModelElement)
        }
        match kind {
            ElementKind::Node => None,
            ElementKind::Column => by_id(&self.columns, id),
            ElementKind::Post => by_id(&self.posts, id),
            ElementKind::Girder => by_id(&self.girders, id),
            ElementKind::Beam => by_id(&self.beams, id),
            ElementKind::Brace => by_id(&self.braces, id),
            ElementKind::Slab => by_id(&self.slabs, id),
            ElementKind::Wall => by_id(&self.walls, id),
            ElementKind::Parapet => by_id(&self.parapets, id),
            ElementKind::Footing => by_id(&self.footings, id),
            ElementKind::StripFooting => by_id(&self.strip_footings, id),
            ElementKind::Pile => by_id(&self.piles, id),
            ElementKind::FoundationColumn => by_id(&self.foundation_columns, id),
        }
    }
}

impl Inspect for StbMembers {
    fn type_name(&self) -> &'static str {
        "StbMembers"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::list("StbColumns", &self.columns),
            Field::list("StbPosts", &self.posts),
            Field::list("StbGirders", &self.girders),
            Field::list("StbBeams", &self.beams),
            Field::list("StbBraces", &self.braces),
            Field::list("StbSlabs", &self.slabs),
            Field::list("StbWalls", &self.walls),
            Field::list("StbParapets", &self.parapets),
            Field::list("StbFootings", &self.footings),
            Field::list("StbStripFootings", &self.strip_footings),
            Field::list("StbPiles", &self.piles),
            Field::list("StbFoundationColumns", &self.foundation_columns),
            Field::list("StbOpenArrangements", &self.open_arrangements),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StbModel, StbResolver};

    fn model() -> StbModel {
        serde_json::from_str(
            r#"{
                "StbNodes": [
                    {"id":"1","X":0.0,"Y":0.0,"Z":0.0},
                    {"id":"2","X":0.0,"Y":0.0,"Z":3000.0},
                    {"id":"3","X":6000.0,"Y":0.0,"Z":3000.0},
                    {"id":"4","X":6000.0,"Y":4000.0,"Z":3000.0},
                    {"id":"5","X":0.0,"Y":4000.0,"Z":3000.0}
                ],
                "StbMembers": {
                    "StbColumns": [{
                        "id":"10","name":"C1","id_node_bottom":"1","id_node_top":"2",
                        "id_section":"100","kind_structure":"S",
                        "offset_top_X":50.0,"joint_id_top":"900"
                    }],
                    "StbSlabs": [{
                        "id":"20","name":"S1","id_section":"200","kind_structure":"RC",
                        "StbNodeIdOrder":"2 3 4 5",
                        "StbSlabOffsetList":[{"id_node":"3","offset_X":0.0,"offset_Y":0.0,"offset_Z":-150.0}]
                    }],
                    "StbPiles": [{
                        "id":"30","name":"P1","id_node":"1","id_section":"300",
                        "kind_structure":"PC","length_all":12000.0,"level_top":-1500.0
                    }],
                    "StbOpenArrangements": [{
                        "id":"40","id_member":"20","kind_member":"SLAB","id_section":"400",
                        "position_X":1000.0,"position_Y":500.0
                    }]
                },
                "StbSections": {
                    "StbSecOpen_RC": [{"id":"400","name":"OP1","length_X":800.0,"length_Y":600.0}]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_column_shape_applies_offsets() {
        let model = model();
        let resolver = StbResolver::new(&model);
        let column = &model.members.columns[0];
        let shape = column.shape(&resolver).unwrap();
        assert_eq!(
            shape.spec,
            ShapeSpec::Segment {
                start: [0.0, 0.0, 0.0],
                end: [50.0, 0.0, 3000.0]
            }
        );
        assert_eq!(shape.analysis_nodes.len(), 2);
        assert_eq!(column.element_ref().to_string(), "StbColumn #10");
    }

    #[test]
    fn test_column_panels() {
        let model = model();
        let panels = model.members.columns[0].additional_panels();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].title, SECTION_PANEL);
        assert_eq!(panels[0].targets[0].table, Table::SecColumnS);
        assert_eq!(panels[1].title, JOINT_END_PANEL);
        assert_eq!(panels[1].targets[0].key, "900");
    }

    #[test]
    fn test_slab_shape_with_offsets_and_opening() {
        let model = model();
        let resolver = StbResolver::new(&model);
        let shape = model.members.slabs[0].shape(&resolver).unwrap();
        let ShapeSpec::Planar { vertices, openings } = shape.spec else {
            panic!("expected planar shape");
        };
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[1], [6000.0, 0.0, 2850.0]);
        assert_eq!(openings.len(), 1);
        assert_eq!(openings[0].length_x, 800.0);
        assert_eq!(openings[0].position_y, 500.0);
    }

    #[test]
    fn test_openings_match_member_kind() {
        let mut model = model();
        model.members.walls = serde_json::from_str(
            r#"[{
                "id":"20","name":"W1","id_section":"500","kind_structure":"RC",
                "StbNodeIdOrder":"2 3 4 5"
            }]"#,
        )
        .unwrap();
        model.members.open_arrangements[0].kind_member = "WALL".into();
        let resolver = StbResolver::new(&model);

        let ShapeSpec::Planar { openings, .. } = model.members.slabs[0].shape(&resolver).unwrap().spec
        else {
            panic!("expected planar shape");
        };
        assert!(openings.is_empty());

        let ShapeSpec::Planar { openings, .. } = model.members.walls[0].shape(&resolver).unwrap().spec
        else {
            panic!("expected planar shape");
        };
        assert_eq!(openings.len(), 1);
        assert_eq!(resolver.openings_of(ElementKind::Slab, "20").len(), 0);
    }

    #[test]
    fn test_slab_missing_node() {
        let mut model = model();
        model.members.slabs[0].node_id_order = "2 3 99".into();
        let resolver = StbResolver::new(&model);
        let err = model.members.slabs[0].shape(&resolver).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_pile_hangs_below_level_top() {
        let model = model();
        let resolver = StbResolver::new(&model);
        let shape = model.members.piles[0].shape(&resolver).unwrap();
        assert_eq!(
            shape.spec,
            ShapeSpec::Segment {
                start: [0.0, 0.0, -1500.0],
                end: [0.0, 0.0, -13500.0]
            }
        );
        assert_eq!(
            model.members.piles[0].additional_panels()[0].targets[0].table,
            Table::SecPilePrecast
        );
    }

    #[test]
    fn test_empty_node_id_order() {
        assert!(parse_node_id_order("  ").is_err());
        assert_eq!(parse_node_id_order("1 2  3").unwrap(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_find_member() {
        let model = model();
        let found = model.members.find(ElementKind::Slab, "20").unwrap();
        assert_eq!(found.type_name(), "StbSlab");
        assert!(model.members.find(ElementKind::Slab, "10").is_none());
    }
}
