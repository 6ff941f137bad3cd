// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nodes and stories

use serde::{Deserialize, Serialize};

use crate::{
    ElementKind, ElementShape, Field, Inspect, ModelElement, ModelResolver, Position, Result,
    ShapeSpec,
};

/// Analysis node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbNode {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id_member: Option<String>,
}

impl StbNode {
    /// Coordinates in millimetres
    pub fn position(&self) -> Position {
        [self.x, self.y, self.z]
    }

    /// Coordinates shifted by an offset
    pub fn offset_by(&self, dx: f64, dy: f64, dz: f64) -> Position {
        [self.x + dx, self.y + dy, self.z + dz]
    }

    /// `(X:.., Y:.., Z:..)` label used in detail panels
    pub fn coordinate_label(&self) -> String {
        format!("(X:{}, Y:{}, Z:{})", self.x, self.y, self.z)
    }
}

impl Inspect for StbNode {
    fn type_name(&self) -> &'static str {
        "StbNode"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("X", self.x),
            Field::attr("Y", self.y),
            Field::attr("Z", self.z),
            Field::optional("kind", self.kind.as_ref()),
            Field::optional("id_member", self.id_member.as_ref()),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn as_element(&self) -> Option<&dyn ModelElement> {
        Some(self)
    }
}

impl ModelElement for StbNode {
    fn kind(&self) -> ElementKind {
        ElementKind::Node
    }

    fn element_id(&self) -> &str {
        &self.id
    }

    fn shape(&self, _resolver: &dyn ModelResolver) -> Result<ElementShape> {
        Ok(ElementShape {
            spec: ShapeSpec::Point(self.position()),
            analysis_nodes: Vec::new(),
        })
    }
}

/// Reference to a node from a list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbNodeId {
    pub id: String,
}

impl Inspect for StbNodeId {
    fn type_name(&self) -> &'static str {
        "StbNodeId"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::attr("id", &self.id)])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// Story (floor level)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbStory {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    pub height: f64,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub strength_concrete: Option<String>,
    #[serde(rename = "StbNodeIdList", default)]
    pub node_ids: Vec<StbNodeId>,
}

impl Inspect for StbStory {
    fn type_name(&self) -> &'static str {
        "StbStory"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("height", self.height),
            Field::optional("kind", self.kind.as_ref()),
            Field::optional("strength_concrete", self.strength_concrete.as_ref()),
            Field::list("StbNodeIdList", &self.node_ids),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.name)
    }
}
