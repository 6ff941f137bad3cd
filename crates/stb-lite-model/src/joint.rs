// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Steel joint catalog

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::{Field, Inspect, Result, Table};

/// Marker for joint tables that share a layout
pub trait JointTag {
    const TYPE_NAME: &'static str;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnShapeHTag;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnShapeTTag;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColumnShapeCrossTag;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BeamShapeHTag;

impl JointTag for ColumnShapeHTag {
    const TYPE_NAME: &'static str = "StbJointColumnShapeH";
}

impl JointTag for ColumnShapeTTag {
    const TYPE_NAME: &'static str = "StbJointColumnShapeT";
}

impl JointTag for ColumnShapeCrossTag {
    const TYPE_NAME: &'static str = "StbJointColumnShapeCross";
}

impl JointTag for BeamShapeHTag {
    const TYPE_NAME: &'static str = "StbJointBeamShapeH";
}

/// Flange splice plates and bolts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbJointFlange {
    pub name_bolt: String,
    pub count_bolt: u32,
    #[serde(default)]
    pub pitch_bolt: Option<f64>,
    #[serde(default)]
    pub thickness_plate_outside: Option<f64>,
    #[serde(default)]
    pub thickness_plate_inside: Option<f64>,
}

impl Inspect for StbJointFlange {
    fn type_name(&self) -> &'static str {
        "StbJointShapeHFlange"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("name_bolt", &self.name_bolt),
            Field::attr("count_bolt", self.count_bolt),
            Field::optional("pitch_bolt", self.pitch_bolt),
            Field::optional("thickness_plate_outside", self.thickness_plate_outside),
            Field::optional("thickness_plate_inside", self.thickness_plate_inside),
        ])
    }
}

/// Web splice plates and bolts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbJointWeb {
    pub name_bolt: String,
    pub count_bolt_row: u32,
    pub count_bolt_column: u32,
    #[serde(default)]
    pub pitch_bolt: Option<f64>,
    #[serde(default)]
    pub thickness_plate: Option<f64>,
}

impl Inspect for StbJointWeb {
    fn type_name(&self) -> &'static str {
        "StbJointShapeHWeb"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("name_bolt", &self.name_bolt),
            Field::attr("count_bolt_row", self.count_bolt_row),
            Field::attr("count_bolt_column", self.count_bolt_column),
            Field::optional("pitch_bolt", self.pitch_bolt),
            Field::optional("thickness_plate", self.thickness_plate),
        ])
    }
}

/// Bolted splice joint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StbJointShape<T: JointTag> {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub joint_name: String,
    #[serde(default)]
    pub joint_mark: Option<String>,
    #[serde(rename = "StbJointShapeHFlange", default)]
    pub flange: Option<StbJointFlange>,
    #[serde(rename = "StbJointShapeHWeb", default)]
    pub web: Option<StbJointWeb>,
    #[serde(skip)]
    pub tag: PhantomData<T>,
}

pub type StbJointColumnShapeH = StbJointShape<ColumnShapeHTag>;
pub type StbJointColumnShapeT = StbJointShape<ColumnShapeTTag>;
pub type StbJointColumnShapeCross = StbJointShape<ColumnShapeCrossTag>;
pub type StbJointBeamShapeH = StbJointShape<BeamShapeHTag>;

impl<T: JointTag> Inspect for StbJointShape<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("joint_name", &self.joint_name),
            Field::optional("joint_mark", self.joint_mark.as_ref()),
            Field::optional_object("StbJointShapeHFlange", self.flange.as_ref()),
            Field::optional_object("StbJointShapeHWeb", self.web.as_ref()),
        ])
    }

    fn id_value(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.joint_name)
    }
}

/// All joint tables of the model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbJoints {
    #[serde(rename = "StbJointColumnShapeH", default)]
    pub column_h: Vec<StbJointColumnShapeH>,
    #[serde(rename = "StbJointColumnShapeT", default)]
    pub column_t: Vec<StbJointColumnShapeT>,
    #[serde(rename = "StbJointColumnShapeCross", default)]
    pub column_cross: Vec<StbJointColumnShapeCross>,
    #[serde(rename = "StbJointBeamShapeH", default)]
    pub beam_h: Vec<StbJointBeamShapeH>,
}

fn by_id<'a, T: Inspect>(items: &'a [T], key: &str) -> Option<&'a dyn Inspect> {
    items
        .iter()
        .find(|item| item.id_value() == Some(key))
        .map(|item| item as &dyn Inspect)
}

impl StbJoints {
    /// Joint entry by id; column joints search shape H, T and cross in order
    pub fn find(&self, table: Table, key: &str) -> Option<&dyn Inspect> {
        match table {
            Table::JointColumn => by_id(&self.column_h, key)
                .or_else(|| by_id(&self.column_t, key))
                .or_else(|| by_id(&self.column_cross, key)),
            Table::JointBeam => by_id(&self.beam_h, key),
            _ => None,
        }
    }
}

impl Inspect for StbJoints {
    fn type_name(&self) -> &'static str {
        "StbJoints"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::list("StbJointColumnShapeH", &self.column_h),
            Field::list("StbJointColumnShapeT", &self.column_t),
            Field::list("StbJointColumnShapeCross", &self.column_cross),
            Field::list("StbJointBeamShapeH", &self.beam_h),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_joint_search_order() {
        let joints: StbJoints = serde_json::from_str(
            r#"{
                "StbJointColumnShapeT":[{"id":"5","joint_name":"JT"}],
                "StbJointColumnShapeCross":[{"id":"6","joint_name":"JX"}],
                "StbJointBeamShapeH":[{"id":"5","joint_name":"JB",
                    "StbJointShapeHFlange":{"name_bolt":"M20","count_bolt":8}}]
            }"#,
        )
        .unwrap();
        let column = joints.find(Table::JointColumn, "5").unwrap();
        assert_eq!(column.type_name(), "StbJointColumnShapeT");
        assert_eq!(
            joints.find(Table::JointColumn, "6").unwrap().type_name(),
            "StbJointColumnShapeCross"
        );
        assert_eq!(
            joints.find(Table::JointBeam, "5").unwrap().name_value(),
            Some("JB")
        );
        assert!(joints.find(Table::JointBeam, "6").is_none());
    }
}
