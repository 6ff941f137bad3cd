// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid axes

use serde::{Deserialize, Serialize};

use crate::{Field, Inspect, Result, StbNodeId};

/// Axis groups of the model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbAxes {
    #[serde(rename = "StbParallelAxes", default)]
    pub parallel: Vec<StbParallelAxes>,
    #[serde(rename = "StbRadialAxes", default)]
    pub radial: Vec<StbRadialAxes>,
}

impl Inspect for StbAxes {
    fn type_name(&self) -> &'static str {
        "StbAxes"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::list("StbParallelAxes", &self.parallel),
            Field::list("StbRadialAxes", &self.radial),
        ])
    }
}

/// Group of parallel axes sharing an origin and angle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbParallelAxes {
    pub group_name: String,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    /// Degrees from the global X axis
    pub angle: f64,
    #[serde(rename = "StbParallelAxis", default)]
    pub axes: Vec<StbParallelAxis>,
}

impl Inspect for StbParallelAxes {
    fn type_name(&self) -> &'static str {
        "StbParallelAxes"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("group_name", &self.group_name),
            Field::attr("X", self.x),
            Field::attr("Y", self.y),
            Field::attr("angle", self.angle),
            Field::list("StbParallelAxis", &self.axes),
        ])
    }
}

/// One axis of a parallel group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbParallelAxis {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    /// Distance from the group origin, perpendicular to the group angle
    pub distance: f64,
    #[serde(rename = "StbNodeIdList", default)]
    pub node_ids: Vec<StbNodeId>,
}

impl Inspect for StbParallelAxis {
    fn type_name(&self) -> &'static str {
        "StbParallelAxis"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("distance", self.distance),
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

/// Group of radial axes around a common centre
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbRadialAxes {
    pub group_name: String,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(default)]
    pub start_angle: Option<f64>,
    #[serde(default)]
    pub end_angle: Option<f64>,
    #[serde(rename = "StbRadialAxis", default)]
    pub axes: Vec<StbRadialAxis>,
}

impl Inspect for StbRadialAxes {
    fn type_name(&self) -> &'static str {
        "StbRadialAxes"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("group_name", &self.group_name),
            Field::attr("X", self.x),
            Field::attr("Y", self.y),
            Field::optional("start_angle", self.start_angle),
            Field::optional("end_angle", self.end_angle),
            Field::list("StbRadialAxis", &self.axes),
        ])
    }
}

/// One axis of a radial group
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbRadialAxis {
    pub id: String,
    #[serde(default)]
    pub guid: Option<String>,
    pub name: String,
    /// Degrees from the global X axis
    pub angle: f64,
    #[serde(rename = "StbNodeIdList", default)]
    pub node_ids: Vec<StbNodeId>,
}

impl Inspect for StbRadialAxis {
    fn type_name(&self) -> &'static str {
        "StbRadialAxis"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("id", &self.id),
            Field::optional("guid", self.guid.as_ref()),
            Field::attr("name", &self.name),
            Field::attr("angle", self.angle),
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
