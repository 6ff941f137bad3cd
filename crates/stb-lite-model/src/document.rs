// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document root

use serde::{Deserialize, Serialize};

use crate::{
    ElementKind, ElementRef, Field, Inspect, ModelElement, ModelError, Result, StbAxes,
    StbExtensions, StbJoints, StbMembers, StbNode, StbSections, StbStory,
};

/// Root of an ST-Bridge document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StBridge {
    pub version: String,
    #[serde(rename = "StbCommon", default)]
    pub common: Option<StbCommon>,
    #[serde(rename = "StbModel")]
    pub model: StbModel,
    #[serde(rename = "StbExtensions", default)]
    pub extensions: Option<StbExtensions>,
}

impl StBridge {
    /// Parse a document from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ModelError::invalid_value("ST_BRIDGE", e.to_string()))
    }

    /// Element by identity
    pub fn find_element(&self, element: &ElementRef) -> Option<&dyn ModelElement> {
        self.model.find_element(element)
    }
}

impl Inspect for StBridge {
    fn type_name(&self) -> &'static str {
        "ST_BRIDGE"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("version", &self.version),
            Field::optional_object("StbCommon", self.common.as_ref()),
            Field::object("StbModel", &self.model),
            Field::optional_object("StbExtensions", self.extensions.as_ref()),
        ])
    }
}

/// Project and authoring information
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbCommon {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub guid: Option<String>,
}

impl Inspect for StbCommon {
    fn type_name(&self) -> &'static str {
        "StbCommon"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::optional("project_name", self.project_name.as_ref()),
            Field::optional("app_name", self.app_name.as_ref()),
            Field::optional("guid", self.guid.as_ref()),
        ])
    }
}

/// Structural model
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbModel {
    #[serde(rename = "StbNodes", default)]
    pub nodes: Vec<StbNode>,
    #[serde(rename = "StbAxes", default)]
    pub axes: Option<StbAxes>,
    #[serde(rename = "StbStories", default)]
    pub stories: Vec<StbStory>,
    #[serde(rename = "StbMembers", default)]
    pub members: StbMembers,
    #[serde(rename = "StbSections", default)]
    pub sections: StbSections,
    #[serde(rename = "StbJoints", default)]
    pub joints: Option<StbJoints>,
}

impl StbModel {
    /// Element by identity
    pub fn find_element(&self, element: &ElementRef) -> Option<&dyn ModelElement> {
        match element.kind {
            ElementKind::Node => self
                .nodes
                .iter()
                .find(|n| n.id == element.id)
                .map(|n| n as &dyn ModelElement),
            kind => self.members.find(kind, &element.id),
        }
    }
}

impl Inspect for StbModel {
    fn type_name(&self) -> &'static str {
        "StbModel"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::list("StbNodes", &self.nodes),
            Field::optional_object("StbAxes", self.axes.as_ref()),
            Field::list("StbStories", &self.stories),
            Field::object("StbMembers", &self.members),
            Field::object("StbSections", &self.sections),
            Field::optional_object("StbJoints", self.joints.as_ref()),
        ])
    }
}
