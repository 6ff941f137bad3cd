// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-reference resolution

use rustc_hash::FxHashMap;

use crate::{
    CrossRef, ElementKind, Inspect, ModelError, Result, StbModel, StbNode, StbOpenArrangement,
    StbSecOpenRc, Table,
};

/// Lookups from ids and catalog names to model objects
pub trait ModelResolver {
    /// Node by id
    fn node(&self, id: &str) -> Option<&StbNode>;

    /// Node by id, failing when missing
    fn require_node(&self, id: &str) -> Result<&StbNode> {
        self.node(id)
            .ok_or_else(|| ModelError::not_found("StbNode", id))
    }

    /// Steel-shape catalog entry by name
    fn steel_shape(&self, name: &str) -> Result<&dyn Inspect>;

    /// Section or joint entry
    fn resolve(&self, target: &CrossRef) -> Result<&dyn Inspect>;

    /// Opening arrangements placed in a slab or wall
    fn openings_of(&self, kind: ElementKind, member_id: &str) -> Vec<&StbOpenArrangement>;

    /// Opening section by id
    fn open_section(&self, id: &str) -> Result<&StbSecOpenRc>;
}

/// Resolver over a parsed model with an indexed node table
pub struct StbResolver<'a> {
    model: &'a StbModel,
    nodes: FxHashMap<&'a str, &'a StbNode>,
}

impl<'a> StbResolver<'a> {
    /// Index the nodes of a model
    pub fn new(model: &'a StbModel) -> Self {
        let nodes = model
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();
        Self { model, nodes }
    }

    /// The model being resolved against
    pub fn model(&self) -> &'a StbModel {
        self.model
    }
}

impl ModelResolver for StbResolver<'_> {
    fn node(&self, id: &str) -> Option<&StbNode> {
        self.nodes.get(id).copied()
    }

    fn steel_shape(&self, name: &str) -> Result<&dyn Inspect> {
        self.model
            .sections
            .steel
            .as_ref()
            .and_then(|steel| steel.find_shape(name))
            .ok_or_else(|| ModelError::not_found("StbSecSteel", name))
    }

    fn resolve(&self, target: &CrossRef) -> Result<&dyn Inspect> {
        let found = match target.table {
            Table::JointColumn | Table::JointBeam => self
                .model
                .joints
                .as_ref()
                .and_then(|joints| joints.find(target.table, &target.key)),
            table => self.model.sections.find(table, &target.key),
        };
        found.ok_or_else(|| ModelError::not_found(target.table.name(), &target.key))
    }

    fn openings_of(&self, kind: ElementKind, member_id: &str) -> Vec<&StbOpenArrangement> {
        self.model
            .members
            .open_arrangements
            .iter()
            .filter(|open| open.id_member == member_id && open.member_kind() == Some(kind))
            .collect()
    }

    fn open_section(&self, id: &str) -> Result<&StbSecOpenRc> {
        self.model
            .sections
            .open_section(id)
            .ok_or_else(|| ModelError::not_found(Table::SecOpenRc.name(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StbSecSteel, StbSecWallRc, StbSecWallRcStraight};

    fn model() -> StbModel {
        let mut model: StbModel = serde_json::from_str(
            r#"{"StbNodes":[{"id":"1","X":1.0,"Y":2.0,"Z":3.0}]}"#,
        )
        .unwrap();
        model.sections.wall_rc.push(StbSecWallRc {
            id: "8".into(),
            guid: None,
            name: "W20".into(),
            strength_concrete: "Fc24".into(),
            figure: StbSecWallRcStraight { t: 200.0 },
        });
        model
    }

    #[test]
    fn test_node_lookup() {
        let model = model();
        let resolver = StbResolver::new(&model);
        assert_eq!(resolver.node("1").unwrap().z, 3.0);
        let err = resolver.require_node("2").unwrap_err();
        assert_eq!(err.to_string(), "StbNode '2' not found");
    }

    #[test]
    fn test_resolve_section_and_miss() {
        let model = model();
        let resolver = StbResolver::new(&model);
        let wall = resolver
            .resolve(&CrossRef::new(Table::SecWallRc, "8"))
            .unwrap();
        assert_eq!(wall.name_value(), Some("W20"));

        let err = resolver
            .resolve(&CrossRef::new(Table::JointColumn, "8"))
            .err().unwrap();
        assert_eq!(err.to_string(), "StbJointColumn '8' not found");
    }

    #[test]
    fn test_steel_shape_without_catalog() {
        let mut model = model();
        let resolver = StbResolver::new(&model);
        assert!(resolver.steel_shape("H-1").err().unwrap().is_not_found());

        model.sections.steel = Some(StbSecSteel::default());
        let resolver = StbResolver::new(&model);
        assert!(resolver.steel_shape("H-1").is_err());
    }
}
