// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property panels for one element
//!
//! The member panel lists the element's own fields and resolves node
//! references to coordinates. Nested objects appear only as `+name`
//! placeholders there. Section and joint panels go deep instead: every
//! nested object contributes its records, and steel-shape names expand
//! to their catalog entries.

use serde::{Deserialize, Serialize};
use stb_lite_model::{
    parse_node_id_order, AttributeRef, Field, FieldValue, Inspect, ModelElement, ModelError,
    ModelResolver, PanelSource, Result, StbNode, MEMBER_PANEL,
};

use crate::NoticeSink;

/// One name/value row, optionally with nested rows
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,
    pub value: String,
    pub children: Vec<PropertyRecord>,
}

impl PropertyRecord {
    /// Record without children
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Record with nested rows
    pub fn with_children(
        name: impl Into<String>,
        value: impl Into<String>,
        children: Vec<PropertyRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            children,
        }
    }

    /// Record with plain text lines as children
    fn with_labels(name: impl Into<String>, value: impl Into<String>, labels: Vec<String>) -> Self {
        let children = labels
            .into_iter()
            .map(|label| PropertyRecord::leaf(label, ""))
            .collect();
        Self::with_children(name, value, children)
    }

    /// Placeholder for a nested object (`+name`)
    fn composite(name: &str, children: Vec<PropertyRecord>) -> Self {
        Self::with_children(format!("+{}", name), "", children)
    }
}

/// Titled list of records shown as one tab of the details view
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub records: Vec<PropertyRecord>,
}

impl Panel {
    pub fn new(title: impl Into<String>, records: Vec<PropertyRecord>) -> Self {
        Self {
            title: title.into(),
            records,
        }
    }

    /// Top-level record by name
    pub fn get(&self, name: &str) -> Option<&PropertyRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

/// Builds the property panels of model elements
pub struct PropertyDetailBuilder<'r, 'n> {
    resolver: &'r dyn ModelResolver,
    notices: &'n mut dyn NoticeSink,
}

impl<'r, 'n> PropertyDetailBuilder<'r, 'n> {
    pub fn new(resolver: &'r dyn ModelResolver, notices: &'n mut dyn NoticeSink) -> Self {
        Self { resolver, notices }
    }

    /// Member panel followed by the element's additional panels
    ///
    /// Panels are pushed as they complete, so on a failed lookup `panels`
    /// still holds everything built before it.
    pub fn build_element_panels(
        &mut self,
        element: &dyn ModelElement,
        panels: &mut Vec<Panel>,
    ) -> Result<()> {
        let member = self.build_member_panel(element)?;
        panels.push(Panel::new(MEMBER_PANEL, member));
        for source in element.additional_panels() {
            panels.push(self.build_panel(&source)?);
        }
        Ok(())
    }

    /// Additional panels only, in display order
    pub fn build_additional_panels(&mut self, element: &dyn ModelElement) -> Result<Vec<Panel>> {
        element
            .additional_panels()
            .iter()
            .map(|source| self.build_panel(source))
            .collect()
    }

    fn build_panel(&mut self, source: &PanelSource) -> Result<Panel> {
        let resolver = self.resolver;
        let mut records = Vec::new();
        for target in &source.targets {
            let object = resolver.resolve(target)?;
            records.extend(self.section_records(object)?);
        }
        Ok(Panel::new(source.title, records))
    }

    /// Shallow records of an element's own fields
    pub fn build_member_panel(&mut self, element: &dyn ModelElement) -> Result<Vec<PropertyRecord>> {
        let fields = match element.fields() {
            Ok(fields) => fields,
            Err(err) => {
                self.report(element.type_name(), &err);
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::new();
        for field in &fields {
            if is_null(field) {
                continue;
            }
            match &field.value {
                FieldValue::Attribute(attr) => {
                    let (Some(value), true) = (&attr.value, attr.is_present()) else {
                        continue;
                    };
                    records.push(match attr.reference {
                        AttributeRef::SteelShape => self.steel_shape_record(field.name, value)?,
                        AttributeRef::Node => self.node_record(field.name, value),
                        AttributeRef::None => PropertyRecord::leaf(field.name, value.as_str()),
                    });
                }
                FieldValue::NodeIdOrder(order) => {
                    let labels = parse_node_id_order(order)?
                        .into_iter()
                        .map(|id| self.resolver.require_node(id).map(id_coordinate_label))
                        .collect::<Result<Vec<_>>>()?;
                    records.push(PropertyRecord::with_labels(
                        format!("+{}", field.name),
                        *order,
                        labels,
                    ));
                }
                FieldValue::Text(_) | FieldValue::Internal => {}
                FieldValue::WallOffsets(offsets) => {
                    let labels = offsets
                        .iter()
                        .map(|o| self.offset_label(&o.id_node, o.components()))
                        .collect::<Result<Vec<_>>>()?;
                    records.push(PropertyRecord::with_labels(format!("+{}", field.name), "", labels));
                }
                FieldValue::SlabOffsets(offsets) => {
                    let labels = offsets
                        .iter()
                        .map(|o| self.offset_label(&o.id_node, o.components()))
                        .collect::<Result<Vec<_>>>()?;
                    records.push(PropertyRecord::with_labels(format!("+{}", field.name), "", labels));
                }
                FieldValue::OpenIds(ids) => {
                    let joined = ids.iter().map(|i| i.id.as_str()).collect::<Vec<_>>().join(",");
                    records.push(PropertyRecord::with_labels(
                        format!("+{}", field.name),
                        "",
                        vec![joined],
                    ));
                }
                FieldValue::Object(_) | FieldValue::List(_) | FieldValue::Items(_) => {
                    records.push(PropertyRecord::composite(field.name, Vec::new()));
                }
            }
        }
        Ok(records)
    }

    /// Deep records of a catalog, section or joint object
    ///
    /// A field table fault is reported and ends the object early with the
    /// records gathered so far. Failed cross references propagate.
    pub fn section_records(&mut self, object: &dyn Inspect) -> Result<Vec<PropertyRecord>> {
        let fields = match object.fields() {
            Ok(fields) => fields,
            Err(err) => {
                self.report(object.type_name(), &err);
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::new();
        for field in &fields {
            if is_null(field) {
                continue;
            }
            match &field.value {
                FieldValue::Attribute(attr) => {
                    let (Some(value), true) = (&attr.value, attr.is_present()) else {
                        continue;
                    };
                    records.push(match attr.reference {
                        AttributeRef::SteelShape => self.steel_shape_record(field.name, value)?,
                        _ => PropertyRecord::leaf(field.name, value.as_str()),
                    });
                }
                FieldValue::Text(_) | FieldValue::Internal => {}
                FieldValue::NodeIdOrder(order) => {
                    records.push(PropertyRecord::leaf(field.name, *order));
                }
                _ => {
                    let mut children = Vec::new();
                    for child in field.children() {
                        children.extend(self.section_records(child)?);
                    }
                    records.push(PropertyRecord::composite(field.name, children));
                }
            }
        }
        Ok(records)
    }

    fn steel_shape_record(&mut self, name: &str, shape: &str) -> Result<PropertyRecord> {
        let resolver = self.resolver;
        let entry = resolver.steel_shape(shape)?;
        let children = self.section_records(entry)?;
        Ok(PropertyRecord::with_children(name, shape, children))
    }

    fn node_record(&self, name: &str, id: &str) -> PropertyRecord {
        match self.resolver.node(id) {
            Some(node) => PropertyRecord::with_labels(name, id, vec![node.coordinate_label()]),
            None => {
                log::debug!("{} refers to unknown node {}", name, id);
                PropertyRecord::leaf(name, id)
            }
        }
    }

    fn offset_label(&self, id_node: &str, [x, y, z]: [f64; 3]) -> Result<String> {
        let node = self.resolver.require_node(id_node)?;
        Ok(format!(
            "(id:{}, offsetX:{}, offsetY:{}, offsetZ:{})",
            node.id, x, y, z
        ))
    }

    fn report(&mut self, type_name: &str, err: &ModelError) {
        log::warn!("Property panel of {} is incomplete: {}", type_name, err);
        self.notices
            .notice(&format!("Error while reading {}: {}", type_name, err));
    }
}

/// Absent values are never shown
fn is_null(field: &Field<'_>) -> bool {
    match &field.value {
        FieldValue::Attribute(attr) => attr.value.is_none(),
        FieldValue::Text(text) => text.is_none(),
        FieldValue::Object(object) => object.is_none(),
        FieldValue::List(items) | FieldValue::Items(items) => items.is_empty(),
        FieldValue::WallOffsets(offsets) => offsets.is_empty(),
        FieldValue::SlabOffsets(offsets) => offsets.is_empty(),
        FieldValue::OpenIds(ids) => ids.is_empty(),
        FieldValue::NodeIdOrder(_) | FieldValue::Internal => false,
    }
}

fn id_coordinate_label(node: &StbNode) -> String {
    format!("(id:{}, X:{}, Y:{}, Z:{})", node.id, node.x, node.y, node.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiscardNotices;
    use stb_lite_model::{
        Attribute, ElementKind, ElementShape, Result as ModelResult, StBridge, StbResolver,
        JOINT_END_PANEL, JOINT_START_PANEL, SECTION_PANEL,
    };

    fn document() -> StBridge {
        StBridge::from_json(
            r#"{
                "version":"2.0.2",
                "StbModel":{
                    "StbNodes":[
                        {"id":"1","X":0.0,"Y":0.0,"Z":0.0},
                        {"id":"2","X":0.0,"Y":0.0,"Z":3000.0},
                        {"id":"3","X":6000.0,"Y":0.0,"Z":3000.0},
                        {"id":"4","X":6000.0,"Y":4000.0,"Z":3000.0}
                    ],
                    "StbMembers":{
                        "StbColumns":[{
                            "id":"10","name":"C1","id_node_bottom":"1","id_node_top":"2",
                            "id_section":"100","kind_structure":"S","offset_top_X":50.0,
                            "joint_id_top":"900"
                        }],
                        "StbSlabs":[{
                            "id":"20","name":"S1","id_section":"200","kind_structure":"RC",
                            "StbNodeIdOrder":"2 3 4",
                            "StbSlabOffsetList":[{"id_node":"3","offset_X":0.0,"offset_Y":0.0,"offset_Z":-150.0}],
                            "StbOpenIdList":[{"id":"7"},{"id":"8"}]
                        }],
                        "StbBeams":[
                            {
                                "id":"30","name":"B1","id_node_start":"2","id_node_end":"3",
                                "id_section":"300","kind_structure":"S",
                                "joint_id_start":"50","joint_id_end":"51"
                            },
                            {
                                "id":"31","name":"B2","id_node_start":"3","id_node_end":"4",
                                "id_section":"300","kind_structure":"S"
                            }
                        ]
                    },
                    "StbSections":{
                        "StbSecColumn_S":[{
                            "id":"100","name":"C1",
                            "StbSecSteelFigureColumn_S":{"Items":[
                                {"StbSecSteelColumn_S_Same":{"shape":"H-400","strength_main":"SN490B"}}
                            ]}
                        }],
                        "StbSecBeam_S":[{
                            "id":"300","name":"B1","StbSecSteelFigureBeam_S":{"Items":[]}
                        }],
                        "StbSecSteel":{
                            "StbSecRoll-H":[{"name":"H-400","A":400.0,"B":400.0,"t1":13.0,"t2":21.0,"r":22.0}]
                        }
                    },
                    "StbJoints":{
                        "StbJointBeamShapeH":[
                            {"id":"50","joint_name":"JB1"},
                            {"id":"51","joint_name":"JB2"}
                        ]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn find<'a>(doc: &'a StBridge, kind: ElementKind, id: &str) -> &'a dyn ModelElement {
        doc.model.members.find(kind, id).unwrap()
    }

    #[test]
    fn test_member_panel_resolves_nodes() {
        let doc = document();
        let resolver = StbResolver::new(&doc.model);
        let mut notices: Vec<String> = Vec::new();
        let mut builder = PropertyDetailBuilder::new(&resolver, &mut notices);
        let records = builder
            .build_member_panel(find(&doc, ElementKind::Column, "10"))
            .unwrap();

        let top = records.iter().find(|r| r.name == "id_node_top").unwrap();
        assert_eq!(top.value, "2");
        assert_eq!(top.children[0].name, "(X:0, Y:0, Z:3000)");

        let offset = records.iter().find(|r| r.name == "offset_top_X").unwrap();
        assert_eq!(offset.value, "50");
        // Unspecified offsets are omitted
        assert!(records.iter().all(|r| r.name != "offset_top_Y"));
        assert!(records.iter().all(|r| r.name != "guid"));
        assert!(notices.is_empty());
    }

    #[test]
    fn test_member_panel_planar_fields() {
        let doc = document();
        let resolver = StbResolver::new(&doc.model);
        let mut notices: Vec<String> = Vec::new();
        let mut builder = PropertyDetailBuilder::new(&resolver, &mut notices);
        let records = builder
            .build_member_panel(find(&doc, ElementKind::Slab, "20"))
            .unwrap();

        let order = records.iter().find(|r| r.name == "+StbNodeIdOrder").unwrap();
        assert_eq!(order.value, "2 3 4");
        assert_eq!(order.children.len(), 3);
        assert_eq!(order.children[1].name, "(id:3, X:6000, Y:0, Z:3000)");

        let offsets = records.iter().find(|r| r.name == "+StbSlabOffsetList").unwrap();
        assert_eq!(
            offsets.children[0].name,
            "(id:3, offsetX:0, offsetY:0, offsetZ:-150)"
        );

        let opens = records.iter().find(|r| r.name == "+StbOpenIdList").unwrap();
        assert_eq!(opens.children.len(), 1);
        assert_eq!(opens.children[0].name, "7,8");
    }

    #[test]
    fn test_missing_node_in_order() {
        let mut doc = document();
        doc.model.members.slabs[0].node_id_order = "2 3 99".into();
        let resolver = StbResolver::new(&doc.model);
        let mut notices: Vec<String> = Vec::new();
        let mut builder = PropertyDetailBuilder::new(&resolver, &mut notices);
        let err = builder
            .build_member_panel(find(&doc, ElementKind::Slab, "20"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_section_panel_expands_steel_shape() {
        let doc = document();
        let resolver = StbResolver::new(&doc.model);
        let mut notices: Vec<String> = Vec::new();
        let mut builder = PropertyDetailBuilder::new(&resolver, &mut notices);
        let column = find(&doc, ElementKind::Column, "10");

        let mut panels = Vec::new();
        let err = builder.build_element_panels(column, &mut panels).unwrap_err();
        // Joint 900 does not exist; member and section panels survive
        assert_eq!(err.to_string(), "StbJointColumn '900' not found");
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].title, MEMBER_PANEL);
        assert_eq!(panels[1].title, SECTION_PANEL);

        let figure = panels[1].get("+StbSecSteelFigureColumn_S").unwrap();
        let items = &figure.children[0];
        assert_eq!(items.name, "+Items");
        let shape = items.children.iter().find(|r| r.name == "shape").unwrap();
        assert_eq!(shape.value, "H-400");
        let depth = shape.children.iter().find(|r| r.name == "A").unwrap();
        assert_eq!(depth.value, "400");
        assert!(panels.iter().all(|p| p.title != JOINT_END_PANEL));
    }

    #[test]
    fn test_unknown_steel_shape_propagates() {
        let mut doc = document();
        doc.model.sections.steel = None;
        let resolver = StbResolver::new(&doc.model);
        let mut notices: Vec<String> = Vec::new();
        let mut builder = PropertyDetailBuilder::new(&resolver, &mut notices);

        let mut panels = Vec::new();
        let err = builder
            .build_element_panels(find(&doc, ElementKind::Column, "10"), &mut panels)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(panels.len(), 1);
        assert!(notices.is_empty());
    }

    #[test]
    fn test_beam_joint_panels_follow_joint_ids() {
        let doc = document();
        let resolver = StbResolver::new(&doc.model);
        let mut notices = DiscardNotices;
        let mut builder = PropertyDetailBuilder::new(&resolver, &mut notices);

        let panels = builder
            .build_additional_panels(find(&doc, ElementKind::Beam, "30"))
            .unwrap();
        let titles: Vec<&str> = panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec![SECTION_PANEL, JOINT_START_PANEL, JOINT_END_PANEL]);
        assert_eq!(panels[0].get("name").unwrap().value, "B1");
        assert_eq!(panels[1].get("joint_name").unwrap().value, "JB1");
        assert_eq!(panels[2].get("joint_name").unwrap().value, "JB2");

        let panels = builder
            .build_additional_panels(find(&doc, ElementKind::Beam, "31"))
            .unwrap();
        let titles: Vec<&str> = panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec![SECTION_PANEL]);
    }

    /// Element whose field table carries an unspecified node reference
    struct Hanger;

    impl Inspect for Hanger {
        fn type_name(&self) -> &'static str {
            "Hanger"
        }

        fn fields(&self) -> ModelResult<Vec<Field<'_>>> {
            Ok(vec![
                Field {
                    name: "id_node_unset",
                    value: FieldValue::Attribute(Attribute {
                        value: Some("1".into()),
                        specified: Some(false),
                        reference: AttributeRef::Node,
                    }),
                },
                Field::node_ref("id_node", "2"),
            ])
        }
    }

    impl ModelElement for Hanger {
        fn kind(&self) -> ElementKind {
            ElementKind::Node
        }

        fn element_id(&self) -> &str {
            "1"
        }

        fn shape(&self, _resolver: &dyn ModelResolver) -> ModelResult<ElementShape> {
            Err(ModelError::invalid_value("shape", "not drawn"))
        }
    }

    #[test]
    fn test_unspecified_node_reference_is_omitted() {
        let doc = document();
        let resolver = StbResolver::new(&doc.model);
        let mut notices: Vec<String> = Vec::new();
        let records = PropertyDetailBuilder::new(&resolver, &mut notices)
            .build_member_panel(&Hanger)
            .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["id_node"]);
        assert_eq!(records[0].children[0].name, "(X:0, Y:0, Z:3000)");
        assert!(notices.is_empty());
    }

    struct Faulty;

    impl Inspect for Faulty {
        fn type_name(&self) -> &'static str {
            "Faulty"
        }

        fn fields(&self) -> ModelResult<Vec<Field<'_>>> {
            Err(ModelError::introspection("Faulty", "unreadable"))
        }
    }

    struct Section {
        figure: Faulty,
    }

    impl Inspect for Section {
        fn type_name(&self) -> &'static str {
            "Section"
        }

        fn fields(&self) -> ModelResult<Vec<Field<'_>>> {
            Ok(vec![
                Field::attr("id", "5"),
                Field::object("Figure", &self.figure),
                Field::attr("name", "after"),
            ])
        }
    }

    #[test]
    fn test_fault_is_reported_once() {
        let doc = document();
        let resolver = StbResolver::new(&doc.model);
        let mut notices: Vec<String> = Vec::new();
        let records = PropertyDetailBuilder::new(&resolver, &mut notices)
            .section_records(&Section { figure: Faulty })
            .unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[1].children.is_empty());
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("Faulty"));
    }
}
