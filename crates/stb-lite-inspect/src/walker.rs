// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model tree construction
//!
//! Walks an object graph through its field tables and produces a tree of
//! navigable nodes. Choice wrappers (`Items`) are hoisted into their owner,
//! collections become grouping nodes named after the field, and every
//! model element met on the way is registered for display and picking.

use serde::{Deserialize, Serialize};
use stb_lite_model::{ElementRef, Field, FieldValue, Inspect, ModelElement};

use crate::NoticeSink;

/// Rule printed above and below the detail body
const RULE_WIDTH: usize = 40;

/// One node of the model tree
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display name
    pub name: String,
    /// Child nodes in field order
    pub children: Vec<TreeNode>,
    /// Element shown by this node, if any
    pub element: Option<ElementRef>,
    /// Precomputed detail text for modal display
    pub details: String,
    /// UI highlight, the only state that changes after construction
    #[serde(default)]
    pub highlighted: bool,
}

impl TreeNode {
    fn new(name: impl Into<String>, details: String) -> Self {
        Self {
            name: name.into(),
            details,
            ..Default::default()
        }
    }

    /// Path of child indices to the node showing `element`
    pub fn find_path(&self, element: &ElementRef) -> Option<Vec<usize>> {
        if self.element.as_ref() == Some(element) {
            return Some(Vec::new());
        }
        for (index, child) in self.children.iter().enumerate() {
            if let Some(mut path) = child.find_path(element) {
                path.insert(0, index);
                return Some(path);
            }
        }
        None
    }

    /// Node at a path of child indices
    pub fn node_at(&self, path: &[usize]) -> Option<&TreeNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Node at a path of child indices (mutable)
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get_mut(index))
    }

    /// Highlight exactly the node at `path`, or none
    pub fn set_highlight(&mut self, path: Option<&[usize]>) {
        let mut stack = vec![&mut *self];
        while let Some(node) = stack.pop() {
            node.highlighted = false;
            stack.extend(node.children.iter_mut());
        }
        if let Some(node) = path.and_then(|p| self.node_at_mut(p)) {
            node.highlighted = true;
        }
    }

    /// Iterate all nodes (depth-first)
    pub fn iter(&self) -> TreeNodeIter<'_> {
        TreeNodeIter { stack: vec![self] }
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }
}

/// Iterator over tree nodes (depth-first)
pub struct TreeNodeIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for TreeNodeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Add children in reverse order so first child is processed first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Converts object graphs into [`TreeNode`] trees
pub struct ModelGraphWalker<'n> {
    notices: &'n mut dyn NoticeSink,
}

impl<'n> ModelGraphWalker<'n> {
    pub fn new(notices: &'n mut dyn NoticeSink) -> Self {
        Self { notices }
    }

    /// Build the tree below `root`
    ///
    /// Every model element reached is appended to `elements`, in tree
    /// order. The root is named `display_name` if given, else by its type.
    pub fn build_tree<'a>(
        &mut self,
        root: &'a dyn Inspect,
        elements: &mut Vec<&'a dyn ModelElement>,
        display_name: Option<&str>,
    ) -> TreeNode {
        let name = display_name.unwrap_or_else(|| root.type_name());
        match root.fields() {
            Ok(fields) => self.visit(root, fields, name, elements),
            Err(err) => {
                log::warn!("Cannot build details of {}: {}", name, err);
                self.notices
                    .notice(&format!("Error while reading {}: {}", name, err));
                let mut node = TreeNode::new(name, String::new());
                node.element = register(root, elements);
                node
            }
        }
    }

    fn visit<'a>(
        &mut self,
        object: &'a dyn Inspect,
        fields: Vec<Field<'a>>,
        name: &str,
        elements: &mut Vec<&'a dyn ModelElement>,
    ) -> TreeNode {
        let mut node = TreeNode::new(name, object_details(name, &fields));
        node.element = register(object, elements);

        for field in &fields {
            match &field.value {
                FieldValue::Items(items) => {
                    for item in items {
                        node.children
                            .extend(self.build_child(*item, item.type_name(), elements));
                    }
                }
                FieldValue::Attribute(_)
                | FieldValue::Text(_)
                | FieldValue::Internal
                | FieldValue::NodeIdOrder(_) => {}
                FieldValue::Object(Some(child)) => {
                    node.children
                        .extend(self.build_child(*child, field.name, elements));
                }
                FieldValue::Object(None) => {}
                FieldValue::List(_)
                | FieldValue::WallOffsets(_)
                | FieldValue::SlabOffsets(_)
                | FieldValue::OpenIds(_) => {
                    let items = field.children();
                    let mut group = TreeNode::new(field.name, collection_details(field.name, &items));
                    for item in items {
                        group
                            .children
                            .extend(self.build_child(item, &item_label(item), elements));
                    }
                    if !group.children.is_empty() {
                        node.children.push(group);
                    }
                }
            }
        }
        node
    }

    fn build_child<'a>(
        &mut self,
        object: &'a dyn Inspect,
        name: &str,
        elements: &mut Vec<&'a dyn ModelElement>,
    ) -> Option<TreeNode> {
        match object.fields() {
            Ok(fields) => Some(self.visit(object, fields, name, elements)),
            Err(err) => {
                log::warn!("Skipping {} in model tree: {}", name, err);
                None
            }
        }
    }
}

fn register<'a>(
    object: &'a dyn Inspect,
    elements: &mut Vec<&'a dyn ModelElement>,
) -> Option<ElementRef> {
    let element = object.as_element()?;
    elements.push(element);
    Some(element.element_ref())
}

/// `"{Type} (id: ..)"`, `"{Type} (name: ..)"` or the bare type name
fn item_label(item: &dyn Inspect) -> String {
    if let Some(id) = item.id_value() {
        format!("{} (id: {})", item.type_name(), id)
    } else if let Some(name) = item.name_value() {
        format!("{} (name: {})", item.type_name(), name)
    } else {
        item.type_name().to_string()
    }
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn object_details(name: &str, fields: &[Field<'_>]) -> String {
    let mut lines = vec![format!("Details of {}:", name), rule()];
    for field in fields {
        match &field.value {
            FieldValue::Attribute(attr) if attr.is_present() => {
                if let Some(value) = &attr.value {
                    lines.push(format!("   {}: {}", field.name, value));
                }
            }
            _ if field.is_composite() => lines.push(format!("+{}", field.name)),
            _ => {}
        }
    }
    lines.push(rule());
    lines.join("\n") + "\n"
}

fn collection_details(name: &str, items: &[&dyn Inspect]) -> String {
    let item_type = items.first().map(|i| i.type_name()).unwrap_or_default();
    format!(
        "Details of {}:\n{}\n{}[{}]\n{}\n",
        name,
        rule(),
        item_type,
        items.len(),
        rule()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stb_lite_model::{ElementKind, ModelError, Result as ModelResult, StBridge};

    fn document() -> StBridge {
        StBridge::from_json(
            r#"{
                "version":"2.0.2",
                "StbModel":{
                    "StbNodes":[
                        {"id":"1","X":0.0,"Y":0.0,"Z":0.0},
                        {"id":"2","X":0.0,"Y":0.0,"Z":3000.0}
                    ],
                    "StbStories":[{"id":"1","name":"1FL","height":0.0}],
                    "StbMembers":{
                        "StbColumns":[{
                            "id":"10","name":"C1","id_node_bottom":"1","id_node_top":"2",
                            "id_section":"100","kind_structure":"S"
                        }]
                    },
                    "StbSections":{
                        "StbSecColumn_S":[{
                            "id":"100","name":"C1",
                            "StbSecSteelFigureColumn_S":{"Items":[
                                {"StbSecSteelColumn_S_Same":{"shape":"H-400","strength_main":"SN490B"}}
                            ]}
                        }]
                    }
                }
            }"#,
        )
        .unwrap()
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

    struct Holder {
        good: Vec<stb_lite_model::StbNodeId>,
        bad: Faulty,
    }

    impl Inspect for Holder {
        fn type_name(&self) -> &'static str {
            "Holder"
        }

        fn fields(&self) -> ModelResult<Vec<Field<'_>>> {
            Ok(vec![
                Field::list("StbNodeIdList", &self.good),
                Field::object("Broken", &self.bad),
            ])
        }
    }

    #[test]
    fn test_tree_registers_elements() {
        let doc = document();
        let mut notices: Vec<String> = Vec::new();
        let mut elements = Vec::new();
        let tree = ModelGraphWalker::new(&mut notices).build_tree(&doc, &mut elements, None);

        assert_eq!(tree.name, "ST_BRIDGE");
        // Two nodes and one column
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[2].kind(), ElementKind::Column);
        assert!(notices.is_empty());

        let column = ElementRef::new(ElementKind::Column, "10");
        let path = tree.find_path(&column).unwrap();
        let node = tree.node_at(&path).unwrap();
        assert_eq!(node.name, "StbColumn (id: 10)");
        assert_eq!(tree.node_at(&path[..path.len() - 1]).unwrap().name, "StbColumns");
    }

    #[test]
    fn test_items_are_hoisted() {
        let doc = document();
        let mut elements = Vec::new();
        let tree = ModelGraphWalker::new(&mut Vec::<String>::new()).build_tree(&doc, &mut elements, None);

        let figure = tree
            .iter()
            .find(|n| n.name == "StbSecSteelFigureColumn_S")
            .unwrap();
        assert_eq!(figure.children.len(), 1);
        assert_eq!(figure.children[0].name, "StbSecSteelColumn_S_Same");
        assert!(tree.iter().all(|n| n.name != "Items"));
    }

    #[test]
    fn test_empty_collections_are_dropped() {
        let doc = document();
        let tree = ModelGraphWalker::new(&mut Vec::<String>::new()).build_tree(&doc, &mut Vec::new(), None);
        let members = tree.iter().find(|n| n.name == "StbMembers").unwrap();
        assert_eq!(members.children.len(), 1);
        assert_eq!(members.children[0].name, "StbColumns");
        assert_eq!(members.children[0].children.len(), 1);
    }

    #[test]
    fn test_detail_text() {
        let doc = document();
        let tree = ModelGraphWalker::new(&mut Vec::<String>::new()).build_tree(&doc, &mut Vec::new(), None);
        let column = tree.iter().find(|n| n.name == "StbColumn (id: 10)").unwrap();
        let rule = "-".repeat(40);
        assert!(column.details.starts_with(&format!("Details of StbColumn (id: 10):\n{}\n", rule)));
        assert!(column.details.contains("   id_node_top: 2\n"));
        // Unspecified offsets and absent options are omitted
        assert!(!column.details.contains("offset_top_X"));
        assert!(!column.details.contains("guid"));
        assert!(column.details.ends_with(&format!("{}\n", rule)));

        let nodes = tree.iter().find(|n| n.name == "StbNodes").unwrap();
        assert!(nodes.details.contains("StbNode[2]\n"));

        let model = tree.iter().find(|n| n.name == "StbModel").unwrap();
        assert!(model.details.contains("+StbAxes\n"));
    }

    #[test]
    fn test_root_fault_yields_empty_details() {
        let mut notices: Vec<String> = Vec::new();
        let tree =
            ModelGraphWalker::new(&mut notices).build_tree(&Faulty, &mut Vec::new(), Some("Root"));
        assert_eq!(tree.name, "Root");
        assert!(tree.details.is_empty());
        assert!(tree.children.is_empty());
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_child_fault_is_isolated() {
        let holder = Holder {
            good: vec![stb_lite_model::StbNodeId { id: "1".into() }],
            bad: Faulty,
        };
        let mut notices: Vec<String> = Vec::new();
        let tree = ModelGraphWalker::new(&mut notices).build_tree(&holder, &mut Vec::new(), None);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].children[0].name, "StbNodeId (id: 1)");
        assert!(tree.details.contains("+Broken\n"));
        assert!(notices.is_empty());
    }

    #[test]
    fn test_highlight_is_exclusive() {
        let doc = document();
        let mut tree =
            ModelGraphWalker::new(&mut Vec::<String>::new()).build_tree(&doc, &mut Vec::new(), None);
        let first = tree
            .find_path(&ElementRef::new(ElementKind::Node, "1"))
            .unwrap();
        let second = tree
            .find_path(&ElementRef::new(ElementKind::Column, "10"))
            .unwrap();
        tree.set_highlight(Some(&first));
        tree.set_highlight(Some(&second));
        assert_eq!(tree.iter().filter(|n| n.highlighted).count(), 1);
        assert!(tree.node_at(&second).unwrap().highlighted);
        tree.set_highlight(None);
        assert!(tree.iter().all(|n| !n.highlighted));
    }

    #[test]
    fn test_node_count_covers_subtree() {
        let leaf = |name: &str| TreeNode {
            name: name.into(),
            ..Default::default()
        };
        let tree = TreeNode {
            name: "ST_BRIDGE".into(),
            children: vec![
                TreeNode {
                    name: "StbNodes".into(),
                    children: vec![leaf("StbNode (id: 1)"), leaf("StbNode (id: 2)")],
                    ..Default::default()
                },
                leaf("StbAxes"),
            ],
            ..Default::default()
        };
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.children[0].node_count(), 3);
        assert_eq!(tree.children[1].node_count(), 1);
    }
}
