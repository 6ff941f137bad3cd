// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Compile-time field tables
//!
//! Every schema type implements [`Inspect`] by listing its own fields in
//! declaration order, each tagged with the kind of data it carries. Tree
//! building and property panels are driven entirely by these tables, so a
//! new schema type only has to describe itself once.

use std::fmt::Display;

use crate::{ModelElement, Result, StbOpenId, StbSlabOffset, StbWallOffset};

/// Field-table access for one schema object
pub trait Inspect {
    /// Schema type name (e.g. `"StbColumn"`)
    fn type_name(&self) -> &'static str;

    /// Field table in declaration order
    ///
    /// Fails with [`crate::ModelError::IntrospectionFault`] when the object
    /// cannot describe itself (e.g. malformed extension payloads).
    fn fields(&self) -> Result<Vec<Field<'_>>>;

    /// Value of the identifying `id` field, if the type has one
    fn id_value(&self) -> Option<&str> {
        None
    }

    /// Value of the `name` field, if the type has one
    fn name_value(&self) -> Option<&str> {
        None
    }

    /// The object as a model element, if it is one
    fn as_element(&self) -> Option<&dyn ModelElement> {
        None
    }
}

/// Cross reference carried by an attribute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttributeRef {
    /// Plain value
    #[default]
    None,
    /// Names a node by id
    Node,
    /// Names an entry of the steel-shape catalog
    SteelShape,
}

/// Scalar attribute of a schema object
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    /// Display value, `None` when the attribute is absent
    pub value: Option<String>,
    /// Companion "specified" flag for optional attributes with a default
    pub specified: Option<bool>,
    /// Cross reference kind
    pub reference: AttributeRef,
}

impl Attribute {
    /// Whether the attribute should be shown at all
    pub fn is_present(&self) -> bool {
        self.value.is_some() && self.specified != Some(false)
    }
}

/// Data carried by one field
pub enum FieldValue<'a> {
    /// Scalar attribute
    Attribute(Attribute),
    /// Text content that is not an attribute
    Text(Option<&'a str>),
    /// Runtime bookkeeping (render lists, UI tabs) that is not domain data
    Internal,
    /// Single nested object
    Object(Option<&'a dyn Inspect>),
    /// Collection of nested objects
    List(Vec<&'a dyn Inspect>),
    /// Choice wrapper whose entries are hoisted into the owner
    Items(Vec<&'a dyn Inspect>),
    /// Space separated node ids describing a polygon
    NodeIdOrder(&'a str),
    /// Per-node offsets of a wall polygon
    WallOffsets(&'a [StbWallOffset]),
    /// Per-node offsets of a slab polygon
    SlabOffsets(&'a [StbSlabOffset]),
    /// Openings placed in a planar member
    OpenIds(&'a [StbOpenId]),
}

/// One named entry of a field table
pub struct Field<'a> {
    pub name: &'a str,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    fn attribute(name: &'a str, value: Option<String>, reference: AttributeRef) -> Self {
        Self {
            name,
            value: FieldValue::Attribute(Attribute {
                value,
                specified: None,
                reference,
            }),
        }
    }

    /// Required attribute
    pub fn attr(name: &'a str, value: impl Display) -> Self {
        Self::attribute(name, Some(value.to_string()), AttributeRef::None)
    }

    /// Optional attribute, absent when `None`
    pub fn optional<T: Display>(name: &'a str, value: Option<T>) -> Self {
        Self::attribute(name, value.map(|v| v.to_string()), AttributeRef::None)
    }

    /// Optional numeric attribute with a default and a companion specified flag
    pub fn specified(name: &'a str, value: Option<f64>) -> Self {
        Self {
            name,
            value: FieldValue::Attribute(Attribute {
                value: Some(value.unwrap_or_default().to_string()),
                specified: Some(value.is_some()),
                reference: AttributeRef::None,
            }),
        }
    }

    /// Attribute naming a node
    pub fn node_ref(name: &'a str, id: &str) -> Self {
        Self::attribute(name, Some(id.to_string()), AttributeRef::Node)
    }

    /// Optional attribute naming a node
    pub fn optional_node_ref(name: &'a str, id: Option<&str>) -> Self {
        Self::attribute(name, id.map(str::to_string), AttributeRef::Node)
    }

    /// Attribute naming a steel-shape catalog entry
    pub fn steel_shape(name: &'a str, shape: &str) -> Self {
        Self::attribute(name, Some(shape.to_string()), AttributeRef::SteelShape)
    }

    /// Non-attribute text content
    pub fn text(name: &'a str, value: Option<&'a str>) -> Self {
        Self {
            name,
            value: FieldValue::Text(value),
        }
    }

    /// Runtime bookkeeping field
    pub fn internal(name: &'a str) -> Self {
        Self {
            name,
            value: FieldValue::Internal,
        }
    }

    /// Nested object
    pub fn object<T: Inspect>(name: &'a str, value: &'a T) -> Self {
        Self {
            name,
            value: FieldValue::Object(Some(value)),
        }
    }

    /// Optional nested object
    pub fn optional_object<T: Inspect>(name: &'a str, value: Option<&'a T>) -> Self {
        Self {
            name,
            value: FieldValue::Object(value.map(|v| v as &dyn Inspect)),
        }
    }

    /// Collection of nested objects
    pub fn list<T: Inspect>(name: &'a str, items: &'a [T]) -> Self {
        Self {
            name,
            value: FieldValue::List(items.iter().map(|i| i as &dyn Inspect).collect()),
        }
    }

    /// Choice wrapper, always named `Items`
    pub fn items<T: Inspect>(items: &'a [T]) -> Self {
        Self {
            name: "Items",
            value: FieldValue::Items(items.iter().map(|i| i as &dyn Inspect).collect()),
        }
    }

    /// Node-id ordered polygon
    pub fn node_id_order(order: &'a str) -> Self {
        Self {
            name: "StbNodeIdOrder",
            value: FieldValue::NodeIdOrder(order),
        }
    }

    /// Wall offset list
    pub fn wall_offsets(offsets: &'a [StbWallOffset]) -> Self {
        Self {
            name: "StbWallOffsetList",
            value: FieldValue::WallOffsets(offsets),
        }
    }

    /// Slab offset list
    pub fn slab_offsets(offsets: &'a [StbSlabOffset]) -> Self {
        Self {
            name: "StbSlabOffsetList",
            value: FieldValue::SlabOffsets(offsets),
        }
    }

    /// Open-id list
    pub fn open_ids(ids: &'a [StbOpenId]) -> Self {
        Self {
            name: "StbOpenIdList",
            value: FieldValue::OpenIds(ids),
        }
    }

    /// Whether the field holds nested objects rather than scalars
    pub fn is_composite(&self) -> bool {
        matches!(
            self.value,
            FieldValue::Object(_)
                | FieldValue::List(_)
                | FieldValue::Items(_)
                | FieldValue::WallOffsets(_)
                | FieldValue::SlabOffsets(_)
                | FieldValue::OpenIds(_)
        )
    }

    /// Nested objects in order; empty for scalar and absent fields
    pub fn children(&self) -> Vec<&'a dyn Inspect> {
        match &self.value {
            FieldValue::Object(Some(object)) => vec![*object],
            FieldValue::List(items) | FieldValue::Items(items) => items.clone(),
            FieldValue::WallOffsets(offsets) => {
                offsets.iter().map(|o| o as &dyn Inspect).collect()
            }
            FieldValue::SlabOffsets(offsets) => {
                offsets.iter().map(|o| o as &dyn Inspect).collect()
            }
            FieldValue::OpenIds(ids) => ids.iter().map(|i| i as &dyn Inspect).collect(),
            _ => Vec::new(),
        }
    }
}
