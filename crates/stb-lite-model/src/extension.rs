// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Application extensions
//!
//! Extension content is free-form, so it is kept as JSON and inspected
//! dynamically. Only JSON objects have a field table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Field, Inspect, ModelError, Result};

/// Extension blocks attached by authoring applications
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StbExtensions {
    #[serde(rename = "StbExtension", default)]
    pub extensions: Vec<StbExtension>,
}

impl Inspect for StbExtensions {
    fn type_name(&self) -> &'static str {
        "StbExtensions"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![Field::list("StbExtension", &self.extensions)])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StbExtension {
    pub identifier: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "Content", default)]
    pub content: Value,
}

impl Inspect for StbExtension {
    fn type_name(&self) -> &'static str {
        "StbExtension"
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        Ok(vec![
            Field::attr("identifier", &self.identifier),
            Field::optional("description", self.description.as_ref()),
            Field::object("Content", &self.content),
        ])
    }

    fn name_value(&self) -> Option<&str> {
        Some(&self.identifier)
    }
}

impl Inspect for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    fn fields(&self) -> Result<Vec<Field<'_>>> {
        let Value::Object(map) = self else {
            return Err(ModelError::introspection(
                self.type_name(),
                "only JSON objects have fields",
            ));
        };
        Ok(map
            .iter()
            .map(|(key, value)| match value {
                Value::Null => Field::optional::<&str>(key, None),
                Value::Bool(b) => Field::attr(key, b),
                Value::Number(n) => Field::attr(key, n),
                Value::String(s) => Field::attr(key, s),
                Value::Array(items) => Field::list(key, items.as_slice()),
                Value::Object(_) => Field::object(key, value),
            })
            .collect())
    }

    fn id_value(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    fn name_value(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;
    use serde_json::json;

    #[test]
    fn test_object_fields() {
        let value = json!({"tool": "export", "level": 3, "note": null, "tags": [{"id": "1"}]});
        let fields = value.fields().unwrap();
        assert_eq!(fields.len(), 4);

        let level = fields.iter().find(|f| f.name == "level").unwrap();
        let FieldValue::Attribute(attr) = &level.value else {
            panic!("expected attribute");
        };
        assert_eq!(attr.value.as_deref(), Some("3"));

        let note = fields.iter().find(|f| f.name == "note").unwrap();
        let FieldValue::Attribute(attr) = &note.value else {
            panic!("expected attribute");
        };
        assert!(!attr.is_present());

        let tags = fields.iter().find(|f| f.name == "tags").unwrap();
        assert_eq!(tags.children()[0].id_value(), Some("1"));
    }

    #[test]
    fn test_scalar_has_no_fields() {
        let err = json!("opaque").fields().err().unwrap();
        assert!(matches!(err, ModelError::IntrospectionFault { .. }));
        assert_eq!(err.to_string(), "Cannot inspect String: only JSON objects have fields");
    }
}
