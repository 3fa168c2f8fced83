use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value, json};

use super::Schema;

/// Incremental builder for an object schema.
///
/// Properties and required names render in name order, so the same calls
/// always produce byte-identical JSON.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    description: Option<String>,
    properties: BTreeMap<String, Value>,
    required: BTreeSet<String>,
}

impl SchemaBuilder {
    pub fn object() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property with an arbitrary schema fragment.
    pub fn property(mut self, name: impl Into<String>, fragment: Value, required: bool) -> Self {
        let name = name.into();
        if required {
            self.required.insert(name.clone());
        }
        self.properties.insert(name, fragment);
        self
    }

    /// Required string property restricted to `values`.
    pub fn one_of(self, name: impl Into<String>, values: &[&str], description: &str) -> Self {
        self.property(
            name,
            json!({
                "type": "string",
                "enum": values,
                "description": description,
            }),
            true,
        )
    }

    /// Required number property within `[min, max]`.
    pub fn bounded_number(
        self,
        name: impl Into<String>,
        min: f64,
        max: f64,
        description: &str,
    ) -> Self {
        self.property(
            name,
            json!({
                "type": "number",
                "minimum": min,
                "maximum": max,
                "description": description,
            }),
            true,
        )
    }

    pub fn build(self) -> Schema {
        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        if let Some(description) = self.description {
            schema.insert("description".into(), json!(description));
        }
        schema.insert(
            "properties".into(),
            Value::Object(self.properties.into_iter().collect()),
        );
        if !self.required.is_empty() {
            schema.insert("required".into(), json!(self.required));
        }
        Schema::new(Value::Object(schema))
    }
}
