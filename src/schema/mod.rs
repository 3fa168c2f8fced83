//! JSON Schema for the oracle's output contract.
//!
//! The schema travels with every request (Gemini's `responseSchema`), so the
//! model is constrained to the same shape that [`crate::StructuredOutput`]
//! deserializes and checks.

mod builder;
pub use builder::SchemaBuilder;

use std::fmt;

use serde_json::Value;

/// A rendered JSON Schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    json: Value,
}

impl Schema {
    pub fn new(json: Value) -> Self {
        Self { json }
    }

    pub fn to_json(&self) -> &Value {
        &self.json
    }

    pub fn into_json(self) -> Value {
        self.json
    }

    /// Names of the required top-level properties.
    pub fn required(&self) -> Vec<&str> {
        self.json["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.json)
    }
}

/// A type that describes its own JSON shape.
pub trait SchemaType {
    fn schema() -> Schema;
}
