use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::Attribute;

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Continuous measurement
    Number(f64),
    /// Categorical or ordinal value, in its declared option spelling
    Choice(String),
}

impl FieldValue {
    /// Numeric reading of the value; ordinal text such as `"3"` parses.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Choice(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            FieldValue::Choice(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Choice(s) => f.write_str(s),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Choice(s) => serializer.serialize_str(s),
        }
    }
}

/// A complete, validated set of the 24 screening attributes.
///
/// Only [`crate::validation::validate_form`] constructs records, so every
/// attribute is always present and well-typed.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    // Indexed by Attribute::index(); always Attribute::COUNT long.
    values: Vec<FieldValue>,
}

impl PatientRecord {
    pub(crate) fn from_ordered(values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(values.len(), Attribute::COUNT);
        Self { values }
    }

    pub fn value(&self, attribute: Attribute) -> &FieldValue {
        &self.values[attribute.index()]
    }

    /// Numeric reading of an attribute (see [`FieldValue::as_number`]).
    pub fn number(&self, attribute: Attribute) -> Option<f64> {
        self.value(attribute).as_number()
    }

    pub fn choice(&self, attribute: Attribute) -> Option<&str> {
        self.value(attribute).as_choice()
    }

    /// True when a categorical attribute equals `expected`, ignoring case.
    pub fn is(&self, attribute: Attribute, expected: &str) -> bool {
        self.choice(attribute)
            .is_some_and(|v| v.eq_ignore_ascii_case(expected))
    }

    /// Attributes and values in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &FieldValue)> {
        Attribute::ALL.into_iter().zip(self.values.iter())
    }
}

/// Serialized as an object keyed by attribute key, numbers as JSON numbers
/// and categorical values as strings.
impl Serialize for PatientRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (attribute, value) in self.iter() {
            map.serialize_entry(attribute.key(), value)?;
        }
        map.end()
    }
}
