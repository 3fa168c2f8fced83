mod record;
mod verdict;

pub use record::{FieldValue, PatientRecord};
pub use verdict::{OracleVerdict, Outcome, PredictionVerdict, RiskLevel};

use serde::de::DeserializeOwned;

use crate::error::PredictionError;
use crate::schema::SchemaType;

/// A type the oracle is asked to produce as JSON.
///
/// Combines the output schema sent with the request, deserialization of the
/// reply, and contract checks that types alone cannot express.
///
/// # Example
///
/// ```
/// use ckdscreen::{PredictionError, Schema, SchemaBuilder, SchemaType, StructuredOutput};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Egfr {
///     value: f64,
/// }
///
/// impl SchemaType for Egfr {
///     fn schema() -> Schema {
///         SchemaBuilder::object()
///             .property("value", json!({"type": "number"}), true)
///             .build()
///     }
/// }
///
/// impl StructuredOutput for Egfr {
///     fn validate(&self) -> Result<(), PredictionError> {
///         if self.value < 0.0 {
///             return Err(PredictionError::MalformedResponse(
///                 format!("eGFR cannot be negative, got {}", self.value)
///             ));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait StructuredOutput: SchemaType + DeserializeOwned {
    /// Checks beyond type conformance; the default accepts everything.
    fn validate(&self) -> std::result::Result<(), PredictionError> {
        Ok(())
    }
}
