use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PredictionError;
use crate::model::StructuredOutput;
use crate::schema::Schema;

/// One structured-generation request: the prompt and the JSON Schema the
/// reply must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub prompt: String,
    pub response_schema: Schema,
}

impl OracleRequest {
    pub fn new(prompt: impl Into<String>, response_schema: Schema) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema,
        }
    }

    /// Request whose schema is taken from the expected output type.
    pub fn for_output<T: StructuredOutput>(prompt: impl Into<String>) -> Self {
        Self::new(prompt, T::schema())
    }
}

/// The external classification oracle.
///
/// An oracle sends one request to a text-generation service and returns the
/// raw text it produced. It is non-deterministic: identical requests may yield
/// different answers. Parsing and normalizing that text is the caller's job
/// (see [`Predictor`](crate::Predictor)), so any implementation, including a
/// deterministic test stub, can stand in for the remote service.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use ckdscreen::{Oracle, OracleRequest, PredictionError};
///
/// struct AlwaysHealthy;
///
/// #[async_trait]
/// impl Oracle for AlwaysHealthy {
///     async fn generate(&self, _request: &OracleRequest) -> Result<String, PredictionError> {
///         Ok(r#"{"prediction":"No CKD Detected","confidence":95,"riskLevel":"Low","riskScore":8}"#.into())
///     }
/// }
/// ```
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Issue exactly one call and return the model's text output.
    async fn generate(&self, request: &OracleRequest) -> Result<String, PredictionError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "oracle"
    }
}

#[async_trait]
impl<O: Oracle + ?Sized> Oracle for Arc<O> {
    async fn generate(&self, request: &OracleRequest) -> Result<String, PredictionError> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
