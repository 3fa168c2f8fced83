use thiserror::Error;

/// Message shown to the user whenever a prediction could not be obtained.
///
/// Transport and parsing details are logged, never surfaced.
pub const PREDICTION_FAILED_MESSAGE: &str =
    "An error occurred while generating the prediction. Please check your connection and try again.";

/// Raw form input that cannot become a [`PatientRecord`](crate::PatientRecord).
///
/// Every variant carries the key of the offending attribute so the caller can
/// point the user at the right form control.
///
/// # Examples
///
/// ```
/// use ckdscreen::ValidationError;
///
/// let err = ValidationError::NotANumber {
///     field: "sc".to_string(),
///     value: "high".to_string(),
/// };
/// assert_eq!(err.field(), "sc");
/// assert_eq!(err.to_string(), "sc: 'high' is not a number");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required attribute is absent from the form
    #[error("{field}: value is required")]
    MissingField { field: String },

    /// The attribute is present but blank
    #[error("{field}: value must not be empty")]
    EmptyField { field: String },

    /// A numeric attribute did not parse
    #[error("{field}: '{value}' is not a number")]
    NotANumber { field: String, value: String },

    /// A numeric attribute parsed to NaN or infinity
    #[error("{field}: '{value}' is not a finite number")]
    NonFinite { field: String, value: String },

    /// A numeric attribute fell outside its declared bounds (strict policy only)
    #[error("{field}: {value} is outside the allowed range {min} - {max}")]
    OutOfBounds {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A categorical attribute is not one of its declared options
    #[error("{field}: '{value}' is not one of [{}]", .allowed.join(", "))]
    NotAnOption {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// The form contains a key that is not a known attribute
    #[error("{field}: unknown attribute")]
    UnknownField { field: String },
}

impl ValidationError {
    /// Key of the attribute that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::EmptyField { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NonFinite { field, .. }
            | ValidationError::OutOfBounds { field, .. }
            | ValidationError::NotAnOption { field, .. }
            | ValidationError::UnknownField { field } => field,
        }
    }
}

/// Failure to obtain a verdict from the classification oracle.
///
/// None of these are retried automatically; the user re-submits.
#[derive(Error, Debug)]
pub enum PredictionError {
    /// HTTP transport failure (from reqwest)
    #[cfg(feature = "gemini")]
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with an error
    #[error("API error: {0}")]
    Api(String),

    /// The remote service answered without any content to parse
    #[error("Empty response from oracle")]
    EmptyResponse,

    /// The oracle's output does not satisfy the verdict contract
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// JSON error (from serde_json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The call did not complete within the configured timeout
    #[error("Timeout error")]
    Timeout,

    /// The call was abandoned through its cancellation token
    #[error("Prediction cancelled")]
    Cancelled,
}

impl PredictionError {
    /// The single message shown to the user for any prediction failure.
    pub fn user_message(&self) -> &'static str {
        PREDICTION_FAILED_MESSAGE
    }
}

// Http and Json wrap errors without PartialEq and never compare equal.
impl PartialEq for PredictionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Api(a), Self::Api(b)) => a == b,
            (Self::EmptyResponse, Self::EmptyResponse) => true,
            (Self::MalformedResponse(a), Self::MalformedResponse(b)) => a == b,
            (Self::Timeout, Self::Timeout) => true,
            (Self::Cancelled, Self::Cancelled) => true,
            _ => false,
        }
    }
}

/// Top-level error for screening operations.
#[derive(Error, Debug, PartialEq)]
pub enum CkdError {
    /// Input rejected before any network call
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The oracle call failed
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    /// A prediction is already in flight for this session
    #[error("A prediction is already in progress")]
    SubmissionPending,
}

/// A specialized Result type for screening operations.
///
/// # Examples
///
/// ```
/// use ckdscreen::{CkdError, Result, ValidationError};
///
/// fn require(value: &str) -> Result<&str> {
///     if value.trim().is_empty() {
///         return Err(ValidationError::EmptyField { field: "age".into() }.into());
///     }
///     Ok(value)
/// }
///
/// assert!(matches!(require(" "), Err(CkdError::Validation(_))));
/// ```
pub type Result<T> = std::result::Result<T, CkdError>;
