//! ckdscreen: chronic kidney disease screening backed by an LLM oracle
//!
//! # Overview
//!
//! ckdscreen takes the 24 clinical attributes of the CKD dataset as raw form
//! text, validates them into a typed [`PatientRecord`], asks a classification
//! oracle (Gemini by default) for a structured verdict, and derives a
//! reference-range analysis that explains the result.
//!
//! Key features:
//! - Static domain schema: attributes, form sections, reference ranges, feature weights
//! - Validation with per-field errors and a configurable bounds policy
//! - One oracle call per prediction with timeout and cancellation
//! - Verdict normalization: a negative outcome always carries a Low risk level
//! - Deterministic derived analysis and outcome-specific guidance
//! - A page-flow [`Session`] that discards stale replies
//!
//! # Quick Start
//!
//! ```no_run
//! use ckdscreen::{GeminiClient, Predictor, Sample, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let predictor = Predictor::new(GeminiClient::from_env()?);
//!
//!     let mut session = Session::default();
//!     session.new_prediction();
//!     session.load_sample(Sample::CkdPositive);
//!
//!     match session.submit(&predictor).await {
//!         Ok(verdict) => println!("{} (risk {})", verdict.outcome(), verdict.risk_level()),
//!         Err(err) => {
//!             tracing::error!(%err, "Screening failed");
//!             eprintln!("{}", session.error().unwrap_or_default());
//!         }
//!     }
//!
//!     if let Some(analysis) = session.analysis() {
//!         for line in analysis.clinical.lines() {
//!             println!("- {}", line);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod advice;
pub mod analysis;
mod backend;
mod cancel;
pub mod domain;
mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod model;
mod predictor;
pub mod schema;
pub mod session;
mod validation;

// Re-exports for convenience
pub use advice::{Guidance, guidance};
pub use analysis::{
    ClinicalRiskFactor, ClinicalSummary, DerivedAnalysis, FeaturePartition, RangeComparison,
    analyze,
};
pub use backend::{Oracle, OracleRequest, extract_json_from_markdown, parse_structured};
pub use cancel::CancellationToken;
pub use domain::{
    Attribute, DomainSchema, RangeStatus, RawForm, ReferenceRange, Sample, default_form,
};
pub use error::{CkdError, PREDICTION_FAILED_MESSAGE, PredictionError, Result, ValidationError};
pub use model::{
    FieldValue, OracleVerdict, Outcome, PatientRecord, PredictionVerdict, RiskLevel,
    StructuredOutput,
};
pub use predictor::{DEFAULT_TIMEOUT, Predictor, PredictorConfig};
pub use schema::{Schema, SchemaBuilder, SchemaType};
pub use session::{Assessment, Completion, Page, Session, Submission};
pub use validation::{BoundsPolicy, validate_form};

#[cfg(feature = "gemini")]
pub use backend::{GeminiClient, GeminiConfig, GeminiModel};
