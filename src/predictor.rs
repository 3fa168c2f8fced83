//! Prediction request orchestration.
//!
//! [`Predictor`] turns a validated [`PatientRecord`] into one oracle request,
//! awaits the single reply under a timeout and a cancellation token, parses
//! it against the verdict contract and normalizes the result.

use std::env;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::backend::{Oracle, OracleRequest, parse_structured};
use crate::cancel::CancellationToken;
use crate::error::PredictionError;
use crate::model::{OracleVerdict, PatientRecord, PredictionVerdict};

/// Timeout applied to each prediction unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Upper bound on one oracle call; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl PredictorConfig {
    /// Read `CKDSCREEN_TIMEOUT_SECS`; `0` disables the timeout.
    ///
    /// Unset or unparseable values keep [`DEFAULT_TIMEOUT`].
    pub fn from_env() -> Self {
        let timeout = match env::var("CKDSCREEN_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    warn!(value = %raw, "Invalid CKDSCREEN_TIMEOUT_SECS, using default");
                    Some(DEFAULT_TIMEOUT)
                }
            },
            Err(_) => Some(DEFAULT_TIMEOUT),
        };
        Self { timeout }
    }
}

/// Build the natural-language prompt embedding the patient data.
fn build_prompt(patient_json: &str) -> String {
    format!(
        "You are a medical AI specialising in nephrology. Predict the likelihood of Chronic Kidney Disease (CKD) from the patient data below.\n\n\
         Patient Data:\n{}\n\n\
         Respond with a JSON object containing your prediction, a confidence score, the patient's risk level and a numerical risk score.\n\
         - \"prediction\" must be exactly \"CKD Detected\" or \"No CKD Detected\".\n\
         - \"confidence\" must be a number from 0 to 100 expressing your certainty.\n\
         - \"riskLevel\" must be exactly \"Low\", \"Medium\" or \"High\". If no CKD is detected, the risk level must be \"Low\".\n\
         - \"riskScore\" must be a number from 0 to 100; a higher score means a higher risk.",
        patient_json
    )
}

/// The prediction request orchestrator.
///
/// Owns its oracle; construct one per process and share it by reference.
/// Each call to [`predict`](Self::predict) issues exactly one oracle request
/// and is never retried or cached.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use ckdscreen::{BoundsPolicy, DomainSchema, GeminiClient, Predictor, Sample, validate_form};
///
/// let predictor = Predictor::new(GeminiClient::from_env()?);
/// let record = validate_form(
///     &Sample::CkdPositive.to_form(),
///     &DomainSchema::standard(),
///     BoundsPolicy::Strict,
/// )?;
/// let verdict = predictor.predict(&record).await?;
/// println!("{} ({}% confidence)", verdict.outcome(), verdict.confidence());
/// # Ok(())
/// # }
/// ```
pub struct Predictor<O> {
    oracle: O,
    config: PredictorConfig,
}

impl<O: Oracle> Predictor<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, PredictorConfig::default())
    }

    pub fn with_config(oracle: O, config: PredictorConfig) -> Self {
        info!(oracle = oracle.name(), timeout = ?config.timeout, "Created predictor");
        Self { oracle, config }
    }

    /// Set or clear the per-call timeout.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        debug!(previous_timeout = ?self.config.timeout, new_timeout = ?timeout, "Setting timeout");
        self.config.timeout = timeout;
        self
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Serialize the record and attach the verdict output contract.
    pub fn build_request(&self, record: &PatientRecord) -> Result<OracleRequest, PredictionError> {
        let patient_json = serde_json::to_string_pretty(record)?;
        Ok(OracleRequest::for_output::<OracleVerdict>(build_prompt(
            &patient_json,
        )))
    }

    /// Obtain a normalized verdict for `record`.
    pub async fn predict(&self, record: &PatientRecord) -> Result<PredictionVerdict, PredictionError> {
        self.predict_with_cancel(record, &CancellationToken::new())
            .await
    }

    /// Like [`predict`](Self::predict), abandoning the call with
    /// [`PredictionError::Cancelled`] once `cancel` fires.
    #[instrument(name = "predict", skip_all, fields(oracle = self.oracle.name()))]
    pub async fn predict_with_cancel(
        &self,
        record: &PatientRecord,
        cancel: &CancellationToken,
    ) -> Result<PredictionVerdict, PredictionError> {
        if cancel.is_cancelled() {
            warn!("Prediction cancelled before the oracle was called");
            return Err(PredictionError::Cancelled);
        }

        let request = self.build_request(record)?;
        debug!(prompt_len = request.prompt.len(), "Built oracle request");

        let call = self.oracle.generate(&request);
        let bounded = async {
            match self.config.timeout {
                Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                    error!(timeout = ?limit, "Oracle call timed out");
                    Err(PredictionError::Timeout)
                }),
                None => call.await,
            }
        };

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Prediction cancelled while awaiting the oracle");
                return Err(PredictionError::Cancelled);
            }
            result = bounded => result?,
        };

        let raw: OracleVerdict = parse_structured(&text)?;
        let verdict = PredictionVerdict::from(raw);
        info!(
            outcome = %verdict.outcome(),
            risk_level = %verdict.risk_level(),
            confidence = verdict.confidence(),
            "Prediction complete"
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_states_the_contract() {
        let prompt = build_prompt("{\"sc\": 1.8}");
        assert!(prompt.contains("{\"sc\": 1.8}"));
        assert!(prompt.contains("\"CKD Detected\" or \"No CKD Detected\""));
        assert!(prompt.contains("must be \"Low\""));
    }

    #[test]
    fn default_timeout_is_set() {
        assert_eq!(PredictorConfig::default().timeout, Some(DEFAULT_TIMEOUT));
    }
}
