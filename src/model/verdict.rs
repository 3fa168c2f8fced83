use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::StructuredOutput;
use crate::error::PredictionError;
use crate::schema::{Schema, SchemaBuilder, SchemaType};

/// Binary classification returned by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "CKD Detected")]
    Detected,
    #[serde(rename = "No CKD Detected")]
    NotDetected,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Detected => "CKD Detected",
            Outcome::NotDetected => "No CKD Detected",
        }
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Outcome::Detected)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verdict exactly as the oracle must return it.
///
/// All four fields are required; a missing field, a wrong type or a literal
/// outside the allowed set fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleVerdict {
    pub prediction: Outcome,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
}

impl SchemaType for OracleVerdict {
    fn schema() -> Schema {
        SchemaBuilder::object()
            .description("Chronic kidney disease prediction for one patient")
            .one_of(
                "prediction",
                &[Outcome::Detected.as_str(), Outcome::NotDetected.as_str()],
                "The binary prediction for Chronic Kidney Disease. Must be one of: \"CKD Detected\" or \"No CKD Detected\".",
            )
            .bounded_number(
                "confidence",
                0.0,
                100.0,
                "Confidence in the prediction, from 0 to 100.",
            )
            .one_of(
                "riskLevel",
                &[RiskLevel::High.as_str(), RiskLevel::Medium.as_str(), RiskLevel::Low.as_str()],
                "The assessed risk level for the patient. Must be one of: \"High\", \"Medium\" or \"Low\".",
            )
            .bounded_number(
                "riskScore",
                0.0,
                100.0,
                "Numerical risk score from 0 to 100, higher means greater risk.",
            )
            .build()
    }
}

fn check_percentage(name: &str, value: f64) -> std::result::Result<(), PredictionError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(PredictionError::MalformedResponse(format!(
            "{} must be a number between 0 and 100, got {}",
            name, value
        )));
    }
    Ok(())
}

impl StructuredOutput for OracleVerdict {
    fn validate(&self) -> std::result::Result<(), PredictionError> {
        check_percentage("confidence", self.confidence)?;
        check_percentage("riskScore", self.risk_score)
    }
}

/// A normalized verdict: a negative outcome always carries [`RiskLevel::Low`].
///
/// # Examples
///
/// ```
/// use ckdscreen::{Outcome, PredictionVerdict, RiskLevel};
///
/// let verdict = PredictionVerdict::new(Outcome::NotDetected, 90.0, RiskLevel::High, 72.0);
/// assert_eq!(verdict.risk_level(), RiskLevel::Low);
/// assert_eq!(verdict.risk_score(), 72.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionVerdict {
    #[serde(rename = "prediction")]
    outcome: Outcome,
    confidence: f64,
    risk_level: RiskLevel,
    risk_score: f64,
}

impl PredictionVerdict {
    pub fn new(outcome: Outcome, confidence: f64, risk_level: RiskLevel, risk_score: f64) -> Self {
        let risk_level = match outcome {
            Outcome::NotDetected if risk_level != RiskLevel::Low => {
                warn!(
                    reported = %risk_level,
                    "Negative outcome reported with elevated risk level, forcing Low"
                );
                RiskLevel::Low
            }
            _ => risk_level,
        };
        Self {
            outcome,
            confidence,
            risk_level,
            risk_score,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_detected(&self) -> bool {
        self.outcome.is_detected()
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn risk_score(&self) -> f64 {
        self.risk_score
    }
}

impl From<OracleVerdict> for PredictionVerdict {
    fn from(raw: OracleVerdict) -> Self {
        Self::new(raw.prediction, raw.confidence, raw.risk_level, raw.risk_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_literals() {
        let raw: OracleVerdict = serde_json::from_str(
            r#"{"prediction":"CKD Detected","confidence":88,"riskLevel":"Medium","riskScore":64.5}"#,
        )
        .unwrap();
        assert_eq!(raw.prediction, Outcome::Detected);
        assert_eq!(raw.risk_level, RiskLevel::Medium);
        assert_eq!(raw.confidence, 88.0);
    }

    #[test]
    fn unknown_literal_is_rejected() {
        let raw = serde_json::from_str::<OracleVerdict>(
            r#"{"prediction":"Maybe","confidence":50,"riskLevel":"Low","riskScore":10}"#,
        );
        assert!(raw.is_err());
    }

    #[test]
    fn negative_outcome_forces_low_risk() {
        for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
            let verdict = PredictionVerdict::new(Outcome::NotDetected, 90.0, level, 72.0);
            assert_eq!(verdict.risk_level(), RiskLevel::Low);
            assert_eq!(verdict.confidence(), 90.0);
            assert_eq!(verdict.risk_score(), 72.0);
        }
    }

    #[test]
    fn positive_outcome_keeps_risk_level() {
        let verdict = PredictionVerdict::new(Outcome::Detected, 80.0, RiskLevel::Medium, 55.0);
        assert_eq!(verdict.risk_level(), RiskLevel::Medium);
    }

    #[test]
    fn percentages_are_checked() {
        let mut raw = OracleVerdict {
            prediction: Outcome::Detected,
            confidence: 101.0,
            risk_level: RiskLevel::High,
            risk_score: 90.0,
        };
        assert!(matches!(
            raw.validate(),
            Err(PredictionError::MalformedResponse(msg)) if msg.contains("confidence")
        ));
        raw.confidence = 100.0;
        raw.risk_score = -1.0;
        assert!(raw.validate().is_err());
        raw.risk_score = 0.0;
        assert!(raw.validate().is_ok());
    }

    #[test]
    fn schema_requires_all_fields() {
        let schema = OracleVerdict::schema();
        assert_eq!(
            schema.required(),
            vec!["confidence", "prediction", "riskLevel", "riskScore"]
        );
        assert_eq!(
            schema.to_json()["properties"]["prediction"]["enum"],
            serde_json::json!(["CKD Detected", "No CKD Detected"])
        );
    }

    #[test]
    fn verdict_serializes_in_wire_shape() {
        let verdict = PredictionVerdict::new(Outcome::Detected, 91.0, RiskLevel::High, 83.0);
        let json = serde_json::to_value(verdict).unwrap();
        assert_eq!(json["prediction"], "CKD Detected");
        assert_eq!(json["riskLevel"], "High");
        assert_eq!(json["riskScore"], 83.0);
    }
}
