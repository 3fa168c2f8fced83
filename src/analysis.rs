//! Derived analysis of a record and its verdict.
//!
//! Two risk narratives are produced and kept apart:
//!
//! * clinical heuristics ([`clinical_summary`]) evaluate fixed thresholds on
//!   the raw record;
//! * the feature-importance partition ([`partition_features`]) compares each
//!   weighted feature with its reference range.
//!
//! They can disagree for the same patient (blood urea of 32 is a range
//! violation but below the heuristic threshold of 50), and both are shown.
//!
//! Specific gravity is compared against the numeric interval 1.010 - 1.025,
//! so a reading such as `1.020` is normal. This departs from a plain text
//! match against the lower bound, which would flag every reading but 1.010.

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{Attribute, DomainSchema, RangeStatus};
use crate::model::{Outcome, PatientRecord, PredictionVerdict};

/// Maximum number of protective factors handed to display.
pub const PROTECTIVE_DISPLAY_LIMIT: usize = 5;

/// Shown when disease is detected but no heuristic fires.
pub const NO_PROMINENT_FACTORS_MESSAGE: &str = "Specific primary risk factors not prominent, but a combination of inputs suggests risk. Please consult a doctor for a full evaluation.";

/// Shown in place of risk factors when no disease is detected.
pub const HEALTHY_STATUS_MESSAGE: &str = "Your test results fall within the normal range for key indicators. Continue to maintain a healthy lifestyle.";

/// Shown in place of feature risk factors when disease is detected but none is abnormal.
pub const MODERATE_CONTRIBUTION_MESSAGE: &str =
    "Multiple factors contributed moderately to the risk score.";

/// Shown in place of feature risk factors when no disease is detected.
pub const NO_CONTRIBUTING_FACTORS_MESSAGE: &str = "No significant contributing factors identified.";

/// Shown when no weighted feature is within its normal range.
pub const NO_PROTECTIVE_FACTORS_MESSAGE: &str =
    "No prominent protective factors identified from the key features.";

/// One row of the normal-range comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeComparison {
    pub attribute: Attribute,
    pub label: &'static str,
    pub value: String,
    /// The range as text, `"N/A"` when none is defined
    pub range: String,
    pub status: RangeStatus,
}

/// Compare every attribute with its reference range, in canonical order.
pub fn compare_ranges(record: &PatientRecord, schema: &DomainSchema) -> Vec<RangeComparison> {
    record
        .iter()
        .map(|(attribute, value)| {
            let (range, status) = match schema.reference_range(attribute) {
                Some(range) => (range.to_string(), range.classify(value)),
                None => (
                    RangeStatus::NotApplicable.to_string(),
                    RangeStatus::NotApplicable,
                ),
            };
            trace!(attribute = %attribute, status = %status, "Compared against reference range");
            RangeComparison {
                attribute,
                label: attribute.display_name(),
                value: value.to_string(),
                range,
                status,
            }
        })
        .collect()
}

/// A fixed clinical heuristic, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClinicalRiskFactor {
    /// Serum creatinine above 1.4 mgs/dl
    ElevatedCreatinine,
    /// Blood urea above 50 mgs/dl
    HighUrea,
    /// Hemoglobin below 12 gms
    LowHemoglobin,
    Hypertension,
    DiabetesMellitus,
    /// Albumin level above 0
    Albuminuria,
}

impl ClinicalRiskFactor {
    pub const ALL: [ClinicalRiskFactor; 6] = [
        ClinicalRiskFactor::ElevatedCreatinine,
        ClinicalRiskFactor::HighUrea,
        ClinicalRiskFactor::LowHemoglobin,
        ClinicalRiskFactor::Hypertension,
        ClinicalRiskFactor::DiabetesMellitus,
        ClinicalRiskFactor::Albuminuria,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClinicalRiskFactor::ElevatedCreatinine => "Elevated Serum Creatinine",
            ClinicalRiskFactor::HighUrea => "High Blood Urea",
            ClinicalRiskFactor::LowHemoglobin => "Low Hemoglobin",
            ClinicalRiskFactor::Hypertension => "Hypertension Present",
            ClinicalRiskFactor::DiabetesMellitus => "Diabetes Mellitus Present",
            ClinicalRiskFactor::Albuminuria => "Albumin in Urine",
        }
    }

    pub fn applies_to(&self, record: &PatientRecord) -> bool {
        let above = |attr, threshold| record.number(attr).is_some_and(|v| v > threshold);
        match self {
            ClinicalRiskFactor::ElevatedCreatinine => above(Attribute::Sc, 1.4),
            ClinicalRiskFactor::HighUrea => above(Attribute::Bu, 50.0),
            ClinicalRiskFactor::LowHemoglobin => {
                record.number(Attribute::Hemo).is_some_and(|v| v < 12.0)
            }
            ClinicalRiskFactor::Hypertension => record.is(Attribute::Htn, "yes"),
            ClinicalRiskFactor::DiabetesMellitus => record.is(Attribute::Dm, "yes"),
            ClinicalRiskFactor::Albuminuria => above(Attribute::Al, 0.0),
        }
    }
}

/// Heuristics that fire for `record`, in fixed order.
pub fn clinical_risk_factors(record: &PatientRecord) -> Vec<ClinicalRiskFactor> {
    ClinicalRiskFactor::ALL
        .into_iter()
        .filter(|f| f.applies_to(record))
        .collect()
}

/// The clinical-heuristic narrative for a verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClinicalSummary {
    /// Disease detected and at least one heuristic fired
    RiskFactors(Vec<ClinicalRiskFactor>),
    /// Disease detected but no heuristic fired
    NoProminentFactors,
    /// No disease detected; heuristics are not evaluated
    Healthy,
}

impl ClinicalSummary {
    /// Lines to display: factor labels, or a single explanatory message.
    pub fn lines(&self) -> Vec<&'static str> {
        match self {
            ClinicalSummary::RiskFactors(factors) => factors.iter().map(|f| f.label()).collect(),
            ClinicalSummary::NoProminentFactors => vec![NO_PROMINENT_FACTORS_MESSAGE],
            ClinicalSummary::Healthy => vec![HEALTHY_STATUS_MESSAGE],
        }
    }
}

pub fn clinical_summary(record: &PatientRecord, outcome: Outcome) -> ClinicalSummary {
    if !outcome.is_detected() {
        return ClinicalSummary::Healthy;
    }
    let factors = clinical_risk_factors(record);
    if factors.is_empty() {
        ClinicalSummary::NoProminentFactors
    } else {
        ClinicalSummary::RiskFactors(factors)
    }
}

/// Weighted features split by whether they fall within their normal range.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeaturePartition {
    /// Abnormal features in weight order, uncapped
    pub risk: Vec<&'static str>,
    /// Normal features in weight order, at most [`PROTECTIVE_DISPLAY_LIMIT`]
    pub protective: Vec<&'static str>,
}

/// Partition the schema's weighted features into risk and protective lists.
///
/// Features that do not resolve to an attribute, or whose attribute has no
/// reference range, are skipped.
pub fn partition_features(record: &PatientRecord, schema: &DomainSchema) -> FeaturePartition {
    let mut partition = FeaturePartition::default();
    let mut protective = Vec::new();

    for feature in schema.feature_importance() {
        let Some(attribute) = feature.attribute() else {
            trace!(feature = feature.name, "Feature does not resolve to an attribute");
            continue;
        };
        let Some(range) = schema.reference_range(attribute) else {
            continue;
        };
        match range.classify(record.value(attribute)) {
            RangeStatus::Abnormal => partition.risk.push(feature.name),
            RangeStatus::Normal if !partition.risk.contains(&feature.name) => {
                protective.push(feature.name)
            }
            _ => {}
        }
    }

    protective.truncate(PROTECTIVE_DISPLAY_LIMIT);
    partition.protective = protective;
    partition
}

/// Everything derived from one record and its verdict.
///
/// Recomputed on demand; carries no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedAnalysis {
    pub outcome: Outcome,
    pub comparisons: Vec<RangeComparison>,
    pub clinical: ClinicalSummary,
    pub features: FeaturePartition,
}

impl DerivedAnalysis {
    /// Number of attributes outside their reference range.
    pub fn abnormal_count(&self) -> usize {
        self.comparisons
            .iter()
            .filter(|c| c.status == RangeStatus::Abnormal)
            .count()
    }

    /// Feature-importance risk factors as displayed: only when disease is detected.
    pub fn displayed_risk_features(&self) -> &[&'static str] {
        if self.outcome.is_detected() {
            &self.features.risk
        } else {
            &[]
        }
    }

    /// Contributing-factor lines: feature names, or a single message when
    /// none are displayed.
    pub fn risk_feature_lines(&self) -> Vec<&'static str> {
        match self.displayed_risk_features() {
            [] if self.outcome.is_detected() => vec![MODERATE_CONTRIBUTION_MESSAGE],
            [] => vec![NO_CONTRIBUTING_FACTORS_MESSAGE],
            names => names.to_vec(),
        }
    }

    /// Protective-factor lines: at most [`PROTECTIVE_DISPLAY_LIMIT`] names, or
    /// a single message when none qualify.
    pub fn protective_feature_lines(&self) -> Vec<&'static str> {
        if self.features.protective.is_empty() {
            vec![NO_PROTECTIVE_FACTORS_MESSAGE]
        } else {
            self.features.protective.clone()
        }
    }
}

/// Derive the full analysis. Pure and deterministic.
///
/// # Examples
///
/// ```
/// use ckdscreen::{
///     BoundsPolicy, DomainSchema, Outcome, PredictionVerdict, RiskLevel, Sample, analyze,
///     validate_form,
/// };
///
/// let schema = DomainSchema::standard();
/// let record = validate_form(&Sample::CkdPositive.to_form(), &schema, BoundsPolicy::Strict)?;
/// let verdict = PredictionVerdict::new(Outcome::Detected, 94.0, RiskLevel::High, 88.0);
///
/// let analysis = analyze(&record, &verdict, &schema);
/// assert_eq!(analysis.clinical.lines()[0], "Elevated Serum Creatinine");
/// assert!(analysis.features.protective.is_empty());
/// # Ok::<(), ckdscreen::ValidationError>(())
/// ```
pub fn analyze(
    record: &PatientRecord,
    verdict: &PredictionVerdict,
    schema: &DomainSchema,
) -> DerivedAnalysis {
    let analysis = DerivedAnalysis {
        outcome: verdict.outcome(),
        comparisons: compare_ranges(record, schema),
        clinical: clinical_summary(record, verdict.outcome()),
        features: partition_features(record, schema),
    };
    debug!(
        abnormal = analysis.abnormal_count(),
        risk_features = analysis.features.risk.len(),
        protective_features = analysis.features.protective.len(),
        "Derived analysis"
    );
    analysis
}
