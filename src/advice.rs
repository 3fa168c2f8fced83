//! Fixed guidance text shown alongside a verdict.

use serde::Serialize;

use crate::model::Outcome;

const CKD_RECOMMENDATIONS: [&str; 5] = [
    "Urgent: Consult a nephrologist immediately.",
    "Get comprehensive kidney function tests (e.g., GFR, urine protein).",
    "Monitor blood pressure and blood sugar levels daily.",
    "Follow a kidney-friendly diet (low sodium, low potassium, controlled protein).",
    "Review all current medications with your doctor.",
];

const HEALTHY_RECOMMENDATIONS: [&str; 5] = [
    "Maintain a balanced diet and stay hydrated.",
    "Engage in regular physical activity.",
    "Monitor blood pressure and get regular check-ups.",
    "Avoid smoking and limit alcohol consumption.",
    "Manage stress through healthy coping mechanisms.",
];

/// Headings and recommendations for one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub headline: &'static str,
    /// Title over the clinical summary
    pub findings_title: &'static str,
    pub recommendations_title: &'static str,
    pub recommendations: &'static [&'static str],
}

pub fn guidance(outcome: Outcome) -> Guidance {
    match outcome {
        Outcome::Detected => Guidance {
            headline: "CKD DETECTED",
            findings_title: "Key Risk Factors Identified",
            recommendations_title: "Medical Recommendations",
            recommendations: &CKD_RECOMMENDATIONS,
        },
        Outcome::NotDetected => Guidance {
            headline: "NO CKD DETECTED",
            findings_title: "Health Status",
            recommendations_title: "Healthy Lifestyle Tips",
            recommendations: &HEALTHY_RECOMMENDATIONS,
        },
    }
}
