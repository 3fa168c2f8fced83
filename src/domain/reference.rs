use std::fmt;

use serde::Serialize;

use super::Attribute;
use crate::model::FieldValue;

/// Clinically normal value for an attribute.
///
/// A categorical range is a single accepted value, i.e. the degenerate
/// interval `[v, v]`, and renders as `"v - v"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceRange {
    /// Closed interval; both bounds are normal
    Numeric {
        lo: f64,
        hi: f64,
        /// Decimal places shown for both bounds; `None` prints the shortest form
        precision: Option<usize>,
    },
    /// Accepted value, compared case-insensitively
    Categorical(&'static str),
}

/// Outcome of comparing one value against its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeStatus {
    Normal,
    Abnormal,
    /// No reference range is defined for the attribute
    NotApplicable,
}

impl RangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeStatus::Normal => "normal",
            RangeStatus::Abnormal => "abnormal",
            RangeStatus::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ReferenceRange {
    /// Classify a value against this range.
    ///
    /// Ordinal levels recorded as text (albumin, sugar, specific gravity)
    /// are read as numbers for numeric ranges; text that does not parse is
    /// abnormal.
    pub fn classify(&self, value: &FieldValue) -> RangeStatus {
        let normal = match self {
            ReferenceRange::Numeric { lo, hi, .. } => value
                .as_number()
                .is_some_and(|v| v >= *lo && v <= *hi),
            ReferenceRange::Categorical(accepted) => {
                value.to_string().eq_ignore_ascii_case(accepted)
            }
        };
        if normal {
            RangeStatus::Normal
        } else {
            RangeStatus::Abnormal
        }
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceRange::Numeric {
                lo,
                hi,
                precision: Some(p),
            } => write!(f, "{:.*} - {:.*}", *p, lo, *p, hi),
            ReferenceRange::Numeric { lo, hi, precision: None } => write!(f, "{} - {}", lo, hi),
            ReferenceRange::Categorical(accepted) => write!(f, "{} - {}", accepted, accepted),
        }
    }
}

const fn numeric(lo: f64, hi: f64) -> Option<ReferenceRange> {
    Some(ReferenceRange::Numeric {
        lo,
        hi,
        precision: None,
    })
}

const fn fixed(lo: f64, hi: f64, precision: usize) -> Option<ReferenceRange> {
    Some(ReferenceRange::Numeric {
        lo,
        hi,
        precision: Some(precision),
    })
}

const fn accepted(value: &'static str) -> Option<ReferenceRange> {
    Some(ReferenceRange::Categorical(value))
}

/// Normal range for an attribute, `None` where none is defined.
///
/// Hemoglobin, packed cell volume and red cell count use adult male ranges.
pub fn reference_range(attribute: Attribute) -> Option<ReferenceRange> {
    match attribute {
        Attribute::Age => None,
        Attribute::Bp => numeric(60.0, 80.0),
        Attribute::Sg => fixed(1.010, 1.025, 3),
        Attribute::Al => numeric(0.0, 0.0),
        Attribute::Su => numeric(0.0, 0.0),
        Attribute::Rbc => accepted("normal"),
        Attribute::Pc => accepted("normal"),
        Attribute::Pcc => accepted("notpresent"),
        Attribute::Ba => accepted("notpresent"),
        Attribute::Bgr => numeric(70.0, 140.0),
        Attribute::Bu => numeric(7.0, 20.0),
        Attribute::Sc => numeric(0.6, 1.2),
        Attribute::Sod => numeric(135.0, 145.0),
        Attribute::Pot => numeric(3.5, 5.0),
        Attribute::Hemo => numeric(13.5, 17.5),
        Attribute::Pcv => numeric(41.0, 50.0),
        Attribute::Wc => numeric(4500.0, 11000.0),
        Attribute::Rc => numeric(4.5, 5.9),
        Attribute::Htn => accepted("no"),
        Attribute::Dm => accepted("no"),
        Attribute::Cad => accepted("no"),
        Attribute::Appet => accepted("good"),
        Attribute::Pe => accepted("no"),
        Attribute::Ane => accepted("no"),
    }
}

/// A named feature and its display weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureImportance {
    pub name: &'static str,
    pub weight: f64,
}

impl FeatureImportance {
    /// Attribute whose display name matches this feature, if any.
    ///
    /// "Diabetes" and "RBC Abnormal" do not match an attribute and are
    /// skipped by the analysis.
    pub fn attribute(&self) -> Option<Attribute> {
        Attribute::from_display_name(self.name)
    }
}

/// Static feature weights, highest first.
pub const FEATURE_IMPORTANCE: &[FeatureImportance] = &[
    FeatureImportance { name: "Serum Creatinine", weight: 0.25 },
    FeatureImportance { name: "Blood Urea", weight: 0.20 },
    FeatureImportance { name: "Hemoglobin", weight: 0.15 },
    FeatureImportance { name: "Age", weight: 0.12 },
    FeatureImportance { name: "Blood Pressure", weight: 0.10 },
    FeatureImportance { name: "Hypertension", weight: 0.08 },
    FeatureImportance { name: "Diabetes", weight: 0.05 },
    FeatureImportance { name: "Albumin", weight: 0.03 },
    FeatureImportance { name: "Anemia", weight: 0.01 },
    FeatureImportance { name: "RBC Abnormal", weight: 0.01 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_bounds_are_inclusive() {
        let sc = reference_range(Attribute::Sc).unwrap();
        assert_eq!(sc.classify(&FieldValue::Number(0.6)), RangeStatus::Normal);
        assert_eq!(sc.classify(&FieldValue::Number(1.2)), RangeStatus::Normal);
        assert_eq!(sc.classify(&FieldValue::Number(1.0)), RangeStatus::Normal);
        assert_eq!(sc.classify(&FieldValue::Number(1.8)), RangeStatus::Abnormal);
        assert_eq!(sc.classify(&FieldValue::Number(0.59)), RangeStatus::Abnormal);
    }

    #[test]
    fn categorical_match_ignores_case() {
        let htn = reference_range(Attribute::Htn).unwrap();
        assert_eq!(
            htn.classify(&FieldValue::Choice("YES".into())),
            RangeStatus::Abnormal
        );
        assert_eq!(
            htn.classify(&FieldValue::Choice("no".into())),
            RangeStatus::Normal
        );
        assert_eq!(
            htn.classify(&FieldValue::Choice("No".into())),
            RangeStatus::Normal
        );
    }

    #[test]
    fn ordinal_text_compares_numerically() {
        let al = reference_range(Attribute::Al).unwrap();
        assert_eq!(al.classify(&FieldValue::Choice("0".into())), RangeStatus::Normal);
        assert_eq!(al.classify(&FieldValue::Choice("3".into())), RangeStatus::Abnormal);

        let sg = reference_range(Attribute::Sg).unwrap();
        assert_eq!(sg.classify(&FieldValue::Choice("1.020".into())), RangeStatus::Normal);
        assert_eq!(sg.classify(&FieldValue::Choice("1.005".into())), RangeStatus::Abnormal);
    }

    #[test]
    fn range_display() {
        assert_eq!(reference_range(Attribute::Bp).unwrap().to_string(), "60 - 80");
        assert_eq!(reference_range(Attribute::Sc).unwrap().to_string(), "0.6 - 1.2");
        assert_eq!(reference_range(Attribute::Sg).unwrap().to_string(), "1.010 - 1.025");
        assert_eq!(
            reference_range(Attribute::Pcc).unwrap().to_string(),
            "notpresent - notpresent"
        );
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = FEATURE_IMPORTANCE.iter().map(|f| f.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unresolvable_features() {
        let unresolved: Vec<&str> = FEATURE_IMPORTANCE
            .iter()
            .filter(|f| f.attribute().is_none())
            .map(|f| f.name)
            .collect();
        assert_eq!(unresolved, vec!["Diabetes", "RBC Abnormal"]);
    }
}
