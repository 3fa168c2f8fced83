use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The 24 clinical attributes collected for a screening.
///
/// Declaration order is the canonical order used for forms, records,
/// serialization and range comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Age,
    Bp,
    Sg,
    Al,
    Su,
    Rbc,
    Pc,
    Pcc,
    Ba,
    Bgr,
    Bu,
    Sc,
    Sod,
    Pot,
    Hemo,
    Pcv,
    Wc,
    Rc,
    Htn,
    Dm,
    Cad,
    Appet,
    Pe,
    Ane,
}

impl Attribute {
    pub const COUNT: usize = 24;

    /// All attributes in canonical order.
    pub const ALL: [Attribute; Attribute::COUNT] = [
        Attribute::Age,
        Attribute::Bp,
        Attribute::Sg,
        Attribute::Al,
        Attribute::Su,
        Attribute::Rbc,
        Attribute::Pc,
        Attribute::Pcc,
        Attribute::Ba,
        Attribute::Bgr,
        Attribute::Bu,
        Attribute::Sc,
        Attribute::Sod,
        Attribute::Pot,
        Attribute::Hemo,
        Attribute::Pcv,
        Attribute::Wc,
        Attribute::Rc,
        Attribute::Htn,
        Attribute::Dm,
        Attribute::Cad,
        Attribute::Appet,
        Attribute::Pe,
        Attribute::Ane,
    ];

    /// Position in [`Attribute::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short form key, as used by form controls and the oracle payload.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Age => "age",
            Attribute::Bp => "bp",
            Attribute::Sg => "sg",
            Attribute::Al => "al",
            Attribute::Su => "su",
            Attribute::Rbc => "rbc",
            Attribute::Pc => "pc",
            Attribute::Pcc => "pcc",
            Attribute::Ba => "ba",
            Attribute::Bgr => "bgr",
            Attribute::Bu => "bu",
            Attribute::Sc => "sc",
            Attribute::Sod => "sod",
            Attribute::Pot => "pot",
            Attribute::Hemo => "hemo",
            Attribute::Pcv => "pcv",
            Attribute::Wc => "wc",
            Attribute::Rc => "rc",
            Attribute::Htn => "htn",
            Attribute::Dm => "dm",
            Attribute::Cad => "cad",
            Attribute::Appet => "appet",
            Attribute::Pe => "pe",
            Attribute::Ane => "ane",
        }
    }

    /// Human-readable name shown in analysis tables.
    pub fn display_name(self) -> &'static str {
        match self {
            Attribute::Age => "Age",
            Attribute::Bp => "Blood Pressure",
            Attribute::Sg => "Specific Gravity",
            Attribute::Al => "Albumin",
            Attribute::Su => "Sugar",
            Attribute::Rbc => "Red Blood Cells",
            Attribute::Pc => "Pus Cell",
            Attribute::Pcc => "Pus Cell Clumps",
            Attribute::Ba => "Bacteria",
            Attribute::Bgr => "Blood Glucose Random",
            Attribute::Bu => "Blood Urea",
            Attribute::Sc => "Serum Creatinine",
            Attribute::Sod => "Sodium",
            Attribute::Pot => "Potassium",
            Attribute::Hemo => "Hemoglobin",
            Attribute::Pcv => "Packed Cell Volume",
            Attribute::Wc => "White Blood Cell Count",
            Attribute::Rc => "Red Blood Cell Count",
            Attribute::Htn => "Hypertension",
            Attribute::Dm => "Diabetes Mellitus",
            Attribute::Cad => "Coronary Artery Disease",
            Attribute::Appet => "Appetite",
            Attribute::Pe => "Pedal Edema",
            Attribute::Ane => "Anemia",
        }
    }

    /// Look up an attribute by its form key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    /// Look up an attribute by its exact display name.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.display_name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("unknown attribute '{}'", s))
    }
}
