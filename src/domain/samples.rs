use super::{Attribute, RawForm};

/// Canned records that can be loaded into the form verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// A patient whose values point strongly at kidney disease
    CkdPositive,
    /// A patient with unremarkable values
    Healthy,
}

type SampleValues = [&'static str; Attribute::COUNT];

// Values follow Attribute::ALL order.
const CKD_POSITIVE: SampleValues = [
    "62", "90", "1.015", "3", "0", "abnormal", "abnormal", "present", "notpresent", "157", "53",
    "1.8", "132", "4.8", "11.2", "35", "9200", "4.1", "yes", "yes", "no", "poor", "yes", "yes",
];

const HEALTHY: SampleValues = [
    "35", "70", "1.020", "0", "0", "normal", "normal", "notpresent", "notpresent", "105", "32",
    "1.0", "138", "4.2", "15.2", "45", "7500", "5.0", "no", "no", "no", "good", "no", "no",
];

const DEFAULT_FORM: SampleValues = [
    "45", "80", "1.020", "0", "0", "normal", "normal", "notpresent", "notpresent", "120", "40",
    "1.2", "140", "4.5", "15", "45", "8000", "5", "no", "no", "no", "good", "no", "no",
];

fn to_form(values: &SampleValues) -> RawForm {
    Attribute::ALL
        .iter()
        .zip(values.iter())
        .map(|(attr, value)| (attr.key().to_string(), (*value).to_string()))
        .collect()
}

impl Sample {
    pub fn label(&self) -> &'static str {
        match self {
            Sample::CkdPositive => "CKD positive sample",
            Sample::Healthy => "Healthy sample",
        }
    }

    /// The sample as raw form text, keyed by attribute key.
    pub fn to_form(&self) -> RawForm {
        match self {
            Sample::CkdPositive => to_form(&CKD_POSITIVE),
            Sample::Healthy => to_form(&HEALTHY),
        }
    }
}

/// Values the form is pre-filled with when a new prediction starts.
pub fn default_form() -> RawForm {
    to_form(&DEFAULT_FORM)
}
