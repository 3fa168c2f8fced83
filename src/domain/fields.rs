use super::Attribute;

/// Form widget used to enter an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Number,
    Select,
    Radio,
}

/// One selectable value of a categorical attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// How an attribute's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Continuous measurement with advisory bounds and step
    Numeric {
        min: f64,
        max: f64,
        step: Option<f64>,
    },
    /// Value drawn from a fixed option set (ordinal levels included)
    Categorical { options: &'static [FieldOption] },
}

/// Declaration of a single form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub attribute: Attribute,
    pub label: &'static str,
    pub unit: Option<&'static str>,
    pub widget: Widget,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, FieldKind::Numeric { .. })
    }

    /// Option values for categorical fields; empty for numeric ones.
    pub fn option_values(&self) -> Vec<&'static str> {
        match self.kind {
            FieldKind::Categorical { options } => options.iter().map(|o| o.value).collect(),
            FieldKind::Numeric { .. } => Vec::new(),
        }
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormSection {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

const fn opt(value: &'static str, label: &'static str) -> FieldOption {
    FieldOption { value, label }
}

const fn numeric(
    attribute: Attribute,
    label: &'static str,
    unit: &'static str,
    min: f64,
    max: f64,
    step: Option<f64>,
) -> FieldSpec {
    FieldSpec {
        attribute,
        label,
        unit: Some(unit),
        widget: Widget::Number,
        kind: FieldKind::Numeric { min, max, step },
    }
}

const fn choice(
    attribute: Attribute,
    label: &'static str,
    widget: Widget,
    options: &'static [FieldOption],
) -> FieldSpec {
    FieldSpec {
        attribute,
        label,
        unit: None,
        widget,
        kind: FieldKind::Categorical { options },
    }
}

const SPECIFIC_GRAVITY: &[FieldOption] = &[
    opt("1.005", "1.005"),
    opt("1.010", "1.010"),
    opt("1.015", "1.015"),
    opt("1.020", "1.020"),
    opt("1.025", "1.025"),
];

const LEVEL_0_TO_5: &[FieldOption] = &[
    opt("0", "0"),
    opt("1", "1"),
    opt("2", "2"),
    opt("3", "3"),
    opt("4", "4"),
    opt("5", "5"),
];

const NORMALITY: &[FieldOption] = &[opt("normal", "Normal"), opt("abnormal", "Abnormal")];

const PRESENCE: &[FieldOption] = &[opt("notpresent", "Not Present"), opt("present", "Present")];

const YES_NO: &[FieldOption] = &[opt("yes", "Yes"), opt("no", "No")];

const APPETITE: &[FieldOption] = &[opt("good", "Good"), opt("poor", "Poor")];

const BASIC_INFORMATION: &[FieldSpec] = &[
    numeric(Attribute::Age, "Age", "years", 1.0, 120.0, None),
    numeric(Attribute::Bp, "Blood Pressure", "mm/Hg", 40.0, 200.0, None),
    choice(Attribute::Sg, "Specific Gravity", Widget::Select, SPECIFIC_GRAVITY),
];

const URINE_TESTS: &[FieldSpec] = &[
    choice(Attribute::Al, "Albumin", Widget::Select, LEVEL_0_TO_5),
    choice(Attribute::Su, "Sugar", Widget::Select, LEVEL_0_TO_5),
    choice(Attribute::Rbc, "Red Blood Cells", Widget::Select, NORMALITY),
    choice(Attribute::Pc, "Pus Cell", Widget::Select, NORMALITY),
    choice(Attribute::Pcc, "Pus Cell Clumps", Widget::Select, PRESENCE),
    choice(Attribute::Ba, "Bacteria", Widget::Select, PRESENCE),
];

const BLOOD_TESTS: &[FieldSpec] = &[
    numeric(Attribute::Bgr, "Blood Glucose Random", "mgs/dl", 50.0, 500.0, None),
    numeric(Attribute::Bu, "Blood Urea", "mgs/dl", 10.0, 200.0, None),
    numeric(Attribute::Sc, "Serum Creatinine", "mgs/dl", 0.1, 20.0, Some(0.1)),
    numeric(Attribute::Sod, "Sodium", "mEq/L", 100.0, 200.0, None),
    numeric(Attribute::Pot, "Potassium", "mEq/L", 2.0, 10.0, Some(0.1)),
    numeric(Attribute::Hemo, "Hemoglobin", "gms", 3.0, 20.0, Some(0.1)),
    numeric(Attribute::Pcv, "Packed Cell Volume", "%", 10.0, 60.0, None),
    numeric(Attribute::Wc, "White Blood Cell Count", "cells/cumm", 2000.0, 30000.0, None),
    numeric(Attribute::Rc, "Red Blood Cell Count", "millions/cmm", 2.0, 8.0, Some(0.1)),
];

const MEDICAL_HISTORY: &[FieldSpec] = &[
    choice(Attribute::Htn, "Hypertension", Widget::Radio, YES_NO),
    choice(Attribute::Dm, "Diabetes Mellitus", Widget::Radio, YES_NO),
    choice(Attribute::Cad, "Coronary Artery Disease", Widget::Radio, YES_NO),
    choice(Attribute::Appet, "Appetite", Widget::Radio, APPETITE),
    choice(Attribute::Pe, "Pedal Edema", Widget::Radio, YES_NO),
    choice(Attribute::Ane, "Anemia", Widget::Radio, YES_NO),
];

/// The screening form, section by section.
pub const FORM_SECTIONS: &[FormSection] = &[
    FormSection {
        title: "Basic Information",
        fields: BASIC_INFORMATION,
    },
    FormSection {
        title: "Urine Test Results",
        fields: URINE_TESTS,
    },
    FormSection {
        title: "Blood Test Results",
        fields: BLOOD_TESTS,
    },
    FormSection {
        title: "Medical History",
        fields: MEDICAL_HISTORY,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_attribute_declared_once_in_order() {
        let declared: Vec<Attribute> = FORM_SECTIONS
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.attribute))
            .collect();
        assert_eq!(declared, Attribute::ALL.to_vec());
    }

    #[test]
    fn ordinal_fields_are_categorical() {
        for section in FORM_SECTIONS {
            for field in section.fields {
                if matches!(field.attribute, Attribute::Sg | Attribute::Al | Attribute::Su) {
                    assert!(!field.is_numeric(), "{} should be ordinal text", field.attribute);
                }
            }
        }
    }
}
