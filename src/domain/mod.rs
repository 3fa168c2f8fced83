//! Static domain data: the 24 screening attributes, how the form collects
//! them, their normal ranges, feature weights and canned samples.

mod attribute;
mod fields;
mod reference;
mod samples;

use std::collections::BTreeMap;

pub use attribute::Attribute;
pub use fields::{FORM_SECTIONS, FieldKind, FieldOption, FieldSpec, FormSection, Widget};
pub use reference::{
    FEATURE_IMPORTANCE, FeatureImportance, RangeStatus, ReferenceRange, reference_range,
};
pub use samples::{Sample, default_form};

/// Raw form input: attribute key to the text entered in its control.
pub type RawForm = BTreeMap<String, String>;

/// The fixed schema that validation and analysis run against.
///
/// Immutable and static; obtain it with [`DomainSchema::standard`].
#[derive(Debug, Clone, Copy)]
pub struct DomainSchema {
    sections: &'static [FormSection],
    features: &'static [FeatureImportance],
}

impl DomainSchema {
    pub const fn standard() -> Self {
        Self {
            sections: FORM_SECTIONS,
            features: FEATURE_IMPORTANCE,
        }
    }

    pub fn sections(&self) -> &'static [FormSection] {
        self.sections
    }

    /// Field declarations in form order.
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> + use<> {
        let sections = self.sections;
        sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, attribute: Attribute) -> Option<&'static FieldSpec> {
        self.fields().find(|f| f.attribute == attribute)
    }

    pub fn reference_range(&self, attribute: Attribute) -> Option<ReferenceRange> {
        reference_range(attribute)
    }

    /// Feature weights, highest first.
    pub fn feature_importance(&self) -> &'static [FeatureImportance] {
        self.features
    }
}

impl Default for DomainSchema {
    fn default() -> Self {
        Self::standard()
    }
}
