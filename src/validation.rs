//! Raw form text to a typed [`PatientRecord`].
//!
//! Attributes are checked in form order and the first failure is returned.

use std::env;

use tracing::{debug, instrument, trace, warn};

use crate::domain::{Attribute, DomainSchema, FieldKind, FieldSpec, RawForm};
use crate::error::ValidationError;
use crate::model::{FieldValue, PatientRecord};

/// Whether numeric values must lie within their field's declared bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Reject values outside `[min, max]`
    #[default]
    Strict,
    /// Accept any finite number; bounds only guide the form widgets
    Permissive,
}

impl BoundsPolicy {
    /// Read the policy from `CKDSCREEN_BOUNDS_POLICY` (`strict` or `permissive`).
    ///
    /// Unset or unrecognised values fall back to [`BoundsPolicy::Strict`].
    pub fn from_env() -> Self {
        match env::var("CKDSCREEN_BOUNDS_POLICY") {
            Ok(value) if value.eq_ignore_ascii_case("permissive") => BoundsPolicy::Permissive,
            Ok(value) if value.eq_ignore_ascii_case("strict") => BoundsPolicy::Strict,
            Ok(value) => {
                warn!(value = %value, "Unrecognised CKDSCREEN_BOUNDS_POLICY, using strict");
                BoundsPolicy::Strict
            }
            Err(_) => BoundsPolicy::Strict,
        }
    }
}

fn parse_field(
    field: &FieldSpec,
    raw: &str,
    policy: BoundsPolicy,
) -> std::result::Result<FieldValue, ValidationError> {
    let key = field.attribute.key();
    match field.kind {
        FieldKind::Numeric { min, max, .. } => {
            let value: f64 = raw.parse().map_err(|_| ValidationError::NotANumber {
                field: key.to_string(),
                value: raw.to_string(),
            })?;
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: key.to_string(),
                    value: raw.to_string(),
                });
            }
            if policy == BoundsPolicy::Strict && (value < min || value > max) {
                return Err(ValidationError::OutOfBounds {
                    field: key.to_string(),
                    value,
                    min,
                    max,
                });
            }
            Ok(FieldValue::Number(value))
        }
        FieldKind::Categorical { options } => options
            .iter()
            .find(|o| o.value.eq_ignore_ascii_case(raw))
            .map(|o| FieldValue::Choice(o.value.to_string()))
            .ok_or_else(|| ValidationError::NotAnOption {
                field: key.to_string(),
                value: raw.to_string(),
                allowed: options.iter().map(|o| o.value.to_string()).collect(),
            }),
    }
}

/// Validate a raw form against `schema`.
///
/// Values are trimmed. Categorical values match their options ignoring case
/// and are stored in the declared spelling. Unknown keys are rejected once
/// every known attribute has passed.
///
/// # Examples
///
/// ```
/// use ckdscreen::{Attribute, BoundsPolicy, DomainSchema, Sample, validate_form};
///
/// let record = validate_form(
///     &Sample::Healthy.to_form(),
///     &DomainSchema::standard(),
///     BoundsPolicy::Strict,
/// )?;
/// assert_eq!(record.number(Attribute::Sc), Some(1.0));
/// # Ok::<(), ckdscreen::ValidationError>(())
/// ```
#[instrument(name = "validate_form", skip(raw, schema), fields(fields = raw.len()))]
pub fn validate_form(
    raw: &RawForm,
    schema: &DomainSchema,
    policy: BoundsPolicy,
) -> std::result::Result<PatientRecord, ValidationError> {
    let mut values = Vec::with_capacity(Attribute::COUNT);

    for attribute in Attribute::ALL {
        let key = attribute.key();
        let field = schema
            .field(attribute)
            .ok_or_else(|| ValidationError::UnknownField {
                field: key.to_string(),
            })?;

        let text = raw.get(key).ok_or_else(|| {
            debug!(field = key, "Required field missing");
            ValidationError::MissingField {
                field: key.to_string(),
            }
        })?;
        let text = text.trim();
        if text.is_empty() {
            debug!(field = key, "Required field empty");
            return Err(ValidationError::EmptyField {
                field: key.to_string(),
            });
        }

        let value = parse_field(field, text, policy).inspect_err(|e| {
            debug!(field = e.field(), "Field rejected");
            trace!(error = %e, "Rejection detail");
        })?;
        trace!(field = key, value = %value, "Field accepted");
        values.push(value);
    }

    if let Some(unknown) = raw.keys().find(|k| Attribute::from_key(k).is_none()) {
        debug!(field = %unknown, "Unknown field in form");
        return Err(ValidationError::UnknownField {
            field: unknown.clone(),
        });
    }

    debug!("Form validated");
    Ok(PatientRecord::from_ordered(values))
}
