// crates/contract-forge-core/src/runtime/validator.rs
// ============================================================================
// Module: Field Validator
// Description: Per-field validation of raw form input.
// Purpose: Refuse generation before the engine runs on malformed answers.
// Dependencies: regex, crate::core
// ============================================================================

//! ## Overview
//! Rules run in order and the first failure wins: required fields must be
//! non-blank, email fields must look like an address, and number fields must
//! parse as finite, non-negative numbers. Optional blank values are valid.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::ContractTypeDefinition;
use crate::core::FieldKind;
use crate::core::FieldSpec;
use crate::core::FormAnswers;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Shape an email answer must match.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Compiled email pattern; `None` only if the literal fails to compile.
static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

// ============================================================================
// SECTION: Types
// ============================================================================

/// Stable codes for field failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorCode {
    /// Required value is blank.
    Required,
    /// Value is not an email address.
    InvalidEmail,
    /// Value is not a non-negative number.
    InvalidNumber,
}

impl FieldErrorCode {
    /// Returns the user-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Required => "This field is required.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::InvalidNumber => "Please enter a valid positive number.",
        }
    }
}

/// Validation failure for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Field identifier.
    pub field_id: String,
    /// Stable failure code.
    pub code: FieldErrorCode,
    /// User-facing message.
    pub message: String,
}

impl FieldError {
    /// Creates an error for a field.
    #[must_use]
    pub fn new(field_id: &str, code: FieldErrorCode) -> Self {
        Self {
            field_id: field_id.to_string(),
            code,
            message: code.message().to_string(),
        }
    }
}

/// All field failures of one answer set.
///
/// # Invariants
/// - `errors` is non-empty and ordered by schema position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Per-field failures.
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|error| error.field_id.as_str()).collect();
        write!(f, "invalid form answers: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates one raw value against its field spec.
#[must_use]
pub fn validate_field(field: &FieldSpec, raw: &str) -> Option<FieldErrorCode> {
    let value = raw.trim();
    if value.is_empty() {
        return field.required.then_some(FieldErrorCode::Required);
    }
    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Some(FieldErrorCode::InvalidEmail),
        FieldKind::Number if !is_non_negative_number(value) => Some(FieldErrorCode::InvalidNumber),
        _ => None,
    }
}

/// Validates every schema field of an answer set.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every failing field.
pub fn validate_answers(
    definition: &ContractTypeDefinition,
    answers: &FormAnswers,
) -> Result<(), ValidationError> {
    let errors: Vec<FieldError> = definition
        .fields
        .iter()
        .filter_map(|field| {
            validate_field(field, &answers.text(&field.id))
                .map(|code| FieldError::new(&field.id, code))
        })
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            errors,
        })
    }
}

/// Returns true when `value` has the shape of an email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.as_ref().is_some_and(|regex| regex.is_match(value))
}

/// Returns true when `value` parses as a finite number that is at least zero.
///
/// Only decimal notation is accepted: an optional sign, digits with an
/// optional fraction, and an optional exponent (`+5`, `.5`, `5.`, `1e3`).
/// Hex literals and digit separators are rejected, as are non-finite
/// spellings such as `Infinity` or `NaN`.
fn is_non_negative_number(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(|number| number.is_finite() && number >= 0.0)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::FieldErrorCode;
    use super::validate_field;
    use crate::core::FieldSpec;

    #[test]
    fn email_boundaries() {
        let field = FieldSpec::email("contact", "Contact");
        assert_eq!(validate_field(&field, "a@b"), Some(FieldErrorCode::InvalidEmail));
        assert_eq!(validate_field(&field, "a b@c.com"), Some(FieldErrorCode::InvalidEmail));
        assert_eq!(validate_field(&field, "a@b.com"), None);
    }

    #[test]
    fn number_boundaries() {
        let field = FieldSpec::number("amount", "Amount");
        assert_eq!(validate_field(&field, "-1"), Some(FieldErrorCode::InvalidNumber));
        assert_eq!(validate_field(&field, "ten"), Some(FieldErrorCode::InvalidNumber));
        assert_eq!(validate_field(&field, "inf"), Some(FieldErrorCode::InvalidNumber));
        assert_eq!(validate_field(&field, "0"), None);
        assert_eq!(validate_field(&field, " 12.5 "), None);
    }

    #[test]
    fn number_syntax_is_decimal_only() {
        let field = FieldSpec::number("amount", "Amount");
        for accepted in ["+5", ".5", "5.", "1e3", "2.5E-1", "-0"] {
            assert_eq!(validate_field(&field, accepted), None, "{accepted}");
        }
        for rejected in ["0x10", "1_000", "1,000", "Infinity", "NaN", "1e999", "$5"] {
            assert_eq!(
                validate_field(&field, rejected),
                Some(FieldErrorCode::InvalidNumber),
                "{rejected}"
            );
        }
    }

    #[test]
    fn required_wins_over_kind_rules() {
        let required = FieldSpec::email("contact", "Contact");
        assert_eq!(validate_field(&required, "   "), Some(FieldErrorCode::Required));
        let optional = FieldSpec::email("contact", "Contact").optional();
        assert_eq!(validate_field(&optional, ""), None);
        assert_eq!(validate_field(&optional, "nope"), Some(FieldErrorCode::InvalidEmail));
    }
}
