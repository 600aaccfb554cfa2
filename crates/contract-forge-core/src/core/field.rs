// crates/contract-forge-core/src/core/field.rs
// ============================================================================
// Module: Contract Forge Field Schema
// Description: Form field specifications for contract types.
// Purpose: Describe the dynamic form each contract type collects.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`FieldSpec`] describes one form input: its identifier, label, kind,
//! requiredness, and optional default. The kind is a closed enum; the
//! single-choice variant owns its option list so options cannot exist on any
//! other kind.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Field Kind
// ============================================================================

/// Input kind of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line free text.
    ShortText,
    /// Multi-line free text.
    LongText,
    /// One value chosen from a fixed list.
    SingleChoice {
        /// Allowed values in display order.
        options: Vec<String>,
    },
    /// Non-negative decimal number.
    Number,
    /// Email address.
    Email,
    /// Calendar date.
    Date,
}

impl FieldKind {
    /// Returns the stable label for the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShortText => "short_text",
            Self::LongText => "long_text",
            Self::SingleChoice {
                ..
            } => "single_choice",
            Self::Number => "number",
            Self::Email => "email",
            Self::Date => "date",
        }
    }
}

// ============================================================================
// SECTION: Field Spec
// ============================================================================

/// Form field definition.
///
/// # Invariants
/// - `id` is unique within its contract type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field identifier in camelCase.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Input kind, including options for single-choice fields.
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether a non-blank value is required.
    pub required: bool,
    /// Default value suggested to the form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldSpec {
    /// Creates a required field of the given kind.
    #[must_use]
    pub fn new(id: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            required: true,
            default: None,
        }
    }

    /// Creates a required single-line text field.
    #[must_use]
    pub fn short_text(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::ShortText)
    }

    /// Creates a required multi-line text field.
    #[must_use]
    pub fn long_text(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::LongText)
    }

    /// Creates a required number field.
    #[must_use]
    pub fn number(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Number)
    }

    /// Creates a required email field.
    #[must_use]
    pub fn email(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Email)
    }

    /// Creates a required date field.
    #[must_use]
    pub fn date(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Date)
    }

    /// Creates a required single-choice field.
    #[must_use]
    pub fn choice(id: &str, label: &str, options: &[&str]) -> Self {
        let options = options.iter().map(|option| (*option).to_string()).collect();
        Self::new(id, label, FieldKind::SingleChoice {
            options,
        })
    }

    /// Marks the field optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Returns the options of a single-choice field.
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::SingleChoice {
                options,
            } => Some(options),
            _ => None,
        }
    }
}
