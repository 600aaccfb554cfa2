// crates/contract-forge-core/src/core/definition.rs
// ============================================================================
// Module: Contract Forge Type Definitions
// Description: Contract type definitions, summaries, and fragment rules.
// Purpose: Pair a field schema with template prose and derived-value rules.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ContractTypeDefinition`] bundles everything needed to collect and
//! render one contract category: the ordered field schema, the template text,
//! and declarative [`FragmentRule`]s that compute optional sentence fragments
//! and derived amounts.
//!
//! Security posture: definitions are trusted, compiled-in data; answers that
//! flow through fragment rules are untrusted text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::field::FieldSpec;
use crate::core::identifiers::ContractTypeId;
use crate::core::placeholder::Placeholder;

// ============================================================================
// SECTION: Fragment Rules
// ============================================================================

/// Declarative rule that computes the value of one template token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FragmentRule {
    /// Renders ` of {source}` when the source answer is non-blank.
    CompanySuffix {
        /// Field supplying the company name.
        source: String,
        /// Token receiving the fragment.
        target: Placeholder,
    },
    /// Renders `unit_price * count` with two decimals. Only the leading
    /// integer digits of the count are used, so `2.5` pieces count as 2.
    UnitTotal {
        /// Per-unit amount field.
        unit_price: String,
        /// Unit count field.
        count: String,
        /// Token receiving the total.
        target: Placeholder,
    },
    /// Renders `base * percent / 100` with two decimals.
    PercentageOf {
        /// Base amount field.
        base: String,
        /// Percentage field.
        percent: String,
        /// Token receiving the amount.
        target: Placeholder,
    },
    /// Renders the source answer, or `fallback` when it is blank.
    DefaultText {
        /// Field supplying the text.
        source: String,
        /// Token receiving the text.
        target: Placeholder,
        /// Sentence used when the source is blank.
        fallback: String,
    },
    /// Renders `{prefix}{source}{suffix}` when `choice` equals `equals` and the
    /// source is non-blank.
    ChoiceSuffix {
        /// Single-choice field that gates the fragment.
        choice: String,
        /// Choice value that enables the fragment.
        equals: String,
        /// Field supplying the inserted value.
        source: String,
        /// Token receiving the fragment.
        target: Placeholder,
        /// Text inserted before the value.
        prefix: String,
        /// Text inserted after the value.
        suffix: String,
    },
}

impl FragmentRule {
    /// Returns the token this rule writes.
    #[must_use]
    pub const fn target(&self) -> &Placeholder {
        match self {
            Self::CompanySuffix {
                target, ..
            }
            | Self::UnitTotal {
                target, ..
            }
            | Self::PercentageOf {
                target, ..
            }
            | Self::DefaultText {
                target, ..
            }
            | Self::ChoiceSuffix {
                target, ..
            } => target,
        }
    }

    /// Returns the field identifiers this rule reads.
    #[must_use]
    pub fn inputs(&self) -> Vec<&str> {
        match self {
            Self::CompanySuffix {
                source, ..
            }
            | Self::DefaultText {
                source, ..
            } => vec![source.as_str()],
            Self::UnitTotal {
                unit_price,
                count,
                ..
            } => vec![unit_price.as_str(), count.as_str()],
            Self::PercentageOf {
                base,
                percent,
                ..
            } => vec![base.as_str(), percent.as_str()],
            Self::ChoiceSuffix {
                choice,
                source,
                ..
            } => vec![choice.as_str(), source.as_str()],
        }
    }

    /// Returns the stable rule label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CompanySuffix {
                ..
            } => "company_suffix",
            Self::UnitTotal {
                ..
            } => "unit_total",
            Self::PercentageOf {
                ..
            } => "percentage_of",
            Self::DefaultText {
                ..
            } => "default_text",
            Self::ChoiceSuffix {
                ..
            } => "choice_suffix",
        }
    }
}

// ============================================================================
// SECTION: Definitions
// ============================================================================

/// Complete definition of one contract category.
///
/// # Invariants
/// - Every bracketed token in `template` is a field token, the date token, or
///   the target of one of `fragments`.
/// - Field identifiers are unique and map to distinct tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTypeDefinition {
    /// Stable catalog key.
    pub id: ContractTypeId,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Ordered form schema.
    pub fields: Vec<FieldSpec>,
    /// Document template with bracketed tokens.
    pub template: String,
    /// Ordered derived-value rules.
    pub fragments: Vec<FragmentRule>,
}

impl ContractTypeDefinition {
    /// Returns the field with the given identifier.
    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == field_id)
    }

    /// Returns the list-view summary of this definition.
    #[must_use]
    pub fn summary(&self) -> ContractTypeSummary {
        ContractTypeSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// List-view summary of a contract category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTypeSummary {
    /// Stable catalog key.
    pub id: ContractTypeId,
    /// Display title.
    pub title: String,
    /// One-line description.
    pub description: String,
}
