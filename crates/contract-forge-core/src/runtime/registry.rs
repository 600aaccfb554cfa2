// crates/contract-forge-core/src/runtime/registry.rs
// ============================================================================
// Module: Template Registry
// Description: Immutable catalog of contract type definitions.
// Purpose: Serve definitions by id and self-verify template consistency.
// Dependencies: crate::{catalog, core}
// ============================================================================

//! ## Overview
//! The registry is built once per process from the compiled-in catalog and is
//! never mutated afterwards. [`TemplateRegistry::verify`] checks that every
//! template token is resolvable and that no two fields of one definition
//! share a token.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::builtin_definitions;
use crate::core::ContractTypeDefinition;
use crate::core::ContractTypeSummary;
use crate::core::FieldKind;
use crate::core::Placeholder;
use crate::core::placeholder::scan_tokens;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry lookup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No definition exists for the identifier.
    #[error("unknown contract type: {0}")]
    NotFound(String),
}

// ============================================================================
// SECTION: Defects
// ============================================================================

/// Consistency problem found by [`TemplateRegistry::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "defect", rename_all = "snake_case")]
pub enum RegistryDefect {
    /// Template references a token nothing resolves.
    UnresolvedToken {
        /// Contract type identifier.
        contract_type: String,
        /// Offending token.
        token: String,
    },
    /// Two fields of one definition map to the same token.
    TokenCollision {
        /// Contract type identifier.
        contract_type: String,
        /// Shared token.
        token: String,
        /// First field id.
        first: String,
        /// Second field id.
        second: String,
    },
    /// A fragment rule reads a field that is not in the schema.
    UnknownFragmentInput {
        /// Contract type identifier.
        contract_type: String,
        /// Missing field id.
        field_id: String,
    },
    /// A single-choice field has no options.
    EmptyChoice {
        /// Contract type identifier.
        contract_type: String,
        /// Field id.
        field_id: String,
    },
    /// Two definitions share an identifier.
    DuplicateType {
        /// Contract type identifier.
        contract_type: String,
    },
}

impl fmt::Display for RegistryDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedToken {
                contract_type,
                token,
            } => write!(f, "{contract_type}: template token {token} is never resolved"),
            Self::TokenCollision {
                contract_type,
                token,
                first,
                second,
            } => write!(f, "{contract_type}: fields {first} and {second} both map to {token}"),
            Self::UnknownFragmentInput {
                contract_type,
                field_id,
            } => write!(f, "{contract_type}: fragment reads unknown field {field_id}"),
            Self::EmptyChoice {
                contract_type,
                field_id,
            } => write!(f, "{contract_type}: choice field {field_id} has no options"),
            Self::DuplicateType {
                contract_type,
            } => write!(f, "{contract_type}: duplicate contract type id"),
        }
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Process-wide built-in registry.
static BUILTIN: OnceLock<Arc<TemplateRegistry>> = OnceLock::new();

/// Immutable catalog of contract type definitions.
///
/// # Invariants
/// - Definition order is the display order and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRegistry {
    /// Definitions in display order.
    definitions: Vec<ContractTypeDefinition>,
}

impl TemplateRegistry {
    /// Returns the shared built-in registry, building it on first use.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(BUILTIN.get_or_init(|| Arc::new(Self::from_definitions(builtin_definitions()))))
    }

    /// Creates a registry from explicit definitions.
    #[must_use]
    pub const fn from_definitions(definitions: Vec<ContractTypeDefinition>) -> Self {
        Self {
            definitions,
        }
    }

    /// Lists summaries in display order.
    #[must_use]
    pub fn list_types(&self) -> Vec<ContractTypeSummary> {
        self.definitions.iter().map(ContractTypeDefinition::summary).collect()
    }

    /// Iterates definitions in display order.
    pub fn definitions(&self) -> impl Iterator<Item = &ContractTypeDefinition> {
        self.definitions.iter()
    }

    /// Returns the definition for an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unknown identifiers.
    pub fn definition(&self, id: &str) -> Result<&ContractTypeDefinition, RegistryError> {
        self.definitions
            .iter()
            .find(|definition| definition.id.as_str() == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Checks every definition for consistency and returns all defects.
    #[must_use]
    pub fn verify(&self) -> Vec<RegistryDefect> {
        let mut defects = Vec::new();
        let mut seen_types = BTreeSet::new();
        for definition in &self.definitions {
            if !seen_types.insert(definition.id.as_str()) {
                defects.push(RegistryDefect::DuplicateType {
                    contract_type: definition.id.to_string(),
                });
            }
            verify_definition(definition, &mut defects);
        }
        defects
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends the defects of one definition.
fn verify_definition(definition: &ContractTypeDefinition, defects: &mut Vec<RegistryDefect>) {
    let contract_type = definition.id.to_string();
    let mut field_tokens: BTreeMap<Placeholder, &str> = BTreeMap::new();
    for field in &definition.fields {
        let token = Placeholder::for_field(&field.id);
        if let Some(first) = field_tokens.get(&token) {
            defects.push(RegistryDefect::TokenCollision {
                contract_type: contract_type.clone(),
                token: token.to_string(),
                first: (*first).to_string(),
                second: field.id.clone(),
            });
        } else {
            field_tokens.insert(token, field.id.as_str());
        }
        if let FieldKind::SingleChoice {
            options,
        } = &field.kind
            && options.is_empty()
        {
            defects.push(RegistryDefect::EmptyChoice {
                contract_type: contract_type.clone(),
                field_id: field.id.clone(),
            });
        }
    }

    let mut resolvable: BTreeSet<Placeholder> = field_tokens.into_keys().collect();
    resolvable.insert(Placeholder::date());
    for rule in &definition.fragments {
        resolvable.insert(rule.target().clone());
        for input in rule.inputs() {
            if definition.field(input).is_none() {
                defects.push(RegistryDefect::UnknownFragmentInput {
                    contract_type: contract_type.clone(),
                    field_id: input.to_string(),
                });
            }
        }
    }

    let mut reported = BTreeSet::new();
    for token in scan_tokens(&definition.template) {
        if !resolvable.contains(&token) && reported.insert(token.clone()) {
            defects.push(RegistryDefect::UnresolvedToken {
                contract_type: contract_type.clone(),
                token: token.to_string(),
            });
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test fixtures use unwraps for clarity.")]

    use super::RegistryDefect;
    use super::RegistryError;
    use super::TemplateRegistry;
    use crate::core::ContractTypeDefinition;
    use crate::core::ContractTypeId;
    use crate::core::FieldSpec;

    fn definition(template: &str, fields: Vec<FieldSpec>) -> ContractTypeDefinition {
        ContractTypeDefinition {
            id: ContractTypeId::new("probe"),
            title: "Probe".to_string(),
            description: "Probe".to_string(),
            fields,
            template: template.to_string(),
            fragments: Vec::new(),
        }
    }

    #[test]
    fn builtin_catalog_verifies_clean() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.verify(), Vec::<RegistryDefect>::new());
        let ids: Vec<String> =
            registry.list_types().into_iter().map(|summary| summary.id.to_string()).collect();
        assert_eq!(ids, vec![
            "nda",
            "service",
            "freelance",
            "web-dev",
            "graphic-design",
            "content-writing",
            "consulting",
            "payment-terms"
        ]);
    }

    #[test]
    fn unknown_type_is_not_found() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(
            registry.definition("lease").unwrap_err(),
            RegistryError::NotFound("lease".to_string())
        );
        assert_eq!(registry.definition("nda").unwrap().title, "Non-Disclosure Agreement");
    }

    #[test]
    fn verify_reports_unresolved_tokens_once() {
        let registry = TemplateRegistry::from_definitions(vec![definition(
            "[DATE] [CLIENT_NAME] [GHOST] [GHOST]",
            vec![FieldSpec::short_text("clientName", "Client")],
        )]);
        assert_eq!(registry.verify(), vec![RegistryDefect::UnresolvedToken {
            contract_type: "probe".to_string(),
            token: "[GHOST]".to_string(),
        }]);
    }

    #[test]
    fn verify_reports_token_collisions() {
        let registry = TemplateRegistry::from_definitions(vec![definition(
            "[CLIENT_NAME]",
            vec![
                FieldSpec::short_text("clientName", "Client"),
                FieldSpec::short_text("ClientName", "Client again"),
            ],
        )]);
        let defects = registry.verify();
        assert!(matches!(defects.as_slice(), [RegistryDefect::TokenCollision { .. }]));
    }
}
