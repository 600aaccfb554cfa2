// crates/contract-forge-core/src/runtime/engine.rs
// ============================================================================
// Module: Resolution Engine
// Description: Substitutes template tokens with answers, fragments, and date.
// Purpose: Turn (contract type, answers, instant) into final document text.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Resolution builds one token table and then scans the template once.
//! Inserted values are never rescanned, so answers that contain bracketed
//! text cannot trigger further substitution. Table precedence, lowest first:
//! schema fields, answer keys, fragment targets, then the date stamp.
//!
//! Security posture: answers are untrusted text and are inserted verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::core::ContractTypeDefinition;
use crate::core::DateStyle;
use crate::core::FormAnswers;
use crate::core::Placeholder;
use crate::core::TimeError;
use crate::core::Timestamp;
use crate::runtime::fragments;
use crate::runtime::registry::RegistryError;
use crate::runtime::registry::TemplateRegistry;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Resolution errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No definition exists for the requested type.
    #[error("unknown contract type: {0}")]
    UnknownContractType(String),
    /// The generation instant cannot be rendered.
    #[error("invalid generation instant: {0}")]
    InvalidInstant(String),
}

impl From<RegistryError> for ResolveError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::NotFound(id) => Self::UnknownContractType(id),
        }
    }
}

impl From<TimeError> for ResolveError {
    fn from(error: TimeError) -> Self {
        Self::InvalidInstant(error.to_string())
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Style of the `[DATE]` stamp.
    pub date_style: DateStyle,
}

/// Resolves contract templates against form answers.
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    /// Source of definitions.
    registry: Arc<TemplateRegistry>,
    /// Rendering configuration.
    config: EngineConfig,
}

impl ResolutionEngine {
    /// Creates an engine over a registry.
    #[must_use]
    pub const fn new(registry: Arc<TemplateRegistry>, config: EngineConfig) -> Self {
        Self {
            registry,
            config,
        }
    }

    /// Returns the registry the engine resolves against.
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Resolves a contract type by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] for unknown types or unrenderable instants.
    pub fn resolve(
        &self,
        contract_type: &str,
        answers: &FormAnswers,
        issued_at: Timestamp,
    ) -> Result<String, ResolveError> {
        let definition = self.registry.definition(contract_type)?;
        self.resolve_definition(definition, answers, issued_at)
    }

    /// Resolves an already looked-up definition.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidInstant`] when the date cannot be rendered.
    pub fn resolve_definition(
        &self,
        definition: &ContractTypeDefinition,
        answers: &FormAnswers,
        issued_at: Timestamp,
    ) -> Result<String, ResolveError> {
        let date = issued_at.format_date(self.config.date_style)?;
        let mut table: BTreeMap<Placeholder, String> = BTreeMap::new();
        for field in &definition.fields {
            table.insert(Placeholder::for_field(&field.id), answers.text(&field.id).into_owned());
        }
        for (key, value) in answers.iter() {
            table.insert(Placeholder::for_field(key), value.as_text().into_owned());
        }
        for rule in &definition.fragments {
            table.insert(rule.target().clone(), fragments::evaluate(rule, answers));
        }
        table.insert(Placeholder::date(), date);
        Ok(substitute(&definition.template, &table))
    }
}

// ============================================================================
// SECTION: Substitution
// ============================================================================

/// Replaces every known bracketed token in one left-to-right pass.
fn substitute(template: &str, table: &BTreeMap<Placeholder, String>) -> String {
    let mut out = String::with_capacity(template.len() + template.len() / 2);
    let mut rest = template;
    while let Some(start) = rest.find('[') {
        out.push_str(&rest[.. start]);
        let candidate = &rest[start ..];
        let Some(end) = candidate.find(']') else {
            out.push_str(candidate);
            return out;
        };
        let token = Placeholder::named(&candidate[1 .. end]);
        if let Some(value) = table.get(&token) {
            out.push_str(value);
            rest = &candidate[end + 1 ..];
        } else {
            out.push('[');
            rest = &candidate[1 ..];
        }
    }
    out.push_str(rest);
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::substitute;
    use crate::core::Placeholder;

    #[test]
    fn substitution_is_single_pass() {
        let mut table = BTreeMap::new();
        table.insert(Placeholder::named("A"), "[B]".to_string());
        table.insert(Placeholder::named("B"), "bee".to_string());
        assert_eq!(substitute("[A] and [B]", &table), "[B] and bee");
    }

    #[test]
    fn unknown_and_unterminated_brackets_pass_through() {
        let mut table = BTreeMap::new();
        table.insert(Placeholder::named("NAME"), "Ann".to_string());
        assert_eq!(substitute("[x [NAME] [OTHER] [open", &table), "[x Ann [OTHER] [open");
    }
}
