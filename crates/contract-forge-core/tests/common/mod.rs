// crates/contract-forge-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Fixtures
// Description: Shared answer fixtures for core integration tests.
// Purpose: Build complete and partial answer sets for catalog definitions.
// ============================================================================

//! ## Overview
//! Fixture builders that fill every field of a definition with a value valid
//! for its kind.

#![allow(dead_code, reason = "Not every test binary uses every fixture.")]

use contract_forge_core::ContractTypeDefinition;
use contract_forge_core::FieldKind;
use contract_forge_core::FormAnswers;
use contract_forge_core::Timestamp;

/// 2025-01-01T00:00:00Z.
pub const NEW_YEAR_2025: Timestamp = Timestamp::from_unix_millis(1_735_689_600_000);

/// Fills every field, optional ones included, with a kind-appropriate value.
pub fn full_answers(definition: &ContractTypeDefinition) -> FormAnswers {
    let mut answers = FormAnswers::new();
    for field in &definition.fields {
        let value = match &field.kind {
            FieldKind::ShortText | FieldKind::LongText => format!("{} value", field.label),
            FieldKind::SingleChoice {
                options,
            } => options.first().cloned().unwrap_or_default(),
            FieldKind::Number => "7".to_string(),
            FieldKind::Email => "someone@example.com".to_string(),
            FieldKind::Date => "2025-03-01".to_string(),
        };
        answers.insert(field.id.clone(), value);
    }
    answers
}

/// Fills only required fields.
pub fn required_answers(definition: &ContractTypeDefinition) -> FormAnswers {
    let full = full_answers(definition);
    let mut answers = FormAnswers::new();
    for field in definition.fields.iter().filter(|field| field.required) {
        if let Some(value) = full.get(&field.id) {
            answers.insert(field.id.clone(), value.clone());
        }
    }
    answers
}

/// Answers for the `service` scenario used across tests.
pub fn service_answers() -> FormAnswers {
    FormAnswers::new()
        .with("serviceProviderName", "Acme")
        .with("serviceProviderCompany", "Acme LLC")
        .with("clientName", "Bob")
        .with("clientCompany", "Bob Inc")
        .with("serviceDescription", "Consulting")
        .with("paymentAmount", "5000")
        .with("paymentSchedule", "Net 30")
        .with("projectDeadline", "2025-01-01")
        .with("revisionLimit", "3")
        .with("latePaymentPenalty", "1.5")
}

/// Returns true when `text` still contains a bracketed uppercase token.
pub fn has_bracket_token(text: &str) -> bool {
    !contract_forge_core::core::placeholder::scan_tokens(text).is_empty()
}
