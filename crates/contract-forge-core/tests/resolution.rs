// crates/contract-forge-core/tests/resolution.rs
// ============================================================================
// Module: Resolution Engine Tests
// Description: End-to-end resolution over the built-in catalog.
// Purpose: Verify determinism, full substitution, and fragment behavior.
// ============================================================================

//! ## Overview
//! Exercises the resolution engine against every built-in contract type.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use contract_forge_core::DateStyle;
use contract_forge_core::EngineConfig;
use contract_forge_core::FormAnswers;
use contract_forge_core::ResolutionEngine;
use contract_forge_core::ResolveError;
use contract_forge_core::TemplateRegistry;
use contract_forge_core::validate_answers;
use proptest::prelude::*;

use crate::common::NEW_YEAR_2025;
use crate::common::full_answers;
use crate::common::has_bracket_token;
use crate::common::required_answers;
use crate::common::service_answers;

fn engine() -> ResolutionEngine {
    ResolutionEngine::new(TemplateRegistry::builtin(), EngineConfig::default())
}

/// Verifies every type resolves without leftover tokens when all fields are filled.
#[test]
fn every_type_resolves_without_leftover_tokens() {
    let engine = engine();
    for definition in engine.registry().definitions() {
        let answers = full_answers(definition);
        let content = engine.resolve(definition.id.as_str(), &answers, NEW_YEAR_2025).unwrap();
        assert!(!has_bracket_token(&content), "{} left tokens:\n{content}", definition.id);
        assert!(content.contains("1/1/2025"), "{} missing date stamp", definition.id);
    }
}

/// Verifies omitted optional fields also leave no tokens behind.
#[test]
fn required_only_answers_leave_no_tokens() {
    let engine = engine();
    for definition in engine.registry().definitions() {
        let answers = required_answers(definition);
        let content = engine.resolve(definition.id.as_str(), &answers, NEW_YEAR_2025).unwrap();
        assert!(!has_bracket_token(&content), "{} left tokens:\n{content}", definition.id);
    }
}

/// Verifies identical inputs and instant yield identical text.
#[test]
fn resolution_is_deterministic() {
    let engine = engine();
    let answers = service_answers();
    let first = engine.resolve("service", &answers, NEW_YEAR_2025).unwrap();
    let second = engine.resolve("service", &answers, NEW_YEAR_2025).unwrap();
    assert_eq!(first, second);
}

/// Verifies the NDA company suffix appears only when the company is given.
#[test]
fn nda_receiving_company_fragment() {
    let engine = engine();
    let definition = engine.registry().definition("nda").unwrap();
    let mut answers = required_answers(definition);
    answers.insert("receivingPartyName", "Rita");

    let without = engine.resolve("nda", &answers, NEW_YEAR_2025).unwrap();
    assert!(without.contains("Rita (\"Receiving Party\")"));
    assert!(!without.contains("Rita of"));

    answers.insert("receivingPartyCompany", "Rita Co");
    let with = engine.resolve("nda", &answers, NEW_YEAR_2025).unwrap();
    assert!(with.contains("Rita of Rita Co (\"Receiving Party\")"));
}

/// Verifies web-dev deposit and content-writing totals.
#[test]
fn derived_amounts_render_two_decimals() {
    let engine = engine();
    let web = engine.registry().definition("web-dev").unwrap();
    let mut answers = full_answers(web);
    answers.insert("totalCost", "1000");
    answers.insert("depositPercent", "50");
    let content = engine.resolve("web-dev", &answers, NEW_YEAR_2025).unwrap();
    assert!(content.contains("Deposit: 50% ($500.00) due upon signing"));

    let writing = engine.registry().definition("content-writing").unwrap();
    let mut answers = full_answers(writing);
    answers.insert("paymentPerPiece", "40.5");
    answers.insert("articleCount", 3_u64);
    let content = engine.resolve("content-writing", &answers, NEW_YEAR_2025).unwrap();
    assert!(content.contains("Total project value: $121.50"));
}

/// Verifies fractional piece counts keep only their whole part in the total.
#[test]
fn content_writing_total_truncates_fractional_count() {
    let engine = engine();
    let writing = engine.registry().definition("content-writing").unwrap();
    let mut answers = full_answers(writing);
    answers.insert("paymentPerPiece", "10");
    answers.insert("articleCount", "2.5");
    assert!(validate_answers(writing, &answers).is_ok());
    let content = engine.resolve("content-writing", &answers, NEW_YEAR_2025).unwrap();
    assert!(content.contains("Total project value: $20.00"));
}

/// Verifies the research fallback sentence and the hourly note.
#[test]
fn default_text_and_choice_fragments() {
    let engine = engine();
    let writing = engine.registry().definition("content-writing").unwrap();
    let content =
        engine.resolve("content-writing", &required_answers(writing), NEW_YEAR_2025).unwrap();
    assert!(content.contains("No specific research requirements specified."));

    let consulting = engine.registry().definition("consulting").unwrap();
    let mut answers = required_answers(consulting);
    answers.insert("paymentStructure", "Hourly Rate");
    answers.insert("rate", "150");
    answers.insert("estimatedHours", "20");
    let content = engine.resolve("consulting", &answers, NEW_YEAR_2025).unwrap();
    assert!(content.contains("Rate/Fee: $150 (Est. 20 hours)"));

    answers.insert("paymentStructure", "Monthly Retainer");
    let content = engine.resolve("consulting", &answers, NEW_YEAR_2025).unwrap();
    assert!(content.contains("Rate/Fee: $150\n"));
}

/// Verifies answers containing token text are inserted literally.
#[test]
fn inserted_values_are_not_rescanned() {
    let engine = engine();
    let answers = service_answers().with("serviceDescription", "Write [CLIENT_NAME] docs");
    let content = engine.resolve("service", &answers, NEW_YEAR_2025).unwrap();
    assert!(content.contains("Write [CLIENT_NAME] docs"));
}

/// Verifies fragment targets win over answer keys that map to the same token.
#[test]
fn fragment_targets_override_answer_keys() {
    let engine = engine();
    let writing = engine.registry().definition("content-writing").unwrap();
    let answers = required_answers(writing).with("researchRequirements", "Injected text");
    let content = engine.resolve("content-writing", &answers, NEW_YEAR_2025).unwrap();
    assert!(content.contains("No specific research requirements specified."));
    assert!(!content.contains("Injected text"));
}

/// Verifies unknown types produce no output.
#[test]
fn unknown_type_is_rejected() {
    let result = engine().resolve("lease", &FormAnswers::new(), NEW_YEAR_2025);
    assert_eq!(result, Err(ResolveError::UnknownContractType("lease".to_string())));
}

/// Verifies the configured date style drives the stamp.
#[test]
fn date_style_is_configurable() {
    let engine = ResolutionEngine::new(TemplateRegistry::builtin(), EngineConfig {
        date_style: DateStyle::Iso,
    });
    let content = engine.resolve("service", &service_answers(), NEW_YEAR_2025).unwrap();
    assert!(content.contains("entered into on 2025-01-01 between"));
}

proptest! {
    /// Verifies arbitrary answers resolve identically at a fixed instant.
    #[test]
    fn arbitrary_answers_resolve_deterministically(
        type_index in 0_usize .. 8,
        values in prop::collection::vec("[ -~]{0,24}", 0 .. 24),
    ) {
        let engine = engine();
        let definitions: Vec<_> = engine.registry().definitions().collect();
        let definition = definitions[type_index % definitions.len()];
        let mut answers = FormAnswers::new();
        for (field, value) in definition.fields.iter().zip(values) {
            answers.insert(field.id.clone(), value);
        }
        let first = engine.resolve(definition.id.as_str(), &answers, NEW_YEAR_2025).unwrap();
        let second = engine.resolve(definition.id.as_str(), &answers, NEW_YEAR_2025).unwrap();
        prop_assert_eq!(first, second);
    }
}
