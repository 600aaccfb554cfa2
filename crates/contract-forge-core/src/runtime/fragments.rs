// crates/contract-forge-core/src/runtime/fragments.rs
// ============================================================================
// Module: Fragment Interpreter
// Description: Evaluates declarative fragment rules against form answers.
// Purpose: Compute optional sentence fragments and derived amounts.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! One interpreter handles every [`FragmentRule`]. Derived amounts always
//! render with two decimals; inputs that are blank or do not parse count as
//! zero so a document never carries a leftover token.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::FormAnswers;
use crate::core::FragmentRule;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates a rule to the text substituted for its target token.
#[must_use]
pub fn evaluate(rule: &FragmentRule, answers: &FormAnswers) -> String {
    match rule {
        FragmentRule::CompanySuffix {
            source, ..
        } => {
            let company = answers.text(source);
            if company.trim().is_empty() { String::new() } else { format!(" of {company}") }
        }
        FragmentRule::UnitTotal {
            unit_price,
            count,
            ..
        } => format_amount(
            parse_amount(&answers.text(unit_price)) * parse_count(&answers.text(count)),
        ),
        FragmentRule::PercentageOf {
            base,
            percent,
            ..
        } => format_amount(
            parse_amount(&answers.text(base)) * parse_amount(&answers.text(percent)) / 100.0,
        ),
        FragmentRule::DefaultText {
            source,
            fallback,
            ..
        } => {
            let text = answers.text(source);
            if text.trim().is_empty() { fallback.clone() } else { text.into_owned() }
        }
        FragmentRule::ChoiceSuffix {
            choice,
            equals,
            source,
            prefix,
            suffix,
            ..
        } => {
            let value = answers.text(source);
            if answers.text(choice) == equals.as_str() && !value.trim().is_empty() {
                format!("{prefix}{value}{suffix}")
            } else {
                String::new()
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses an amount; blank, malformed, or non-finite input is zero.
fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite()).unwrap_or(0.0)
}

/// Parses the leading integer of a count; `2.5` is 2 and `3 pieces` is 3.
///
/// Input without leading digits is zero.
fn parse_count(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(unsigned.len());
    unsigned
        .get(.. end)
        .and_then(|digits| digits.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map_or(0.0, |value| sign * value)
}

/// Renders an amount with exactly two decimals, never as negative zero.
fn format_amount(value: f64) -> String {
    let value = if value.is_finite() { value + 0.0 } else { 0.0 };
    format!("{value:.2}")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
