// crates/contract-forge-core/src/core/answers.rs
// ============================================================================
// Module: Contract Forge Form Answers
// Description: Scalar answer values keyed by field identifier.
// Purpose: Carry user form input into validation and resolution.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Answers are scalars: text, number, or null. Null stands for an absent
//! answer. Arrays, objects, and booleans are rejected when deserializing.
//! Keys are kept in sorted order so serialization is deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Number;

// ============================================================================
// SECTION: Answer Value
// ============================================================================

/// Scalar answer to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Absent answer.
    Null,
    /// Numeric answer.
    Number(Number),
    /// Text answer.
    Text(String),
}

impl AnswerValue {
    /// Renders the answer as document text. Null renders as empty text.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Number(number) => Cow::Owned(number.to_string()),
            Self::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for AnswerValue {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

// ============================================================================
// SECTION: Form Answers
// ============================================================================

/// Mapping from field identifier to answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormAnswers(BTreeMap<String, AnswerValue>);

impl FormAnswers {
    /// Creates an empty answer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an answer.
    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(field_id.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(field_id, value);
        self
    }

    /// Returns the raw answer for a field.
    #[must_use]
    pub fn get(&self, field_id: &str) -> Option<&AnswerValue> {
        self.0.get(field_id)
    }

    /// Returns the answer rendered as text; absent answers are empty.
    #[must_use]
    pub fn text(&self, field_id: &str) -> Cow<'_, str> {
        self.0.get(field_id).map_or(Cow::Borrowed(""), AnswerValue::as_text)
    }

    /// Iterates answers in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    /// Returns the number of answers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no answers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for FormAnswers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
