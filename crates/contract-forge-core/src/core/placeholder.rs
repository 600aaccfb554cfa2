// crates/contract-forge-core/src/core/placeholder.rs
// ============================================================================
// Module: Contract Forge Placeholders
// Description: Bracketed template tokens and the field-to-token naming law.
// Purpose: Provide one canonical mapping from field identifiers to tokens.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Templates reference values through bracketed uppercase tokens such as
//! `[CLIENT_COMPANY]`. A field's token is derived from its camelCase
//! identifier: an underscore goes before every uppercase letter, a leading
//! underscore is dropped, and the whole string is uppercased.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Token name of the generation date stamp.
pub const DATE_TOKEN_NAME: &str = "DATE";

// ============================================================================
// SECTION: Placeholder
// ============================================================================

/// Bracketed template token, for example `[CLIENT_NAME]`.
///
/// # Invariants
/// - Always stored with its surrounding brackets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placeholder(String);

impl Placeholder {
    /// Creates a placeholder from a bare token name such as `DATE`.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self(format!("[{name}]"))
    }

    /// Returns the placeholder for a camelCase field identifier.
    #[must_use]
    pub fn for_field(field_id: &str) -> Self {
        Self::named(&token_name(field_id))
    }

    /// Returns the date stamp placeholder.
    #[must_use]
    pub fn date() -> Self {
        Self::named(DATE_TOKEN_NAME)
    }

    /// Returns the bracketed token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Naming Law
// ============================================================================

/// Converts a camelCase field identifier into its bare token name.
#[must_use]
pub fn token_name(field_id: &str) -> String {
    let mut name = String::with_capacity(field_id.len() + 4);
    for ch in field_id.chars() {
        if ch.is_uppercase() {
            name.push('_');
        }
        name.extend(ch.to_uppercase());
    }
    match name.strip_prefix('_') {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// Returns true when `text` is a well-formed bracketed token name.
#[must_use]
pub fn is_token_body(text: &str) -> bool {
    !text.is_empty()
        && text.chars().all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_')
}

/// Collects every well-formed bracketed token appearing in `template`.
#[must_use]
pub fn scan_tokens(template: &str) -> Vec<Placeholder> {
    let mut tokens = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('[') {
        let candidate = &rest[start + 1 ..];
        match candidate.find(']') {
            Some(end) if is_token_body(&candidate[.. end]) => {
                tokens.push(Placeholder::named(&candidate[.. end]));
                rest = &candidate[end + 1 ..];
            }
            Some(_) => rest = candidate,
            None => break,
        }
    }
    tokens
}

// ============================================================================
// SECTION: Tests
// ============================================================================
