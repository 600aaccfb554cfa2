// crates/contract-forge-core/src/core/markup.rs
// ============================================================================
// Module: Markup Escaping
// Description: HTML escaping for document text.
// Purpose: Give every HTML-producing backend one escaping routine.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Document text embeds raw answer values, so any backend that wraps it in
//! HTML escapes it first. Escaping covers text and quoted attribute contexts.

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Appends `text` to `out` with HTML special characters escaped.
pub fn push_html_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

/// Returns `text` with HTML special characters escaped.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_html_escaped(&mut out, text);
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
