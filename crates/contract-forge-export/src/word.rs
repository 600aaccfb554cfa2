// crates/contract-forge-export/src/word.rs
// ============================================================================
// Module: Word Renderer
// Description: Word-compatible HTML document output.
// Purpose: Render document text as an HTML body that word processors open.
// Dependencies: contract-forge-core
// ============================================================================

//! ## Overview
//! Word processors accept an HTML file served as `application/msword`. The
//! document text sits in a single preformatted block; every HTML-significant
//! character is escaped so answer values cannot inject markup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use contract_forge_core::push_html_escaped;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Document prologue up to the opening `<pre>` tag.
const WORD_PROLOGUE: &str = "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
<title>Contract</title>\n<style>\nbody { font-family: 'Times New Roman', serif; font-size: 12pt; \
line-height: 1.6; margin: 1in; }\npre { white-space: pre-wrap; font-family: 'Times New Roman', \
serif; }\n</style>\n</head>\n<body>\n<pre>";

/// Document epilogue after the closing `</pre>` tag.
const WORD_EPILOGUE: &str = "</pre>\n</body>\n</html>\n";

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `content` as a Word-compatible HTML document.
#[must_use]
pub fn render_word(content: &str) -> Vec<u8> {
    let mut html = String::with_capacity(WORD_PROLOGUE.len() + content.len() + WORD_EPILOGUE.len());
    html.push_str(WORD_PROLOGUE);
    push_html_escaped(&mut html, content);
    html.push_str(WORD_EPILOGUE);
    html.into_bytes()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
