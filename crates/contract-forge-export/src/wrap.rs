// crates/contract-forge-export/src/wrap.rs
// ============================================================================
// Module: Line Wrapping
// Description: Fixed-column word wrapping for fixed-pitch output.
// Purpose: Split document text into lines no wider than a column limit.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Wrapping is measured in characters, which equals rendered width for a
//! fixed-pitch font. Source line breaks are preserved, blank lines included.
//! Words longer than the limit are split hard.

// ============================================================================
// SECTION: Wrapping
// ============================================================================

/// Wraps `text` so that no output line exceeds `columns` characters.
///
/// A `columns` value of zero is treated as one.
#[must_use]
pub fn wrap_lines(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    for source_line in text.lines() {
        wrap_one(source_line.trim_end(), columns, &mut lines);
    }
    lines
}

/// Wraps a single source line into `out`.
fn wrap_one(line: &str, columns: usize, out: &mut Vec<String>) {
    if line.is_empty() {
        out.push(String::new());
        return;
    }
    let mut current = String::new();
    let mut current_len = 0;
    let mut started = false;
    for word in line.split(' ') {
        let word_len = word.chars().count();
        let needed = if started { current_len + 1 + word_len } else { word_len };
        if needed <= columns {
            if started {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
            started = true;
            continue;
        }
        if current_len > 0 {
            out.push(std::mem::take(&mut current));
        }
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > columns {
            let rest = chars.split_off(columns);
            out.push(chars.into_iter().collect());
            chars = rest;
        }
        current_len = chars.len();
        current = chars.into_iter().collect();
        started = true;
    }
    out.push(current);
}

// ============================================================================
// SECTION: Tests
// ============================================================================
