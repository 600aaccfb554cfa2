// crates/contract-forge-providers/src/grammar.rs
// ============================================================================
// Module: Grammar Suggestions
// Description: Advisory grammar checkers (builtin heuristics and LanguageTool).
// Purpose: Offer text suggestions that never block form progress.
// Dependencies: async-trait, regex, reqwest, serde
// ============================================================================

//! ## Overview
//! Suggestions are advisory. The builtin checker flags repeated spaces, a
//! long trailing sentence with no terminal punctuation, and a short list of
//! common misspellings. The `LanguageTool` client forwards text to a remote
//! service; its errors are meant to be swallowed by callers.
//!
//! All offsets and lengths are counted in Unicode scalar values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Repeated-space pattern.
const DOUBLE_SPACE_PATTERN: &str = "  +";
/// Terminal punctuation pattern used to split sentences.
const SENTENCE_END_PATTERN: &str = "[.!?]+";
/// Common misspellings and their corrections.
const COMMON_TYPOS: &[(&str, &str)] = &[
    ("teh", "the"),
    ("recieve", "receive"),
    ("occurance", "occurrence"),
    ("seperate", "separate"),
    ("definately", "definitely"),
];
/// Trailing sentences longer than this many chars need terminal punctuation.
const MIN_UNPUNCTUATED_SENTENCE_CHARS: usize = 20;
/// Maximum accepted `LanguageTool` response size.
const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Maximum replacements kept per remote suggestion.
const MAX_REPLACEMENTS: usize = 5;

/// Compiled repeated-space pattern.
static DOUBLE_SPACE_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(DOUBLE_SPACE_PATTERN).ok());
/// Compiled sentence terminator pattern.
static SENTENCE_END_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(SENTENCE_END_PATTERN).ok());
/// Compiled misspelling pattern, case-insensitive and word-bounded.
static TYPO_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let words: Vec<&str> = COMMON_TYPOS.iter().map(|(typo, _)| *typo).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).ok()
});

// ============================================================================
// SECTION: Types
// ============================================================================

/// One grammar suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable message.
    pub message: String,
    /// Start offset in chars.
    pub offset: usize,
    /// Span length in chars.
    pub length: usize,
    /// Stable rule identifier.
    pub rule: String,
    /// Suggested replacements for the span.
    pub replacements: Vec<String>,
}

/// Grammar checker errors.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The remote service is unreachable, slow, or returned an error.
    #[error("grammar service unavailable: {0}")]
    Unavailable(String),
    /// The remote response could not be interpreted.
    #[error("grammar service response invalid: {0}")]
    InvalidResponse(String),
}

/// Grammar checker interface.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Returns suggestions for `text`.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] when a remote checker fails.
    async fn check(&self, text: &str) -> Result<Vec<Suggestion>, GrammarError>;
}

// ============================================================================
// SECTION: Builtin Checker
// ============================================================================

/// Heuristic checker that runs in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinGrammarChecker;

#[async_trait]
impl GrammarChecker for BuiltinGrammarChecker {
    async fn check(&self, text: &str) -> Result<Vec<Suggestion>, GrammarError> {
        Ok(builtin_suggestions(text))
    }
}

/// Checker that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGrammarChecker;

#[async_trait]
impl GrammarChecker for DisabledGrammarChecker {
    async fn check(&self, _text: &str) -> Result<Vec<Suggestion>, GrammarError> {
        Ok(Vec::new())
    }
}

/// Runs the builtin heuristics.
///
/// Results are grouped by rule (spacing, punctuation, spelling) and ordered
/// by offset within each group.
#[must_use]
pub fn builtin_suggestions(text: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    if let Some(regex) = DOUBLE_SPACE_REGEX.as_ref() {
        for found in regex.find_iter(text) {
            suggestions.push(Suggestion {
                message: "Remove extra spaces".to_string(),
                offset: char_offset(text, found.start()),
                length: found.as_str().chars().count(),
                rule: "double_space".to_string(),
                replacements: vec![" ".to_string()],
            });
        }
    }
    if let Some(suggestion) = missing_punctuation(text) {
        suggestions.push(suggestion);
    }
    if let Some(regex) = TYPO_REGEX.as_ref() {
        for found in regex.find_iter(text) {
            let typo = found.as_str();
            let Some((_, correction)) =
                COMMON_TYPOS.iter().find(|(candidate, _)| candidate.eq_ignore_ascii_case(typo))
            else {
                continue;
            };
            suggestions.push(Suggestion {
                message: format!("Possible spelling mistake: \"{typo}\" -> \"{correction}\""),
                offset: char_offset(text, found.start()),
                length: typo.chars().count(),
                rule: "spelling".to_string(),
                replacements: vec![(*correction).to_string()],
            });
        }
    }
    suggestions
}

/// Flags a long trailing sentence that lacks terminal punctuation.
fn missing_punctuation(text: &str) -> Option<Suggestion> {
    let regex = SENTENCE_END_REGEX.as_ref()?;
    let tail_start = regex.find_iter(text).last().map_or(0, |found| found.end());
    let tail = &text[tail_start ..];
    let trimmed = tail.trim_end();
    let sentence = trimmed.trim_start();
    if sentence.chars().count() <= MIN_UNPUNCTUATED_SENTENCE_CHARS {
        return None;
    }
    Some(Suggestion {
        message: "Consider ending sentence with proper punctuation".to_string(),
        offset: char_offset(text, tail_start + trimmed.len()),
        length: 0,
        rule: "missing_punctuation".to_string(),
        replacements: vec![".".to_string()],
    })
}

/// Converts a byte offset into a char offset.
fn char_offset(text: &str, byte_offset: usize) -> usize {
    text.get(.. byte_offset).map_or(0, |prefix| prefix.chars().count())
}

// ============================================================================
// SECTION: LanguageTool Checker
// ============================================================================

/// Configuration for the `LanguageTool` client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageToolConfig {
    /// Check endpoint.
    pub endpoint: String,
    /// Language code.
    pub language: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LanguageToolConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.languagetool.org/v2/check".to_string(),
            language: "en-US".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// `LanguageTool` HTTP client.
pub struct LanguageToolChecker {
    /// Client configuration.
    config: LanguageToolConfig,
    /// HTTP client configured with timeouts.
    client: Client,
}

impl LanguageToolChecker {
    /// Creates a `LanguageTool` client.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::Unavailable`] when the HTTP client cannot be
    /// built.
    pub fn new(config: LanguageToolConfig) -> Result<Self, GrammarError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none())
            .build()
            .map_err(|err| GrammarError::Unavailable(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolChecker {
    async fn check(&self, text: &str) -> Result<Vec<Suggestion>, GrammarError> {
        let form = [
            ("text", text),
            ("language", self.config.language.as_str()),
            ("enabledOnly", "false"),
        ];
        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|err| GrammarError::Unavailable(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GrammarError::Unavailable(format!("status {}", status.as_u16())));
        }
        let body =
            response.bytes().await.map_err(|err| GrammarError::Unavailable(err.to_string()))?;
        if body.len() > MAX_RESPONSE_BYTES {
            return Err(GrammarError::InvalidResponse("response exceeds size limit".to_string()));
        }
        let parsed: LanguageToolResponse = serde_json::from_slice(&body)
            .map_err(|err| GrammarError::InvalidResponse(err.to_string()))?;
        Ok(parsed.matches.into_iter().map(|found| found.into_suggestion(text)).collect())
    }
}

/// `LanguageTool` check response.
#[derive(Debug, Deserialize)]
struct LanguageToolResponse {
    /// Reported matches.
    #[serde(default)]
    matches: Vec<LanguageToolMatch>,
}

/// One `LanguageTool` match; offsets are UTF-16 code units.
#[derive(Debug, Deserialize)]
struct LanguageToolMatch {
    /// Message.
    message: String,
    /// Start offset.
    offset: usize,
    /// Span length.
    length: usize,
    /// Matched rule.
    rule: LanguageToolRule,
    /// Replacement candidates.
    #[serde(default)]
    replacements: Vec<LanguageToolReplacement>,
}

impl LanguageToolMatch {
    /// Converts to a suggestion with char offsets against `text`.
    fn into_suggestion(self, text: &str) -> Suggestion {
        let start = utf16_to_char_offset(text, self.offset);
        let end = utf16_to_char_offset(text, self.offset.saturating_add(self.length));
        Suggestion {
            message: self.message,
            offset: start,
            length: end.saturating_sub(start),
            rule: self.rule.id,
            replacements: self
                .replacements
                .into_iter()
                .take(MAX_REPLACEMENTS)
                .map(|replacement| replacement.value)
                .collect(),
        }
    }
}

/// `LanguageTool` rule reference.
#[derive(Debug, Deserialize)]
struct LanguageToolRule {
    /// Rule identifier.
    id: String,
}

/// `LanguageTool` replacement candidate.
#[derive(Debug, Deserialize)]
struct LanguageToolReplacement {
    /// Replacement text.
    value: String,
}

/// Converts a UTF-16 offset into a char offset, clamping past the end.
fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += ch.len_utf16();
    }
    text.chars().count()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
