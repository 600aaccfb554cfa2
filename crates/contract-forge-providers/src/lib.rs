// crates/contract-forge-providers/src/lib.rs
// ============================================================================
// Module: Contract Forge Providers
// Description: Email and grammar collaborators for Contract Forge.
// Purpose: Provide async outbound integrations with bounded failure modes.
// Dependencies: contract-forge-core, async-trait, regex, reqwest, serde
// ============================================================================

//! ## Overview
//! Providers are the collaborators the generation core never waits on:
//! email delivery and grammar suggestions. Every network call carries a
//! timeout. Email failures surface as typed errors; missing credentials are a
//! recoverable outcome. Grammar failures are meant to degrade to no
//! suggestions at the caller.
//!
//! Security posture: remote responses are untrusted and size-bounded.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod email;
pub mod grammar;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use email::DisabledEmailSender;
pub use email::EmailError;
pub use email::EmailMessage;
pub use email::EmailOutcome;
pub use email::EmailSender;
pub use email::SendGridConfig;
pub use email::SendGridEmailSender;
pub use grammar::BuiltinGrammarChecker;
pub use grammar::DisabledGrammarChecker;
pub use grammar::GrammarChecker;
pub use grammar::GrammarError;
pub use grammar::LanguageToolChecker;
pub use grammar::LanguageToolConfig;
pub use grammar::Suggestion;
pub use grammar::builtin_suggestions;
