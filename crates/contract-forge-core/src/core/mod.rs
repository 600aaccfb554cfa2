// crates/contract-forge-core/src/core/mod.rs
// ============================================================================
// Module: Contract Forge Core Types
// Description: Canonical data model for contract generation.
// Purpose: Provide stable, serializable types for schemas, answers, and records.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types are plain data shared by the template registry, the field
//! validator, the resolution engine, and every storage or export backend.
//! They are the canonical source of truth for the HTTP and CLI surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod answers;
pub mod definition;
pub mod field;
pub mod hashing;
pub mod identifiers;
pub mod markup;
pub mod placeholder;
pub mod record;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use answers::AnswerValue;
pub use answers::FormAnswers;
pub use definition::ContractTypeDefinition;
pub use definition::ContractTypeSummary;
pub use definition::FragmentRule;
pub use field::FieldKind;
pub use field::FieldSpec;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use hashing::hash_content;
pub use identifiers::ContractId;
pub use identifiers::ContractTypeId;
pub use markup::escape_html;
pub use markup::push_html_escaped;
pub use placeholder::DATE_TOKEN_NAME;
pub use placeholder::Placeholder;
pub use placeholder::token_name;
pub use record::GeneratedContract;
pub use record::NewContract;
pub use time::DateStyle;
pub use time::TimeError;
pub use time::Timestamp;
