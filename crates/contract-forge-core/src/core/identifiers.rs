// crates/contract-forge-core/src/core/identifiers.rs
// ============================================================================
// Module: Contract Forge Identifiers
// Description: Canonical opaque identifiers for contract types and records.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: rand, serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque strings that serialize transparently. Contract type
//! identifiers are stable catalog keys (for example `nda`); contract
//! identifiers are random tokens assigned by the storage collaborator when a
//! generated document is persisted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of random bytes backing a generated contract identifier.
const CONTRACT_ID_BYTES: usize = 16;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Stable catalog key for a contract category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractTypeId(String);

impl ContractTypeId {
    /// Creates a new contract type identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ContractTypeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContractTypeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Opaque identifier of a stored, generated contract.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; CONTRACT_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(crate::core::hashing::hex_encode(&bytes))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ContractId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContractId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
