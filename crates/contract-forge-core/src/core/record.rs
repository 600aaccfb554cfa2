// crates/contract-forge-core/src/core/record.rs
// ============================================================================
// Module: Contract Forge Records
// Description: Persisted generated-contract records.
// Purpose: Define what storage keeps for every generated document.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`GeneratedContract`] is immutable after creation except for its
//! download counter. The content hash is computed once from the document text
//! so stores can verify integrity when records are loaded back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::answers::FormAnswers;
use crate::core::hashing::HashDigest;
use crate::core::hashing::hash_content;
use crate::core::identifiers::ContractId;
use crate::core::identifiers::ContractTypeId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Stored, generated contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContract {
    /// Opaque record identifier.
    pub id: ContractId,
    /// Contract category.
    pub contract_type: ContractTypeId,
    /// Answers the document was generated from.
    pub answers: FormAnswers,
    /// Fully resolved document text.
    pub content: String,
    /// Digest of `content`.
    pub content_hash: HashDigest,
    /// Instant the record was stored.
    pub created_at: Timestamp,
    /// Instant rendered into the document date stamp.
    pub issued_at: Timestamp,
    /// Number of recorded downloads.
    pub download_count: u64,
}

impl GeneratedContract {
    /// Returns true when the stored hash matches the stored content.
    #[must_use]
    pub fn content_matches_hash(&self) -> bool {
        hash_content(&self.content) == self.content_hash
    }
}

/// Input for creating a stored contract; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContract {
    /// Contract category.
    pub contract_type: ContractTypeId,
    /// Answers the document was generated from.
    pub answers: FormAnswers,
    /// Fully resolved document text.
    pub content: String,
    /// Digest of `content`.
    pub content_hash: HashDigest,
    /// Instant rendered into the document date stamp.
    pub issued_at: Timestamp,
    /// Instant the record is stored.
    pub created_at: Timestamp,
}

impl NewContract {
    /// Builds a creation request, hashing the content.
    #[must_use]
    pub fn new(
        contract_type: ContractTypeId,
        answers: FormAnswers,
        content: String,
        issued_at: Timestamp,
        created_at: Timestamp,
    ) -> Self {
        let content_hash = hash_content(&content);
        Self {
            contract_type,
            answers,
            content,
            content_hash,
            issued_at,
            created_at,
        }
    }

    /// Materializes the stored record under the assigned identifier.
    #[must_use]
    pub fn into_record(self, id: ContractId) -> GeneratedContract {
        GeneratedContract {
            id,
            contract_type: self.contract_type,
            answers: self.answers,
            content: self.content,
            content_hash: self.content_hash,
            created_at: self.created_at,
            issued_at: self.issued_at,
            download_count: 0,
        }
    }
}
