// crates/contract-forge-core/src/interfaces/mod.rs
// ============================================================================
// Module: Contract Forge Interfaces
// Description: Backend-agnostic interfaces for storage and document export.
// Purpose: Define the collaborator surfaces used by the contract runtime.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces let hosts plug in storage and export backends without the core
//! knowing about databases or file formats. Implementations fail closed on
//! missing or invalid data.
//!
//! Security posture: stored records and document text are untrusted once they
//! leave the process; backends must verify integrity on load.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::ContractId;
use crate::core::record::GeneratedContract;
use crate::core::record::NewContract;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Contract Store
// ============================================================================

/// Contract store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("contract store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("contract store corruption: {0}")]
    Corrupt(String),
    /// Store data version is incompatible.
    #[error("contract store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("contract store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("contract store error: {0}")]
    Store(String),
}

/// Persistence for generated contracts.
pub trait ContractStore {
    /// Persists a new contract and assigns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when persistence fails.
    fn create(&self, contract: NewContract) -> Result<GeneratedContract, StoreError>;

    /// Loads a contract by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails or the record is corrupt.
    fn get(&self, id: &ContractId) -> Result<Option<GeneratedContract>, StoreError>;

    /// Increments the download counter; returns false when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn increment_download(&self, id: &ContractId) -> Result<bool, StoreError>;
}

// ============================================================================
// SECTION: Document Export
// ============================================================================

/// Downloadable document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Portable Document Format.
    Pdf,
    /// Word-compatible HTML document.
    Word,
    /// Plain UTF-8 text.
    Text,
}

impl ExportFormat {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Text => "text",
        }
    }

    /// Returns the file extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "doc",
            Self::Text => "txt",
        }
    }

    /// Returns the MIME content type.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Word => "application/msword",
            Self::Text => "text/plain; charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "word" | "doc" => Ok(Self::Word),
            "text" | "txt" => Ok(Self::Text),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Export request for one stored document.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    /// Record identifier, used in the file name.
    pub contract_id: &'a ContractId,
    /// Document text.
    pub content: &'a str,
    /// Target format.
    pub format: ExportFormat,
    /// Export instant, used for the file-name date.
    pub exported_at: Timestamp,
}

/// Rendered export artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Document bytes.
    pub bytes: Vec<u8>,
    /// MIME content type.
    pub content_type: &'static str,
    /// Suggested download file name.
    pub file_name: String,
}

/// Export errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Requested format is not supported.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),
    /// Rendering the document failed.
    #[error("export render error: {0}")]
    Render(String),
}

/// Renders stored document text into a downloadable artifact.
pub trait DocumentExporter {
    /// Produces the artifact for the request.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] when rendering fails.
    fn export(&self, request: &ExportRequest<'_>) -> Result<ExportArtifact, ExportError>;
}
