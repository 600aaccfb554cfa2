// crates/contract-forge-export/src/lib.rs
// ============================================================================
// Module: Contract Forge Export Library
// Description: Document exporters for generated contracts.
// Purpose: Render stored document text as PDF, Word-compatible, or text files.
// Dependencies: contract-forge-core, lopdf
// ============================================================================

//! ## Overview
//! Exporters turn the flat document text produced by the resolution engine
//! into downloadable artifacts. [`ContractExporter`] implements the core
//! [`contract_forge_core::DocumentExporter`] interface and dispatches on the
//! requested format.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod exporter;
pub mod pdf;
pub mod word;
pub mod wrap;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use exporter::ContractExporter;
pub use exporter::export_file_name;
pub use pdf::PdfLayout;
pub use pdf::render_pdf;
pub use word::render_word;
pub use wrap::wrap_lines;
