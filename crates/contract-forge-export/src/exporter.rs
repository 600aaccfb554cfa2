// crates/contract-forge-export/src/exporter.rs
// ============================================================================
// Module: Contract Exporter
// Description: Format dispatch for document exports.
// Purpose: Implement the core export interface over the concrete renderers.
// Dependencies: contract-forge-core
// ============================================================================

//! ## Overview
//! [`ContractExporter`] picks a renderer by [`ExportFormat`] and names the
//! artifact `contract-{id}-{YYYY-MM-DD}.{ext}` from the export instant (UTC).

// ============================================================================
// SECTION: Imports
// ============================================================================

use contract_forge_core::ContractId;
use contract_forge_core::DocumentExporter;
use contract_forge_core::ExportArtifact;
use contract_forge_core::ExportError;
use contract_forge_core::ExportFormat;
use contract_forge_core::ExportRequest;
use contract_forge_core::Timestamp;

use crate::pdf::PdfLayout;
use crate::pdf::render_pdf;
use crate::word::render_word;

// ============================================================================
// SECTION: Exporter
// ============================================================================

/// Exporter for all supported document formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContractExporter {
    /// PDF page layout.
    pdf_layout: PdfLayout,
}

impl ContractExporter {
    /// Creates an exporter with a custom PDF layout.
    #[must_use]
    pub const fn with_pdf_layout(pdf_layout: PdfLayout) -> Self {
        Self {
            pdf_layout,
        }
    }
}

impl DocumentExporter for ContractExporter {
    fn export(&self, request: &ExportRequest<'_>) -> Result<ExportArtifact, ExportError> {
        let bytes = match request.format {
            ExportFormat::Pdf => render_pdf(request.content, &self.pdf_layout)?,
            ExportFormat::Word => render_word(request.content),
            ExportFormat::Text => request.content.as_bytes().to_vec(),
        };
        Ok(ExportArtifact {
            bytes,
            content_type: request.format.content_type(),
            file_name: export_file_name(request.contract_id, request.format, request.exported_at)?,
        })
    }
}

/// Builds the download file name for an export.
///
/// # Errors
///
/// Returns [`ExportError::Render`] when the instant cannot be rendered as a
/// calendar date.
pub fn export_file_name(
    contract_id: &ContractId,
    format: ExportFormat,
    exported_at: Timestamp,
) -> Result<String, ExportError> {
    let date = exported_at.iso_date().map_err(|err| ExportError::Render(err.to_string()))?;
    Ok(format!("contract-{contract_id}-{date}.{}", format.extension()))
}
