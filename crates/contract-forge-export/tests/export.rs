// crates/contract-forge-export/tests/export.rs
// ============================================================================
// Module: Export Tests
// Description: Format, naming, and layout tests for document exports.
// Purpose: Validate exporter output for every supported format.
// ============================================================================

//! ## Overview
//! Drives [`ContractExporter`] through the core export interface and inspects
//! the produced artifacts.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use contract_forge_core::ContractId;
use contract_forge_core::DocumentExporter;
use contract_forge_core::ExportError;
use contract_forge_core::ExportFormat;
use contract_forge_core::ExportRequest;
use contract_forge_core::Timestamp;
use contract_forge_export::ContractExporter;
use contract_forge_export::PdfLayout;
use contract_forge_export::export_file_name;
use contract_forge_export::wrap_lines;
use lopdf::Document;
use proptest::prelude::*;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// 2025-02-15T12:00:00Z.
const EXPORTED_AT: Timestamp = Timestamp::from_unix_millis(1_739_620_800_000);

const SAMPLE: &str = "NON-DISCLOSURE AGREEMENT\n\nThis Agreement is entered into on 1/1/2025.";

fn export(exporter: &ContractExporter, format: ExportFormat, content: &str) -> Vec<u8> {
    let id = ContractId::new("abc123");
    let request = ExportRequest {
        contract_id: &id,
        content,
        format,
        exported_at: EXPORTED_AT,
    };
    exporter.export(&request).unwrap().bytes
}

fn page_text(doc: &Document, page_number: u32) -> String {
    let pages = doc.get_pages();
    let page_id = pages.get(&page_number).unwrap();
    String::from_utf8_lossy(&doc.get_page_content(*page_id).unwrap()).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies artifacts carry the format's content type and file name.
#[test]
fn artifact_metadata_follows_format() {
    let exporter = ContractExporter::default();
    let id = ContractId::new("abc123");
    for (format, content_type, name) in [
        (ExportFormat::Pdf, "application/pdf", "contract-abc123-2025-02-15.pdf"),
        (ExportFormat::Word, "application/msword", "contract-abc123-2025-02-15.doc"),
        (ExportFormat::Text, "text/plain; charset=utf-8", "contract-abc123-2025-02-15.txt"),
    ] {
        let request = ExportRequest {
            contract_id: &id,
            content: SAMPLE,
            format,
            exported_at: EXPORTED_AT,
        };
        let artifact = exporter.export(&request).unwrap();
        assert_eq!(artifact.content_type, content_type);
        assert_eq!(artifact.file_name, name);
    }
}

/// Verifies text export is the document verbatim.
#[test]
fn text_export_is_verbatim() {
    let bytes = export(&ContractExporter::default(), ExportFormat::Text, SAMPLE);
    assert_eq!(bytes, SAMPLE.as_bytes());
}

/// Verifies Word export wraps escaped content in a preformatted block.
#[test]
fn word_export_is_escaped_html() {
    let bytes = export(&ContractExporter::default(), ExportFormat::Word, "Acme <Holdings> & Co");
    let html = String::from_utf8(bytes).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<pre>Acme &lt;Holdings&gt; &amp; Co</pre>"));
}

/// Verifies PDF export parses and carries the document text.
#[test]
fn pdf_export_is_loadable() {
    let bytes = export(&ContractExporter::default(), ExportFormat::Pdf, SAMPLE);
    assert!(bytes.starts_with(b"%PDF-1.5"));
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    assert!(page_text(&doc, 1).contains("NON-DISCLOSURE AGREEMENT"));
}

/// Verifies long documents paginate.
#[test]
fn pdf_export_paginates_long_documents() {
    let content = (1 ..= 95).map(|n| format!("Clause {n}.")).collect::<Vec<_>>().join("\n");
    let bytes = export(&ContractExporter::default(), ExportFormat::Pdf, &content);
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
    assert!(page_text(&doc, 3).contains("Clause 95."));
}

/// Verifies empty documents still produce one page.
#[test]
fn pdf_export_of_empty_document_has_one_page() {
    let bytes = export(&ContractExporter::default(), ExportFormat::Pdf, "");
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

/// Verifies a custom layout changes the page count.
#[test]
fn pdf_layout_is_configurable() {
    let exporter = ContractExporter::with_pdf_layout(PdfLayout {
        lines_per_page: 1,
        ..PdfLayout::default()
    });
    let bytes = export(&exporter, ExportFormat::Pdf, "one\ntwo\nthree");
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
}

/// Verifies file names use the UTC calendar date.
#[test]
fn file_name_uses_utc_date() {
    let late_evening = Timestamp::from_unix_millis(1_739_660_399_000);
    let name =
        export_file_name(&ContractId::new("x"), ExportFormat::Text, late_evening).unwrap();
    assert_eq!(name, "contract-x-2025-02-15.txt");
}

/// Verifies unknown format labels are rejected.
#[test]
fn unknown_format_label_is_rejected() {
    let err = "docx".parse::<ExportFormat>().unwrap_err();
    assert!(matches!(err, ExportError::UnsupportedFormat(label) if label == "docx"));
}

proptest! {
    /// Verifies wrapped lines respect the column limit and keep every word.
    #[test]
    fn wrapped_lines_fit_and_keep_text(text in "[a-z ]{0,200}", columns in 1_usize .. 40) {
        let lines = wrap_lines(&text, columns);
        for line in &lines {
            prop_assert!(line.chars().count() <= columns);
        }
        let original: String = text.chars().filter(|ch| *ch != ' ').collect();
        let wrapped: String = lines.concat().chars().filter(|ch| *ch != ' ').collect();
        prop_assert_eq!(original, wrapped);
    }
}
