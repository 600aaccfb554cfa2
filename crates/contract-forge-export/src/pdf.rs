// crates/contract-forge-export/src/pdf.rs
// ============================================================================
// Module: PDF Renderer
// Description: Paginated fixed-pitch PDF output via lopdf.
// Purpose: Render document text as an A4 PDF with one text line per row.
// Dependencies: lopdf
// ============================================================================

//! ## Overview
//! Text is wrapped at a fixed column count and laid out in the built-in
//! Courier font, so wrapping never needs font metrics. Pages break after a
//! fixed number of rows. Characters outside `WinAnsiEncoding` are replaced
//! with `?`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use contract_forge_core::ExportError;
use lopdf::Document;
use lopdf::Object;
use lopdf::ObjectId;
use lopdf::Stream;
use lopdf::content::Content;
use lopdf::content::Operation;
use lopdf::dictionary;

use crate::wrap::wrap_lines;

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Page geometry and typography for PDF output, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfLayout {
    /// Page width.
    pub page_width: i64,
    /// Page height.
    pub page_height: i64,
    /// Left margin.
    pub margin_left: i64,
    /// Distance from the top edge to the first baseline.
    pub margin_top: i64,
    /// Font size.
    pub font_size: i64,
    /// Baseline-to-baseline distance.
    pub line_height: i64,
    /// Characters per line.
    pub columns: usize,
    /// Rows per page.
    pub lines_per_page: usize,
}

impl Default for PdfLayout {
    /// A4 with 20 mm side margins, 10 pt Courier, and 6 mm leading.
    fn default() -> Self {
        Self {
            page_width: 595,
            page_height: 842,
            margin_left: 57,
            margin_top: 85,
            font_size: 10,
            line_height: 17,
            columns: 80,
            lines_per_page: 40,
        }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `content` as PDF bytes.
///
/// Empty content still yields a single blank page.
///
/// # Errors
///
/// Returns [`ExportError::Render`] when content streams cannot be encoded or
/// the document cannot be serialized.
pub fn render_pdf(content: &str, layout: &PdfLayout) -> Result<Vec<u8>, ExportError> {
    let lines = wrap_lines(content, layout.columns);
    let rows_per_page = layout.lines_per_page.max(1);
    let mut pages: Vec<&[String]> = lines.chunks(rows_per_page).collect();
    if pages.is_empty() {
        pages.push(&[]);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for rows in pages {
        let page_id = add_page(&mut doc, pages_id, rows, layout)?;
        kids.push(page_id.into());
    }
    let page_count = i64::try_from(kids.len())
        .map_err(|_| ExportError::Render("page count exceeds pdf limits".to_string()))?;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box(layout),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|err| ExportError::Render(err.to_string()))?;
    Ok(bytes)
}

/// Adds one page holding `rows` and returns its object id.
fn add_page(
    doc: &mut Document,
    parent: ObjectId,
    rows: &[String],
    layout: &PdfLayout,
) -> Result<ObjectId, ExportError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), layout.font_size.into()]),
        Operation::new("TL", vec![layout.line_height.into()]),
        Operation::new(
            "Td",
            vec![layout.margin_left.into(), (layout.page_height - layout.margin_top).into()],
        ),
    ];
    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        if !row.is_empty() {
            let text = Object::string_literal(encode_win_ansi(row));
            operations.push(Operation::new("Tj", vec![text]));
        }
    }
    operations.push(Operation::new("ET", vec![]));
    let content = Content {
        operations,
    };
    let encoded = content.encode().map_err(|err| ExportError::Render(err.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Contents" => content_id,
    }))
}

/// Returns the page media box.
fn media_box(layout: &PdfLayout) -> Vec<Object> {
    vec![0_i64.into(), 0_i64.into(), layout.page_width.into(), layout.page_height.into()]
}

/// Maps text to single-byte `WinAnsiEncoding`, replacing unmappable chars.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            code @ (0x20 ..= 0x7e | 0xa0 ..= 0xff) => u8::try_from(code).unwrap_or(b'?'),
            0x2018 | 0x2019 => b'\'',
            0x201c | 0x201d => b'"',
            0x2013 | 0x2014 => b'-',
            0x09 => b' ',
            _ => b'?',
        })
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use super::*;

    #[test]
    fn win_ansi_keeps_latin1_and_folds_quotes() {
        assert_eq!(encode_win_ansi("caf\u{e9}"), b"caf\xe9".to_vec());
        assert_eq!(encode_win_ansi("\u{201c}x\u{201d}"), b"\"x\"".to_vec());
        assert_eq!(encode_win_ansi("\u{4e2d}"), b"?".to_vec());
    }

    #[test]
    fn paginates_by_row_count() {
        let layout = PdfLayout {
            lines_per_page: 2,
            ..PdfLayout::default()
        };
        let bytes = render_pdf("a\nb\nc\nd\ne", &layout).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }
}
