#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;
pub mod renderers;

use invoicer::html::HtmlRenderer;
use invoicer::layout::{DocumentLayout, InvoiceView, PageSize};
use invoicer::pdf::PdfRenderer;
use invoicer::types::{Invoice, ViewMode};
use lopdf::Document as LopdfDocument;
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Strings shown on one page (1-based), in drawing order
    pub fn page_strings(&self, page: u32) -> Vec<String> {
        pdf_assertions::page_strings(&self.doc, page)
    }

    /// Strings shown anywhere in the document, in drawing order
    pub fn strings(&self) -> Vec<String> {
        (1..=self.page_count() as u32).flat_map(|page| self.page_strings(page)).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.strings().iter().any(|s| s == needle)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Render an invoice to PDF with the default A4 layout
pub fn render_pdf(invoice: &Invoice) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render_pdf_on(invoice, PageSize::A4)
}

pub fn render_pdf_on(
    invoice: &Invoice,
    size: PageSize,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    render_pdf_with(invoice, DocumentLayout::new(size))
}

pub fn render_pdf_with(
    invoice: &Invoice,
    layout: DocumentLayout,
) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let layout = Arc::new(layout);
    let view = InvoiceView::build(invoice, &layout);
    let bytes = PdfRenderer::new(layout).render(&view)?;
    GeneratedPdf::from_bytes(bytes)
}

/// Render the interactive view of an invoice
pub fn render_html(invoice: &Invoice, mode: ViewMode) -> Result<String, Box<dyn std::error::Error>> {
    render_html_with(invoice, mode, DocumentLayout::default())
}

pub fn render_html_with(
    invoice: &Invoice,
    mode: ViewMode,
    layout: DocumentLayout,
) -> Result<String, Box<dyn std::error::Error>> {
    let layout = Arc::new(layout);
    let view = InvoiceView::build(invoice, &layout);
    Ok(HtmlRenderer::new(layout)?.render(&view, mode)?)
}

/// Text of every element carrying `class="<class>"` in rendered HTML, in
/// document order.
pub fn html_texts_with_class(html: &str, class: &str) -> Vec<String> {
    let marker = format!("class=\"{}\">", class);
    html.match_indices(&marker)
        .filter_map(|(start, _)| {
            let rest = &html[start + marker.len()..];
            rest.find('<').map(|end| rest[..end].to_string())
        })
        .collect()
}
