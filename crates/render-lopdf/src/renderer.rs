use crate::composer::Composer;
use crate::error::RenderError;
use crate::metrics::{FontFace, to_win_ansi};
use invoicer_layout::{DocumentLayout, InvoiceView};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};
use std::sync::Arc;

/// Renders invoices to PDF bytes.
///
/// Output depends only on the layout and the view: no timestamps or random
/// ids are written, so the same snapshot always produces the same bytes.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    layout: Arc<DocumentLayout>,
}

impl PdfRenderer {
    pub fn new(layout: Arc<DocumentLayout>) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn render(&self, view: &InvoiceView) -> Result<Vec<u8>, RenderError> {
        let pages = Composer::new(&self.layout, view).compose();
        let (width, height) = self.layout.page.size.dimensions_pt();

        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for face in [FontFace::Regular, FontFace::Bold] {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = document.add_object(dictionary! { "Font" => fonts });

        let mut page_ids = Vec::with_capacity(pages.len());
        for content in pages {
            let content_id = document.add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i64,
        };
        document.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        let info_id = document.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(&view.title_display), StringFormat::Literal),
            "Producer" => Object::string_literal("invoicer"),
        });
        document.trailer.set("Root", catalog_id);
        document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        log::debug!(
            "Rendered invoice '{}' to {} bytes across {} page(s)",
            view.id,
            bytes.len(),
            page_ids.len()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicer_types::{Invoice, LineItem, Party};

    fn invoice(items: usize) -> Invoice {
        let mut invoice = Invoice::new("demo");
        invoice.title = "Invoice".into();
        invoice.number = "INV0001".into();
        invoice.from = Party::named("IndyDevLab");
        invoice.bill_to = Party::named("Client Name");
        invoice.items = (0..items)
            .map(|i| LineItem::new(format!("i{i}"), format!("Line {i}"), 10.0, 1.0))
            .collect();
        invoice
    }

    fn render(invoice: &Invoice) -> Vec<u8> {
        let layout = Arc::new(DocumentLayout::default());
        let view = InvoiceView::build(invoice, &layout);
        PdfRenderer::new(layout).render(&view).unwrap()
    }

    #[test]
    fn produces_a_loadable_single_page() {
        let bytes = render(&invoice(2));
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn long_item_lists_paginate() {
        let doc = Document::load_mem(&render(&invoice(120))).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn identical_snapshots_give_identical_bytes() {
        let invoice = invoice(5);
        assert_eq!(render(&invoice), render(&invoice));
    }
}
