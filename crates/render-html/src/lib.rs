//! Interactive HTML view of an invoice.
//!
//! Pages are rendered server-side from handlebars templates. In edit mode
//! every control carries the edit it produces; a small inline script posts
//! those edits back and swaps in the re-rendered sheet.

mod controls;
mod error;
mod renderer;
mod table;

pub use error::HtmlError;
pub use renderer::HtmlRenderer;

#[cfg(test)]
mod tests {
    use super::*;
    use invoicer_layout::{DocumentLayout, InvoiceView, Section};
    use invoicer_types::{Invoice, LineItem, Party, ViewMode};
    use std::sync::Arc;

    fn render(mode: ViewMode, invoice: &Invoice) -> String {
        let layout = Arc::new(DocumentLayout::default());
        let view = InvoiceView::build(invoice, &layout);
        HtmlRenderer::new(layout).unwrap().render(&view, mode).unwrap()
    }

    fn demo() -> Invoice {
        let mut invoice = Invoice::new("demo");
        invoice.title = "Invoice".into();
        invoice.from = Party::named("IndyDevLab");
        invoice.bill_to = Party::named("Client <Name>");
        invoice.items = vec![
            LineItem::new("i1", "Design work", 120.0, 10.0),
            LineItem::new("i2", "Development", 140.0, 20.0),
        ];
        invoice.tax_percent = Some(8.25);
        invoice
    }

    #[test]
    fn preview_shows_totals_without_controls() {
        let html = render(ViewMode::Preview, &demo());
        assert!(html.contains("$4,000.00"));
        assert!(html.contains("$330.00"));
        assert!(html.contains("$4,330.00"));
        assert!(html.contains("Tax (8.25%)"));
        assert!(!html.contains("<input"));
        assert!(!html.contains("+ Add Line"));
    }

    #[test]
    fn edit_mode_renders_controls_for_every_row() {
        let html = render(ViewMode::Edit, &demo());
        assert!(html.contains("+ Add Line"));
        assert_eq!(html.matches("class=\"remove\"").count(), 2);
        assert!(html.contains("&quot;op&quot;:&quot;addLineItem&quot;"));
        assert!(html.contains("&quot;op&quot;:&quot;removeLineItem&quot;"));
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render(ViewMode::Preview, &demo());
        assert!(html.contains("Client &lt;Name&gt;"));
        assert!(!html.contains("Client <Name>"));
    }

    #[test]
    fn empty_notes_show_the_placeholder_in_preview() {
        let html = render(ViewMode::Preview, &demo());
        assert!(html.contains("<p class=\"notes\">\u{2014}</p>"));
    }

    #[test]
    fn toolbar_links_both_modes() {
        let html = render(ViewMode::Preview, &demo());
        assert!(html.contains("href=\"/invoices/demo?mode=preview\""));
        assert!(html.contains("href=\"/invoices/demo?mode=edit\""));
        assert!(html.contains("data-filename=\"invoice-demo.pdf\""));
    }

    #[test]
    fn sections_follow_the_layout_order() {
        let mut layout = DocumentLayout::default();
        layout.sections = vec![Section::Totals, Section::Header];
        let layout = Arc::new(layout);
        let view = InvoiceView::build(&demo(), &layout);
        let html = HtmlRenderer::new(layout).unwrap().render(&view, ViewMode::Preview).unwrap();

        let sheet = &html[html.find("id=\"sheet\"").unwrap()..];
        let totals = sheet.find("class=\"totals\"").unwrap();
        let header = sheet.find("class=\"header\"").unwrap();
        assert!(totals < header);
        assert!(!sheet.contains("class=\"items\""));
        assert!(!sheet.contains("class=\"footer\""));
    }
}
