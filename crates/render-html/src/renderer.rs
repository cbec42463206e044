use crate::controls::Controls;
use crate::error::HtmlError;
use crate::table::{self, TableRow};
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use invoicer_layout::{DocumentLayout, InvoiceView, PartyView, Section};
use invoicer_types::ViewMode;
use serde::Serialize;
use std::sync::Arc;

const PAGE: &str = include_str!("../templates/page.hbs");
const PARTIALS: [(&str, &str); 2] = [
    ("styles", include_str!("../templates/styles.hbs")),
    ("toolbar", include_str!("../templates/toolbar.hbs")),
];
const SECTIONS: [(Section, &str); 6] = [
    (Section::Header, include_str!("../templates/sections/header.hbs")),
    (Section::Parties, include_str!("../templates/sections/parties.hbs")),
    (Section::Items, include_str!("../templates/sections/items.hbs")),
    (Section::Totals, include_str!("../templates/sections/totals.hbs")),
    (Section::Notes, include_str!("../templates/sections/notes.hbs")),
    (Section::Footer, include_str!("../templates/sections/footer.hbs")),
];

fn section_template(section: Section) -> &'static str {
    match section {
        Section::Header => "section/header",
        Section::Parties => "section/parties",
        Section::Items => "section/items",
        Section::Totals => "section/totals",
        Section::Notes => "section/notes",
        Section::Footer => "section/footer",
    }
}

/// Rounds layout numbers (which pass through `f32`) to two decimals and
/// drops trailing zeros, so `595.28` prints as `595.28` rather than
/// `595.280029296875`.
fn format_number(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    rounded.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn pt_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h.param(0).and_then(|v| v.value().as_f64()).unwrap_or(0.0);
    out.write(&format!("{}pt", format_number(value)))?;
    Ok(())
}

fn num_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h.param(0).and_then(|v| v.value().as_f64()).unwrap_or(0.0);
    out.write(&format_number(value))?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageContext<'a> {
    view: &'a InvoiceView,
    parties: [&'a PartyView; 2],
    rows: Vec<TableRow<'a>>,
    controls: Option<Controls>,
    layout: &'a DocumentLayout,
    page_width: f32,
    mode: ViewMode,
    is_edit: bool,
    base_path: String,
    filename: String,
    /// The rendered sections, in layout order.
    sheet: String,
}

/// Renders the interactive view of an invoice.
pub struct HtmlRenderer {
    registry: Handlebars<'static>,
    layout: Arc<DocumentLayout>,
}

impl HtmlRenderer {
    pub fn new(layout: Arc<DocumentLayout>) -> Result<Self, HtmlError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_helper("pt", Box::new(pt_helper));
        registry.register_helper("num", Box::new(num_helper));
        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }
        for (section, source) in SECTIONS {
            registry.register_template_string(section_template(section), source)?;
        }
        registry.register_template_string("page", PAGE)?;
        Ok(Self { registry, layout })
    }

    /// Full HTML page for `view`. Edit mode renders form controls; preview
    /// mode renders read-only text. Neither touches the invoice.
    ///
    /// Sections appear in the layout's order, and table cells follow its
    /// columns, exactly as in the PDF.
    pub fn render(&self, view: &InvoiceView, mode: ViewMode) -> Result<String, HtmlError> {
        let editable = mode.is_edit();
        let mut context = PageContext {
            view,
            parties: [&view.from, &view.bill_to],
            rows: table::rows(view, &self.layout, editable)?,
            controls: if editable { Some(Controls::build(view)?) } else { None },
            layout: &self.layout,
            page_width: self.layout.page.width(),
            mode,
            is_edit: editable,
            base_path: format!("/invoices/{}", view.id),
            filename: view.filename(),
            sheet: String::new(),
        };

        let mut sheet = String::new();
        for section in &self.layout.sections {
            sheet.push_str(&self.registry.render(section_template(*section), &context)?);
        }
        context.sheet = sheet;

        let html = self.registry.render("page", &context)?;
        log::trace!("Rendered {} view of invoice '{}' ({} bytes)", mode, view.id, html.len());
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_float_noise() {
        assert_eq!(format_number(595.280029296875), "595.28");
        assert_eq!(format_number(80.0), "80");
        assert_eq!(format_number(1.2999999523162842), "1.3");
    }
}
