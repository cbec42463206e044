use crate::document::{ColumnKind, DocumentLayout};
use invoicer_totals::{Totals, format_currency, format_percent, format_quantity, line_amount};
use invoicer_types::{Invoice, InvoiceStatus, LineItem, Party, PartySide};
use serde::Serialize;

/// An amount and the exact string both views print for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Money {
    pub value: f64,
    pub display: String,
}

impl Money {
    pub fn new(value: f64, currency: &str) -> Self {
        Self { value, display: format_currency(value, currency) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyView {
    pub side: PartySide,
    pub label: &'static str,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    /// Non-blank email, address and phone, in that order.
    pub contact_lines: Vec<String>,
}

impl PartyView {
    fn build(side: PartySide, party: &Party) -> Self {
        Self {
            side,
            label: side.label(),
            name: party.name.clone(),
            email: party.email.clone().unwrap_or_default(),
            address: party.address.clone().unwrap_or_default(),
            phone: party.phone.clone().unwrap_or_default(),
            contact_lines: party.contact_lines().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRow {
    pub id: String,
    /// Raw description, for the edit control.
    pub description: String,
    /// Description with the empty placeholder applied.
    pub description_display: String,
    pub rate: Money,
    /// Raw rate, for the edit control.
    pub rate_input: String,
    pub qty: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    pub subtotal: Money,
    pub tax_label: String,
    pub tax: Money,
    pub total: Money,
}

/// Everything a renderer needs to draw one snapshot.
///
/// Built once per render from the snapshot alone. Every amount comes out of
/// `invoicer-totals`, and neither renderer formats numbers on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub id: String,
    pub title: String,
    pub title_display: String,
    pub brand_name: Option<String>,
    pub logo_url: String,
    pub number: String,
    pub date: String,
    pub status: InvoiceStatus,
    pub currency: String,
    pub tax_percent: String,
    pub from: PartyView,
    pub bill_to: PartyView,
    pub rows: Vec<LineRow>,
    pub totals: TotalsView,
    pub notes: String,
    pub notes_display: String,
}

impl InvoiceView {
    pub fn build(invoice: &Invoice, layout: &DocumentLayout) -> Self {
        let currency = invoice.currency_code().to_ascii_uppercase();
        let totals = Totals::of(invoice);
        let placeholders = &layout.placeholders;
        let notes = invoice.notes.clone().unwrap_or_default();
        let percent = invoice.tax_percent.unwrap_or(0.0);

        Self {
            id: invoice.id.to_string(),
            title: invoice.title.clone(),
            title_display: non_blank_or(&invoice.title, &placeholders.title),
            brand_name: invoice.brand_name().map(str::to_string),
            logo_url: invoice.logo_url.clone().unwrap_or_default(),
            number: invoice.number.clone(),
            date: invoice.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            status: invoice.status,
            tax_percent: format_percent(percent),
            from: PartyView::build(PartySide::From, &invoice.from),
            bill_to: PartyView::build(PartySide::BillTo, &invoice.bill_to),
            rows: invoice
                .items
                .iter()
                .map(|item| line_row(item, &currency, &placeholders.description))
                .collect(),
            totals: TotalsView {
                subtotal: Money::new(totals.subtotal, &currency),
                tax_label: format!("Tax ({}%)", format_percent(percent)),
                tax: Money::new(totals.tax, &currency),
                total: Money::new(totals.total, &currency),
            },
            notes_display: non_blank_or(&notes, &placeholders.notes),
            notes,
            currency,
        }
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }

    pub fn filename(&self) -> String {
        format!("invoice-{}.pdf", self.id)
    }
}

impl LineRow {
    /// Display text for `kind`'s column. Both renderers fill table cells
    /// through this, so a column always shows the same value.
    pub fn cell(&self, kind: ColumnKind) -> &str {
        match kind {
            ColumnKind::Description => &self.description_display,
            ColumnKind::Rate => &self.rate.display,
            ColumnKind::Qty => &self.qty,
            ColumnKind::Amount => &self.amount.display,
        }
    }
}

fn line_row(item: &LineItem, currency: &str, placeholder: &str) -> LineRow {
    LineRow {
        id: item.id.to_string(),
        description: item.description.clone(),
        description_display: non_blank_or(&item.description, placeholder),
        rate: Money::new(item.rate, currency),
        rate_input: format_quantity(item.rate),
        qty: format_quantity(item.qty),
        amount: Money::new(line_amount(item), currency),
    }
}

fn non_blank_or(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() { placeholder.to_string() } else { value.to_string() }
}
