//! Snapshot-in, snapshot-out edit operations.
//!
//! Every function borrows the current snapshot and returns a new one. Derived
//! values are never written back.

use crate::field::FieldUpdate;
use invoicer_types::{Invoice, LineItem, LineItemId, LineItemPatch, PartyPatch, PartySide};
use uuid::Uuid;

pub fn update_field(invoice: &Invoice, update: FieldUpdate) -> Invoice {
    let mut next = invoice.clone();
    match update {
        FieldUpdate::Title(v) => next.title = v,
        FieldUpdate::Number(v) => next.number = v,
        FieldUpdate::Date(v) => next.date = v,
        FieldUpdate::Status(v) => next.status = v,
        FieldUpdate::Notes(v) => next.notes = v,
        FieldUpdate::TaxPercent(v) => next.tax_percent = v,
        FieldUpdate::Currency(v) => next.currency = v,
        FieldUpdate::LogoUrl(v) => next.logo_url = v,
        FieldUpdate::BrandName(v) => {
            let mut brand = next.brand.take().unwrap_or_default();
            brand.name = v;
            next.brand = Some(brand);
        }
    }
    next
}

pub fn update_party(invoice: &Invoice, side: PartySide, patch: &PartyPatch) -> Invoice {
    let mut next = invoice.clone();
    match side {
        PartySide::From => next.from = patch.apply_to(&invoice.from),
        PartySide::BillTo => next.bill_to = patch.apply_to(&invoice.bill_to),
    }
    next
}

/// Patches the line with `id`. An unknown id leaves the snapshot unchanged.
pub fn update_line_item(invoice: &Invoice, id: &LineItemId, patch: &LineItemPatch) -> Invoice {
    let mut next = invoice.clone();
    next.items = invoice
        .items
        .iter()
        .map(|item| if &item.id == id { patch.apply_to(item) } else { item.clone() })
        .collect();
    next
}

/// Appends an empty line (one unit at rate zero) with a fresh id.
pub fn add_line_item(invoice: &Invoice) -> Invoice {
    let mut next = invoice.clone();
    next.items.push(LineItem::blank(fresh_item_id(invoice)));
    next
}

/// Drops the line with `id`. An unknown id leaves the snapshot unchanged.
pub fn remove_line_item(invoice: &Invoice, id: &LineItemId) -> Invoice {
    let mut next = invoice.clone();
    next.items.retain(|item| &item.id != id);
    next
}

fn fresh_item_id(invoice: &Invoice) -> LineItemId {
    loop {
        let id = LineItemId::from(Uuid::new_v4().to_string());
        if !invoice.contains_item(&id) {
            return id;
        }
    }
}
