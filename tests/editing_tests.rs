mod common;

use common::fixtures::demo_invoice;
use common::init_logger;
use invoicer::edit::{
    Edit, EditError, LineItemField, SnapshotCell, add_line_item, remove_line_item,
    update_line_item,
};
use invoicer::totals::Totals;
use invoicer::types::{
    InvoiceStatus, LineItemId, LineItemPatch, PartyField, PartySide, ViewMode,
};
use serde_json::json;

#[test]
fn add_line_item_appends_one_fresh_blank_row() {
    let before = demo_invoice();
    let after = add_line_item(&before);

    assert_eq!(after.items.len(), before.items.len() + 1);
    assert_eq!(&after.items[..before.items.len()], &before.items[..]);
    let added = after.items.last().unwrap();
    assert!(!before.contains_item(&added.id));
    assert_eq!((added.description.as_str(), added.rate, added.qty), ("", 0.0, 1.0));
    assert!(after.validate().is_ok());

    let mut rest = after.clone();
    rest.items.pop();
    assert_eq!(rest, before);
}

#[test]
fn repeated_adds_keep_ids_unique() {
    let mut invoice = demo_invoice();
    for _ in 0..50 {
        invoice = add_line_item(&invoice);
    }
    assert_eq!(invoice.items.len(), 52);
    assert!(invoice.validate().is_ok());
}

#[test]
fn remove_line_item_shrinks_only_when_present() {
    let before = demo_invoice();

    let after = remove_line_item(&before, &LineItemId::from("i1"));
    assert_eq!(after.items.len(), 1);
    assert_eq!(after.items[0].id.as_str(), "i2");

    let unchanged = remove_line_item(&before, &LineItemId::from("nope"));
    assert_eq!(unchanged, before);
}

#[test]
fn patching_an_unknown_line_is_a_no_op() {
    let before = demo_invoice();
    let after = update_line_item(&before, &LineItemId::from("ghost"), &LineItemPatch::rate(999.0));
    assert_eq!(after, before);
}

#[test]
fn edits_never_touch_their_input() {
    let before = demo_invoice();
    let copy = before.clone();
    let _ = Edit::patch_line_item("i1".into(), LineItemField::Rate, "1").apply(&before);
    let _ = Edit::AddLineItem.apply(&before);
    let _ = Edit::set_field("title", "Changed").apply(&before);
    assert_eq!(before, copy);
}

#[test]
fn form_events_arrive_as_json() {
    init_logger();
    let mut cell = SnapshotCell::new(demo_invoice());

    let events = [
        json!({ "op": "setField", "field": "taxPercent", "value": "8.25" }),
        json!({ "op": "setField", "field": "status", "value": "Sent" }),
        json!({ "op": "patchParty", "side": "billTo", "field": "email", "value": "ap@client.test" }),
        json!({ "op": "patchLineItem", "id": "i2", "field": "qty", "value": "not a number" }),
    ];
    for event in events {
        let edit: Edit = serde_json::from_value(event).unwrap();
        cell.apply(&edit).unwrap();
    }

    let invoice = cell.current();
    assert_eq!(invoice.tax_percent, Some(8.25));
    assert_eq!(invoice.status, InvoiceStatus::Sent);
    assert_eq!(invoice.bill_to.get(PartyField::Email), "ap@client.test");
    assert_eq!(invoice.items[1].qty, 0.0);
    let totals = Totals::of(invoice);
    assert_eq!(totals.subtotal, 1200.0);
    assert!((totals.tax - 99.0).abs() < 1e-9);
    assert_eq!(cell.revision(), 4);
}

#[test]
fn unknown_field_is_rejected_without_changing_the_snapshot() {
    let mut cell = SnapshotCell::new(demo_invoice());
    let before = cell.snapshot();

    let result = cell.apply(&Edit::set_field("colour", "red"));
    assert!(matches!(result, Err(EditError::UnknownField(_))));
    assert_eq!(*cell.snapshot(), *before);
    assert_eq!(cell.revision(), 0);
}

#[test]
fn party_edits_are_scoped_to_one_side() {
    let before = demo_invoice();
    let after = Edit::patch_party(PartySide::From, PartyField::Name, "New Name").apply(&before).unwrap();
    assert_eq!(after.from.name, "New Name");
    assert_eq!(after.from.email, before.from.email);
    assert_eq!(after.bill_to, before.bill_to);
}

#[test]
fn switching_modes_never_alters_the_snapshot() {
    let invoice = demo_invoice();
    let copy = invoice.clone();
    for mode in [ViewMode::Edit, ViewMode::Preview, ViewMode::Edit] {
        common::render_html(&invoice, mode).unwrap();
    }
    assert_eq!(invoice, copy);
}
