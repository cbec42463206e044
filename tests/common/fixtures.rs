use invoicer::types::{Brand, Invoice, InvoiceStatus, LineItem, NaiveDate, Party};

/// The demo invoice: 10 x 120 + 20 x 140, no tax.
pub fn demo_invoice() -> Invoice {
    let mut invoice = Invoice::new("demo");
    invoice.title = "Invoice".into();
    invoice.number = "INV0001".into();
    invoice.date = NaiveDate::from_ymd_opt(2024, 3, 1);
    invoice.status = InvoiceStatus::Draft;
    invoice.from = Party {
        name: "IndyDevLab".into(),
        email: Some("hello@indylab.dev".into()),
        address: Some("6202 Old W Blvd, Phoenix, AZ".into()),
        phone: Some("702-555-0179".into()),
    };
    invoice.bill_to = Party::named("Client Name");
    invoice.items = vec![
        LineItem::new("i1", "Design work", 120.0, 10.0),
        LineItem::new("i2", "Development", 140.0, 20.0),
    ];
    invoice.tax_percent = Some(0.0);
    invoice.currency = Some("USD".into());
    invoice.brand = Some(Brand { name: Some("Invoice Simple Clone".into()) });
    invoice
}

pub fn taxed_invoice(percent: f64) -> Invoice {
    let mut invoice = demo_invoice();
    invoice.tax_percent = Some(percent);
    invoice
}

pub fn empty_invoice() -> Invoice {
    let mut invoice = demo_invoice();
    invoice.items.clear();
    invoice
}

/// An invoice with `count` one-line items at 10.00 each.
pub fn invoice_with_items(count: usize) -> Invoice {
    let mut invoice = demo_invoice();
    invoice.items = (0..count)
        .map(|i| LineItem::new(format!("row-{i}"), format!("Consulting block {i}"), 10.0, 1.0))
        .collect();
    invoice
}

/// A description long enough to wrap over many lines of the items table.
pub fn long_description(words: usize) -> String {
    (0..words).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}
