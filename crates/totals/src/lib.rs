//! Derived values of an invoice.
//!
//! Nothing here is ever stored on the model. Every call recomputes from the
//! snapshot it is given, so two renderers asking about the same snapshot
//! always see the same numbers.

pub mod format;

pub use format::{format_currency, format_percent, format_quantity, minor_units};

use invoicer_types::{Invoice, LineItem, finite_or_zero};
use serde::Serialize;

/// `qty * rate` for one line. Non-finite inputs count as zero.
pub fn line_amount(item: &LineItem) -> f64 {
    finite_or_zero(finite_or_zero(item.qty) * finite_or_zero(item.rate))
}

/// Sum of all line amounts. An empty slice sums to zero.
pub fn subtotal(items: &[LineItem]) -> f64 {
    items.iter().map(line_amount).sum()
}

/// Tax owed on `subtotal`. An absent, zero or NaN percentage yields zero.
pub fn tax(subtotal: f64, tax_percent: Option<f64>) -> f64 {
    match tax_percent {
        Some(p) if p.is_finite() && p != 0.0 => finite_or_zero(subtotal * (p / 100.0)),
        _ => 0.0,
    }
}

pub fn total(subtotal: f64, tax: f64) -> f64 {
    subtotal + tax
}

/// The three document-level derived values of one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl Totals {
    pub fn of(invoice: &Invoice) -> Self {
        let subtotal = subtotal(&invoice.items);
        let tax = tax(subtotal, invoice.tax_percent);
        Self { subtotal, tax, total: total(subtotal, tax) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_items() -> Vec<LineItem> {
        vec![
            LineItem::new("i1", "Design work", 120.0, 10.0),
            LineItem::new("i2", "Development", 140.0, 20.0),
        ]
    }

    #[test]
    fn line_amount_multiplies() {
        assert_eq!(line_amount(&LineItem::new("a", "", 120.0, 10.0)), 1200.0);
        assert_eq!(line_amount(&LineItem::new("a", "", 2.5, 4.0)), 10.0);
    }

    #[test]
    fn non_finite_inputs_count_as_zero() {
        assert_eq!(line_amount(&LineItem::new("a", "", f64::NAN, 3.0)), 0.0);
        assert_eq!(line_amount(&LineItem::new("a", "", 3.0, f64::INFINITY)), 0.0);
    }

    #[test]
    fn subtotal_of_nothing_is_zero() {
        assert_eq!(subtotal(&[]), 0.0);
    }

    #[test]
    fn demo_invoice_without_tax() {
        let mut invoice = Invoice::new("demo");
        invoice.items = demo_items();
        invoice.tax_percent = Some(0.0);
        let totals = Totals::of(&invoice);
        assert_eq!(totals, Totals { subtotal: 4000.0, tax: 0.0, total: 4000.0 });

        invoice.tax_percent = None;
        assert_eq!(Totals::of(&invoice).total, 4000.0);
    }

    #[test]
    fn demo_invoice_with_tax() {
        let mut invoice = Invoice::new("demo");
        invoice.items = demo_items();
        invoice.tax_percent = Some(8.25);
        let totals = Totals::of(&invoice);
        assert_eq!(totals.subtotal, 4000.0);
        assert!((totals.tax - 330.0).abs() < 1e-9);
        assert!((totals.total - 4330.0).abs() < 1e-9);
    }

    #[test]
    fn nan_tax_percent_is_no_tax() {
        assert_eq!(tax(100.0, Some(f64::NAN)), 0.0);
        assert_eq!(tax(100.0, None), 0.0);
        assert_eq!(tax(100.0, Some(10.0)), 10.0);
    }

    #[test]
    fn negative_tax_is_not_clamped() {
        assert_eq!(tax(200.0, Some(-5.0)), -10.0);
    }
}
