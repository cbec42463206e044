use crate::error::ModelError;
use crate::ids::{InvoiceId, LineItemId};
use crate::number::{deserialize_lenient, deserialize_lenient_option};
use crate::party::Party;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Currency used when an invoice does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

/// Display branding shown under the invoice title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A single billed line. The amount is never stored; see `invoicer-totals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub rate: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub qty: f64,
}

impl LineItem {
    pub fn new(id: impl Into<LineItemId>, description: impl Into<String>, rate: f64, qty: f64) -> Self {
        Self { id: id.into(), description: description.into(), rate, qty }
    }

    /// A freshly added, still empty line: one unit at rate zero.
    pub fn blank(id: LineItemId) -> Self {
        Self { id, description: String::new(), rate: 0.0, qty: 1.0 }
    }
}

/// A partial update to a [`LineItem`]. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_lenient_option")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_lenient_option")]
    pub qty: Option<f64>,
}

impl LineItemPatch {
    pub fn description(value: impl Into<String>) -> Self {
        Self { description: Some(value.into()), ..Default::default() }
    }

    pub fn rate(value: f64) -> Self {
        Self { rate: Some(value), ..Default::default() }
    }

    pub fn qty(value: f64) -> Self {
        Self { qty: Some(value), ..Default::default() }
    }

    /// Shallow-merges this patch over `item`, keeping its id.
    pub fn apply_to(&self, item: &LineItem) -> LineItem {
        LineItem {
            id: item.id.clone(),
            description: self.description.clone().unwrap_or_else(|| item.description.clone()),
            rate: self.rate.unwrap_or(item.rate),
            qty: self.qty.unwrap_or(item.qty),
        }
    }
}

/// Which party of an invoice an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartySide {
    From,
    BillTo,
}

impl PartySide {
    pub fn label(self) -> &'static str {
        match self {
            PartySide::From => "From",
            PartySide::BillTo => "Bill To",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PartySide::From => "from",
            PartySide::BillTo => "billTo",
        }
    }
}

/// The invoice aggregate. Every value of this type is one snapshot: edits
/// produce new values instead of changing existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub number: String,
    #[serde(default, deserialize_with = "deserialize_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub from: Party,
    #[serde(default)]
    pub bill_to: Party,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_option", skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
}

impl Invoice {
    /// An otherwise empty draft invoice.
    pub fn new(id: impl Into<InvoiceId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            number: String::new(),
            date: None,
            status: InvoiceStatus::Draft,
            from: Party::default(),
            bill_to: Party::default(),
            items: Vec::new(),
            notes: None,
            tax_percent: None,
            currency: None,
            logo_url: None,
            brand: None,
        }
    }

    /// The ISO currency code to format amounts with.
    pub fn currency_code(&self) -> &str {
        match self.currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code,
            _ => DEFAULT_CURRENCY,
        }
    }

    pub fn party(&self, side: PartySide) -> &Party {
        match side {
            PartySide::From => &self.from,
            PartySide::BillTo => &self.bill_to,
        }
    }

    pub fn brand_name(&self) -> Option<&str> {
        self.brand
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .filter(|name| !name.trim().is_empty())
    }

    pub fn item(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains_item(&self, id: &LineItemId) -> bool {
        self.item(id).is_some()
    }

    /// Checks the structural invariants a loader must uphold.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(&item.id) {
                return Err(ModelError::DuplicateLineItemId(item.id.clone()));
            }
        }
        Ok(())
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Parses a `yyyy-mm-dd` date; blank or malformed input is absent.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Invoice {
        let mut invoice = Invoice::new("demo");
        invoice.items = vec![
            LineItem::new("i1", "Design work", 120.0, 10.0),
            LineItem::new("i2", "Development", 140.0, 20.0),
        ];
        invoice
    }

    #[test]
    fn deserializes_the_camel_case_shape() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": "demo",
            "title": "Invoice",
            "from": { "name": "IndyDevLab", "email": "hello@indylab.dev" },
            "billTo": { "name": "Client Name", "email": "" },
            "number": "INV0001",
            "date": "2024-03-01",
            "status": "Sent",
            "items": [{ "id": "i1", "description": "Design work", "rate": 120, "qty": 10 }],
            "notes": "",
            "taxPercent": 8.25,
            "currency": "USD",
            "brand": { "name": "Invoice Simple Clone" }
        }))
        .unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Sent);
        assert_eq!(invoice.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(invoice.bill_to.name, "Client Name");
        assert_eq!(invoice.items[0].rate, 120.0);
        assert_eq!(invoice.tax_percent, Some(8.25));
        assert_eq!(invoice.brand_name(), Some("Invoice Simple Clone"));
    }

    #[test]
    fn non_numeric_rates_become_zero() {
        let item: LineItem =
            serde_json::from_value(json!({ "id": "x", "rate": "abc", "qty": null })).unwrap();
        assert_eq!(item.rate, 0.0);
        assert_eq!(item.qty, 0.0);

        let item: LineItem = serde_json::from_value(json!({ "id": "x", "rate": "12.5" })).unwrap();
        assert_eq!(item.rate, 12.5);
    }

    #[test]
    fn structured_values_in_numeric_fields_become_zero() {
        let item: LineItem =
            serde_json::from_str(r#"{"id":"x","rate":[1],"qty":{"a":[1,{"b":2}]}}"#).unwrap();
        assert_eq!(item.rate, 0.0);
        assert_eq!(item.qty, 0.0);

        let invoice: Invoice =
            serde_json::from_str(r#"{"id":"demo","taxPercent":{"value":8},"items":[]}"#).unwrap();
        assert_eq!(invoice.tax_percent, None);
    }

    #[test]
    fn blank_date_is_absent() {
        let invoice: Invoice = serde_json::from_value(json!({ "id": "demo", "date": "" })).unwrap();
        assert_eq!(invoice.date, None);
    }

    #[test]
    fn currency_defaults_to_usd() {
        let mut invoice = Invoice::new("demo");
        assert_eq!(invoice.currency_code(), "USD");
        invoice.currency = Some("  ".into());
        assert_eq!(invoice.currency_code(), "USD");
        invoice.currency = Some("EUR".into());
        assert_eq!(invoice.currency_code(), "EUR");
    }

    #[test]
    fn validate_rejects_duplicate_item_ids() {
        let mut invoice = sample();
        assert!(invoice.validate().is_ok());
        invoice.items.push(LineItem::new("i1", "Again", 1.0, 1.0));
        assert!(matches!(
            invoice.validate(),
            Err(ModelError::DuplicateLineItemId(id)) if id.as_str() == "i1"
        ));
    }

    #[test]
    fn line_item_patch_keeps_the_id() {
        let item = LineItem::new("i1", "Design", 120.0, 10.0);
        let next = LineItemPatch { rate: Some(99.0), ..Default::default() }.apply_to(&item);
        assert_eq!(next.id, item.id);
        assert_eq!(next.rate, 99.0);
        assert_eq!(next.qty, 10.0);
        assert_eq!(next.description, "Design");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert!("archived".parse::<InvoiceStatus>().is_err());
    }
}
