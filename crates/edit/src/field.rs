use crate::error::EditError;
use invoicer_types::{
    InvoiceStatus, LineItemPatch, NaiveDate, coerce_number, parse_date,
};
use serde::{Deserialize, Serialize};

/// A replacement for one top-level scalar field of an invoice.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Title(String),
    Number(String),
    Date(Option<NaiveDate>),
    Status(InvoiceStatus),
    Notes(Option<String>),
    TaxPercent(Option<f64>),
    Currency(Option<String>),
    LogoUrl(Option<String>),
    BrandName(Option<String>),
}

fn non_blank(raw: &str) -> Option<String> {
    if raw.trim().is_empty() { None } else { Some(raw.to_string()) }
}

impl FieldUpdate {
    /// Form keys accepted by [`FieldUpdate::parse`].
    pub const KEYS: [&'static str; 9] = [
        "title", "number", "date", "status", "notes", "taxPercent", "currency", "logoUrl",
        "brandName",
    ];

    /// Builds an update from a form key and its raw text.
    ///
    /// Text is taken verbatim. `taxPercent` goes through numeric coercion and
    /// a blank or malformed `date` clears the date. Only an unknown key or an
    /// unknown status is an error.
    pub fn parse(key: &str, raw: &str) -> Result<Self, EditError> {
        Ok(match key {
            "title" => FieldUpdate::Title(raw.to_string()),
            "number" => FieldUpdate::Number(raw.to_string()),
            "date" => FieldUpdate::Date(parse_date(raw)),
            "status" => FieldUpdate::Status(raw.parse()?),
            "notes" => FieldUpdate::Notes(non_blank(raw)),
            "taxPercent" => FieldUpdate::TaxPercent(Some(coerce_number(raw))),
            "currency" => FieldUpdate::Currency(non_blank(raw).map(|c| c.trim().to_ascii_uppercase())),
            "logoUrl" => FieldUpdate::LogoUrl(non_blank(raw)),
            "brandName" => FieldUpdate::BrandName(non_blank(raw)),
            other => return Err(EditError::UnknownField(other.to_string())),
        })
    }
}

/// The editable fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineItemField {
    Description,
    Rate,
    Qty,
}

impl LineItemField {
    /// A single-field patch from raw form text. Numbers are coerced.
    pub fn patch(self, raw: &str) -> LineItemPatch {
        match self {
            LineItemField::Description => LineItemPatch::description(raw),
            LineItemField::Rate => LineItemPatch::rate(coerce_number(raw)),
            LineItemField::Qty => LineItemPatch::qty(coerce_number(raw)),
        }
    }
}
