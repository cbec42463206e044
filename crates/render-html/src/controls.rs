//! The `data-edit` payloads attached to edit-mode controls.
//!
//! Each payload is a serialized [`Edit`] with an empty `value`; the page
//! script fills in the control's current text before posting it back.

use crate::error::HtmlError;
use invoicer_edit::Edit;
use invoicer_layout::{InvoiceView, PartyView};
use invoicer_types::{InvoiceStatus, PartyField};
use serde::Serialize;

pub(crate) fn encode(edit: &Edit) -> Result<String, HtmlError> {
    Ok(serde_json::to_string(edit)?)
}

fn field(key: &str) -> Result<String, HtmlError> {
    encode(&Edit::set_field(key, ""))
}

#[derive(Serialize)]
pub struct StatusOption {
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Serialize)]
pub struct PartyInput {
    pub placeholder: &'static str,
    pub value: String,
    pub edit: String,
}

#[derive(Serialize)]
pub struct PartyControls {
    pub label: &'static str,
    pub inputs: Vec<PartyInput>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub title: String,
    pub logo_url: String,
    pub brand_name: String,
    pub number: String,
    pub date: String,
    pub status: String,
    pub status_options: Vec<StatusOption>,
    pub currency: String,
    pub tax_percent: String,
    pub notes: String,
    pub parties: Vec<PartyControls>,
    pub add_line: String,
}

impl Controls {
    pub fn build(view: &InvoiceView) -> Result<Self, HtmlError> {
        Ok(Self {
            title: field("title")?,
            logo_url: field("logoUrl")?,
            brand_name: field("brandName")?,
            number: field("number")?,
            date: field("date")?,
            status: field("status")?,
            status_options: InvoiceStatus::ALL
                .into_iter()
                .map(|s| StatusOption { value: s.as_str(), selected: s == view.status })
                .collect(),
            currency: field("currency")?,
            tax_percent: field("taxPercent")?,
            notes: field("notes")?,
            parties: vec![party(&view.from)?, party(&view.bill_to)?],
            add_line: encode(&Edit::AddLineItem)?,
        })
    }
}

fn party(view: &PartyView) -> Result<PartyControls, HtmlError> {
    let inputs = PartyField::ALL
        .into_iter()
        .map(|f| {
            let value = match f {
                PartyField::Name => &view.name,
                PartyField::Email => &view.email,
                PartyField::Address => &view.address,
                PartyField::Phone => &view.phone,
            };
            Ok::<_, HtmlError>(PartyInput {
                placeholder: f.label(),
                value: value.clone(),
                edit: encode(&Edit::patch_party(view.side, f, ""))?,
            })
        })
        .collect::<Result<_, _>>()?;
    Ok(PartyControls { label: view.label, inputs })
}
