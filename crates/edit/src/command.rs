use crate::error::EditError;
use crate::field::{FieldUpdate, LineItemField};
use crate::ops;
use invoicer_types::{Invoice, LineItemId, PartyField, PartyPatch, PartySide};
use serde::{Deserialize, Serialize};

/// One user edit, as sent by the interactive view.
///
/// Serialized with an `op` tag, e.g.
/// `{"op":"patchLineItem","id":"i1","field":"rate","value":"125"}`.
/// `value` always carries the raw control text; coercion happens on apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Edit {
    SetField {
        field: String,
        #[serde(default)]
        value: String,
    },
    PatchParty {
        side: PartySide,
        field: PartyField,
        #[serde(default)]
        value: String,
    },
    PatchLineItem {
        id: LineItemId,
        field: LineItemField,
        #[serde(default)]
        value: String,
    },
    AddLineItem,
    RemoveLineItem {
        id: LineItemId,
    },
}

impl Edit {
    pub fn set_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Edit::SetField { field: field.into(), value: value.into() }
    }

    pub fn patch_party(side: PartySide, field: PartyField, value: impl Into<String>) -> Self {
        Edit::PatchParty { side, field, value: value.into() }
    }

    pub fn patch_line_item(id: LineItemId, field: LineItemField, value: impl Into<String>) -> Self {
        Edit::PatchLineItem { id, field, value: value.into() }
    }

    /// Produces the snapshot that follows `invoice` under this edit.
    pub fn apply(&self, invoice: &Invoice) -> Result<Invoice, EditError> {
        Ok(match self {
            Edit::SetField { field, value } => {
                ops::update_field(invoice, FieldUpdate::parse(field, value)?)
            }
            Edit::PatchParty { side, field, value } => {
                ops::update_party(invoice, *side, &PartyPatch::field(*field, value.as_str()))
            }
            Edit::PatchLineItem { id, field, value } => {
                ops::update_line_item(invoice, id, &field.patch(value))
            }
            Edit::AddLineItem => ops::add_line_item(invoice),
            Edit::RemoveLineItem { id } => ops::remove_line_item(invoice, id),
        })
    }
}
