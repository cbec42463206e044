use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of an invoice: the issuer or the customer.
///
/// Parties have no identity of their own; two parties are the same party
/// when all four fields match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// The closed set of editable party fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartyField {
    Name,
    Email,
    Address,
    Phone,
}

impl PartyField {
    /// All fields, in display order.
    pub const ALL: [PartyField; 4] = [
        PartyField::Name,
        PartyField::Email,
        PartyField::Address,
        PartyField::Phone,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PartyField::Name => "name",
            PartyField::Email => "email",
            PartyField::Address => "address",
            PartyField::Phone => "phone",
        }
    }

    /// Human-readable label, also used as the input placeholder.
    pub fn label(self) -> &'static str {
        match self {
            PartyField::Name => "Name",
            PartyField::Email => "Email",
            PartyField::Address => "Address",
            PartyField::Phone => "Phone",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        PartyField::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for PartyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Party {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Current value of a field; absent optional fields read as `""`.
    pub fn get(&self, field: PartyField) -> &str {
        match field {
            PartyField::Name => &self.name,
            PartyField::Email => self.email.as_deref().unwrap_or(""),
            PartyField::Address => self.address.as_deref().unwrap_or(""),
            PartyField::Phone => self.phone.as_deref().unwrap_or(""),
        }
    }

    /// Returns a copy of this party with one field replaced.
    pub fn with(&self, field: PartyField, value: impl Into<String>) -> Party {
        let value = value.into();
        let mut next = self.clone();
        match field {
            PartyField::Name => next.name = value,
            PartyField::Email => next.email = Some(value),
            PartyField::Address => next.address = Some(value),
            PartyField::Phone => next.phone = Some(value),
        }
        next
    }

    /// The non-empty contact lines below the name, in display order.
    pub fn contact_lines(&self) -> impl Iterator<Item = &str> {
        [&self.email, &self.address, &self.phone]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
    }
}

/// A partial update to a [`Party`]. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PartyPatch {
    /// A patch touching exactly one field.
    pub fn field(field: PartyField, value: impl Into<String>) -> Self {
        let mut patch = PartyPatch::default();
        *patch.slot(field) = Some(value.into());
        patch
    }

    fn slot(&mut self, field: PartyField) -> &mut Option<String> {
        match field {
            PartyField::Name => &mut self.name,
            PartyField::Email => &mut self.email,
            PartyField::Address => &mut self.address,
            PartyField::Phone => &mut self.phone,
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &PartyPatch::default()
    }

    /// Shallow-merges this patch over `party`.
    pub fn apply_to(&self, party: &Party) -> Party {
        let mut next = party.clone();
        for field in PartyField::ALL {
            let value = match field {
                PartyField::Name => &self.name,
                PartyField::Email => &self.email,
                PartyField::Address => &self.address,
                PartyField::Phone => &self.phone,
            };
            if let Some(value) = value {
                next = next.with(field, value.clone());
            }
        }
        next
    }
}
