//! Newtype wrappers for invoice and line item identifiers.
//!
//! Both are opaque strings. Keeping them as distinct types stops a line item
//! id from being passed where an invoice id is expected (and vice versa).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identifier of an invoice. Immutable once assigned.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct InvoiceId(Arc<str>);

impl InvoiceId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a line item, unique within its invoice.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LineItemId(Arc<str>);

impl LineItemId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_id_conversions {
    ($ty:ident) => {
        impl From<String> for $ty {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl From<$ty> for String {
            fn from(id: $ty) -> Self {
                id.0.to_string()
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id_conversions!(InvoiceId);
string_id_conversions!(LineItemId);
