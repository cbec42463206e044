//! The invoice data model shared by every other invoicer crate.

pub mod error;
pub mod ids;
pub mod invoice;
pub mod mode;
pub mod number;
pub mod party;

pub use chrono::NaiveDate;
pub use error::ModelError;
pub use ids::{InvoiceId, LineItemId};
pub use invoice::{
    Brand, DEFAULT_CURRENCY, Invoice, InvoiceStatus, LineItem, LineItemPatch, PartySide,
    parse_date,
};
pub use mode::ViewMode;
pub use number::{coerce_number, coerce_optional_number, finite_or_zero};
pub use party::{Party, PartyField, PartyPatch};
