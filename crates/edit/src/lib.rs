//! Editing invoices without mutating them.

pub mod cell;
pub mod command;
pub mod error;
pub mod field;
pub mod ops;

pub use cell::SnapshotCell;
pub use command::Edit;
pub use error::EditError;
pub use field::{FieldUpdate, LineItemField};
pub use ops::{add_line_item, remove_line_item, update_field, update_line_item, update_party};
