use crate::ids::LineItemId;
use thiserror::Error;

/// Structural problems with an invoice value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("line item id '{0}' appears more than once")]
    DuplicateLineItemId(LineItemId),

    #[error("unknown invoice status '{0}'")]
    UnknownStatus(String),
}
