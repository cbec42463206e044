//! Shared layout description and render model.
//!
//! [`DocumentLayout`] fixes what goes where; [`InvoiceView`] fixes what is
//! shown. The HTML and PDF renderers take both and nothing else.

pub mod color;
pub mod document;
pub mod page;
pub mod view;

pub use color::Rgb;
pub use document::{
    Align, Column, ColumnKind, ColumnWidth, DocumentLayout, Palette, Placeholders, Section,
    Spacing, Typography,
};
pub use page::{PageGeometry, PageSize, UnknownPageSize};
pub use view::{InvoiceView, LineRow, Money, PartyView, TotalsView};
