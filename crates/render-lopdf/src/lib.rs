//! Paginated PDF rendering of invoices using lopdf.
//!
//! Text is set in the standard Helvetica faces with WinAnsi encoding, so no
//! font data is embedded.

mod canvas;
mod composer;
mod error;
mod metrics;
mod renderer;
mod wrap;

pub use error::RenderError;
pub use metrics::{FontFace, to_win_ansi};
pub use renderer::PdfRenderer;
pub use wrap::wrap_text;
