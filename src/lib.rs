//! Invoice editor: loads invoice snapshots, applies form edits, renders the
//! interactive HTML view and exports the matching PDF.
//!
//! The computation and rendering live in the workspace crates; this crate
//! wires them into an export pipeline, editor sessions and an HTTP service.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod session;
pub mod state;

pub use config::Config;
pub use error::PipelineError;
pub use export::{
    ArtifactRenderer, ExportArtifact, ExportControl, ExportError, ExportOutcome, ExportStatus, Exporter,
    PdfArtifactRenderer,
};
pub use loader::{DemoLoader, InvoiceLoader, JsonFileLoader, LoadError};
pub use session::EditorSession;
pub use state::AppState;

pub use invoicer_edit as edit;
pub use invoicer_layout as layout;
pub use invoicer_render_html as html;
pub use invoicer_render_lopdf as pdf;
pub use invoicer_totals as totals;
pub use invoicer_types as types;
