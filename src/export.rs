//! PDF export: rendering on the blocking pool plus the single-flight control
//! that guards the "Download PDF" action.

use crate::error::PipelineError;
use invoicer_layout::{DocumentLayout, InvoiceView};
use invoicer_render_lopdf::PdfRenderer;
use invoicer_types::Invoice;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, Semaphore};
use tokio::task;

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Turns a frozen snapshot into a downloadable artifact.
///
/// Called on the blocking pool, so implementations may do CPU-heavy work.
pub trait ArtifactRenderer: Send + Sync + Debug {
    fn render(&self, invoice: &Invoice) -> Result<ExportArtifact, PipelineError>;
}

/// The production renderer: the fixed-document PDF view.
#[derive(Debug, Clone)]
pub struct PdfArtifactRenderer {
    renderer: PdfRenderer,
}

impl PdfArtifactRenderer {
    pub fn new(layout: Arc<DocumentLayout>) -> Self {
        Self { renderer: PdfRenderer::new(layout) }
    }
}

impl ArtifactRenderer for PdfArtifactRenderer {
    fn render(&self, invoice: &Invoice) -> Result<ExportArtifact, PipelineError> {
        let view = InvoiceView::build(invoice, self.renderer.layout());
        let bytes = self.renderer.render(&view)?;
        Ok(ExportArtifact { filename: view.filename(), bytes })
    }
}

/// Renders frozen snapshots off the async runtime.
#[derive(Debug, Clone)]
pub struct Exporter {
    renderer: Arc<dyn ArtifactRenderer>,
}

impl Exporter {
    /// An exporter producing PDFs laid out by `layout`.
    pub fn new(layout: Arc<DocumentLayout>) -> Self {
        Self::with_renderer(Arc::new(PdfArtifactRenderer::new(layout)))
    }

    pub fn with_renderer(renderer: Arc<dyn ArtifactRenderer>) -> Self {
        Self { renderer }
    }

    /// Renders on the calling thread.
    pub fn render(&self, invoice: &Invoice) -> Result<ExportArtifact, PipelineError> {
        self.renderer.render(invoice)
    }

    /// Renders `snapshot` on tokio's blocking pool. Edits made after the
    /// snapshot was taken are not visible here.
    pub async fn export(&self, snapshot: Arc<Invoice>) -> Result<ExportArtifact, PipelineError> {
        let renderer = Arc::clone(&self.renderer);
        task::spawn_blocking(move || renderer.render(&snapshot)).await?
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("An export is already being generated")]
    InFlight,

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// How the most recent export settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ExportOutcome {
    Done { filename: String, size: usize },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatus {
    pub generating: bool,
    pub last_outcome: Option<ExportOutcome>,
}

/// Allows one export at a time.
///
/// While a generation runs, further requests fail fast with
/// [`ExportError::InFlight`] instead of queueing. The permit is released when
/// the generation settles, whatever the result.
#[derive(Debug)]
pub struct ExportControl {
    exporter: Exporter,
    gate: Arc<Semaphore>,
    last_outcome: Arc<Mutex<Option<ExportOutcome>>>,
}

impl ExportControl {
    pub fn new(exporter: Exporter) -> Self {
        Self {
            exporter,
            gate: Arc::new(Semaphore::new(1)),
            last_outcome: Arc::new(Mutex::new(None)),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.gate.available_permits() == 0
    }

    pub async fn status(&self) -> ExportStatus {
        ExportStatus {
            generating: self.is_generating(),
            last_outcome: self.last_outcome.lock().await.clone(),
        }
    }

    pub async fn last_outcome(&self) -> Option<ExportOutcome> {
        self.last_outcome.lock().await.clone()
    }

    /// Starts a generation of `snapshot` and waits for its artifact.
    ///
    /// The generation runs on its own task, which holds the permit and
    /// records the outcome. Dropping the returned future does not reopen the
    /// control before that task settles.
    pub async fn request(&self, snapshot: Arc<Invoice>) -> Result<ExportArtifact, ExportError> {
        let permit = Arc::clone(&self.gate).try_acquire_owned().map_err(|_| {
            log::warn!("Export of invoice '{}' rejected: already generating", snapshot.id);
            ExportError::InFlight
        })?;

        let exporter = self.exporter.clone();
        let last_outcome = Arc::clone(&self.last_outcome);
        let generation = tokio::spawn(async move {
            let id = snapshot.id.clone();
            log::info!("Generating PDF for invoice '{}'", id);
            let result = exporter.export(snapshot).await;

            let outcome = match &result {
                Ok(artifact) => {
                    log::info!("Generated {} ({} bytes)", artifact.filename, artifact.bytes.len());
                    ExportOutcome::Done {
                        filename: artifact.filename.clone(),
                        size: artifact.bytes.len(),
                    }
                }
                Err(e) => {
                    log::error!("PDF generation for invoice '{}' failed: {}", id, e);
                    ExportOutcome::Failed { message: e.to_string() }
                }
            };
            *last_outcome.lock().await = Some(outcome);
            drop(permit);
            result
        });

        Ok(generation.await.map_err(PipelineError::from)??)
    }
}
