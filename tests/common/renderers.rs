//! Artifact renderers that misbehave on purpose.

use invoicer::layout::DocumentLayout;
use invoicer::pdf::RenderError;
use invoicer::types::Invoice;
use invoicer::{ArtifactRenderer, ExportArtifact, PdfArtifactRenderer, PipelineError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};

fn pdf() -> PdfArtifactRenderer {
    PdfArtifactRenderer::new(Arc::new(DocumentLayout::default()))
}

/// Fails the first `n` renders, then produces real PDFs.
#[derive(Debug)]
pub struct FlakyRenderer {
    failures_left: AtomicUsize,
    inner: PdfArtifactRenderer,
}

impl FlakyRenderer {
    pub fn failing(n: usize) -> Self {
        Self { failures_left: AtomicUsize::new(n), inner: pdf() }
    }
}

impl ArtifactRenderer for FlakyRenderer {
    fn render(&self, invoice: &Invoice) -> Result<ExportArtifact, PipelineError> {
        let fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(RenderError::Pdf("simulated failure".to_string()).into());
        }
        self.inner.render(invoice)
    }
}

/// Blocks every render until the paired sender sends or is dropped.
#[derive(Debug)]
pub struct HeldRenderer {
    release: Mutex<mpsc::Receiver<()>>,
    inner: PdfArtifactRenderer,
}

pub fn held_renderer() -> (mpsc::Sender<()>, HeldRenderer) {
    let (tx, rx) = mpsc::channel();
    (tx, HeldRenderer { release: Mutex::new(rx), inner: pdf() })
}

impl ArtifactRenderer for HeldRenderer {
    fn render(&self, invoice: &Invoice) -> Result<ExportArtifact, PipelineError> {
        let _ = self.release.lock().unwrap().recv();
        self.inner.render(invoice)
    }
}

#[derive(Debug)]
pub struct PanickingRenderer;

impl ArtifactRenderer for PanickingRenderer {
    fn render(&self, _: &Invoice) -> Result<ExportArtifact, PipelineError> {
        panic!("renderer blew up")
    }
}
