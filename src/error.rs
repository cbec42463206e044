// src/error.rs
use invoicer_render_html::HtmlError;
use invoicer_render_lopdf::RenderError;
use thiserror::Error;

/// Errors raised while turning an invoice snapshot into rendered output.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("HTML templates failed to load: {0}")]
    Html(#[from] HtmlError),

    #[error("Render worker failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(e: tokio::task::JoinError) -> Self {
        if e.is_panic() {
            PipelineError::Worker("render worker panicked".to_string())
        } else {
            PipelineError::Worker(e.to_string())
        }
    }
}
