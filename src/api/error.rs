use crate::export::ExportError;
use crate::loader::LoadError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use invoicer_edit::EditError;
use invoicer_render_html::HtmlError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invoice '{0}' not found")]
    InvoiceNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("A PDF is already being generated for this invoice")]
    ExportInFlight,

    #[error("PDF generation failed: {0}")]
    GenerationFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::InvoiceNotFound(_) => (StatusCode::NOT_FOUND, "InvoiceNotFound", self.to_string()),
            Self::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string())
            }
            Self::ExportInFlight => (StatusCode::CONFLICT, "ExportInFlight", self.to_string()),
            Self::GenerationFailed(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GenerationFailed",
                    "Could not generate the PDF. Please try again.".to_string(),
                )
            }
            Self::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<LoadError> for ServiceError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::NotFound(id) => Self::InvoiceNotFound(id),
            LoadError::InvalidId(_) => Self::InvalidRequest(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<EditError> for ServiceError {
    fn from(e: EditError) -> Self {
        Self::InvalidRequest(e.to_string())
    }
}

impl From<HtmlError> for ServiceError {
    fn from(e: HtmlError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<ExportError> for ServiceError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::InFlight => Self::ExportInFlight,
            ExportError::Pipeline(e) => Self::GenerationFailed(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
