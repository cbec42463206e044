pub mod error;
pub mod export_handler;
pub mod health;
pub mod invoices;

pub use error::{Result, ServiceError};
pub use export_handler::{export_pdf, export_status};
pub use health::health_check;
pub use invoices::{apply_edit, get_invoice, get_invoice_view};

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/invoices/:id", get(get_invoice))
        .route("/invoices/:id/view", get(get_invoice_view))
        .route("/invoices/:id/edits", post(apply_edit))
        .route("/invoices/:id/export", post(export_pdf).get(export_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
