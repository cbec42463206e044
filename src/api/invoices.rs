use crate::api::error::Result;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use invoicer_edit::Edit;
use invoicer_layout::InvoiceView;
use invoicer_types::{Invoice, InvoiceId, ViewMode};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ModeQuery {
    pub mode: Option<String>,
}

impl ModeQuery {
    pub fn view_mode(&self) -> ViewMode {
        ViewMode::from_query(self.mode.as_deref())
    }
}

/// The editor page. `?mode=preview` renders read-only; anything else edits.
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ModeQuery>,
) -> Result<Html<String>> {
    let id = InvoiceId::from(id);
    let session = state.session(&id).await?;
    let snapshot = session.lock().await.snapshot();
    render_page(&state, &snapshot, query.view_mode())
}

/// The render model of the current snapshot as JSON.
pub async fn get_invoice_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceView>> {
    let id = InvoiceId::from(id);
    let session = state.session(&id).await?;
    let snapshot = session.lock().await.snapshot();
    Ok(Json(InvoiceView::build(&snapshot, &state.layout)))
}

/// Applies one edit and answers with the re-rendered page.
pub async fn apply_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ModeQuery>,
    Json(edit): Json<Edit>,
) -> Result<Html<String>> {
    let id = InvoiceId::from(id);
    let session = state.session(&id).await?;
    let snapshot = {
        let mut session = session.lock().await;
        let snapshot = session.apply(&edit)?;
        tracing::debug!("Invoice '{}' at revision {}", id, session.revision());
        snapshot
    };
    render_page(&state, &snapshot, query.view_mode())
}

fn render_page(state: &AppState, invoice: &Invoice, mode: ViewMode) -> Result<Html<String>> {
    let view = InvoiceView::build(invoice, &state.layout);
    Ok(Html(state.html.render(&view, mode)?))
}
