use crate::api::error::Result;
use crate::export::ExportStatus;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use invoicer_types::InvoiceId;

/// Generates the PDF of the current snapshot.
/// Answers 409 while another export of the same invoice is running.
pub async fn export_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = InvoiceId::from(id);
    let session = state.session(&id).await?;

    // Freeze the snapshot and release the session so edits can continue
    let (snapshot, control) = {
        let session = session.lock().await;
        (session.snapshot(), session.export_control())
    };

    let artifact = control.request(snapshot).await?;
    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    ))
}

/// Whether an export is running and how the last one ended.
pub async fn export_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExportStatus>> {
    let id = InvoiceId::from(id);
    let session = state.session(&id).await?;
    let control = session.lock().await.export_control();
    Ok(Json(control.status().await))
}
