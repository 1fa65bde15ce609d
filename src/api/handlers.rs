//! Request handlers for studio sessions

use axum::{
    extract::{multipart::Multipart, rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::intake::{CandidateFile, DragEvent, DragOutcome, ImageSlot, OCTET_STREAM};
use crate::studio::{StudioView, StyleOptions, StyleUpdate};
use crate::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn options() -> Json<StyleOptions> {
    Json(StyleOptions::all())
}

pub async fn create_studio(State(state): State<Arc<AppState>>) -> (StatusCode, Json<StudioView>) {
    let session = state.studios.create();
    (StatusCode::CREATED, Json(session.view().await))
}

pub async fn get_studio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudioView>> {
    let session = state.studios.get(id)?;
    Ok(Json(session.view().await))
}

pub async fn delete_studio(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.studios.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_style(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<StyleUpdate>, JsonRejection>,
) -> Result<Json<StudioView>> {
    let session = state.studios.get(id)?;
    let Json(update) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    session.update_style(update);
    Ok(Json(session.view().await))
}

pub async fn select_image(
    State(state): State<Arc<AppState>>,
    Path((id, slot)): Path<(Uuid, ImageSlot)>,
    multipart: Multipart,
) -> Result<Json<StudioView>> {
    let session = state.studios.get(id)?;
    let file = read_files(multipart, true).await?.into_iter().next();
    let accepted = session.select_image(slot, file).await;
    debug!(session = %id, ?slot, accepted, "Image selected");
    Ok(Json(session.view().await))
}

pub async fn drop_image(
    State(state): State<Arc<AppState>>,
    Path((id, slot)): Path<(Uuid, ImageSlot)>,
    multipart: Multipart,
) -> Result<Json<StudioView>> {
    let session = state.studios.get(id)?;
    let files = read_files(multipart, false).await?;
    let count = files.len();
    let outcome = session.drag(slot, DragEvent::Drop(files)).await;
    let accepted = matches!(outcome, DragOutcome::Intake(Some(_)));
    debug!(session = %id, ?slot, count, accepted, "Files dropped");
    Ok(Json(session.view().await))
}

pub async fn clear_image(
    State(state): State<Arc<AppState>>,
    Path((id, slot)): Path<(Uuid, ImageSlot)>,
) -> Result<Json<StudioView>> {
    let session = state.studios.get(id)?;
    session.select_image(slot, None).await;
    Ok(Json(session.view().await))
}

pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudioView>> {
    let session = state.studios.get(id)?;
    session.generate_image().await?;
    Ok(Json(session.view().await))
}

/// Collect file fields from a multipart body.
///
/// A field that fails to read ends collection as if no further file was sent,
/// except for oversized bodies which are rejected.
async fn read_files(mut multipart: Multipart, first_only: bool) -> Result<Vec<CandidateFile>> {
    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(AppError::PayloadTooLarge(e.body_text()));
            }
            Err(e) => {
                return Err(AppError::InvalidRequest(format!(
                    "Invalid multipart body: {}",
                    e
                )))
            }
        };

        // Plain form values carry neither a file name nor a content type.
        if field.file_name().is_none() && field.content_type().is_none() {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or(OCTET_STREAM).to_string();

        match field.bytes().await {
            Ok(bytes) => files.push(CandidateFile::from_bytes(name, content_type, bytes.to_vec())),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(AppError::PayloadTooLarge(e.body_text()));
            }
            Err(e) => {
                warn!(file = %name, error = %e, "Error reading uploaded file");
                break;
            }
        }

        if first_only {
            break;
        }
    }

    Ok(files)
}
