use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{AppState, error::AppError, is_authenticated};
use crate::domain::{DiaryEntry, MonthKey, NewEntry};

/// Body of a diary write. An `auth` field may be present; it is ignored in
/// favor of the query string.
#[derive(Deserialize)]
pub struct NewEntryPayload {
    date: Option<String>,
    content: Option<String>,
}

#[derive(Serialize)]
pub struct EntryCreated {
    pub success: bool,
    pub entry: DiaryEntry,
}

pub async fn create_entry_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    payload: Result<Json<NewEntryPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    if !is_authenticated(&uri, &state.auth_token) {
        warn!("Rejected unauthenticated diary write");
        return Err(AppError::Unauthorized);
    }

    let Json(payload) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    let new_entry = NewEntry::parse(payload.date.as_deref(), payload.content.as_deref())?;

    let diary = Arc::clone(&state.diary);
    let entry =
        tokio::task::spawn_blocking(move || diary.add_entry(new_entry.date, &new_entry.content))
            .await??;

    Ok((
        StatusCode::CREATED,
        Json(EntryCreated {
            success: true,
            entry,
        }),
    ))
}

pub async fn months_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let diary = Arc::clone(&state.diary);
    let months = tokio::task::spawn_blocking(move || diary.months()).await??;

    Ok(Json(months))
}

pub async fn month_entries_handler(
    State(state): State<Arc<AppState>>,
    Path((year, month)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let key = MonthKey::from_parts(&year, &month)?;

    let diary = Arc::clone(&state.diary);
    let entries = tokio::task::spawn_blocking(move || diary.entries_in_month(key)).await??;

    Ok(Json(entries))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowbiePayload {
    image_data: Option<String>,
}

#[derive(Serialize)]
pub struct GlowbieCreated {
    pub id: String,
}

pub async fn store_glowbie_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GlowbiePayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    let image_data = payload
        .image_data
        .filter(|data| !data.is_empty())
        .ok_or_else(|| AppError::MalformedPayload("imageData is required".to_string()))?;

    let id = state.images.store(image_data);
    info!("Stored Glowbie {id}");

    Ok((StatusCode::CREATED, Json(GlowbieCreated { id })))
}

pub async fn glowbie_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.images.get(&id).map(Json).ok_or(AppError::NotFound)
}
