//! `/journal` handlers. All routes require a session; changes are owner only.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use devlog::journal::{EntryId, EntryUpdate, JournalEntry, NewEntry};
use serde_json::{Value, json};

use crate::{error::ApiError, guard::AuthUser, state::AppState};

/// POST /journal/create
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<JournalEntry>), ApiError> {
    let Json(input) = payload?;
    let entry = state.devlog.create_entry(&user, input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /journal/all
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    Ok(Json(state.devlog.entries_for(&user).await?))
}

/// GET /journal/{journalid}
pub async fn get_entry(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(journalid): Path<String>,
) -> Result<Json<JournalEntry>, ApiError> {
    let id = EntryId::from(journalid);
    Ok(Json(state.devlog.entry_for(&id, &user.email).await?))
}

/// PUT /journal/{journalid}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(journalid): Path<String>,
    payload: Result<Json<EntryUpdate>, JsonRejection>,
) -> Result<Json<JournalEntry>, ApiError> {
    let Json(update) = payload?;
    let id = EntryId::from(journalid);
    Ok(Json(
        state.devlog.update_entry(&id, &user.email, update).await?,
    ))
}

/// DELETE /journal/{journalid}
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(journalid): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = EntryId::from(journalid);
    state.devlog.delete_entry(&id, &user.email).await?;
    Ok(Json(json!({ "message": "Journal entry deleted successfully" })))
}
