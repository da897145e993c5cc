//! `/share` handlers: sharing settings and share-link reads.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use devlog::{
    access::EntryVisibility,
    journal::{EntryId, JournalEntry},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    guard::{AuthUser, MaybeUser},
    state::AppState,
};

#[derive(Deserialize)]
pub struct SaveShareRequest {
    #[serde(rename = "isPublic")]
    is_public: bool,
    #[serde(rename = "allowedEmails")]
    allowed_emails: Vec<String>,
    journalid: String,
}

#[derive(Serialize)]
pub struct SaveShareResponse {
    message: &'static str,
    visibility: EntryVisibility,
}

#[derive(Serialize)]
pub struct SharedEntryResponse {
    entry: JournalEntry,
}

/// POST /share/save
///
/// Owner only. Replaces both `isPublic` and `allowedEmails`.
pub async fn save(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<SaveShareRequest>, JsonRejection>,
) -> Result<Json<SaveShareResponse>, ApiError> {
    let Json(request) = payload?;
    let id = EntryId::from(request.journalid);
    if id.as_str().is_empty() {
        return Err(ApiError::bad_request("Journal ID is required"));
    }

    let visibility = state
        .devlog
        .update_visibility(&id, request.is_public, &request.allowed_emails, &user.email)
        .await?;

    Ok(Json(SaveShareResponse {
        message: "Shared entry saved successfully",
        visibility,
    }))
}

/// GET /share/{journalid}
///
/// Anonymous callers see public entries only.
pub async fn get_shared(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(journalid): Path<String>,
) -> Result<Json<SharedEntryResponse>, ApiError> {
    let id = EntryId::from(journalid);
    let requester = user.as_ref().map(|u| u.email.as_str());
    let entry = state.devlog.shared_entry(&id, requester).await?;
    Ok(Json(SharedEntryResponse { entry }))
}
