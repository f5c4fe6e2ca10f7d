//! Note routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::Identity;
use crate::routes::{app_error_response, check_view_access, json_error};
use crate::AppState;
use fieldops_core::access::AccessPolicy;
use fieldops_db::entities::notes;
use fieldops_db::repositories::{NewNoteInput, NoteRepository, TravelRepository};
use fieldops_shared::AppError;

/// Roles allowed to add and remove notes.
const NOTES_VIEW: AccessPolicy = AccessPolicy::new(&[
    "Managers",
    "Human Resources",
    "Travel Coordinators",
    "Finance",
]);

/// Creates the note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", post(create_note))
        .route("/notes/{id}", delete(delete_note))
        .route("/members/id/{id}/notes", get(list_member_notes))
        .route("/travel/{code}/notes", get(list_travel_notes))
}

/// Request body for inserting a note.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Owning member, if the note is on an onboarding file.
    #[serde(default)]
    pub member_id: Option<Uuid>,
    /// Owning travel record, if the note is on a booking.
    #[serde(default)]
    pub travel_record_id: Option<Uuid>,
    /// Free-text body.
    pub body: String,
}

/// Response for a note.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    /// Note ID.
    pub id: Uuid,
    /// Owning member, if any.
    pub member_id: Option<Uuid>,
    /// Owning travel record, if any.
    pub travel_record_id: Option<Uuid>,
    /// Free-text body.
    pub body: String,
    /// Display name of the author.
    pub author: String,
    /// Created at timestamp (ISO 8601).
    pub created_at: String,
}

impl From<notes::Model> for NoteResponse {
    fn from(model: notes::Model) -> Self {
        Self {
            id: model.id,
            member_id: model.member_id,
            travel_record_id: model.travel_record_id,
            body: model.body,
            author: model.author,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// POST `/notes`
/// Insert a note on a member or a booking.
async fn create_note(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(payload): Json<CreateNoteRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&NOTES_VIEW, &user) {
        return response;
    }

    if payload.member_id.is_some() == payload.travel_record_id.is_some() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "invalid_owner",
            "A note references exactly one of member_id or travel_record_id",
        );
    }
    if payload.body.trim().is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "empty_body", "Note body is empty");
    }

    let repo = NoteRepository::new((*state.db).clone());
    match repo
        .insert(NewNoteInput {
            member_id: payload.member_id,
            travel_record_id: payload.travel_record_id,
            body: payload.body,
            author: user.name.clone(),
        })
        .await
    {
        Ok(note) => {
            info!(note_id = %note.id, author = %user.name, "Note created");
            (StatusCode::CREATED, Json(NoteResponse::from(note))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to insert note");
            app_error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/members/id/{id}/notes`
/// Notes on a member, newest first.
async fn list_member_notes(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&NOTES_VIEW, &user) {
        return response;
    }

    let repo = NoteRepository::new((*state.db).clone());
    match repo.list_for_member(member_id).await {
        Ok(rows) => {
            let items: Vec<NoteResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(serde_json::json!({ "notes": items }))).into_response()
        }
        Err(e) => {
            error!(error = %e, member_id = %member_id, "Failed to list notes");
            app_error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/travel/{code}/notes`
/// Notes on a booking, newest first.
async fn list_travel_notes(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(code): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&NOTES_VIEW, &user) {
        return response;
    }

    let travel_repo = TravelRepository::new((*state.db).clone());
    let record = match travel_repo.find_by_confirmation_code(&code).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return json_error(
                StatusCode::NOT_FOUND,
                "travel_record_not_found",
                format!("No travel record with confirmation code {code}"),
            );
        }
        Err(e) => {
            error!(error = %e, code = %code, "Failed to fetch travel record");
            return app_error_response(&AppError::Database(e.to_string()));
        }
    };

    let repo = NoteRepository::new((*state.db).clone());
    match repo.list_for_travel_record(record.id).await {
        Ok(rows) => {
            let items: Vec<NoteResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(serde_json::json!({ "notes": items }))).into_response()
        }
        Err(e) => {
            error!(error = %e, code = %code, "Failed to list notes");
            app_error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/notes/{id}`
/// Remove a single note.
async fn delete_note(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&NOTES_VIEW, &user) {
        return response;
    }

    let repo = NoteRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(true) => {
            info!(note_id = %id, deleted_by = %user.name, "Note deleted");
            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Ok(false) => json_error(
            StatusCode::NOT_FOUND,
            "note_not_found",
            format!("No note with id {id}"),
        ),
        Err(e) => {
            error!(error = %e, note_id = %id, "Failed to delete note");
            app_error_response(&AppError::Database(e.to_string()))
        }
    }
}
