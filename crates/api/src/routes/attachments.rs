//! Attachment routes.
//!
//! List pages resolve each attachment's stored key to a time-limited
//! download URL. Resolution is a batch of independent concurrent lookups:
//! one failure leaves that link unresolved while the rest succeed.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::middleware::Identity;
use crate::routes::{app_error_response, check_view_access, json_error};
use crate::AppState;
use fieldops_core::access::AccessPolicy;
use fieldops_core::attachment::{
    Attachment, AttachmentError, AttachmentOwner, AttachmentRepository as AttachmentRepoTrait,
    AttachmentService, NewAttachment,
};
use fieldops_db::repositories::{AttachmentRepository, TravelRepository};
use fieldops_shared::AppError;
use fieldops_shared::types::{AttachmentId, MemberId, TravelRecordId};

/// Roles allowed to manage attachments.
const ATTACHMENTS_VIEW: AccessPolicy = AccessPolicy::new(&[
    "Managers",
    "Human Resources",
    "Travel Coordinators",
    "Finance",
]);

/// Creates the attachment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/attachments", post(create_attachment))
        .route("/attachments/{id}", delete(delete_attachment))
        .route("/members/id/{id}/attachments", get(list_member_attachments))
        .route("/travel/{code}/attachments", get(list_travel_attachments))
}

/// Request body for recording an attachment row.
#[derive(Debug, Deserialize)]
pub struct CreateAttachmentRequest {
    /// Owning member, if the file is on an onboarding file.
    #[serde(default)]
    pub member_id: Option<Uuid>,
    /// Owning travel record, if the file is on a booking.
    #[serde(default)]
    pub travel_record_id: Option<Uuid>,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Key of the stored object.
    pub storage_key: String,
}

/// Response for an attachment.
#[derive(Debug, Serialize)]
pub struct AttachmentResponse {
    /// Attachment ID.
    pub id: Uuid,
    /// Owning member, if any.
    pub member_id: Option<Uuid>,
    /// Owning travel record, if any.
    pub travel_record_id: Option<Uuid>,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Display name of the uploader.
    pub uploaded_by: String,
    /// Created at timestamp (ISO 8601).
    pub created_at: String,
    /// Download URL (presigned; null when resolution failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Download URL expiration (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url_expires_at: Option<String>,
}

impl AttachmentResponse {
    fn new(attachment: Attachment, link: Option<fieldops_core::storage::DownloadUrl>) -> Self {
        let (member_id, travel_record_id) = match attachment.owner {
            AttachmentOwner::Member(id) => (Some(id.into_inner()), None),
            AttachmentOwner::TravelRecord(id) => (None, Some(id.into_inner())),
        };
        Self {
            id: attachment.id.into_inner(),
            member_id,
            travel_record_id,
            filename: attachment.filename,
            mime_type: attachment.mime_type,
            file_size: attachment.file_size,
            uploaded_by: attachment.uploaded_by,
            created_at: attachment.created_at.to_rfc3339(),
            download_url: link.as_ref().map(|l| l.url.clone()),
            download_url_expires_at: link.map(|l| l.expires_at.to_rfc3339()),
        }
    }
}

/// Resolves download links for a list of attachments.
///
/// Lookups run concurrently and independently; a failed lookup logs a
/// warning and leaves that item's link unresolved. With no storage
/// configured every link stays unresolved.
async fn resolve_links(
    state: &AppState,
    attachments: Vec<Attachment>,
) -> Vec<AttachmentResponse> {
    let Some(storage) = &state.storage else {
        return attachments
            .into_iter()
            .map(|a| AttachmentResponse::new(a, None))
            .collect();
    };

    let service = AttachmentService::new(
        storage.clone(),
        Arc::new(AttachmentRepository::new((*state.db).clone())),
    );

    let lookups = attachments.into_iter().map(|attachment| {
        let service = &service;
        async move {
            match service.resolve_download(&attachment).await {
                Ok(link) => AttachmentResponse::new(attachment, Some(link)),
                Err(e) => {
                    warn!(
                        attachment_id = %attachment.id,
                        error = %e,
                        "Failed to resolve download URL"
                    );
                    AttachmentResponse::new(attachment, None)
                }
            }
        }
    });

    futures::future::join_all(lookups).await
}

fn attachment_error_response(err: AttachmentError) -> axum::response::Response {
    match &err {
        AttachmentError::Storage(e) => error!(error = %e, "Attachment storage failure"),
        AttachmentError::Repository(e) => error!(error = %e, "Attachment repository failure"),
        AttachmentError::NotFound(_) => {}
    }
    app_error_response(&err.into())
}

/// POST `/attachments`
/// Record a row for an object already uploaded to storage.
async fn create_attachment(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(payload): Json<CreateAttachmentRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&ATTACHMENTS_VIEW, &user) {
        return response;
    }

    let owner = match (payload.member_id, payload.travel_record_id) {
        (Some(member_id), None) => AttachmentOwner::Member(MemberId::from_uuid(member_id)),
        (None, Some(record_id)) => {
            AttachmentOwner::TravelRecord(TravelRecordId::from_uuid(record_id))
        }
        _ => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "invalid_owner",
                "An attachment references exactly one of member_id or travel_record_id",
            );
        }
    };

    let repo = AttachmentRepository::new((*state.db).clone());
    match repo
        .create(NewAttachment {
            id: AttachmentId::new(),
            owner,
            filename: payload.filename,
            mime_type: payload.mime_type,
            file_size: payload.file_size,
            storage_key: payload.storage_key,
            uploaded_by: user.name.clone(),
        })
        .await
    {
        Ok(attachment) => {
            info!(
                attachment_id = %attachment.id,
                uploaded_by = %user.name,
                "Attachment recorded"
            );
            (
                StatusCode::CREATED,
                Json(AttachmentResponse::new(attachment, None)),
            )
                .into_response()
        }
        Err(e) => attachment_error_response(e),
    }
}

/// GET `/members/id/{id}/attachments`
/// Attachments on a member, with download links resolved concurrently.
async fn list_member_attachments(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&ATTACHMENTS_VIEW, &user) {
        return response;
    }

    let repo = AttachmentRepository::new((*state.db).clone());
    match repo.list_for_member(MemberId::from_uuid(member_id)).await {
        Ok(attachments) => {
            let items = resolve_links(&state, attachments).await;
            (
                StatusCode::OK,
                Json(serde_json::json!({ "attachments": items })),
            )
                .into_response()
        }
        Err(e) => attachment_error_response(e),
    }
}

/// GET `/travel/{code}/attachments`
/// Attachments on a booking, with download links resolved concurrently.
async fn list_travel_attachments(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(code): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&ATTACHMENTS_VIEW, &user) {
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

    let repo = AttachmentRepository::new((*state.db).clone());
    match repo
        .list_for_travel_record(TravelRecordId::from_uuid(record.id))
        .await
    {
        Ok(attachments) => {
            let items = resolve_links(&state, attachments).await;
            (
                StatusCode::OK,
                Json(serde_json::json!({ "attachments": items })),
            )
                .into_response()
        }
        Err(e) => attachment_error_response(e),
    }
}

/// DELETE `/attachments/{id}`
/// Remove the storage object and the row.
async fn delete_attachment(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&ATTACHMENTS_VIEW, &user) {
        return response;
    }

    let Some(storage) = &state.storage else {
        return json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "storage_not_configured",
            "File storage is not configured",
        );
    };

    let service = AttachmentService::new(
        storage.clone(),
        Arc::new(AttachmentRepository::new((*state.db).clone())),
    );

    match service.delete(AttachmentId::from_uuid(id)).await {
        Ok(()) => {
            info!(attachment_id = %id, deleted_by = %user.name, "Attachment deleted");
            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Err(e) => attachment_error_response(e),
    }
}
