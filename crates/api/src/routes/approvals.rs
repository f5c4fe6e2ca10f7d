//! Approval workflow routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::Identity;
use crate::routes::{app_error_response, check_view_access, json_error};
use crate::AppState;
use fieldops_core::access::AccessPolicy;
use fieldops_core::approval::{
    ApprovalError, ApprovalRecord, ApprovalService, ApprovalStatus, ApprovalType, ApprovalUpdate,
    PivStatus,
};
use fieldops_db::repositories::ApprovalRepository;
use fieldops_shared::types::{ApprovalRecordId, MemberId};

/// Roles allowed to work the approvals pages.
const APPROVALS_VIEW: AccessPolicy =
    AccessPolicy::new(&["Managers", "Human Resources", "Security"]);

/// Creates the approval routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members/id/{id}/approvals",
            get(list_approvals).post(submit_approval),
        )
        .route("/approvals/{id}", patch(update_approval))
}

/// Request body for a first submission.
#[derive(Debug, Deserialize)]
pub struct SubmitApprovalRequest {
    /// `background_check`, `clearance`, or `tsa`.
    pub approval_type: String,
    /// Submission date.
    #[serde(default)]
    pub submitted_on: Option<NaiveDate>,
}

/// Request body for a re-review (full replace of mutable fields).
#[derive(Debug, Deserialize)]
pub struct UpdateApprovalRequest {
    /// New status; any member of the record type's status set.
    pub status: String,
    /// PIV badge status (TSA records).
    #[serde(default)]
    pub piv_status: Option<String>,
    /// Whether supporting documents have been collected.
    #[serde(default)]
    pub document_collected: bool,
    /// Submission date.
    #[serde(default)]
    pub submitted_on: Option<NaiveDate>,
    /// Approval date.
    #[serde(default)]
    pub approved_on: Option<NaiveDate>,
}

/// Response for an approval record.
#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    /// Record ID.
    pub id: Uuid,
    /// Member under review.
    pub member_id: Uuid,
    /// Kind of approval.
    pub approval_type: &'static str,
    /// Display status label.
    pub status: &'static str,
    /// PIV badge status.
    pub piv_status: Option<&'static str>,
    /// Whether supporting documents have been collected.
    pub document_collected: bool,
    /// Submission date.
    pub submitted_on: Option<NaiveDate>,
    /// Approval date.
    pub approved_on: Option<NaiveDate>,
    /// Display name of the last editor.
    pub updated_by: String,
    /// Last update timestamp (ISO 8601).
    pub last_activity: String,
}

impl From<ApprovalRecord> for ApprovalResponse {
    fn from(record: ApprovalRecord) -> Self {
        Self {
            id: record.id.into_inner(),
            member_id: record.member_id.into_inner(),
            approval_type: record.approval_type.as_str(),
            status: record.status.as_str(),
            piv_status: record.piv_status.map(|p| p.as_str()),
            document_collected: record.document_collected,
            submitted_on: record.submitted_on,
            approved_on: record.approved_on,
            updated_by: record.updated_by,
            last_activity: record.last_activity.to_rfc3339(),
        }
    }
}

fn approval_error_response(err: ApprovalError) -> axum::response::Response {
    if let ApprovalError::Repository(e) = &err {
        error!(error = %e, "Approval repository failure");
    }
    app_error_response(&err.into())
}

/// GET `/members/id/{id}/approvals`
/// All approval records for a member.
async fn list_approvals(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&APPROVALS_VIEW, &user) {
        return response;
    }

    let service = ApprovalService::new(ApprovalRepository::new((*state.db).clone()));
    match service.list_for_member(MemberId::from_uuid(member_id)).await {
        Ok(records) => {
            let items: Vec<ApprovalResponse> = records.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(serde_json::json!({ "approvals": items }))).into_response()
        }
        Err(e) => approval_error_response(e),
    }
}

/// POST `/members/id/{id}/approvals`
/// Record a first submission; the record starts In Progress.
async fn submit_approval(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(member_id): Path<Uuid>,
    Json(payload): Json<SubmitApprovalRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&APPROVALS_VIEW, &user) {
        return response;
    }

    let Some(approval_type) = ApprovalType::parse(&payload.approval_type) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "invalid_approval_type",
            format!("Unknown approval type: {}", payload.approval_type),
        );
    };

    let service = ApprovalService::new(ApprovalRepository::new((*state.db).clone()));
    match service
        .submit(
            MemberId::from_uuid(member_id),
            approval_type,
            payload.submitted_on,
            user.name.clone(),
        )
        .await
    {
        Ok(record) => {
            info!(
                member_id = %member_id,
                approval_type = %approval_type,
                submitted_by = %user.name,
                "Approval submitted"
            );
            (StatusCode::CREATED, Json(ApprovalResponse::from(record))).into_response()
        }
        Err(e) => approval_error_response(e),
    }
}

/// PATCH `/approvals/{id}`
/// Re-review: overwrite the record's mutable fields in place.
async fn update_approval(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApprovalRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&APPROVALS_VIEW, &user) {
        return response;
    }

    let Some(status) = ApprovalStatus::parse(&payload.status) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "invalid_status",
            format!("Unknown status: {}", payload.status),
        );
    };
    let piv_status = match payload.piv_status.as_deref() {
        None => None,
        Some(raw) => match PivStatus::parse(raw) {
            Some(parsed) => Some(parsed),
            None => {
                return json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_piv_status",
                    format!("Unknown PIV status: {raw}"),
                );
            }
        },
    };

    let service = ApprovalService::new(ApprovalRepository::new((*state.db).clone()));
    match service
        .update(
            ApprovalRecordId::from_uuid(id),
            ApprovalUpdate {
                status,
                piv_status,
                document_collected: payload.document_collected,
                submitted_on: payload.submitted_on,
                approved_on: payload.approved_on,
                updated_by: user.name.clone(),
            },
        )
        .await
    {
        Ok(record) => {
            info!(
                approval_id = %id,
                status = %status,
                updated_by = %user.name,
                "Approval updated"
            );
            (StatusCode::OK, Json(ApprovalResponse::from(record))).into_response()
        }
        Err(e) => approval_error_response(e),
    }
}
