//! Travel record routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::Identity;
use crate::routes::{app_error_response, check_view_access, json_error};
use crate::AppState;
use fieldops_core::access::AccessPolicy;
use fieldops_core::credit::{CreditStanding, available_credit};
use fieldops_core::travel::{TravelFlags, TravelKind, TravelStatus};
use fieldops_db::entities::travel_records;
use fieldops_db::repositories::credit::{grant_to_domain, usage_to_domain};
use fieldops_db::repositories::{
    CreateTravelRecordInput, TravelRecordBundle, TravelRepository, UpdateTravelRecordInput,
};
use fieldops_shared::AppError;
use fieldops_shared::types::money::format_usd;
use fieldops_shared::types::{PageRequest, PageResponse, ProviderId};

/// Roles allowed to work the travel pages.
pub(crate) const TRAVEL_VIEW: AccessPolicy =
    AccessPolicy::new(&["Managers", "Travel Coordinators", "Finance"]);

/// Creates the travel routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/travel", get(list_travel).post(create_travel))
        .route("/travel/{code}", get(get_travel).patch(update_travel))
}

/// Query parameters for the travel list.
#[derive(Debug, Deserialize)]
pub struct ListTravelQuery {
    /// Include archived records (the "show archived" toggle).
    #[serde(default)]
    pub show_archived: bool,
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    25
}

/// Request body for entering a booking.
#[derive(Debug, Deserialize)]
pub struct CreateTravelRequest {
    /// Provider confirmation code.
    pub confirmation_code: String,
    /// `flight`, `hotel`, or `rental`.
    pub kind: String,
    /// Traveling member.
    pub member_id: Uuid,
    /// Project the travel is charged to.
    pub project_id: Uuid,
    /// Provider identity.
    pub provider_id: Uuid,
    /// Total booked cost.
    pub total_cost: Decimal,
    /// Travel date.
    pub travel_date: NaiveDate,
    /// Free-text address (hotels).
    #[serde(default)]
    pub address: Option<String>,
}

/// Request body for a booking update (full replace of mutable fields).
#[derive(Debug, Deserialize)]
pub struct UpdateTravelRequest {
    /// Total booked cost.
    pub total_cost: Decimal,
    /// Travel date.
    pub travel_date: NaiveDate,
    /// Free-text address (hotels).
    #[serde(default)]
    pub address: Option<String>,
    /// Hidden from default lists.
    pub archived: bool,
    /// Confirmed against actual charges.
    pub verified: bool,
    /// The trip did not occur.
    pub canceled: bool,
}

/// Response for a travel record row.
#[derive(Debug, Serialize)]
pub struct TravelResponse {
    /// Record ID.
    pub id: Uuid,
    /// Provider confirmation code.
    pub confirmation_code: String,
    /// Booking kind.
    pub kind: String,
    /// Traveling member.
    pub member_id: Uuid,
    /// Project the travel is charged to.
    pub project_id: Uuid,
    /// Provider identity.
    pub provider_id: Uuid,
    /// Total booked cost.
    pub total_cost: Decimal,
    /// Travel date.
    pub travel_date: NaiveDate,
    /// Free-text address.
    pub address: Option<String>,
    /// Derived status label: Canceled, Verified, or Pending.
    pub status: &'static str,
    /// Hidden from default lists.
    pub archived: bool,
    /// Confirmed against actual charges.
    pub verified: bool,
    /// The trip did not occur.
    pub canceled: bool,
    /// Display name of the staff member who entered the booking.
    pub created_by: String,
    /// Created at timestamp (ISO 8601).
    pub created_at: String,
}

impl From<travel_records::Model> for TravelResponse {
    fn from(model: travel_records::Model) -> Self {
        let flags = TravelFlags {
            archived: model.archived,
            verified: model.verified,
            canceled: model.canceled,
        };
        Self {
            id: model.id,
            confirmation_code: model.confirmation_code,
            kind: model.kind,
            member_id: model.member_id,
            project_id: model.project_id,
            provider_id: model.provider_id,
            total_cost: model.total_cost,
            travel_date: model.travel_date,
            address: model.address,
            status: TravelStatus::from_flags(&flags).as_str(),
            archived: model.archived,
            verified: model.verified,
            canceled: model.canceled,
            created_by: model.created_by,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Detail response: the booking with its related rows and credit summary.
#[derive(Debug, Serialize)]
pub struct TravelDetailResponse {
    /// The booking.
    #[serde(flatten)]
    pub record: TravelResponse,
    /// Traveling member's display name.
    pub member_name: String,
    /// Member's username.
    pub member_username: String,
    /// Project name.
    pub project_name: String,
    /// Provider name.
    pub provider_name: String,
    /// Total booked cost as a display string.
    pub total_cost_label: String,
    /// Available credit, rounded; negative when overdrawn.
    pub available_credit: Decimal,
    /// Display label: "No Credits" or a dollar amount.
    pub available_credit_label: String,
}

impl From<TravelRecordBundle> for TravelDetailResponse {
    fn from(bundle: TravelRecordBundle) -> Self {
        let provider_id = ProviderId::from_uuid(bundle.record.provider_id);
        let grants: Vec<_> = bundle.grants.into_iter().map(grant_to_domain).collect();
        let usages: Vec<_> = bundle.usages.into_iter().map(usage_to_domain).collect();
        let available = available_credit(provider_id, &grants, &usages);
        let available_credit_label = CreditStanding::from_amount(available).label();

        Self {
            total_cost_label: format_usd(bundle.record.total_cost),
            record: TravelResponse::from(bundle.record),
            member_name: bundle.member.full_name,
            member_username: bundle.member.username,
            project_name: bundle.project.name,
            provider_name: bundle.provider.name,
            available_credit: available,
            available_credit_label,
        }
    }
}

/// GET `/travel`
/// List bookings, newest first; archived records need the toggle.
async fn list_travel(
    State(state): State<AppState>,
    Identity(user): Identity,
    Query(query): Query<ListTravelQuery>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    let page = PageRequest {
        page: query.page,
        per_page: query.per_page,
    };
    let repo = TravelRepository::new((*state.db).clone());

    match repo.list(query.show_archived, &page).await {
        Ok((rows, total)) => {
            let items: Vec<TravelResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(PageResponse::new(items, &page, total))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list travel records");
            app_error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/travel/{code}`
/// Fetch a booking with member, project, provider, and credit rows.
async fn get_travel(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(code): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    let repo = TravelRepository::new((*state.db).clone());
    match repo.find_bundle(&code).await {
        Ok(Some(bundle)) => {
            (StatusCode::OK, Json(TravelDetailResponse::from(bundle))).into_response()
        }
        Ok(None) => json_error(
            StatusCode::NOT_FOUND,
            "travel_record_not_found",
            format!("No travel record with confirmation code {code}"),
        ),
        Err(e) => {
            error!(error = %e, code = %code, "Failed to fetch travel record");
            app_error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/travel`
/// Enter a booking.
async fn create_travel(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(payload): Json<CreateTravelRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    let Some(kind) = TravelKind::parse(&payload.kind) else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "invalid_kind",
            format!("Unknown travel kind: {}", payload.kind),
        );
    };

    let repo = TravelRepository::new((*state.db).clone());

    match repo.find_by_confirmation_code(&payload.confirmation_code).await {
        Ok(Some(_)) => {
            return json_error(
                StatusCode::CONFLICT,
                "confirmation_code_taken",
                format!(
                    "A booking with confirmation code {} already exists",
                    payload.confirmation_code
                ),
            );
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Failed to check confirmation code");
            return app_error_response(&AppError::Database(e.to_string()));
        }
    }

    match repo
        .create(CreateTravelRecordInput {
            confirmation_code: payload.confirmation_code,
            kind,
            member_id: payload.member_id,
            project_id: payload.project_id,
            provider_id: payload.provider_id,
            total_cost: payload.total_cost,
            travel_date: payload.travel_date,
            address: payload.address,
            created_by: user.name.clone(),
        })
        .await
    {
        Ok(record) => {
            info!(
                confirmation_code = %record.confirmation_code,
                created_by = %user.name,
                "Travel record created"
            );
            (StatusCode::CREATED, Json(TravelResponse::from(record))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create travel record");
            app_error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PATCH `/travel/{code}`
/// Overwrite a booking's mutable fields, keyed by confirmation code.
async fn update_travel(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(code): Path<String>,
    Json(payload): Json<UpdateTravelRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    let repo = TravelRepository::new((*state.db).clone());
    match repo
        .update_by_confirmation_code(
            &code,
            UpdateTravelRecordInput {
                total_cost: payload.total_cost,
                travel_date: payload.travel_date,
                address: payload.address,
                archived: payload.archived,
                verified: payload.verified,
                canceled: payload.canceled,
            },
        )
        .await
    {
        Ok(Some(record)) => {
            info!(
                confirmation_code = %code,
                updated_by = %user.name,
                "Travel record updated"
            );
            (StatusCode::OK, Json(TravelResponse::from(record))).into_response()
        }
        Ok(None) => json_error(
            StatusCode::NOT_FOUND,
            "travel_record_not_found",
            format!("No travel record with confirmation code {code}"),
        ),
        Err(e) => {
            error!(error = %e, code = %code, "Failed to update travel record");
            app_error_response(&AppError::Database(e.to_string()))
        }
    }
}
