//! Credit ledger routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::{error, info};
use uuid::Uuid;

use crate::middleware::Identity;
use crate::routes::travel::TRAVEL_VIEW;
use crate::routes::{app_error_response, check_view_access, json_error};
use crate::AppState;
use fieldops_core::credit::{ApplyCreditInput, CreditError, CreditService};
use fieldops_db::repositories::{CreditRepository, NewCreditGrant, TravelRepository};
use fieldops_shared::AppError;
use fieldops_shared::types::{CreditGrantId, MemberId, TravelRecordId};

/// Creates the credit routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/travel/{code}/credit-balance", get(get_balance))
        .route("/travel/{code}/credits", post(apply_credit))
        .route(
            "/members/id/{id}/credit-grants",
            get(list_grants).post(create_grant),
        )
}

/// Deserializes an amount leniently: a JSON number or numeric string is
/// accepted, anything else (or a missing field) coerces to zero. The
/// booking forms have always behaved this way.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(Decimal),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(amount) => amount,
        Raw::Text(text) => text.trim().parse().unwrap_or(Decimal::ZERO),
        Raw::Other(_) => Decimal::ZERO,
    })
}

/// Request body for applying credit to a booking.
#[derive(Debug, Deserialize)]
pub struct ApplyCreditRequest {
    /// Grant to draw from.
    pub grant_id: Uuid,
    /// Amount to apply; non-numeric input coerces to 0.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Decimal,
}

/// Request body for recording a grant.
#[derive(Debug, Deserialize)]
pub struct CreateGrantRequest {
    /// Provider the credit was issued against.
    pub provider_id: Uuid,
    /// Grant amount.
    pub amount: Decimal,
    /// Why the credit was issued.
    #[serde(default)]
    pub reason: Option<String>,
    /// Date the provider issued the credit.
    pub issued_on: NaiveDate,
}

fn credit_error_response(err: CreditError) -> axum::response::Response {
    if let CreditError::Repository(e) = &err {
        error!(error = %e, "Credit repository failure");
    }
    app_error_response(&err.into())
}

/// Looks up the record id and owning member for a confirmation code.
async fn resolve_record(
    state: &AppState,
    code: &str,
) -> Result<(TravelRecordId, MemberId), axum::response::Response> {
    let repo = TravelRepository::new((*state.db).clone());
    match repo.find_by_confirmation_code(code).await {
        Ok(Some(record)) => Ok((
            TravelRecordId::from_uuid(record.id),
            MemberId::from_uuid(record.member_id),
        )),
        Ok(None) => Err(json_error(
            StatusCode::NOT_FOUND,
            "travel_record_not_found",
            format!("No travel record with confirmation code {code}"),
        )),
        Err(e) => {
            error!(error = %e, code = %code, "Failed to fetch travel record");
            Err(app_error_response(&AppError::Database(e.to_string())))
        }
    }
}

/// GET `/travel/{code}/credit-balance`
/// Recompute the booking's available credit from source rows.
async fn get_balance(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(code): Path<String>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    let (record_id, member_id) = match resolve_record(&state, &code).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    let service = CreditService::new(CreditRepository::new((*state.db).clone()));
    match service.balance_for_record(record_id, member_id).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => credit_error_response(e),
    }
}

/// POST `/travel/{code}/credits`
/// Apply credit from a grant against the booking, then recompute.
async fn apply_credit(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(code): Path<String>,
    Json(payload): Json<ApplyCreditRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    let (record_id, member_id) = match resolve_record(&state, &code).await {
        Ok(pair) => pair,
        Err(response) => return response,
    };

    let service = CreditService::new(CreditRepository::new((*state.db).clone()));
    match service
        .apply(ApplyCreditInput {
            travel_record_id: record_id,
            member_id,
            grant_id: CreditGrantId::from_uuid(payload.grant_id),
            amount: payload.amount,
            applied_by: user.name.clone(),
        })
        .await
    {
        Ok(applied) => {
            info!(
                confirmation_code = %code,
                amount = %applied.usage.amount,
                applied_by = %user.name,
                balance = %applied.balance.available,
                "Credit applied"
            );
            (StatusCode::CREATED, Json(applied)).into_response()
        }
        Err(e) => credit_error_response(e),
    }
}

/// GET `/members/id/{id}/credit-grants`
/// All grants a member holds, across providers.
async fn list_grants(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(member_id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    use fieldops_core::credit::CreditRepository as _;
    let repo = CreditRepository::new((*state.db).clone());
    match repo.grants_for_member(MemberId::from_uuid(member_id)).await {
        Ok(grants) => {
            (StatusCode::OK, Json(serde_json::json!({ "grants": grants }))).into_response()
        }
        Err(e) => credit_error_response(e),
    }
}

/// POST `/members/id/{id}/credit-grants`
/// Record a grant after a provider cancellation or refund.
async fn create_grant(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(member_id): Path<Uuid>,
    Json(payload): Json<CreateGrantRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    if payload.amount.is_sign_negative() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "negative_amount",
            format!("Grant amount must not be negative, got {}", payload.amount),
        );
    }

    let repo = CreditRepository::new((*state.db).clone());
    match repo
        .create_grant(NewCreditGrant {
            member_id,
            provider_id: payload.provider_id,
            amount: payload.amount,
            reason: payload.reason,
            issued_on: payload.issued_on,
            created_by: user.name.clone(),
        })
        .await
    {
        Ok(grant) => {
            info!(
                member_id = %member_id,
                provider_id = %payload.provider_id,
                amount = %grant.amount,
                created_by = %user.name,
                "Credit grant recorded"
            );
            (StatusCode::CREATED, Json(grant)).into_response()
        }
        Err(e) => credit_error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_amount")]
        amount: Decimal,
    }

    #[test]
    fn test_amount_accepts_number() {
        let probe: Probe = serde_json::from_str(r#"{"amount": 50.25}"#).unwrap();
        assert_eq!(probe.amount, dec!(50.25));
    }

    #[test]
    fn test_amount_accepts_numeric_string() {
        let probe: Probe = serde_json::from_str(r#"{"amount": " 175.00 "}"#).unwrap();
        assert_eq!(probe.amount, dec!(175.00));
    }

    #[test]
    fn test_non_numeric_coerces_to_zero() {
        let probe: Probe = serde_json::from_str(r#"{"amount": "lots"}"#).unwrap();
        assert_eq!(probe.amount, Decimal::ZERO);

        let probe: Probe = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        assert_eq!(probe.amount, Decimal::ZERO);

        let probe: Probe = serde_json::from_str(r#"{"amount": {"a": 1}}"#).unwrap();
        assert_eq!(probe.amount, Decimal::ZERO);
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.amount, Decimal::ZERO);
    }
}
