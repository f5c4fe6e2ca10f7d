//! Travel map routes.
//!
//! Hotel addresses are geocoded as a batch of independent concurrent
//! lookups; a failed lookup is logged and that point is omitted from the
//! map while the rest plot.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, warn};

use crate::middleware::Identity;
use crate::routes::travel::TRAVEL_VIEW;
use crate::routes::{app_error_response, check_view_access, json_error};
use crate::AppState;
use fieldops_db::repositories::TravelRepository;
use fieldops_shared::AppError;

/// Creates the map routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/travel/map-points", get(map_points))
}

/// One plottable point.
#[derive(Debug, Serialize)]
pub struct MapPoint {
    /// Confirmation code of the booking.
    pub confirmation_code: String,
    /// The address that was geocoded.
    pub address: String,
    /// Latitude in decimal degrees.
    pub latitude: Decimal,
    /// Longitude in decimal degrees.
    pub longitude: Decimal,
}

/// GET `/travel/map-points`
/// Geocode unarchived hotel bookings for the stay map.
async fn map_points(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> impl IntoResponse {
    if let Err(response) = check_view_access(&TRAVEL_VIEW, &user) {
        return response;
    }

    let Some(geo) = &state.geo else {
        return json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "geocoding_not_configured",
            "Geocoding is not configured",
        );
    };

    let repo = TravelRepository::new((*state.db).clone());
    let records = match repo.list_mappable().await {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Failed to list mappable records");
            return app_error_response(&AppError::Database(e.to_string()));
        }
    };

    let lookups = records.into_iter().filter_map(|record| {
        let address = record.address?;
        let code = record.confirmation_code;
        let geo = geo.clone();
        Some(async move {
            match geo.geocode(&address).await {
                Ok(point) => Some(MapPoint {
                    confirmation_code: code,
                    address,
                    latitude: point.latitude,
                    longitude: point.longitude,
                }),
                Err(e) => {
                    warn!(
                        confirmation_code = %code,
                        error = %e,
                        "Geocoding failed; point omitted"
                    );
                    None
                }
            }
        })
    });

    let points: Vec<MapPoint> = futures::future::join_all(lookups)
        .await
        .into_iter()
        .flatten()
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "points": points }))).into_response()
}
