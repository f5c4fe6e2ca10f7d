//! Credit ledger domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fieldops_shared::types::{
    CreditGrantId, CreditUsageId, MemberId, ProviderId, TravelRecordId,
};

/// A credit issued to a member against a specific provider.
///
/// Grants are created when a provider cancellation or refund occurs and are
/// only redeemable against travel records with the same provider identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditGrant {
    /// Unique identifier.
    pub id: CreditGrantId,
    /// Member who owns the credit.
    pub member_id: MemberId,
    /// Provider the credit was issued against.
    pub provider_id: ProviderId,
    /// Original grant amount.
    pub amount: Decimal,
    /// Why the credit was issued (free text).
    pub reason: Option<String>,
    /// Date the provider issued the credit.
    pub issued_on: NaiveDate,
    /// Display name of the staff member who entered the grant.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A ledger entry consuming part of a grant against a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditUsage {
    /// Unique identifier.
    pub id: CreditUsageId,
    /// The grant being drawn down.
    pub grant_id: CreditGrantId,
    /// The booking the credit was applied to.
    pub travel_record_id: TravelRecordId,
    /// Amount applied.
    pub amount: Decimal,
    /// Display name of the staff member who applied the credit.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request to apply credit against a booking.
#[derive(Debug, Clone)]
pub struct ApplyCreditInput {
    /// Target booking.
    pub travel_record_id: TravelRecordId,
    /// Member who owns the grant.
    pub member_id: MemberId,
    /// Grant to draw from.
    pub grant_id: CreditGrantId,
    /// Amount to apply. Already coerced to a number by the caller;
    /// must be non-negative.
    pub amount: Decimal,
    /// Display name of the acting staff member.
    pub applied_by: String,
}

/// Row to persist for a new usage entry.
#[derive(Debug, Clone)]
pub struct NewCreditUsage {
    /// Pre-generated identifier.
    pub id: CreditUsageId,
    /// The grant being drawn down.
    pub grant_id: CreditGrantId,
    /// The booking the credit is applied to.
    pub travel_record_id: TravelRecordId,
    /// Amount applied.
    pub amount: Decimal,
    /// Display name of the acting staff member.
    pub created_by: String,
}
