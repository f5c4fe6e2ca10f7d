//! Credit ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use fieldops_shared::AppError;
use fieldops_shared::types::{CreditGrantId, TravelRecordId};

/// Credit operation errors.
///
/// Every failure mode is explicit so callers can distinguish not-found,
/// validation, and persistence outcomes.
#[derive(Debug, Error)]
pub enum CreditError {
    /// The referenced grant does not exist or belongs to another member.
    #[error("credit grant not found: {0}")]
    GrantNotFound(CreditGrantId),

    /// The referenced booking does not exist.
    #[error("travel record not found: {0}")]
    RecordNotFound(TravelRecordId),

    /// A negative amount was requested.
    #[error("credit amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    /// The underlying store failed.
    #[error("credit repository error: {0}")]
    Repository(String),
}

impl CreditError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<CreditError> for AppError {
    fn from(err: CreditError) -> Self {
        match err {
            CreditError::GrantNotFound(id) => Self::NotFound(format!("credit grant {id}")),
            CreditError::RecordNotFound(id) => Self::NotFound(format!("travel record {id}")),
            CreditError::NegativeAmount(amount) => {
                Self::Validation(format!("credit amount must not be negative, got {amount}"))
            }
            CreditError::Repository(msg) => Self::Database(msg),
        }
    }
}
