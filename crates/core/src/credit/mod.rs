//! Flight-credit ledger.
//!
//! Providers issue credits when a booking is canceled or refunded; staff
//! apply those credits against later bookings with the same provider. The
//! available balance is always recomputed from the grant and usage rows -
//! there is no cached running total to go stale.

pub mod balance;
pub mod error;
pub mod service;
pub mod types;

pub use balance::{CreditStanding, available_credit};
pub use error::CreditError;
pub use service::{AppliedCredit, CreditRepository, CreditService, CreditSummary};
pub use types::{ApplyCreditInput, CreditGrant, CreditUsage, NewCreditUsage};
