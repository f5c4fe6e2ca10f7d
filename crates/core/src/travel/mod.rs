//! Travel record lifecycle.
//!
//! Bookings are never physically deleted: three independent flags govern
//! how a record lists and labels. `archived` hides it from default views,
//! `canceled` marks a trip that did not occur, `verified` marks a booking
//! confirmed against actual charges.

pub mod lifecycle;
pub mod types;

pub use lifecycle::{TravelStatus, is_listed};
pub use types::{TravelFlags, TravelKind};
