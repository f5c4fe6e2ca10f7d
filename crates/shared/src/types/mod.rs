//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{format_usd, round_currency};
pub use pagination::{PageRequest, PageResponse};
