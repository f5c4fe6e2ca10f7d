//! Shared types, errors, and configuration for FieldOps.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency rounding and formatting helpers
//! - Pagination types for list endpoints
//! - The injected `CurrentUser` identity value
//! - Application-wide error types
//! - Configuration management
//! - Geocoding client for map plotting

pub mod config;
pub mod error;
pub mod geocode;
pub mod identity;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use identity::CurrentUser;
