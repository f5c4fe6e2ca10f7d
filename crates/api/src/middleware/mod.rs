//! Request middleware.

pub mod identity;

pub use identity::{Identity, identity_middleware};
