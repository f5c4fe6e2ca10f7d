//! `SeaORM` entity definitions.

pub mod approval_records;
pub mod attachments;
pub mod credit_grants;
pub mod credit_usages;
pub mod members;
pub mod notes;
pub mod projects;
pub mod providers;
pub mod travel_records;
