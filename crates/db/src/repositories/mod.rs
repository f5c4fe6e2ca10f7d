//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Plain CRUD repositories return `SeaORM` models and
//! `DbErr`; the credit, approval, and attachment repositories implement
//! the corresponding `fieldops-core` traits and speak domain types.

pub mod approval;
pub mod attachment;
pub mod credit;
pub mod member;
pub mod note;
pub mod travel;

pub use approval::ApprovalRepository;
pub use attachment::AttachmentRepository;
pub use credit::{CreditRepository, NewCreditGrant};
pub use member::{CreateMemberInput, MemberRepository, UpdateMemberInput};
pub use note::{NewNoteInput, NoteRepository};
pub use travel::{
    CreateTravelRecordInput, TravelRecordBundle, TravelRepository, UpdateTravelRecordInput,
};
