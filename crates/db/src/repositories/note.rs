//! Note repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::notes;

/// Input for inserting a note.
///
/// A note hangs off a member or a travel record; exactly one of the two
/// references is set.
#[derive(Debug, Clone)]
pub struct NewNoteInput {
    /// Owning member, if any.
    pub member_id: Option<Uuid>,
    /// Owning travel record, if any.
    pub travel_record_id: Option<Uuid>,
    /// Free-text body.
    pub body: String,
    /// Display name of the author.
    pub author: String,
}

/// Note repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    db: DatabaseConnection,
}

impl NoteRepository {
    /// Creates a new note repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a note.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert(&self, input: NewNoteInput) -> Result<notes::Model, DbErr> {
        let note = notes::ActiveModel {
            id: Set(Uuid::now_v7()),
            member_id: Set(input.member_id),
            travel_record_id: Set(input.travel_record_id),
            body: Set(input.body),
            author: Set(input.author),
            created_at: Set(chrono::Utc::now().into()),
        };

        note.insert(&self.db).await
    }

    /// Lists notes on a member, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_member(&self, member_id: Uuid) -> Result<Vec<notes::Model>, DbErr> {
        notes::Entity::find()
            .filter(notes::Column::MemberId.eq(member_id))
            .order_by_desc(notes::Column::Id)
            .all(&self.db)
            .await
    }

    /// Lists notes on a travel record, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_travel_record(
        &self,
        travel_record_id: Uuid,
    ) -> Result<Vec<notes::Model>, DbErr> {
        notes::Entity::find()
            .filter(notes::Column::TravelRecordId.eq(travel_record_id))
            .order_by_desc(notes::Column::Id)
            .all(&self.db)
            .await
    }

    /// Deletes a note by id. Returns false if no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = notes::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
