//! Member repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::members;
use fieldops_shared::types::PageRequest;

/// Input for creating a member.
#[derive(Debug, Clone)]
pub struct CreateMemberInput {
    /// Unique login/username.
    pub username: String,
    /// Full display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Mutable fields for a member update (full replace).
#[derive(Debug, Clone)]
pub struct UpdateMemberInput {
    /// Full display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Active flag; inactive members drop out of default lists.
    pub is_active: bool,
}

/// Member repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    db: DatabaseConnection,
}

impl MemberRepository {
    /// Creates a new member repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a member by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<members::Model>, DbErr> {
        members::Entity::find()
            .filter(members::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds a member by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<members::Model>, DbErr> {
        members::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists members alphabetically by full name.
    ///
    /// Inactive members are excluded unless `include_inactive` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        include_inactive: bool,
        page: &PageRequest,
    ) -> Result<(Vec<members::Model>, u64), DbErr> {
        let mut query = members::Entity::find();
        if !include_inactive {
            query = query.filter(members::Column::IsActive.eq(true));
        }
        let query = query.order_by_asc(members::Column::FullName);

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .paginate(&self.db, page.limit())
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok((rows, total))
    }

    /// Creates a new member.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateMemberInput) -> Result<members::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let member = members::ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(input.username),
            full_name: Set(input.full_name),
            email: Set(input.email),
            phone: Set(input.phone),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        member.insert(&self.db).await
    }

    /// Overwrites a member's mutable fields (last write wins).
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateMemberInput,
    ) -> Result<Option<members::Model>, DbErr> {
        let Some(existing) = members::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model: members::ActiveModel = existing.into();
        model.full_name = Set(input.full_name);
        model.email = Set(input.email);
        model.phone = Set(input.phone);
        model.is_active = Set(input.is_active);
        model.updated_at = Set(chrono::Utc::now().into());

        model.update(&self.db).await.map(Some)
    }

    /// Checks if a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = members::Entity::find()
            .filter(members::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
