//! Travel record repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{credit_grants, credit_usages, members, projects, providers, travel_records};
use fieldops_core::travel::TravelKind;
use fieldops_shared::types::PageRequest;

/// Input for entering a booking.
#[derive(Debug, Clone)]
pub struct CreateTravelRecordInput {
    /// Provider confirmation code; unique across all bookings.
    pub confirmation_code: String,
    /// Booking kind.
    pub kind: TravelKind,
    /// Traveling member.
    pub member_id: Uuid,
    /// Project the travel is charged to.
    pub project_id: Uuid,
    /// Provider identity.
    pub provider_id: Uuid,
    /// Total booked cost.
    pub total_cost: Decimal,
    /// Travel date.
    pub travel_date: NaiveDate,
    /// Free-text address (hotels).
    pub address: Option<String>,
    /// Display name of the staff member entering the booking.
    pub created_by: String,
}

/// Mutable fields for a booking update (full replace, last write wins).
#[derive(Debug, Clone)]
pub struct UpdateTravelRecordInput {
    /// Total booked cost.
    pub total_cost: Decimal,
    /// Travel date.
    pub travel_date: NaiveDate,
    /// Free-text address (hotels).
    pub address: Option<String>,
    /// Hidden from default lists.
    pub archived: bool,
    /// Confirmed against actual charges.
    pub verified: bool,
    /// The trip did not occur.
    pub canceled: bool,
}

/// A travel record with its related rows, as fetched for the detail view.
#[derive(Debug, Clone)]
pub struct TravelRecordBundle {
    /// The booking itself.
    pub record: travel_records::Model,
    /// Traveling member.
    pub member: members::Model,
    /// Project the travel is charged to.
    pub project: projects::Model,
    /// Provider identity.
    pub provider: providers::Model,
    /// The member's grants against this booking's provider.
    pub grants: Vec<credit_grants::Model>,
    /// Usage entries recorded against this booking.
    pub usages: Vec<credit_usages::Model>,
}

/// Travel record repository.
#[derive(Debug, Clone)]
pub struct TravelRepository {
    db: DatabaseConnection,
}

impl TravelRepository {
    /// Creates a new travel repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a booking by confirmation code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_confirmation_code(
        &self,
        code: &str,
    ) -> Result<Option<travel_records::Model>, DbErr> {
        travel_records::Entity::find()
            .filter(travel_records::Column::ConfirmationCode.eq(code))
            .one(&self.db)
            .await
    }

    /// Fetches a booking with its member, project, provider, and credit rows.
    ///
    /// Returns `None` when the confirmation code matches nothing; callers
    /// render the dedicated not-found view.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the queries fail, or if a foreign
    /// reference dangles (schema enforces they cannot).
    pub async fn find_bundle(&self, code: &str) -> Result<Option<TravelRecordBundle>, DbErr> {
        let Some(record) = self.find_by_confirmation_code(code).await? else {
            return Ok(None);
        };

        let member = members::Entity::find_by_id(record.member_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("member {}", record.member_id)))?;
        let project = projects::Entity::find_by_id(record.project_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("project {}", record.project_id)))?;
        let provider = providers::Entity::find_by_id(record.provider_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("provider {}", record.provider_id)))?;

        let grants = credit_grants::Entity::find()
            .filter(credit_grants::Column::MemberId.eq(record.member_id))
            .filter(credit_grants::Column::ProviderId.eq(record.provider_id))
            .order_by_asc(credit_grants::Column::IssuedOn)
            .all(&self.db)
            .await?;
        let usages = credit_usages::Entity::find()
            .filter(credit_usages::Column::TravelRecordId.eq(record.id))
            .order_by_desc(credit_usages::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Some(TravelRecordBundle {
            record,
            member,
            project,
            provider,
            grants,
            usages,
        }))
    }

    /// Lists bookings ordered by id descending (newest first).
    ///
    /// Archived records are excluded unless `show_archived` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        show_archived: bool,
        page: &PageRequest,
    ) -> Result<(Vec<travel_records::Model>, u64), DbErr> {
        let mut query = travel_records::Entity::find();
        if !show_archived {
            query = query.filter(travel_records::Column::Archived.eq(false));
        }
        let query = query.order_by_desc(travel_records::Column::Id);

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .paginate(&self.db, page.limit())
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;

        Ok((rows, total))
    }

    /// Lists unarchived hotel bookings that carry an address, for the map.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_mappable(&self) -> Result<Vec<travel_records::Model>, DbErr> {
        travel_records::Entity::find()
            .filter(travel_records::Column::Kind.eq(TravelKind::Hotel.as_str()))
            .filter(travel_records::Column::Archived.eq(false))
            .filter(travel_records::Column::Address.is_not_null())
            .order_by_desc(travel_records::Column::Id)
            .all(&self.db)
            .await
    }

    /// Enters a new booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a duplicate
    /// confirmation code).
    pub async fn create(
        &self,
        input: CreateTravelRecordInput,
    ) -> Result<travel_records::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let record = travel_records::ActiveModel {
            id: Set(Uuid::now_v7()),
            confirmation_code: Set(input.confirmation_code),
            kind: Set(input.kind.as_str().to_string()),
            member_id: Set(input.member_id),
            project_id: Set(input.project_id),
            provider_id: Set(input.provider_id),
            total_cost: Set(input.total_cost),
            travel_date: Set(input.travel_date),
            address: Set(input.address),
            archived: Set(false),
            verified: Set(false),
            canceled: Set(false),
            created_by: Set(input.created_by),
            created_at: Set(now),
            updated_at: Set(now),
        };

        record.insert(&self.db).await
    }

    /// Overwrites a booking's mutable fields, keyed by confirmation code.
    ///
    /// Full-row replace: concurrent editors race with last-write-wins
    /// semantics, no conflict detection.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_by_confirmation_code(
        &self,
        code: &str,
        input: UpdateTravelRecordInput,
    ) -> Result<Option<travel_records::Model>, DbErr> {
        let Some(existing) = self.find_by_confirmation_code(code).await? else {
            return Ok(None);
        };

        let mut model: travel_records::ActiveModel = existing.into();
        model.total_cost = Set(input.total_cost);
        model.travel_date = Set(input.travel_date);
        model.address = Set(input.address);
        model.archived = Set(input.archived);
        model.verified = Set(input.verified);
        model.canceled = Set(input.canceled);
        model.updated_at = Set(chrono::Utc::now().into());

        model.update(&self.db).await.map(Some)
    }
}
