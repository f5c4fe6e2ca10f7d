//! Initial database migration.
//!
//! Creates all core tables and indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: PEOPLE & PROJECTS
        // ============================================================
        db.execute_unprepared(MEMBERS_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(PROVIDERS_SQL).await?;

        // ============================================================
        // PART 2: TRAVEL & CREDIT LEDGER
        // ============================================================
        db.execute_unprepared(TRAVEL_RECORDS_SQL).await?;
        db.execute_unprepared(CREDIT_GRANTS_SQL).await?;
        db.execute_unprepared(CREDIT_USAGES_SQL).await?;

        // ============================================================
        // PART 3: APPROVALS
        // ============================================================
        db.execute_unprepared(APPROVAL_RECORDS_SQL).await?;

        // ============================================================
        // PART 4: NOTES & ATTACHMENTS
        // ============================================================
        db.execute_unprepared(NOTES_SQL).await?;
        db.execute_unprepared(ATTACHMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const MEMBERS_SQL: &str = r"
CREATE TABLE members (
    id UUID PRIMARY KEY,
    username VARCHAR(64) NOT NULL UNIQUE,
    full_name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    phone VARCHAR(32),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_members_full_name ON members (full_name);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    code VARCHAR(32) NOT NULL UNIQUE,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PROVIDERS_SQL: &str = r"
CREATE TABLE providers (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    kind VARCHAR(32) NOT NULL
        CHECK (kind IN ('airline', 'hotel_chain', 'rental_vendor')),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const TRAVEL_RECORDS_SQL: &str = r"
CREATE TABLE travel_records (
    id UUID PRIMARY KEY,
    confirmation_code VARCHAR(64) NOT NULL UNIQUE,
    kind VARCHAR(16) NOT NULL
        CHECK (kind IN ('flight', 'hotel', 'rental')),
    member_id UUID NOT NULL REFERENCES members(id),
    project_id UUID NOT NULL REFERENCES projects(id),
    provider_id UUID NOT NULL REFERENCES providers(id),
    total_cost NUMERIC(12, 2) NOT NULL,
    travel_date DATE NOT NULL,
    address TEXT,
    archived BOOLEAN NOT NULL DEFAULT FALSE,
    verified BOOLEAN NOT NULL DEFAULT FALSE,
    canceled BOOLEAN NOT NULL DEFAULT FALSE,
    created_by VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_travel_records_member ON travel_records (member_id);
CREATE INDEX idx_travel_records_archived ON travel_records (archived);
";

const CREDIT_GRANTS_SQL: &str = r"
CREATE TABLE credit_grants (
    id UUID PRIMARY KEY,
    member_id UUID NOT NULL REFERENCES members(id),
    provider_id UUID NOT NULL REFERENCES providers(id),
    amount NUMERIC(12, 2) NOT NULL,
    reason TEXT,
    issued_on DATE NOT NULL,
    created_by VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_credit_grants_member_provider
    ON credit_grants (member_id, provider_id);
";

const CREDIT_USAGES_SQL: &str = r"
CREATE TABLE credit_usages (
    id UUID PRIMARY KEY,
    grant_id UUID NOT NULL REFERENCES credit_grants(id),
    travel_record_id UUID NOT NULL REFERENCES travel_records(id),
    amount NUMERIC(12, 2) NOT NULL,
    created_by VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_credit_usages_record ON credit_usages (travel_record_id);
CREATE INDEX idx_credit_usages_grant ON credit_usages (grant_id);
";

const APPROVAL_RECORDS_SQL: &str = r"
CREATE TABLE approval_records (
    id UUID PRIMARY KEY,
    member_id UUID NOT NULL REFERENCES members(id),
    approval_type VARCHAR(32) NOT NULL
        CHECK (approval_type IN ('background_check', 'clearance', 'tsa')),
    status VARCHAR(16) NOT NULL
        CHECK (status IN ('In Progress', 'Approved', 'Rejected', 'Failed')),
    piv_status VARCHAR(16)
        CHECK (piv_status IN ('pending', 'issued', 'revoked')),
    document_collected BOOLEAN NOT NULL DEFAULT FALSE,
    submitted_on DATE,
    approved_on DATE,
    updated_by VARCHAR(255) NOT NULL,
    last_activity TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (member_id, approval_type)
);
";

const NOTES_SQL: &str = r"
CREATE TABLE notes (
    id UUID PRIMARY KEY,
    member_id UUID REFERENCES members(id),
    travel_record_id UUID REFERENCES travel_records(id),
    body TEXT NOT NULL,
    author VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CHECK (
        (member_id IS NOT NULL AND travel_record_id IS NULL) OR
        (member_id IS NULL AND travel_record_id IS NOT NULL)
    )
);

CREATE INDEX idx_notes_member ON notes (member_id);
CREATE INDEX idx_notes_record ON notes (travel_record_id);
";

const ATTACHMENTS_SQL: &str = r"
CREATE TABLE attachments (
    id UUID PRIMARY KEY,
    member_id UUID REFERENCES members(id),
    travel_record_id UUID REFERENCES travel_records(id),
    filename VARCHAR(512) NOT NULL,
    mime_type VARCHAR(255) NOT NULL,
    file_size BIGINT NOT NULL,
    storage_key VARCHAR(1024) NOT NULL,
    uploaded_by VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CHECK (
        (member_id IS NOT NULL AND travel_record_id IS NULL) OR
        (member_id IS NULL AND travel_record_id IS NOT NULL)
    )
);

CREATE INDEX idx_attachments_member ON attachments (member_id);
CREATE INDEX idx_attachments_record ON attachments (travel_record_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS attachments;
DROP TABLE IF EXISTS notes;
DROP TABLE IF EXISTS approval_records;
DROP TABLE IF EXISTS credit_usages;
DROP TABLE IF EXISTS credit_grants;
DROP TABLE IF EXISTS travel_records;
DROP TABLE IF EXISTS providers;
DROP TABLE IF EXISTS projects;
DROP TABLE IF EXISTS members;
";
