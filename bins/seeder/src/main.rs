//! Database seeder for FieldOps development and testing.
//!
//! Seeds a test member, project, providers, a travel record, and a credit
//! grant for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use fieldops_db::entities::{credit_grants, members, projects, providers, travel_records};

/// Test member ID (consistent for all seeds)
const TEST_MEMBER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test project ID (consistent for all seeds)
const TEST_PROJECT_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Test airline provider ID (consistent for all seeds)
const TEST_AIRLINE_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Test hotel provider ID (consistent for all seeds)
const TEST_HOTEL_ID: &str = "00000000-0000-0000-0000-000000000004";
/// Test travel record ID (consistent for all seeds)
const TEST_RECORD_ID: &str = "00000000-0000-0000-0000-000000000005";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = fieldops_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test member...");
    seed_member(&db).await;

    println!("Seeding test project...");
    seed_project(&db).await;

    println!("Seeding providers...");
    seed_providers(&db).await;

    println!("Seeding travel record...");
    seed_travel_record(&db).await;

    println!("Seeding credit grant...");
    seed_credit_grant(&db).await;

    println!("Seeding complete!");
}

fn id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap()
}

/// Seeds a test member for development.
async fn seed_member(db: &DatabaseConnection) {
    if members::Entity::find_by_id(id(TEST_MEMBER_ID))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test member already exists, skipping");
        return;
    }

    let now = Utc::now();
    members::ActiveModel {
        id: Set(id(TEST_MEMBER_ID)),
        username: Set("jdoe".to_string()),
        full_name: Set("Jordan Doe".to_string()),
        email: Set("jdoe@example.com".to_string()),
        phone: Set(Some("555-0100".to_string())),
        is_active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed member");
}

/// Seeds a test project.
async fn seed_project(db: &DatabaseConnection) {
    if projects::Entity::find_by_id(id(TEST_PROJECT_ID))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test project already exists, skipping");
        return;
    }

    projects::ActiveModel {
        id: Set(id(TEST_PROJECT_ID)),
        name: Set("Substation Refit".to_string()),
        code: Set("SUB-REFIT".to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed project");
}

/// Seeds an airline and a hotel chain.
async fn seed_providers(db: &DatabaseConnection) {
    let rows = [
        (TEST_AIRLINE_ID, "Meridian Air", "airline"),
        (TEST_HOTEL_ID, "Crestline Hotels", "hotel_chain"),
    ];

    for (provider_id, name, kind) in rows {
        if providers::Entity::find_by_id(id(provider_id))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Provider {name} already exists, skipping");
            continue;
        }

        providers::ActiveModel {
            id: Set(id(provider_id)),
            name: Set(name.to_string()),
            kind: Set(kind.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await
        .expect("Failed to seed provider");
    }
}

/// Seeds one flight booking for the test member.
async fn seed_travel_record(db: &DatabaseConnection) {
    if travel_records::Entity::find_by_id(id(TEST_RECORD_ID))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test travel record already exists, skipping");
        return;
    }

    let now = Utc::now();
    travel_records::ActiveModel {
        id: Set(id(TEST_RECORD_ID)),
        confirmation_code: Set("MER-48213".to_string()),
        kind: Set("flight".to_string()),
        member_id: Set(id(TEST_MEMBER_ID)),
        project_id: Set(id(TEST_PROJECT_ID)),
        provider_id: Set(id(TEST_AIRLINE_ID)),
        total_cost: Set(dec!(425.00)),
        travel_date: Set(now.date_naive()),
        address: Set(None),
        archived: Set(false),
        verified: Set(false),
        canceled: Set(false),
        created_by: Set("Seeder".to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed travel record");
}

/// Seeds a credit grant against the airline.
async fn seed_credit_grant(db: &DatabaseConnection) {
    let existing = credit_grants::Entity::find()
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Credit grants already exist, skipping");
        return;
    }

    let now = Utc::now();
    credit_grants::ActiveModel {
        id: Set(Uuid::now_v7()),
        member_id: Set(id(TEST_MEMBER_ID)),
        provider_id: Set(id(TEST_AIRLINE_ID)),
        amount: Set(dec!(150.00)),
        reason: Set(Some("Canceled December flight".to_string())),
        issued_on: Set(now.date_naive()),
        created_by: Set("Seeder".to_string()),
        created_at: Set(now.into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed credit grant");
}
