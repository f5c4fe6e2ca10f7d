//! FieldOps API Server
//!
//! Main entry point for the FieldOps backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fieldops_api::{AppState, create_router};
use fieldops_core::storage::{StorageConfig, StorageProvider, StorageService};
use fieldops_db::connect;
use fieldops_shared::config::StorageSettings;
use fieldops_shared::geocode::GeoService;
use fieldops_shared::AppConfig;

/// Builds the storage service from the optional settings block.
fn build_storage(settings: &StorageSettings) -> anyhow::Result<StorageService> {
    let provider = match settings.provider.as_str() {
        "s3" => StorageProvider::s3(
            settings.endpoint.clone().unwrap_or_default(),
            settings.bucket.clone().unwrap_or_default(),
            settings.access_key_id.clone().unwrap_or_default(),
            settings.secret_access_key.clone().unwrap_or_default(),
            settings.region.clone().unwrap_or_else(|| "auto".to_string()),
        ),
        // Azure: account name arrives in access_key_id, container in bucket.
        "azure_blob" => StorageProvider::azure_blob(
            settings.access_key_id.clone().unwrap_or_default(),
            settings.secret_access_key.clone().unwrap_or_default(),
            settings.bucket.clone().unwrap_or_default(),
        ),
        "local" => StorageProvider::local_fs(
            settings.root.clone().unwrap_or_else(|| "./storage".to_string()),
        ),
        other => anyhow::bail!("unknown storage provider: {other}"),
    };

    Ok(StorageService::from_config(StorageConfig::new(provider))?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldops=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Storage is optional; attachment links degrade without it.
    let storage = match &config.storage {
        Some(settings) => match build_storage(settings) {
            Ok(service) => {
                info!(provider = service.provider_name(), "Storage configured");
                Some(Arc::new(service))
            }
            Err(e) => {
                warn!(error = %e, "Storage misconfigured; attachment links disabled");
                None
            }
        },
        None => None,
    };

    // Geocoding is optional; the travel map degrades without it.
    let geo = match config.geocoding.clone() {
        Some(settings) => match GeoService::new(settings) {
            Ok(service) => {
                info!("Geocoding configured");
                Some(Arc::new(service))
            }
            Err(e) => {
                warn!(error = %e, "Geocoding misconfigured; map disabled");
                None
            }
        },
        None => None,
    };

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage,
        geo,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
