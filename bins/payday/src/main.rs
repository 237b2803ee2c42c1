//! Salarium payday runner.
//!
//! Applies the monthly salary allocation to every eligible employee.
//! Safe to re-run within a period: already-allocated employees are
//! skipped.
//!
//! Usage: cargo run --bin payday

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salarium_app::{AdminContext, AllocationService, NoopGateway};
use salarium_db::connect;
use salarium_shared::types::AdminId;
use salarium_shared::AppConfig;

/// Admin identity used when payday runs from the command line rather than
/// for a logged-in portal user.
const SYSTEM_ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salarium=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    let service = AllocationService::new(db, Arc::new(NoopGateway), config.notification.clone());

    let ctx = AdminContext::new(
        AdminId::from_uuid(SYSTEM_ADMIN_ID.parse()?),
        "payday-cli".to_string(),
    );

    let report = service.run_monthly_payroll(&ctx).await?;
    info!(
        period = %report.period,
        allocated = report.allocated,
        skipped = report.skipped,
        notifications_failed = report.notifications_failed,
        "monthly payroll run complete"
    );

    Ok(())
}
