use std::sync::Arc;

use color_eyre::eyre::Result;
use courtwatch_checker::{LogNotifier, PollScheduler, SlotCollector, SystemClock, WatcherConfig};
use courtwatch_db::{PgStore, create_pool, schema::initialize_database};
use courtwatch_parser::{FetchConfig, SiteClient};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = WatcherConfig::from_env()?;
    let fetch_config = FetchConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting court availability watcher");

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let store = Arc::new(PgStore::new(db_pool, config.snapshot_ttl));
    let client = Arc::new(SiteClient::new(fetch_config)?);
    let clock = Arc::new(SystemClock::new(config.timezone));

    let collector = SlotCollector::new(client, clock.clone())
        .with_lookahead_days(config.lookahead_days)
        .with_past_grace(config.past_grace);
    let scheduler = PollScheduler::new(
        store.clone(),
        store,
        collector,
        Arc::new(LogNotifier),
        clock,
    )
    .with_intervals(config.intervals());

    let handle = Arc::new(scheduler).start();

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    handle.abort();

    Ok(())
}
