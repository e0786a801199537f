use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create subscriptions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subscriptions (
            chat_id BIGINT PRIMARY KEY,
            districts JSONB NOT NULL DEFAULT '[]'::jsonb,
            resources JSONB NOT NULL DEFAULT '[]'::jsonb,
            weekdays JSONB NOT NULL DEFAULT '[]'::jsonb,
            time_from VARCHAR(5) NULL,
            time_to VARCHAR(5) NULL,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slot_snapshots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slot_snapshots (
            chat_id BIGINT PRIMARY KEY,
            slots JSONB NOT NULL DEFAULT '[]'::jsonb,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_slot_snapshots_updated_at ON slot_snapshots(updated_at);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
