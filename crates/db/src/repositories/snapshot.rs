use std::time::Duration;

use crate::models::DbSnapshot;
use chrono::{DateTime, Utc};
use courtwatch_core::Slot;
use eyre::{Result, WrapErr, eyre};
use sqlx::{Pool, Postgres, types::Json};

/// Oldest `updated_at` still considered live at `now`.
pub fn snapshot_cutoff(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>> {
    let ttl = chrono::Duration::from_std(ttl).wrap_err("snapshot TTL out of range")?;
    now.checked_sub_signed(ttl)
        .ok_or_else(|| eyre!("snapshot TTL out of range: {}s", ttl.num_seconds()))
}

/// Loads the snapshot for `chat_id` unless it is older than `ttl`.
pub async fn get_snapshot(
    pool: &Pool<Postgres>,
    chat_id: i64,
    ttl: Duration,
) -> Result<Option<DbSnapshot>> {
    let cutoff = snapshot_cutoff(Utc::now(), ttl)?;

    let snapshot = sqlx::query_as::<_, DbSnapshot>(
        r#"
        SELECT chat_id, slots, updated_at
        FROM slot_snapshots
        WHERE chat_id = $1 AND updated_at > $2
        "#,
    )
    .bind(chat_id)
    .bind(cutoff)
    .fetch_optional(pool)
    .await?;

    if snapshot.is_none() {
        tracing::debug!("No live snapshot for chat_id={}", chat_id);
    }

    Ok(snapshot)
}

pub async fn save_snapshot(pool: &Pool<Postgres>, chat_id: i64, slots: &[Slot]) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO slot_snapshots (chat_id, slots, updated_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (chat_id) DO UPDATE
        SET slots = EXCLUDED.slots,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(chat_id)
    .bind(Json(slots))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    tracing::debug!("Snapshot saved: chat_id={}, slots={}", chat_id, slots.len());
    Ok(())
}

/// Drops snapshots nobody refreshed within `ttl`.
pub async fn purge_expired_snapshots(pool: &Pool<Postgres>, ttl: Duration) -> Result<u64> {
    let cutoff = snapshot_cutoff(Utc::now(), ttl)?;

    let result = sqlx::query(
        r#"
        DELETE FROM slot_snapshots
        WHERE updated_at <= $1
        "#,
    )
    .bind(cutoff)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
