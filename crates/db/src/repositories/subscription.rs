use crate::models::{DbSubscription, bound_to_column};
use chrono::Utc;
use courtwatch_core::Subscription;
use eyre::Result;
use sqlx::{Pool, Postgres, types::Json};

pub async fn get_subscription(
    pool: &Pool<Postgres>,
    chat_id: i64,
) -> Result<Option<DbSubscription>> {
    tracing::debug!("Getting subscription for chat_id={}", chat_id);

    let subscription = sqlx::query_as::<_, DbSubscription>(
        r#"
        SELECT chat_id, districts, resources, weekdays, time_from, time_to, updated_at
        FROM subscriptions
        WHERE chat_id = $1
        "#,
    )
    .bind(chat_id)
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}

pub async fn list_subscriptions(pool: &Pool<Postgres>) -> Result<Vec<DbSubscription>> {
    let subscriptions = sqlx::query_as::<_, DbSubscription>(
        r#"
        SELECT chat_id, districts, resources, weekdays, time_from, time_to, updated_at
        FROM subscriptions
        ORDER BY chat_id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(subscriptions)
}

pub async fn upsert_subscription(pool: &Pool<Postgres>, subscription: &Subscription) -> Result<()> {
    tracing::debug!(
        "Saving subscription: chat_id={}, resources={}, weekdays={}",
        subscription.chat_id,
        subscription.resources.len(),
        subscription.weekdays.len()
    );

    sqlx::query(
        r#"
        INSERT INTO subscriptions (chat_id, districts, resources, weekdays, time_from, time_to, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (chat_id) DO UPDATE
        SET districts = EXCLUDED.districts,
            resources = EXCLUDED.resources,
            weekdays = EXCLUDED.weekdays,
            time_from = EXCLUDED.time_from,
            time_to = EXCLUDED.time_to,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(subscription.chat_id)
    .bind(Json(&subscription.districts))
    .bind(Json(&subscription.resources))
    .bind(Json(&subscription.weekdays))
    .bind(bound_to_column(subscription.time_from))
    .bind(bound_to_column(subscription.time_to))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}
