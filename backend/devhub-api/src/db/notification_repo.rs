use crate::models::Notification;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a notification row for a recipient
pub async fn insert(
    pool: &PgPool,
    user_id: Uuid,
    kind: &str,
    actor_id: Uuid,
    target_type: Option<&str>,
    target_id: Option<Uuid>,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (user_id, type, actor_id, target_type, target_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, type, actor_id, target_type, target_id, read, created_at
        "#,
    )
    .bind(user_id)
    .bind(kind)
    .bind(actor_id)
    .bind(target_type)
    .bind(target_id)
    .fetch_one(pool)
    .await
}

/// Most recent notifications for a recipient, capped at 50.
pub async fn list_recent(pool: &PgPool, user_id: Uuid) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        r#"
        SELECT id, user_id, type, actor_id, target_type, target_id, read, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT 50
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Mark a notification as read, scoped to its recipient; returns true if a
/// row was updated.
pub async fn mark_read(
    pool: &PgPool,
    notification_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET read = TRUE
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(notification_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Number of unread notifications for a recipient
pub async fn unread_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = FALSE",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
