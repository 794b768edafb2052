use crate::models::Comment;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Create a new comment on a target
pub async fn create_comment(
    pool: &PgPool,
    user_id: Uuid,
    target_type: &str,
    target_id: Uuid,
    content: &str,
    parent_id: Option<Uuid>,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (user_id, target_type, target_id, content, parent_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, target_type, target_id, content, parent_id, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(target_type)
    .bind(target_id)
    .bind(content)
    .bind(parent_id)
    .fetch_one(pool)
    .await
}

/// Get a single comment by ID
pub async fn find_by_id(pool: &PgPool, comment_id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, user_id, target_type, target_id, content, parent_id, created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

/// All comments for a target in chronological order (thread assembly happens
/// in the service layer).
pub async fn list_for_target(
    pool: &PgPool,
    target_type: &str,
    target_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, user_id, target_type, target_id, content, parent_id, created_at, updated_at
        FROM comments
        WHERE target_type = $1 AND target_id = $2
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(target_type)
    .bind(target_id)
    .fetch_all(pool)
    .await
}

/// Delete a comment owned by the given user; returns true if a row was
/// removed. Replies cascade with the parent.
pub async fn delete_owned(
    pool: &PgPool,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND user_id = $2")
        .bind(comment_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Comment count for a single target
pub async fn count_for_target(
    pool: &PgPool,
    target_type: &str,
    target_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM comments WHERE target_type = $1 AND target_id = $2",
    )
    .bind(target_type)
    .bind(target_id)
    .fetch_one(pool)
    .await
}

/// Comment counts for many targets in one round-trip, keyed by
/// (target_type, target_id).
pub async fn batch_counts(
    pool: &PgPool,
    target_ids: &[Uuid],
) -> Result<HashMap<(String, Uuid), i64>, sqlx::Error> {
    if target_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, (String, Uuid, i64)>(
        r#"
        SELECT target_type, target_id, COUNT(*)
        FROM comments
        WHERE target_id = ANY($1)
        GROUP BY target_type, target_id
        "#,
    )
    .bind(target_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(target_type, target_id, count)| ((target_type, target_id), count))
        .collect())
}
