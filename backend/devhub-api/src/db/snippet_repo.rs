use crate::models::Snippet;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new code snippet
pub async fn create_snippet(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    description: &str,
    code: &str,
    language: &str,
) -> Result<Snippet, sqlx::Error> {
    sqlx::query_as::<_, Snippet>(
        r#"
        INSERT INTO snippets (author_id, title, description, code, language)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, author_id, title, description, code, language, created_at, updated_at
        "#,
    )
    .bind(author_id)
    .bind(title)
    .bind(description)
    .bind(code)
    .bind(language)
    .fetch_one(pool)
    .await
}

/// Find a snippet by ID
pub async fn find_by_id(pool: &PgPool, snippet_id: Uuid) -> Result<Option<Snippet>, sqlx::Error> {
    sqlx::query_as::<_, Snippet>(
        r#"
        SELECT id, author_id, title, description, code, language, created_at, updated_at
        FROM snippets
        WHERE id = $1
        "#,
    )
    .bind(snippet_id)
    .fetch_optional(pool)
    .await
}

/// Look up only the author of a snippet
pub async fn find_author(pool: &PgPool, snippet_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM snippets WHERE id = $1")
        .bind(snippet_id)
        .fetch_optional(pool)
        .await
}

/// Most recent snippets first
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Snippet>, sqlx::Error> {
    sqlx::query_as::<_, Snippet>(
        r#"
        SELECT id, author_id, title, description, code, language, created_at, updated_at
        FROM snippets
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Delete a snippet; returns true if a row was removed.
pub async fn delete_snippet(pool: &PgPool, snippet_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
        .bind(snippet_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
