use crate::models::Article;
use sqlx::PgPool;
use uuid::Uuid;

pub struct NewArticle<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub excerpt: &'a str,
    pub cover_image: Option<&'a str>,
    pub tags: &'a [String],
    pub read_time: &'a str,
    pub published: bool,
}

/// Create a new article
pub async fn create_article(
    pool: &PgPool,
    author_id: Uuid,
    article: NewArticle<'_>,
) -> Result<Article, sqlx::Error> {
    sqlx::query_as::<_, Article>(
        r#"
        INSERT INTO articles (author_id, title, content, excerpt, cover_image, tags, read_time, published)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, author_id, title, content, excerpt, cover_image, tags, read_time, published,
                  created_at, updated_at
        "#,
    )
    .bind(author_id)
    .bind(article.title)
    .bind(article.content)
    .bind(article.excerpt)
    .bind(article.cover_image)
    .bind(article.tags)
    .bind(article.read_time)
    .bind(article.published)
    .fetch_one(pool)
    .await
}

/// Find an article by ID
pub async fn find_by_id(pool: &PgPool, article_id: Uuid) -> Result<Option<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(
        r#"
        SELECT id, author_id, title, content, excerpt, cover_image, tags, read_time, published,
               created_at, updated_at
        FROM articles
        WHERE id = $1
        "#,
    )
    .bind(article_id)
    .fetch_optional(pool)
    .await
}

/// Look up only the author of an article
pub async fn find_author(pool: &PgPool, article_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM articles WHERE id = $1")
        .bind(article_id)
        .fetch_optional(pool)
        .await
}

/// Most recent published articles first. Drafts never appear in listings.
pub async fn list_published(pool: &PgPool, limit: i64) -> Result<Vec<Article>, sqlx::Error> {
    sqlx::query_as::<_, Article>(
        r#"
        SELECT id, author_id, title, content, excerpt, cover_image, tags, read_time, published,
               created_at, updated_at
        FROM articles
        WHERE published = TRUE
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Delete an article; returns true if a row was removed.
pub async fn delete_article(pool: &PgPool, article_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(article_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
