use crate::models::Project;
use sqlx::PgPool;
use uuid::Uuid;

pub struct NewProject<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub technologies: &'a [String],
    pub repository_url: Option<&'a str>,
    pub live_url: Option<&'a str>,
}

/// Create a new project
pub async fn create_project(
    pool: &PgPool,
    author_id: Uuid,
    project: NewProject<'_>,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (author_id, name, description, technologies, repository_url, live_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, author_id, name, description, technologies, repository_url, live_url,
                  created_at, updated_at
        "#,
    )
    .bind(author_id)
    .bind(project.name)
    .bind(project.description)
    .bind(project.technologies)
    .bind(project.repository_url)
    .bind(project.live_url)
    .fetch_one(pool)
    .await
}

/// Find a project by ID
pub async fn find_by_id(pool: &PgPool, project_id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, author_id, name, description, technologies, repository_url, live_url,
               created_at, updated_at
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(project_id)
    .fetch_optional(pool)
    .await
}

/// Look up only the author of a project
pub async fn find_author(pool: &PgPool, project_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_optional(pool)
        .await
}

/// Most recent projects first
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, author_id, name, description, technologies, repository_url, live_url,
               created_at, updated_at
        FROM projects
        ORDER BY created_at DESC, id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Delete a project; returns true if a row was removed.
pub async fn delete_project(pool: &PgPool, project_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
