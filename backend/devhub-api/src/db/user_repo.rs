use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Find user by ID
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Batch find users by IDs (feed/comment author hydration)
pub async fn find_by_ids(pool: &PgPool, user_ids: &[Uuid]) -> Result<Vec<User>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
        .bind(user_ids)
        .fetch_all(pool)
        .await
}

/// Find user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Find user by username
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Create a new user account
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, username, password_hash)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

/// Optional fields for profile updates; `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct UpdateProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub website_url: Option<String>,
}

/// Apply a partial profile update and return the fresh row.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    fields: UpdateProfileFields,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            profile_image_url = COALESCE($4, profile_image_url),
            bio = COALESCE($5, bio),
            skills = COALESCE($6, skills),
            github_url = COALESCE($7, github_url),
            twitter_url = COALESCE($8, twitter_url),
            website_url = COALESCE($9, website_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(fields.first_name)
    .bind(fields.last_name)
    .bind(fields.profile_image_url)
    .bind(fields.bio)
    .bind(fields.skills)
    .bind(fields.github_url)
    .bind(fields.twitter_url)
    .bind(fields.website_url)
    .fetch_optional(pool)
    .await
}
