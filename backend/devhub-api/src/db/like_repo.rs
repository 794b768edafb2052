use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Repository for like operations over polymorphic targets
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a like; returns true if a new row was created. A concurrent
    /// duplicate submission loses against the unique constraint and reads as
    /// "already liked".
    pub async fn insert(
        &self,
        user_id: Uuid,
        target_type: &str,
        target_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO likes (user_id, target_type, target_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, target_type, target_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(target_type)
        .bind(target_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted.is_some())
    }

    /// Remove a like; returns true if a row was deleted.
    pub async fn remove(
        &self,
        user_id: Uuid,
        target_type: &str,
        target_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM likes
            WHERE user_id = $1 AND target_type = $2 AND target_id = $3
            "#,
        )
        .bind(user_id)
        .bind(target_type)
        .bind(target_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user has liked a target
    pub async fn has_user_liked(
        &self,
        user_id: Uuid,
        target_type: &str,
        target_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE user_id = $1 AND target_type = $2 AND target_id = $3
            )
            "#,
        )
        .bind(user_id)
        .bind(target_type)
        .bind(target_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Like count for a single target
    pub async fn count_for_target(
        &self,
        target_type: &str,
        target_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM likes WHERE target_type = $1 AND target_id = $2",
        )
        .bind(target_type)
        .bind(target_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Like counts for many targets in one round-trip, keyed by
    /// (target_type, target_id). Targets without likes are absent.
    pub async fn batch_counts(
        &self,
        target_ids: &[Uuid],
    ) -> Result<HashMap<(String, Uuid), i64>, sqlx::Error> {
        if target_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (String, Uuid, i64)>(
            r#"
            SELECT target_type, target_id, COUNT(*)
            FROM likes
            WHERE target_id = ANY($1)
            GROUP BY target_type, target_id
            "#,
        )
        .bind(target_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(target_type, target_id, count)| ((target_type, target_id), count))
            .collect())
    }

    /// The subset of the given targets a user has liked, in one round-trip.
    pub async fn batch_user_liked(
        &self,
        user_id: Uuid,
        target_ids: &[Uuid],
    ) -> Result<HashSet<(String, Uuid)>, sqlx::Error> {
        if target_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = sqlx::query_as::<_, (String, Uuid)>(
            r#"
            SELECT target_type, target_id
            FROM likes
            WHERE user_id = $1 AND target_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(target_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
