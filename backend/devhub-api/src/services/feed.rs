/// Unified feed assembly
///
/// The feed is a keyset-paginated projection over the four content tables,
/// newest first, hydrated with authors and derived counts in a fixed number
/// of round-trips per page.
use crate::config::FeedConfig;
use crate::db::{like_repo::LikeRepository, user_repo};
use crate::error::{AppError, Result};
use crate::models::{PublicUser, TargetType};
use crate::services::meta::ContentMeta;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque keyset cursor over (created_at, id)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
    pub created_at: DateTime<Utc>,
    pub id: Uuid,
}

impl FeedCursor {
    pub fn encode(&self) -> String {
        let raw = format!("{}:{}", self.created_at.timestamp_micros(), self.id);
        URL_SAFE_NO_PAD.encode(raw)
    }

    pub fn decode(value: &str) -> Result<Self> {
        let invalid = || AppError::BadRequest("invalid feed cursor".to_string());

        let raw = URL_SAFE_NO_PAD.decode(value).map_err(|_| invalid())?;
        let raw = String::from_utf8(raw).map_err(|_| invalid())?;

        let (micros, id) = raw.split_once(':').ok_or_else(invalid)?;
        let micros: i64 = micros.parse().map_err(|_| invalid())?;

        Ok(FeedCursor {
            created_at: DateTime::from_timestamp_micros(micros).ok_or_else(invalid)?,
            id: Uuid::parse_str(id).map_err(|_| invalid())?,
        })
    }
}

/// Feed query parameters after validation
#[derive(Debug, Default)]
pub struct FeedQuery {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
    pub target_type: Option<TargetType>,
    pub tag: Option<String>,
}

/// One feed entry: the common projection of a content item plus hydration.
#[derive(Debug, Serialize)]
pub struct FeedItem {
    pub target_type: TargetType,
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub author: Option<PublicUser>,
    pub like_count: i64,
    pub comment_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

/// A page of feed items with the cursor for the next page, if any.
#[derive(Debug, Serialize)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct FeedRow {
    id: Uuid,
    author_id: Uuid,
    target_type: String,
    title: Option<String>,
    body: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct FeedService {
    pool: PgPool,
    likes: LikeRepository,
    default_limit: i64,
    max_limit: i64,
}

impl FeedService {
    pub fn new(pool: PgPool, config: &FeedConfig) -> Self {
        let likes = LikeRepository::new(pool.clone());
        Self {
            pool,
            likes,
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        }
    }

    /// Assemble one page of the unified feed.
    pub async fn unified(&self, viewer: Option<Uuid>, query: FeedQuery) -> Result<FeedPage> {
        let limit = query
            .limit
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit);

        let cursor = match &query.cursor {
            Some(raw) => Some(FeedCursor::decode(raw)?),
            None => None,
        };

        // Fetch one extra row to know whether another page exists.
        let mut rows = self.fetch_page(&query, cursor, limit + 1).await?;

        let next_cursor = if rows.len() as i64 > limit {
            rows.truncate(limit as usize);
            rows.last().map(|row| {
                FeedCursor {
                    created_at: row.created_at,
                    id: row.id,
                }
                .encode()
            })
        } else {
            None
        };

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let author_ids: Vec<Uuid> = rows.iter().map(|r| r.author_id).collect();

        let meta = ContentMeta::load(&self.pool, &self.likes, viewer, &ids).await?;
        let authors: HashMap<Uuid, PublicUser> = user_repo::find_by_ids(&self.pool, &author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, PublicUser::from(u)))
            .collect();

        let items = rows
            .into_iter()
            .map(|row| {
                let target = TargetType::from_str(&row.target_type)
                    .map_err(|_| AppError::Internal("unexpected target type in feed".into()))?;

                Ok(FeedItem {
                    target_type: target,
                    id: row.id,
                    title: row.title,
                    body: row.body,
                    tags: row.tags,
                    created_at: row.created_at,
                    author: authors.get(&row.author_id).cloned(),
                    like_count: meta.like_count(target, row.id),
                    comment_count: meta.comment_count(target, row.id),
                    liked: meta.liked(target, row.id),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FeedPage { items, next_cursor })
    }

    async fn fetch_page(
        &self,
        query: &FeedQuery,
        cursor: Option<FeedCursor>,
        limit: i64,
    ) -> Result<Vec<FeedRow>> {
        let rows = sqlx::query_as::<_, FeedRow>(
            r#"
            SELECT id, author_id, target_type, title, body, tags, created_at
            FROM (
                SELECT id, author_id, 'post' AS target_type, NULL::text AS title,
                       content AS body, tags, created_at
                FROM posts
                UNION ALL
                SELECT id, author_id, 'article' AS target_type, title,
                       excerpt AS body, tags, created_at
                FROM articles
                WHERE published = TRUE
                UNION ALL
                SELECT id, author_id, 'snippet' AS target_type, title,
                       description AS body, ARRAY[language] AS tags, created_at
                FROM snippets
                UNION ALL
                SELECT id, author_id, 'project' AS target_type, name AS title,
                       description AS body, technologies AS tags, created_at
                FROM projects
            ) AS items
            WHERE ($1::timestamptz IS NULL OR (created_at, id) < ($1, $2::uuid))
              AND ($3::text IS NULL OR target_type = $3)
              AND ($4::text IS NULL OR $4 = ANY(tags))
            ORDER BY created_at DESC, id DESC
            LIMIT $5
            "#,
        )
        .bind(cursor.map(|c| c.created_at))
        .bind(cursor.map(|c| c.id))
        .bind(query.target_type.map(|t| t.as_str()))
        .bind(query.tag.as_deref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_round_trip() {
        let cursor = FeedCursor {
            created_at: DateTime::from_timestamp_micros(1_700_000_000_123_456).unwrap(),
            id: Uuid::new_v4(),
        };

        let encoded = cursor.encode();
        let decoded = FeedCursor::decode(&encoded).expect("cursor should decode");
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn cursor_rejects_garbage() {
        assert!(FeedCursor::decode("not base64 at all!").is_err());
        assert!(FeedCursor::decode("").is_err());
    }

    #[test]
    fn cursor_rejects_wrong_shape() {
        let missing_separator = URL_SAFE_NO_PAD.encode("1700000000123456");
        assert!(FeedCursor::decode(&missing_separator).is_err());

        let bad_uuid = URL_SAFE_NO_PAD.encode("1700000000123456:not-a-uuid");
        assert!(FeedCursor::decode(&bad_uuid).is_err());

        let bad_micros = URL_SAFE_NO_PAD.encode(format!("abc:{}", Uuid::new_v4()));
        assert!(FeedCursor::decode(&bad_micros).is_err());
    }

    #[test]
    fn cursor_errors_map_to_bad_request() {
        let err = FeedCursor::decode("%%%").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
