/// Derived engagement metadata for content items
///
/// Counts are never stored; they are aggregated at read time. The loaders
/// here batch over a whole page of items so a listing costs a fixed number of
/// round-trips regardless of page size.
use crate::db::{comment_repo, like_repo::LikeRepository};
use crate::error::Result;
use crate::models::TargetType;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Batched like/comment counts and the viewer's liked set for a page of
/// content items.
pub struct ContentMeta {
    like_counts: HashMap<(String, Uuid), i64>,
    comment_counts: HashMap<(String, Uuid), i64>,
    viewer_liked: Option<HashSet<(String, Uuid)>>,
}

impl ContentMeta {
    /// Load metadata for the given target ids. Three queries total (two when
    /// anonymous), independent of item count.
    pub async fn load(
        pool: &PgPool,
        likes: &LikeRepository,
        viewer: Option<Uuid>,
        target_ids: &[Uuid],
    ) -> Result<Self> {
        let like_counts = likes.batch_counts(target_ids).await?;
        let comment_counts = comment_repo::batch_counts(pool, target_ids).await?;

        let viewer_liked = match viewer {
            Some(user_id) => Some(likes.batch_user_liked(user_id, target_ids).await?),
            None => None,
        };

        Ok(Self {
            like_counts,
            comment_counts,
            viewer_liked,
        })
    }

    pub fn like_count(&self, target: TargetType, id: Uuid) -> i64 {
        self.like_counts
            .get(&(target.as_str().to_string(), id))
            .copied()
            .unwrap_or(0)
    }

    pub fn comment_count(&self, target: TargetType, id: Uuid) -> i64 {
        self.comment_counts
            .get(&(target.as_str().to_string(), id))
            .copied()
            .unwrap_or(0)
    }

    /// `None` for anonymous viewers, `Some(bool)` otherwise.
    pub fn liked(&self, target: TargetType, id: Uuid) -> Option<bool> {
        self.viewer_liked
            .as_ref()
            .map(|set| set.contains(&(target.as_str().to_string(), id)))
    }
}
