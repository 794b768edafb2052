/// Engagement service - like and follow toggles with notification fan-out
use crate::db::{follow_repo, like_repo::LikeRepository, user_repo};
use crate::error::{AppError, Result};
use crate::models::{NotificationType, TargetType};
use crate::services::content::find_target_author;
use crate::services::notifications::NotificationService;
use sqlx::PgPool;
use uuid::Uuid;

/// Follower/following counts for a user
#[derive(Debug, serde::Serialize)]
pub struct FollowStats {
    pub followers: i64,
    pub following: i64,
}

#[derive(Clone)]
pub struct EngagementService {
    pool: PgPool,
    likes: LikeRepository,
    notifications: NotificationService,
}

impl EngagementService {
    pub fn new(pool: PgPool) -> Self {
        let likes = LikeRepository::new(pool.clone());
        let notifications = NotificationService::new(pool.clone());
        Self {
            pool,
            likes,
            notifications,
        }
    }

    /// Toggle a like on a target. Returns the resulting state: true when the
    /// like now exists. Concurrent double-submission resolves against the
    /// unique constraint.
    pub async fn toggle_like(
        &self,
        user_id: Uuid,
        target: TargetType,
        target_id: Uuid,
    ) -> Result<bool> {
        let owner_id = find_target_author(&self.pool, target, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", target.as_str())))?;

        if self.likes.remove(user_id, target.as_str(), target_id).await? {
            return Ok(false);
        }

        let inserted = self.likes.insert(user_id, target.as_str(), target_id).await?;

        if inserted {
            self.notifications
                .notify(
                    owner_id,
                    user_id,
                    NotificationType::Like,
                    Some((target, target_id)),
                )
                .await?;
        }

        Ok(true)
    }

    /// Like count for a target (0 for targets nobody has liked)
    pub async fn like_count(&self, target: TargetType, target_id: Uuid) -> Result<i64> {
        Ok(self.likes.count_for_target(target.as_str(), target_id).await?)
    }

    /// Whether the user has liked the target
    pub async fn has_liked(
        &self,
        user_id: Uuid,
        target: TargetType,
        target_id: Uuid,
    ) -> Result<bool> {
        Ok(self
            .likes
            .has_user_liked(user_id, target.as_str(), target_id)
            .await?)
    }

    /// Toggle a follow edge. Returns the resulting state: true when the
    /// follower now follows the target user.
    pub async fn toggle_follow(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool> {
        if follower_id == following_id {
            return Err(AppError::BadRequest(
                "You cannot follow yourself".to_string(),
            ));
        }

        if user_repo::find_by_id(&self.pool, following_id).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        if follow_repo::delete_follow(&self.pool, follower_id, following_id).await? {
            return Ok(false);
        }

        let inserted = follow_repo::create_follow(&self.pool, follower_id, following_id).await?;

        if inserted {
            self.notifications
                .notify(following_id, follower_id, NotificationType::Follow, None)
                .await?;
        }

        Ok(true)
    }

    /// Whether follower follows the given user
    pub async fn is_following(&self, follower_id: Uuid, following_id: Uuid) -> Result<bool> {
        Ok(follow_repo::is_following(&self.pool, follower_id, following_id).await?)
    }

    /// Follower/following counts for a user; 404 for unknown users.
    pub async fn follow_stats(&self, user_id: Uuid) -> Result<FollowStats> {
        if user_repo::find_by_id(&self.pool, user_id).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let followers = follow_repo::follower_count(&self.pool, user_id).await?;
        let following = follow_repo::following_count(&self.pool, user_id).await?;

        Ok(FollowStats {
            followers,
            following,
        })
    }
}
