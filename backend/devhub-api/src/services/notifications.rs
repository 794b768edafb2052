/// Notification fan-out and retrieval
use crate::db::notification_repo;
use crate::error::Result;
use crate::models::{Notification, NotificationType, TargetType};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
}

impl NotificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a typed event for a recipient. Actions on your own content are
    /// not notified.
    pub async fn notify(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        kind: NotificationType,
        target: Option<(TargetType, Uuid)>,
    ) -> Result<()> {
        if recipient_id == actor_id {
            return Ok(());
        }

        let (target_type, target_id) = match target {
            Some((t, id)) => (Some(t.as_str()), Some(id)),
            None => (None, None),
        };

        notification_repo::insert(
            &self.pool,
            recipient_id,
            kind.as_str(),
            actor_id,
            target_type,
            target_id,
        )
        .await?;

        Ok(())
    }

    /// Most recent notifications for the recipient
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Notification>> {
        Ok(notification_repo::list_recent(&self.pool, user_id).await?)
    }

    /// Mark one notification as read; false if it does not exist or belongs
    /// to someone else.
    pub async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(notification_repo::mark_read(&self.pool, notification_id, user_id).await?)
    }

    /// Count of unread notifications
    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        Ok(notification_repo::unread_count(&self.pool, user_id).await?)
    }
}
