/// Comment service - creation, threaded retrieval, and deletion
use crate::db::{comment_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, NotificationType, PublicUser, TargetType};
use crate::services::content::find_target_author;
use crate::services::notifications::NotificationService;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A comment with its author and nested replies.
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    pub id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Option<PublicUser>,
    pub children: Vec<CommentNode>,
}

/// Assemble a parent-pointer tree from a chronologically ordered row set.
///
/// Rows whose parent is not in the set (or that point at themselves) are
/// promoted to roots, so a fetched row is never silently hidden.
pub fn build_thread(
    rows: Vec<Comment>,
    authors: &HashMap<Uuid, PublicUser>,
) -> Vec<CommentNode> {
    let known: HashSet<Uuid> = rows.iter().map(|c| c.id).collect();
    let mut children: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    let mut roots: Vec<Comment> = Vec::new();

    for row in rows {
        match row.parent_id {
            Some(parent) if parent != row.id && known.contains(&parent) => {
                children.entry(parent).or_default().push(row);
            }
            _ => roots.push(row),
        }
    }

    roots
        .into_iter()
        .map(|row| attach(row, &mut children, authors))
        .collect()
}

fn attach(
    row: Comment,
    children: &mut HashMap<Uuid, Vec<Comment>>,
    authors: &HashMap<Uuid, PublicUser>,
) -> CommentNode {
    let kids = children.remove(&row.id).unwrap_or_default();

    CommentNode {
        id: row.id,
        target_type: row.target_type,
        target_id: row.target_id,
        parent_id: row.parent_id,
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
        author: authors.get(&row.user_id).cloned(),
        children: kids
            .into_iter()
            .map(|kid| attach(kid, children, authors))
            .collect(),
    }
}

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
    notifications: NotificationService,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        let notifications = NotificationService::new(pool.clone());
        Self {
            pool,
            notifications,
        }
    }

    /// Create a comment on a target, optionally as a reply. The parent must
    /// belong to the same target.
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        target: TargetType,
        target_id: Uuid,
        content: &str,
        parent_id: Option<Uuid>,
    ) -> Result<Comment> {
        let owner_id = find_target_author(&self.pool, target, target_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", target.as_str())))?;

        if let Some(parent) = parent_id {
            let parent_row = comment_repo::find_by_id(&self.pool, parent)
                .await?
                .ok_or_else(|| AppError::BadRequest("parent comment not found".to_string()))?;

            if parent_row.target_type != target.as_str() || parent_row.target_id != target_id {
                return Err(AppError::BadRequest(
                    "parent comment belongs to a different target".to_string(),
                ));
            }
        }

        let comment = comment_repo::create_comment(
            &self.pool,
            user_id,
            target.as_str(),
            target_id,
            content,
            parent_id,
        )
        .await?;

        self.notifications
            .notify(
                owner_id,
                user_id,
                NotificationType::Comment,
                Some((target, target_id)),
            )
            .await?;

        Ok(comment)
    }

    /// Threaded comments for a target, replies nested under their parents in
    /// chronological order.
    pub async fn thread_for_target(
        &self,
        target: TargetType,
        target_id: Uuid,
    ) -> Result<Vec<CommentNode>> {
        let rows = comment_repo::list_for_target(&self.pool, target.as_str(), target_id).await?;

        let author_ids: Vec<Uuid> = rows.iter().map(|c| c.user_id).collect();
        let authors: HashMap<Uuid, PublicUser> = user_repo::find_by_ids(&self.pool, &author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, PublicUser::from(u)))
            .collect();

        Ok(build_thread(rows, &authors))
    }

    /// Delete a comment; only its author may do so. Replies cascade.
    pub async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> Result<()> {
        let comment = comment_repo::find_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        if comment.user_id != user_id {
            return Err(AppError::Forbidden(
                "You don't have permission to delete this comment".to_string(),
            ));
        }

        comment_repo::delete_owned(&self.pool, comment_id, user_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: Uuid, parent_id: Option<Uuid>, content: &str) -> Comment {
        Comment {
            id,
            user_id: Uuid::new_v4(),
            target_type: "post".to_string(),
            target_id: Uuid::new_v4(),
            content: content.to_string(),
            parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn replies_nest_under_their_parent() {
        let root_id = Uuid::new_v4();
        let reply_id = Uuid::new_v4();
        let rows = vec![
            comment(root_id, None, "root"),
            comment(reply_id, Some(root_id), "reply"),
            comment(Uuid::new_v4(), Some(reply_id), "nested reply"),
        ];

        let thread = build_thread(rows, &HashMap::new());

        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].content, "root");
        assert_eq!(thread[0].children.len(), 1);
        assert_eq!(thread[0].children[0].content, "reply");
        assert_eq!(thread[0].children[0].children.len(), 1);
        assert_eq!(thread[0].children[0].children[0].content, "nested reply");
    }

    #[test]
    fn siblings_keep_chronological_order() {
        let root_id = Uuid::new_v4();
        let rows = vec![
            comment(root_id, None, "root"),
            comment(Uuid::new_v4(), Some(root_id), "first"),
            comment(Uuid::new_v4(), Some(root_id), "second"),
        ];

        let thread = build_thread(rows, &HashMap::new());

        assert_eq!(thread[0].children.len(), 2);
        assert_eq!(thread[0].children[0].content, "first");
        assert_eq!(thread[0].children[1].content, "second");
    }

    #[test]
    fn orphaned_reply_is_promoted_to_root() {
        let missing_parent = Uuid::new_v4();
        let rows = vec![
            comment(Uuid::new_v4(), None, "root"),
            comment(Uuid::new_v4(), Some(missing_parent), "orphan"),
        ];

        let thread = build_thread(rows, &HashMap::new());

        assert_eq!(thread.len(), 2);
        assert_eq!(thread[1].content, "orphan");
        assert!(thread[1].children.is_empty());
    }

    #[test]
    fn self_referencing_comment_does_not_recurse() {
        let id = Uuid::new_v4();
        let rows = vec![comment(id, Some(id), "loop")];

        let thread = build_thread(rows, &HashMap::new());

        assert_eq!(thread.len(), 1);
        assert!(thread[0].children.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_thread() {
        let thread = build_thread(Vec::new(), &HashMap::new());
        assert!(thread.is_empty());
    }
}
