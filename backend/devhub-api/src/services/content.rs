/// Content service - CRUD and listings for posts, articles, snippets and
/// projects, hydrated with author and derived engagement counts.
use crate::db::{
    article_repo, like_repo::LikeRepository, post_repo, project_repo, snippet_repo, user_repo,
};
use crate::error::{AppError, Result};
use crate::models::{Article, Post, Project, PublicUser, Snippet, TargetType};
use crate::services::meta::ContentMeta;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// A content item decorated with its author and derived counts.
#[derive(Debug, Serialize)]
pub struct WithMeta<T: Serialize> {
    #[serde(flatten)]
    pub item: T,
    pub author: Option<PublicUser>,
    pub like_count: i64,
    pub comment_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

/// Resolve the author of a polymorphic target, or `None` if the target does
/// not exist.
pub async fn find_target_author(
    pool: &PgPool,
    target: TargetType,
    target_id: Uuid,
) -> Result<Option<Uuid>> {
    let author = match target {
        TargetType::Post => post_repo::find_author(pool, target_id).await?,
        TargetType::Article => article_repo::find_author(pool, target_id).await?,
        TargetType::Snippet => snippet_repo::find_author(pool, target_id).await?,
        TargetType::Project => project_repo::find_author(pool, target_id).await?,
    };

    Ok(author)
}

#[derive(Clone)]
pub struct ContentService {
    pool: PgPool,
    likes: LikeRepository,
}

impl ContentService {
    pub fn new(pool: PgPool) -> Self {
        let likes = LikeRepository::new(pool.clone());
        Self { pool, likes }
    }

    async fn authors_by_id(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, PublicUser>> {
        let users = user_repo::find_by_ids(&self.pool, ids).await?;
        Ok(users
            .into_iter()
            .map(|u| (u.id, PublicUser::from(u)))
            .collect())
    }

    async fn decorate<T, F>(
        &self,
        target: TargetType,
        viewer: Option<Uuid>,
        items: Vec<T>,
        parts: F,
    ) -> Result<Vec<WithMeta<T>>>
    where
        T: Serialize,
        F: Fn(&T) -> (Uuid, Uuid),
    {
        let (ids, author_ids): (Vec<Uuid>, Vec<Uuid>) = items.iter().map(&parts).unzip();

        let meta = ContentMeta::load(&self.pool, &self.likes, viewer, &ids).await?;
        let authors = self.authors_by_id(&author_ids).await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let (id, author_id) = parts(&item);
                WithMeta {
                    author: authors.get(&author_id).cloned(),
                    like_count: meta.like_count(target, id),
                    comment_count: meta.comment_count(target, id),
                    liked: meta.liked(target, id),
                    item,
                }
            })
            .collect())
    }

    async fn decorate_one<T: Serialize>(
        &self,
        target: TargetType,
        viewer: Option<Uuid>,
        item: T,
        id: Uuid,
        author_id: Uuid,
    ) -> Result<WithMeta<T>> {
        let mut decorated = self
            .decorate(target, viewer, vec![item], |_| (id, author_id))
            .await?;

        decorated
            .pop()
            .ok_or_else(|| AppError::Internal("decoration produced no item".into()))
    }

    /// Shared owner-only delete flow: 404 when absent, 403 for non-owners.
    async fn authorize_owner(
        &self,
        target: TargetType,
        target_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        match find_target_author(&self.pool, target, target_id).await? {
            None => Err(AppError::NotFound(format!(
                "{} not found",
                target.as_str()
            ))),
            Some(author_id) if author_id != user_id => Err(AppError::Forbidden(format!(
                "You don't have permission to delete this {}",
                target.as_str()
            ))),
            Some(_) => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    pub async fn create_post(
        &self,
        author_id: Uuid,
        content: &str,
        tags: &[String],
    ) -> Result<Post> {
        Ok(post_repo::create_post(&self.pool, author_id, content, tags).await?)
    }

    pub async fn list_posts(
        &self,
        viewer: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<WithMeta<Post>>> {
        let posts = post_repo::list_recent(&self.pool, limit).await?;
        self.decorate(TargetType::Post, viewer, posts, |p| (p.id, p.author_id))
            .await
    }

    pub async fn get_post(
        &self,
        viewer: Option<Uuid>,
        post_id: Uuid,
    ) -> Result<Option<WithMeta<Post>>> {
        match post_repo::find_by_id(&self.pool, post_id).await? {
            Some(post) => {
                let (id, author_id) = (post.id, post.author_id);
                Ok(Some(
                    self.decorate_one(TargetType::Post, viewer, post, id, author_id)
                        .await?,
                ))
            }
            None => Ok(None),
        }
    }

    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        self.authorize_owner(TargetType::Post, post_id, user_id)
            .await?;
        post_repo::delete_post(&self.pool, post_id).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Articles
    // ------------------------------------------------------------------

    pub async fn create_article(
        &self,
        author_id: Uuid,
        article: article_repo::NewArticle<'_>,
    ) -> Result<Article> {
        Ok(article_repo::create_article(&self.pool, author_id, article).await?)
    }

    pub async fn list_articles(
        &self,
        viewer: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<WithMeta<Article>>> {
        let articles = article_repo::list_published(&self.pool, limit).await?;
        self.decorate(TargetType::Article, viewer, articles, |a| {
            (a.id, a.author_id)
        })
        .await
    }

    pub async fn get_article(
        &self,
        viewer: Option<Uuid>,
        article_id: Uuid,
    ) -> Result<Option<WithMeta<Article>>> {
        match article_repo::find_by_id(&self.pool, article_id).await? {
            Some(article) => {
                let (id, author_id) = (article.id, article.author_id);
                Ok(Some(
                    self.decorate_one(TargetType::Article, viewer, article, id, author_id)
                        .await?,
                ))
            }
            None => Ok(None),
        }
    }

    pub async fn delete_article(&self, article_id: Uuid, user_id: Uuid) -> Result<()> {
        self.authorize_owner(TargetType::Article, article_id, user_id)
            .await?;
        article_repo::delete_article(&self.pool, article_id).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Snippets
    // ------------------------------------------------------------------

    pub async fn create_snippet(
        &self,
        author_id: Uuid,
        title: &str,
        description: &str,
        code: &str,
        language: &str,
    ) -> Result<Snippet> {
        Ok(
            snippet_repo::create_snippet(&self.pool, author_id, title, description, code, language)
                .await?,
        )
    }

    pub async fn list_snippets(
        &self,
        viewer: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<WithMeta<Snippet>>> {
        let snippets = snippet_repo::list_recent(&self.pool, limit).await?;
        self.decorate(TargetType::Snippet, viewer, snippets, |s| {
            (s.id, s.author_id)
        })
        .await
    }

    pub async fn get_snippet(
        &self,
        viewer: Option<Uuid>,
        snippet_id: Uuid,
    ) -> Result<Option<WithMeta<Snippet>>> {
        match snippet_repo::find_by_id(&self.pool, snippet_id).await? {
            Some(snippet) => {
                let (id, author_id) = (snippet.id, snippet.author_id);
                Ok(Some(
                    self.decorate_one(TargetType::Snippet, viewer, snippet, id, author_id)
                        .await?,
                ))
            }
            None => Ok(None),
        }
    }

    pub async fn delete_snippet(&self, snippet_id: Uuid, user_id: Uuid) -> Result<()> {
        self.authorize_owner(TargetType::Snippet, snippet_id, user_id)
            .await?;
        snippet_repo::delete_snippet(&self.pool, snippet_id).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub async fn create_project(
        &self,
        author_id: Uuid,
        project: project_repo::NewProject<'_>,
    ) -> Result<Project> {
        Ok(project_repo::create_project(&self.pool, author_id, project).await?)
    }

    pub async fn list_projects(
        &self,
        viewer: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<WithMeta<Project>>> {
        let projects = project_repo::list_recent(&self.pool, limit).await?;
        self.decorate(TargetType::Project, viewer, projects, |p| {
            (p.id, p.author_id)
        })
        .await
    }

    pub async fn get_project(
        &self,
        viewer: Option<Uuid>,
        project_id: Uuid,
    ) -> Result<Option<WithMeta<Project>>> {
        match project_repo::find_by_id(&self.pool, project_id).await? {
            Some(project) => {
                let (id, author_id) = (project.id, project.author_id);
                Ok(Some(
                    self.decorate_one(TargetType::Project, viewer, project, id, author_id)
                        .await?,
                ))
            }
            None => Ok(None),
        }
    }

    pub async fn delete_project(&self, project_id: Uuid, user_id: Uuid) -> Result<()> {
        self.authorize_owner(TargetType::Project, project_id, user_id)
            .await?;
        project_repo::delete_project(&self.pool, project_id).await?;
        Ok(())
    }
}
