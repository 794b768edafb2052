/// Article handlers - long-form writing, listed only when published
use crate::db::article_repo::NewArticle;
use crate::error::Result;
use crate::handlers::posts::ListQuery;
use crate::metrics;
use crate::middleware::{MaybeUserId, UserId};
use crate::services::ContentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[validate(length(min = 3, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
    #[validate(length(min = 1, max = 500))]
    pub excerpt: String,
    #[validate(url)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(length(min = 1, max = 32))]
    pub read_time: String,
    #[serde(default)]
    pub published: bool,
}

/// Create a new article
pub async fn create_article(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateArticleRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::new((**pool).clone());
    let article = service
        .create_article(
            user.0,
            NewArticle {
                title: &req.title,
                content: &req.content,
                excerpt: &req.excerpt,
                cover_image: req.cover_image.as_deref(),
                tags: &req.tags,
                read_time: &req.read_time,
                published: req.published,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(article))
}

/// Recent published articles with author and derived counts
pub async fn list_articles(
    pool: web::Data<PgPool>,
    viewer: MaybeUserId,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    metrics::FEED_REQUESTS_TOTAL
        .with_label_values(&["articles"])
        .inc();

    let service = ContentService::new((**pool).clone());
    let articles = service.list_articles(viewer.0, query.limit()).await?;

    Ok(HttpResponse::Ok().json(articles))
}

/// A single article
pub async fn get_article(
    pool: web::Data<PgPool>,
    viewer: MaybeUserId,
    article_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    match service.get_article(viewer.0, *article_id).await? {
        Some(article) => Ok(HttpResponse::Ok().json(article)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete an owned article
pub async fn delete_article(
    pool: web::Data<PgPool>,
    user: UserId,
    article_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    service.delete_article(*article_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/articles")
            .route(web::get().to(list_articles))
            .route(web::post().to(create_article)),
    )
    .service(
        web::resource("/articles/{id}")
            .route(web::get().to(get_article))
            .route(web::delete().to(delete_article)),
    );
}
