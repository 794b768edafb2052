/// Post handlers - short-form status updates
use crate::error::Result;
use crate::metrics;
use crate::middleware::{MaybeUserId, UserId};
use crate::services::ContentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::new((**pool).clone());
    let post = service.create_post(user.0, &req.content, &req.tags).await?;

    Ok(HttpResponse::Created().json(post))
}

/// Recent posts with author and derived counts
pub async fn list_posts(
    pool: web::Data<PgPool>,
    viewer: MaybeUserId,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    metrics::FEED_REQUESTS_TOTAL
        .with_label_values(&["posts"])
        .inc();

    let service = ContentService::new((**pool).clone());
    let posts = service.list_posts(viewer.0, query.limit()).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// A single post
pub async fn get_post(
    pool: web::Data<PgPool>,
    viewer: MaybeUserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    match service.get_post(viewer.0, *post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete an owned post
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    service.delete_post(*post_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts")
            .route(web::get().to(list_posts))
            .route(web::post().to(create_post)),
    )
    .service(
        web::resource("/posts/{id}")
            .route(web::get().to(get_post))
            .route(web::delete().to(delete_post)),
    );
}
