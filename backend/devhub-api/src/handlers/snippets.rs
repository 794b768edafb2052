/// Snippet handlers - shared code fragments
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
pub struct CreateSnippetRequest {
    #[validate(length(min = 3, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(length(min = 1, max = 20000))]
    pub code: String,
    #[validate(length(min = 1, max = 32))]
    pub language: String,
}

/// Create a new snippet
pub async fn create_snippet(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateSnippetRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::new((**pool).clone());
    let snippet = service
        .create_snippet(user.0, &req.title, &req.description, &req.code, &req.language)
        .await?;

    Ok(HttpResponse::Created().json(snippet))
}

/// Recent snippets with author and derived counts
pub async fn list_snippets(
    pool: web::Data<PgPool>,
    viewer: MaybeUserId,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    metrics::FEED_REQUESTS_TOTAL
        .with_label_values(&["snippets"])
        .inc();

    let service = ContentService::new((**pool).clone());
    let snippets = service.list_snippets(viewer.0, query.limit()).await?;

    Ok(HttpResponse::Ok().json(snippets))
}

/// A single snippet
pub async fn get_snippet(
    pool: web::Data<PgPool>,
    viewer: MaybeUserId,
    snippet_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    match service.get_snippet(viewer.0, *snippet_id).await? {
        Some(snippet) => Ok(HttpResponse::Ok().json(snippet)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete an owned snippet
pub async fn delete_snippet(
    pool: web::Data<PgPool>,
    user: UserId,
    snippet_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    service.delete_snippet(*snippet_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/snippets")
            .route(web::get().to(list_snippets))
            .route(web::post().to(create_snippet)),
    )
    .service(
        web::resource("/snippets/{id}")
            .route(web::get().to(get_snippet))
            .route(web::delete().to(delete_snippet)),
    );
}
