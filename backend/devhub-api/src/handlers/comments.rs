/// Comment handlers - creation, threaded listing, deletion
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::TargetType;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub target_type: TargetType,
    pub target_id: Uuid,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    pub parent_id: Option<Uuid>,
}

/// Create a comment, optionally as a reply to another comment on the same
/// target.
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(
            user.0,
            req.target_type,
            req.target_id,
            &req.content,
            req.parent_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Threaded comments for a target
pub async fn get_comments(
    pool: web::Data<PgPool>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse> {
    let (raw_type, target_id) = path.into_inner();
    let target = TargetType::from_str(&raw_type)?;

    let service = CommentService::new((**pool).clone());
    let thread = service.thread_for_target(target, target_id).await?;

    Ok(HttpResponse::Ok().json(thread))
}

/// Delete an owned comment (replies go with it)
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user: UserId,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service.delete_comment(*comment_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/comments").route(web::post().to(create_comment)))
        .service(
            web::resource("/comments/{target_type}/{target_id}")
                .route(web::get().to(get_comments)),
        )
        .service(web::resource("/comments/{id}").route(web::delete().to(delete_comment)));
}
