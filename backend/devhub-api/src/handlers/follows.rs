/// Follow handlers - toggle, check, and stats endpoints
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::EngagementService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ToggleFollowRequest {
    pub following_id: Uuid,
}

/// Toggle a follow edge; the response reports the resulting state.
pub async fn toggle_follow(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<ToggleFollowRequest>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let following = service.toggle_follow(user.0, req.following_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "following": following })))
}

/// Whether the authenticated user follows the given user
pub async fn check_follow(
    pool: web::Data<PgPool>,
    user: UserId,
    following_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let is_following = service.is_following(user.0, *following_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "is_following": is_following })))
}

/// Follower/following counts for a user
pub async fn follow_stats(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let stats = service.follow_stats(*user_id).await?;

    Ok(HttpResponse::Ok().json(stats))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/follows/toggle").route(web::post().to(toggle_follow)))
        .service(web::resource("/follows/{user_id}/check").route(web::get().to(check_follow)))
        .service(web::resource("/follows/{user_id}/stats").route(web::get().to(follow_stats)));
}
