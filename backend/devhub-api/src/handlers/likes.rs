/// Like handlers - toggle and count endpoints over polymorphic targets
use crate::error::Result;
use crate::middleware::UserId;
use crate::models::TargetType;
use crate::services::EngagementService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ToggleLikeRequest {
    pub target_type: TargetType,
    pub target_id: Uuid,
}

/// Toggle a like; the response reports the resulting state.
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<ToggleLikeRequest>,
) -> Result<HttpResponse> {
    let service = EngagementService::new((**pool).clone());
    let liked = service
        .toggle_like(user.0, req.target_type, req.target_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "liked": liked })))
}

/// Like count for a target
pub async fn get_like_count(
    pool: web::Data<PgPool>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse> {
    let (raw_type, target_id) = path.into_inner();
    let target = TargetType::from_str(&raw_type)?;

    let service = EngagementService::new((**pool).clone());
    let count = service.like_count(target, target_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "count": count })))
}

/// Whether the authenticated user has liked a target
pub async fn check_like(
    pool: web::Data<PgPool>,
    user: UserId,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse> {
    let (raw_type, target_id) = path.into_inner();
    let target = TargetType::from_str(&raw_type)?;

    let service = EngagementService::new((**pool).clone());
    let has_liked = service.has_liked(user.0, target, target_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "has_liked": has_liked })))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/likes/toggle").route(web::post().to(toggle_like)))
        .service(
            web::resource("/likes/{target_type}/{target_id}")
                .route(web::get().to(get_like_count)),
        )
        .service(
            web::resource("/likes/{target_type}/{target_id}/check")
                .route(web::get().to(check_like)),
        );
}
