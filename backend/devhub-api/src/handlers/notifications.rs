/// Notification handlers
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::services::NotificationService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// Most recent notifications for the authenticated user
pub async fn list_notifications(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let service = NotificationService::new((**pool).clone());
    let notifications = service.list(user.0).await?;

    Ok(HttpResponse::Ok().json(notifications))
}

/// Unread notification count
pub async fn unread_count(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let service = NotificationService::new((**pool).clone());
    let count = service.unread_count(user.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "count": count })))
}

/// Mark one notification as read; only the recipient may do so.
pub async fn mark_as_read(
    pool: web::Data<PgPool>,
    user: UserId,
    notification_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = NotificationService::new((**pool).clone());

    if !service.mark_read(*notification_id, user.0).await? {
        return Err(AppError::NotFound("notification not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/notifications").route(web::get().to(list_notifications)))
        .service(web::resource("/notifications/unread/count").route(web::get().to(unread_count)))
        .service(web::resource("/notifications/{id}/read").route(web::put().to(mark_as_read)));
}
