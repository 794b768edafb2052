/// User profile handlers
use crate::db::user_repo::{self, UpdateProfileFields};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::PublicUser;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(url)]
    pub profile_image_url: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    #[validate(url)]
    pub github_url: Option<String>,
    #[validate(url)]
    pub twitter_url: Option<String>,
    #[validate(url)]
    pub website_url: Option<String>,
}

/// Public profile of any user
pub async fn get_user(pool: web::Data<PgPool>, user_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(&pool, *user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(user)))
}

/// Partial update of the authenticated user's profile
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let req = req.into_inner();

    let fields = UpdateProfileFields {
        first_name: req.first_name,
        last_name: req.last_name,
        profile_image_url: req.profile_image_url,
        bio: req.bio,
        skills: req.skills,
        github_url: req.github_url,
        twitter_url: req.twitter_url,
        website_url: req.website_url,
    };

    let updated = user_repo::update_profile(&pool, user.0, fields)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(updated)))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users/profile").route(web::put().to(update_profile)))
        .service(web::resource("/users/{id}").route(web::get().to(get_user)));
}
