/// Authentication handlers: register, login, refresh, current user
use crate::auth::{password, token};
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::PublicUser;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 32), custom(function = validate_username))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
struct AuthResponse {
    user: PublicUser,
    tokens: token::TokenPair,
}

fn validate_username(username: &str) -> std::result::Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("username");
        err.message = Some("username may only contain letters, digits and underscores".into());
        Err(err)
    }
}

/// Create a new account and issue a token pair
pub async fn register(
    pool: web::Data<PgPool>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if user_repo::find_by_email(&pool, &req.email).await?.is_some() {
        return Err(AppError::Conflict("email already registered".to_string()));
    }

    if user_repo::find_by_username(&pool, &req.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("username already taken".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;
    let user = user_repo::create_user(&pool, &req.email, &req.username, &password_hash).await?;
    let tokens = token::issue_pair(user.id)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        user: PublicUser::from(user),
        tokens,
    }))
}

/// Verify credentials and issue a token pair
pub async fn login(pool: web::Data<PgPool>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    req.validate()?;

    let user = user_repo::find_by_email(&pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let tokens = token::issue_pair(user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: PublicUser::from(user),
        tokens,
    }))
}

/// Exchange a refresh token for a fresh pair
pub async fn refresh(
    pool: web::Data<PgPool>,
    req: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    let user_id = token::authenticate_refresh(&req.refresh_token)?;

    // The account may have been deleted since the token was issued.
    if user_repo::find_by_id(&pool, user_id).await?.is_none() {
        return Err(AppError::Unauthorized("unknown account".to_string()));
    }

    let tokens = token::issue_pair(user_id)?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// The authenticated user's own profile
pub async fn me(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(HttpResponse::Ok().json(PublicUser::from(user)))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/me", web::get().to(me)),
    );
}
