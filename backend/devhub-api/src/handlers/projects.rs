/// Project handlers - showcased work with repository/live links
use crate::db::project_repo::NewProject;
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
pub struct CreateProjectRequest {
    #[validate(length(min = 3, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[validate(url)]
    pub repository_url: Option<String>,
    #[validate(url)]
    pub live_url: Option<String>,
}

/// Create a new project
pub async fn create_project(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateProjectRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ContentService::new((**pool).clone());
    let project = service
        .create_project(
            user.0,
            NewProject {
                name: &req.name,
                description: &req.description,
                technologies: &req.technologies,
                repository_url: req.repository_url.as_deref(),
                live_url: req.live_url.as_deref(),
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(project))
}

/// Recent projects with author and derived counts
pub async fn list_projects(
    pool: web::Data<PgPool>,
    viewer: MaybeUserId,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    metrics::FEED_REQUESTS_TOTAL
        .with_label_values(&["projects"])
        .inc();

    let service = ContentService::new((**pool).clone());
    let projects = service.list_projects(viewer.0, query.limit()).await?;

    Ok(HttpResponse::Ok().json(projects))
}

/// A single project
pub async fn get_project(
    pool: web::Data<PgPool>,
    viewer: MaybeUserId,
    project_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    match service.get_project(viewer.0, *project_id).await? {
        Some(project) => Ok(HttpResponse::Ok().json(project)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete an owned project
pub async fn delete_project(
    pool: web::Data<PgPool>,
    user: UserId,
    project_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ContentService::new((**pool).clone());
    service.delete_project(*project_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(
        web::resource("/projects/{id}")
            .route(web::get().to(get_project))
            .route(web::delete().to(delete_project)),
    );
}
