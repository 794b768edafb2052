/// Unified feed handler
use crate::config::Config;
use crate::error::Result;
use crate::metrics;
use crate::middleware::MaybeUserId;
use crate::models::TargetType;
use crate::services::feed::{FeedQuery, FeedService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
    #[serde(rename = "type")]
    pub target_type: Option<String>,
    pub tag: Option<String>,
}

/// One page of the unified feed across all content types, newest first.
pub async fn get_feed(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    viewer: MaybeUserId,
    params: web::Query<FeedParams>,
) -> Result<HttpResponse> {
    metrics::FEED_REQUESTS_TOTAL
        .with_label_values(&["unified"])
        .inc();

    let params = params.into_inner();

    let target_type = match params.target_type.as_deref() {
        Some(raw) => Some(TargetType::from_str(raw)?),
        None => None,
    };

    let service = FeedService::new((**pool).clone(), &config.feed);
    let page = service
        .unified(
            viewer.0,
            FeedQuery {
                limit: params.limit,
                cursor: params.cursor,
                target_type,
                tag: params.tag.filter(|t| !t.trim().is_empty()),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/feed").route(web::get().to(get_feed)));
}
