/// devhub API
///
/// Backend for a developer community platform: users publish posts, articles,
/// code snippets, and projects; other users like, comment, and follow. Feeds
/// are assembled at read time with derived like/comment counts.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Row structs and domain enums
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `auth`: Password hashing and JWT tokens
/// - `middleware`: Request extractors and metrics middleware
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
