/// Database access layer
///
/// One repository module per table group; all are plain async functions or
/// small structs over `PgPool`.
pub mod article_repo;
pub mod comment_repo;
pub mod follow_repo;
pub mod like_repo;
pub mod notification_repo;
pub mod post_repo;
pub mod project_repo;
pub mod snippet_repo;
pub mod user_repo;
