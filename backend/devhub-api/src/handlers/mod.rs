/// HTTP request handlers
///
/// One module per resource; each exposes a `register_routes` function wired
/// into the `/api/v1` scope by `main`.
pub mod articles;
pub mod auth;
pub mod comments;
pub mod feed;
pub mod follows;
pub mod likes;
pub mod notifications;
pub mod posts;
pub mod projects;
pub mod snippets;
pub mod users;

use actix_web::web;

/// Register every API route under the enclosing scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    auth::register_routes(cfg);
    users::register_routes(cfg);
    feed::register_routes(cfg);
    posts::register_routes(cfg);
    articles::register_routes(cfg);
    snippets::register_routes(cfg);
    projects::register_routes(cfg);
    likes::register_routes(cfg);
    comments::register_routes(cfg);
    follows::register_routes(cfg);
    notifications::register_routes(cfg);
}
