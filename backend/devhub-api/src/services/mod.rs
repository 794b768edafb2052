/// Business logic layer
///
/// Services compose repositories into the operations the HTTP layer exposes:
/// content CRUD with derived counts, the unified feed, engagement toggles,
/// comment threading, and notification fan-out.
pub mod comments;
pub mod content;
pub mod engagement;
pub mod feed;
pub mod meta;
pub mod notifications;

pub use comments::CommentService;
pub use content::ContentService;
pub use engagement::EngagementService;
pub use feed::FeedService;
pub use notifications::NotificationService;
