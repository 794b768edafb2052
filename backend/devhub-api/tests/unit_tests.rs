use chrono::Utc;
/// Unit tests for devhub-api core functionality
///
/// This test module covers:
/// - Domain enum parsing and serialization
/// - Request DTO validation bounds
/// - Response serialization shapes
use devhub_api::handlers::auth::{LoginRequest, RegisterRequest};
use devhub_api::handlers::comments::CreateCommentRequest;
use devhub_api::handlers::posts::CreatePostRequest;
use devhub_api::models::{Notification, NotificationType, Post, TargetType};
use devhub_api::services::content::WithMeta;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

#[test]
fn target_type_round_trips_through_str() {
    let types = vec![
        TargetType::Post,
        TargetType::Article,
        TargetType::Snippet,
        TargetType::Project,
    ];

    for target_type in types {
        let parsed = TargetType::from_str(target_type.as_str()).unwrap();
        assert_eq!(target_type, parsed);
    }
}

#[test]
fn target_type_rejects_unknown_values() {
    assert!(TargetType::from_str("story").is_err());
    assert!(TargetType::from_str("").is_err());
    assert!(TargetType::from_str("Post").is_err());
}

#[test]
fn target_type_serializes_lowercase() {
    let json = serde_json::to_string(&TargetType::Snippet).unwrap();
    assert_eq!(json, "\"snippet\"");

    let deserialized: TargetType = serde_json::from_str("\"article\"").unwrap();
    assert_eq!(deserialized, TargetType::Article);
}

#[test]
fn notification_type_serialization() {
    let types = vec![
        NotificationType::Like,
        NotificationType::Comment,
        NotificationType::Follow,
    ];

    for notification_type in types {
        let json = serde_json::to_string(&notification_type).unwrap();
        let deserialized: NotificationType = serde_json::from_str(&json).unwrap();
        assert_eq!(notification_type, deserialized);
        assert_eq!(json.trim_matches('"'), notification_type.as_str());
    }
}

#[test]
fn notification_kind_serializes_as_type() {
    let notification = Notification {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        kind: "like".to_string(),
        actor_id: Some(Uuid::new_v4()),
        target_type: Some("post".to_string()),
        target_id: Some(Uuid::new_v4()),
        read: false,
        created_at: Utc::now(),
    };

    let json = serde_json::to_value(&notification).unwrap();
    assert_eq!(json["type"], "like");
    assert!(json.get("kind").is_none());
}

#[test]
fn register_request_validation_bounds() {
    let valid = RegisterRequest {
        email: "dev@example.com".to_string(),
        username: "dev_user42".to_string(),
        password: "CorrectHorse1".to_string(),
    };
    assert!(valid.validate().is_ok());

    let bad_email = RegisterRequest {
        email: "not-an-email".to_string(),
        ..clone_register(&valid)
    };
    assert!(bad_email.validate().is_err());

    let short_username = RegisterRequest {
        username: "ab".to_string(),
        ..clone_register(&valid)
    };
    assert!(short_username.validate().is_err());

    let bad_username = RegisterRequest {
        username: "no spaces!".to_string(),
        ..clone_register(&valid)
    };
    assert!(bad_username.validate().is_err());

    let short_password = RegisterRequest {
        password: "Ab1".to_string(),
        ..clone_register(&valid)
    };
    assert!(short_password.validate().is_err());
}

fn clone_register(req: &RegisterRequest) -> RegisterRequest {
    RegisterRequest {
        email: req.email.clone(),
        username: req.username.clone(),
        password: req.password.clone(),
    }
}

#[test]
fn login_request_requires_email_shape() {
    let request = LoginRequest {
        email: "nope".to_string(),
        password: "anything".to_string(),
    };
    assert!(request.validate().is_err());
}

#[test]
fn post_content_length_is_bounded() {
    let empty = CreatePostRequest {
        content: String::new(),
        tags: vec![],
    };
    assert!(empty.validate().is_err());

    let oversized = CreatePostRequest {
        content: "x".repeat(20001),
        tags: vec![],
    };
    assert!(oversized.validate().is_err());

    let ok = CreatePostRequest {
        content: "shipping a new side project".to_string(),
        tags: vec!["rust".to_string()],
    };
    assert!(ok.validate().is_ok());
}

#[test]
fn comment_request_parses_target_type() {
    let request: CreateCommentRequest = serde_json::from_value(serde_json::json!({
        "target_type": "snippet",
        "target_id": Uuid::new_v4(),
        "content": "nice trick"
    }))
    .unwrap();

    assert_eq!(request.target_type, TargetType::Snippet);
    assert!(request.parent_id.is_none());
    assert!(request.validate().is_ok());

    let unknown = serde_json::from_value::<CreateCommentRequest>(serde_json::json!({
        "target_type": "gist",
        "target_id": Uuid::new_v4(),
        "content": "nope"
    }));
    assert!(unknown.is_err());
}

#[test]
fn with_meta_flattens_item_fields() {
    let post = Post {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        content: "hello".to_string(),
        tags: vec!["rust".to_string()],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let post_id = post.id;

    let decorated = WithMeta {
        item: post,
        author: None,
        like_count: 3,
        comment_count: 1,
        liked: None,
    };

    let json = serde_json::to_value(&decorated).unwrap();
    assert_eq!(json["id"], serde_json::json!(post_id));
    assert_eq!(json["content"], "hello");
    assert_eq!(json["like_count"], 3);
    assert_eq!(json["comment_count"], 1);
    // Anonymous viewers get no liked flag at all.
    assert!(json.get("liked").is_none());
}

#[test]
fn with_meta_includes_liked_for_viewers() {
    let post = Post {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        content: "hello".to_string(),
        tags: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let decorated = WithMeta {
        item: post,
        author: None,
        like_count: 0,
        comment_count: 0,
        liked: Some(true),
    };

    let json = serde_json::to_value(&decorated).unwrap();
    assert_eq!(json["liked"], true);
}
