//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use serde::Deserialize;

/// Post entity
///
/// `image` is an empty string when the post has no image; it is never
/// `NULL` in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub image: String,
    /// Author, when the post was created by a signed-in user
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set assigned onto a post from request data.
///
/// Only the fields present are written; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub user_id: Option<UserId>,
}

impl PostFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.image.is_none()
            && self.user_id.is_none()
    }
}

impl Post {
    /// Blank post with a fresh id
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(),
            title: String::new(),
            content: String::new(),
            image: String::new(),
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assign the provided fields and bump `updated_at`
    pub fn fill(&mut self, fields: PostFields) {
        if let Some(title) = fields.title {
            self.title = title;
        }
        if let Some(content) = fields.content {
            self.content = content;
        }
        if let Some(image) = fields.image {
            self.image = image;
        }
        if let Some(user_id) = fields.user_id {
            self.user_id = Some(user_id);
        }
        self.updated_at = Utc::now();
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    pub fn clear_image(&mut self) {
        self.image.clear();
        self.updated_at = Utc::now();
    }
}

impl Default for Post {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_only_touches_given_fields() {
        let mut post = Post::new();
        post.fill(PostFields {
            title: Some("Hello".into()),
            content: Some("World".into()),
            ..Default::default()
        });

        post.fill(PostFields {
            content: Some("Rust".into()),
            ..Default::default()
        });

        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "Rust");
        assert!(!post.has_image());
    }

    #[test]
    fn test_clear_image_leaves_empty_string() {
        let mut post = Post::new();
        post.fill(PostFields {
            image: Some("/uploads/cover-123.png".into()),
            ..Default::default()
        });
        assert!(post.has_image());

        post.clear_image();
        assert_eq!(post.image, "");
    }

    #[test]
    fn test_fields_deserialize_camel_case() {
        let fields: PostFields = serde_json::from_str(
            r#"{"title":"T","userId":"00000000-0000-0000-0000-000000000000"}"#,
        )
        .unwrap();
        assert_eq!(fields.title.as_deref(), Some("T"));
        assert!(fields.user_id.is_some());
        assert!(fields.content.is_none());
        assert!(!fields.is_empty());
        assert!(PostFields::default().is_empty());
    }
}
