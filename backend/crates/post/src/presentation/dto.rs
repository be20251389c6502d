//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Post;

/// Post as returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: String,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            image: post.image,
            user_id: post.user_id.map(|id| id.to_string()),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// DELETE /image request
#[derive(Debug, Clone, Deserialize)]
pub struct ClearImageRequest {
    /// Public URL currently stored on the post
    pub image: String,
}
