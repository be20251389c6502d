//! Repository Traits
//!
//! Interfaces for post persistence. Implementations live in `infra`.

use kernel::id::PostId;

use crate::domain::entity::Post;
use crate::error::PostResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// All posts
    async fn list(&self) -> PostResult<Vec<Post>>;

    async fn find_by_id(&self, id: &PostId) -> PostResult<Option<Post>>;

    /// First post whose `image` equals `image`
    async fn find_by_image(&self, image: &str) -> PostResult<Option<Post>>;

    async fn create(&self, post: &Post) -> PostResult<()>;

    /// Persist every field of an existing post
    async fn update(&self, post: &Post) -> PostResult<()>;

    async fn delete(&self, id: &PostId) -> PostResult<()>;

    /// Destroy the whole backing table
    async fn drop_table(&self) -> PostResult<()>;
}
