//! Post Service
//!
//! CRUD over the post repository plus image upload handling.

use std::sync::Arc;

use kernel::id::PostId;
use platform::crypto::random_digits;

use crate::application::config::PostConfig;
use crate::domain::entity::{Post, PostFields};
use crate::domain::repository::PostRepository;
use crate::domain::upload::{UploadedFile, is_safe_file_name};
use crate::error::{PostError, PostResult};

pub struct PostService<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
    config: Arc<PostConfig>,
}

impl<R> PostService<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<PostConfig>) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &PostConfig {
        &self.config
    }

    pub async fn list(&self) -> PostResult<Vec<Post>> {
        self.repo.list().await
    }

    /// `None` when the post does not exist
    pub async fn get(&self, id: &PostId) -> PostResult<Option<Post>> {
        self.repo.find_by_id(id).await
    }

    pub async fn create(&self, fields: PostFields) -> PostResult<Post> {
        let mut post = Post::new();
        post.fill(fields);
        self.repo.create(&post).await?;

        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    pub async fn update(&self, id: &PostId, fields: PostFields) -> PostResult<Post> {
        let mut post = self.find_existing(id).await?;
        post.fill(fields);
        self.repo.update(&post).await?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: &PostId) -> PostResult<()> {
        let post = self.find_existing(id).await?;
        self.repo.delete(&post.id).await?;

        tracing::info!(post_id = %post.id, "Post deleted");
        Ok(())
    }

    /// Drop the posts table. Irreversible.
    pub async fn drop_all(&self) -> PostResult<()> {
        self.repo.drop_table().await?;
        tracing::warn!("Posts table dropped");
        Ok(())
    }

    /// Store `file` as `<base_name>-<random digits>.<ext>` in the uploads
    /// directory and return the stored file name.
    ///
    /// `base_name` is used as given; one containing a path separator is
    /// rejected with [`PostError::InvalidUpload`].
    pub async fn save_image(&self, mut file: UploadedFile, base_name: &str) -> PostResult<String> {
        if !is_safe_file_name(base_name) {
            return Err(PostError::InvalidUpload(format!(
                "invalid file name '{base_name}'"
            )));
        }
        if file.size() > self.config.max_upload_bytes {
            return Err(PostError::UploadTooLarge {
                limit: self.config.max_upload_bytes,
            });
        }

        file.rename(format!(
            "{}-{}",
            base_name,
            random_digits(self.config.image_suffix_digits)
        ));

        let path = file.save(&self.config.uploads_dir).await?;
        tracing::info!(path = %path.display(), bytes = file.size(), "Post image saved");

        Ok(file.name_with_extension())
    }

    /// Blank the `image` of the post that references `image_url`.
    ///
    /// Fails with [`PostError::ImageNotFound`] when no post matches.
    pub async fn clear_image(&self, image_url: &str) -> PostResult<Post> {
        // Posts without an image store "", which is never a reference
        if image_url.is_empty() {
            return Err(PostError::ImageNotFound(String::new()));
        }

        let mut post = self
            .repo
            .find_by_image(image_url)
            .await?
            .ok_or_else(|| PostError::ImageNotFound(image_url.to_string()))?;

        post.clear_image();
        self.repo.update(&post).await?;

        tracing::info!(post_id = %post.id, "Post image cleared");
        Ok(post)
    }

    async fn find_existing(&self, id: &PostId) -> PostResult<Post> {
        self.repo.find_by_id(id).await?.ok_or(PostError::NotFound)
    }
}
