//! HTTP Handlers

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::PostId;
use std::sync::Arc;

use crate::application::{PostConfig, PostService};
use crate::domain::entity::PostFields;
use crate::domain::repository::PostRepository;
use crate::domain::upload::{UploadedFile, slugify};
use crate::error::{PostError, PostResult};
use crate::presentation::dto::{ClearImageRequest, PostResponse};

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

/// Shared state for post handlers
#[derive(Clone)]
pub struct PostAppState<R>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<PostConfig>,
}

impl<R> PostAppState<R>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    fn service(&self) -> PostService<R> {
        PostService::new(self.repo.clone(), self.config.clone())
    }
}

/// GET /api/posts
pub async fn list_posts<R>(State(state): State<PostAppState<R>>) -> PostResult<Json<Vec<PostResponse>>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let posts = state.service().list().await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/{id}
pub async fn get_post<R>(
    State(state): State<PostAppState<R>>,
    Path(id): Path<PostId>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post = state.service().get(&id).await?.ok_or(PostError::NotFound)?;
    Ok(Json(post.into()))
}

/// POST /api/posts
pub async fn create_post<R>(
    State(state): State<PostAppState<R>>,
    Json(fields): Json<PostFields>,
) -> PostResult<impl IntoResponse>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post = state.service().create(fields).await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// PUT /api/posts/{id}
pub async fn update_post<R>(
    State(state): State<PostAppState<R>>,
    Path(id): Path<PostId>,
    Json(fields): Json<PostFields>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post = state.service().update(&id, fields).await?;
    Ok(Json(post.into()))
}

/// DELETE /api/posts/{id}
pub async fn delete_post<R>(
    State(state): State<PostAppState<R>>,
    Path(id): Path<PostId>,
) -> PostResult<StatusCode>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    state.service().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/{id}/image
///
/// Stores the `image` multipart field under a name derived from the post
/// title and points the post at its public URL.
pub async fn upload_image<R>(
    State(state): State<PostAppState<R>>,
    Path(id): Path<PostId>,
    multipart: Multipart,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let service = state.service();
    let post = service.get(&id).await?.ok_or(PostError::NotFound)?;

    let file = read_image_field(multipart, state.config.max_upload_bytes).await?;

    let base_name = if post.title.trim().is_empty() {
        "post".to_string()
    } else {
        slugify(&post.title)
    };
    let stored = service.save_image(file, &base_name).await?;

    let fields = PostFields {
        image: Some(state.config.image_url(&stored)),
        ..Default::default()
    };
    let post = service.update(&id, fields).await?;

    Ok(Json(post.into()))
}

/// DELETE /api/posts/image
pub async fn clear_image<R>(
    State(state): State<PostAppState<R>>,
    Json(req): Json<ClearImageRequest>,
) -> PostResult<Json<PostResponse>>
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let post = state.service().clear_image(&req.image).await?;
    Ok(Json(post.into()))
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn read_image_field(mut multipart: Multipart, limit: usize) -> PostResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        if bytes.is_empty() {
            return Err(PostError::InvalidUpload("empty file".to_string()));
        }
        return Ok(UploadedFile::new(&original_name, bytes));
    }

    Err(PostError::InvalidUpload(format!(
        "missing '{IMAGE_FIELD}' field"
    )))
}

fn multipart_error(err: axum::extract::multipart::MultipartError, limit: usize) -> PostError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PostError::UploadTooLarge { limit }
    } else {
        PostError::InvalidUpload(err.body_text())
    }
}
