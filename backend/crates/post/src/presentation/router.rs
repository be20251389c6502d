//! Post Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::config::PostConfig;
use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgPostRepository;
use crate::presentation::handlers::{self, PostAppState};

/// Headroom for multipart boundaries and headers around the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the Post router with PostgreSQL repository
pub fn post_router(repo: PgPostRepository, config: PostConfig) -> Router {
    post_router_generic(repo, config)
}

/// Create a generic Post router for any repository implementation
pub fn post_router_generic<R>(repo: R, config: PostConfig) -> Router
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let body_limit = config.max_upload_bytes + MULTIPART_OVERHEAD;
    let state = PostAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route("/image", delete(handlers::clear_image::<R>))
        .route(
            "/{id}",
            get(handlers::get_post::<R>)
                .put(handlers::update_post::<R>)
                .delete(handlers::delete_post::<R>),
        )
        .route("/{id}/image", post(handlers::upload_image::<R>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
