//! Router composition

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use auth::{AuthAppState, AuthStore, SharedMailer, auth_router_generic};
use post::{PostConfig, PostRepository, presentation::post_router_generic};

use crate::landing::{LandingState, landing_router};

/// Landing page, auth pages, post API and uploaded files in one router
pub fn build_router<A, M, P>(
    auth_state: AuthAppState<A, M>,
    post_repo: P,
    post_config: PostConfig,
    frontend_origins: &[String],
) -> Router
where
    A: AuthStore,
    M: SharedMailer,
    P: PostRepository + Clone + Send + Sync + 'static,
{
    let landing = LandingState {
        sessions: auth_state.repo.clone(),
        config: auth_state.config.clone(),
        site: auth_state.site.clone(),
        translator: auth_state.translator.clone(),
    };

    let uploads = ServeDir::new(&post_config.uploads_dir);
    let uploads_url = post_config.uploads_url.clone();

    let api = post_router_generic(post_repo, post_config).layer(cors(frontend_origins));

    Router::new()
        .merge(landing_router(landing))
        .merge(auth_router_generic(auth_state))
        .nest("/api/posts", api)
        .nest_service(&uploads_url, uploads)
        .layer(TraceLayer::new_for_http())
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
}
