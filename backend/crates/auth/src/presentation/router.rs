//! Auth Router
//!
//! Routes carry the full `/{lang}/...` path so the router can be merged next
//! to the landing page instead of nested under it.

use axum::{Router, routing::get};
use std::sync::Arc;

use platform::i18n::Translator;
use platform::site::SiteConfig;

use crate::application::config::AuthConfig;
use crate::domain::mail::SharedMailer;
use crate::domain::repository::AuthStore;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router<M>(
    repo: PgAuthRepository,
    mailer: M,
    config: AuthConfig,
    site: Arc<SiteConfig>,
    translator: Arc<Translator>,
) -> Router
where
    M: SharedMailer,
{
    auth_router_generic(AuthAppState::new(repo, mailer, config, site, translator))
}

/// Create a generic Auth router for any repository and mailer
pub fn auth_router_generic<R, M>(state: AuthAppState<R, M>) -> Router
where
    R: AuthStore,
    M: SharedMailer,
{
    Router::new()
        .route(
            "/{lang}/signin",
            get(handlers::signin_page::<R, M>).post(handlers::sign_in::<R, M>),
        )
        .route(
            "/{lang}/signout",
            get(handlers::sign_out::<R, M>).post(handlers::sign_out::<R, M>),
        )
        .route(
            "/{lang}/signup",
            get(handlers::signup_page::<R, M>).post(handlers::sign_up::<R, M>),
        )
        .route("/{lang}/activate", get(handlers::activate_query::<R, M>))
        .route("/{lang}/activate/{token}", get(handlers::activate::<R, M>))
        .route(
            "/{lang}/forget",
            get(handlers::forget_page::<R, M>).post(handlers::forget::<R, M>),
        )
        .route(
            "/{lang}/reset",
            get(handlers::reset_page_query::<R, M>).post(handlers::reset::<R, M>),
        )
        .route(
            "/{lang}/reset/{token}",
            get(handlers::reset_page::<R, M>).post(handlers::reset::<R, M>),
        )
        .route(
            "/{lang}/verify/{code}",
            get(handlers::verify_page::<R, M>).post(handlers::verify::<R, M>),
        )
        .route("/{lang}/resend", get(handlers::resend_without_code::<R, M>))
        .route("/{lang}/resend/", get(handlers::resend_without_code::<R, M>))
        .route("/{lang}/resend/{code}", get(handlers::resend::<R, M>))
        .with_state(state)
}
