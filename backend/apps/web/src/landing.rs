//! Landing Page
//!
//! `GET /` sends visitors to the default language; `GET /{lang}` renders the
//! localized home page with a sign in or sign out link depending on the
//! session cookie.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Router, routing::get};
use std::sync::Arc;

use auth::{AuthConfig, AuthSessionRepository, CheckSessionUseCase};
use platform::cookie::extract_cookie;
use platform::html::{document, escape, lang_switcher};
use platform::i18n::Translator;
use platform::site::SiteConfig;

const LEARN_MORE_URL: &str = "https://quantum.softberg.org";

pub struct LandingState<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
    pub site: Arc<SiteConfig>,
    pub translator: Arc<Translator>,
}

impl<S> Clone for LandingState<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            site: self.site.clone(),
            translator: self.translator.clone(),
        }
    }
}

pub fn landing_router<S>(state: LandingState<S>) -> Router
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root::<S>))
        .route("/{lang}", get(index::<S>))
        .with_state(state)
}

/// GET /
async fn root<S>(State(state): State<LandingState<S>>) -> Redirect
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    Redirect::to(&state.site.url(&state.site.default_lang, ""))
}

/// GET /{lang}
async fn index<S>(
    State(state): State<LandingState<S>>,
    Path(lang): Path<String>,
    headers: HeaderMap,
) -> Response
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    let lang = state.site.resolve_lang(&lang);

    let signed_in = match extract_cookie(&headers, &state.config.session_cookie_name) {
        Some(token) => {
            CheckSessionUseCase::new(state.sessions.clone(), state.config.clone())
                .is_valid(&token)
                .await
        }
        None => false,
    };

    Html(render(&state.site, &state.translator, lang, signed_in)).into_response()
}

pub fn render(site: &SiteConfig, translator: &Translator, lang: &str, signed_in: bool) -> String {
    let t = |key: &str| escape(&translator.t(lang, key));
    let url = |path: &str| escape(&site.url(lang, path));

    let auth_link = if signed_in {
        format!(r#"<a href="{}">{}</a>"#, url("/signout"), t("common.signout"))
    } else {
        format!(r#"<a href="{}">{}</a>"#, url("/signin"), t("common.signin"))
    };

    let switcher = lang_switcher(&site.langs, lang, |l| site.url(l, ""));
    let app_name = escape(&site.app_name);
    let initial = escape(&site.app_name.chars().take(1).collect::<String>());

    let body = format!(
        r#"<nav class="teal"><div class="nav-wrapper container">
<a class="brand-logo" href="{home}">{app_name}</a>
<ul class="right"><li>{auth_link}</li></ul>
{switcher}
</div></nav>
<main class="container center-align landing">
<div class="logo-block"><span class="logo">{initial}</span></div>
<h2>{app_name}</h2>
<div class="card">
<div class="card-content"><p>{description}</p></div>
<div class="card-action">
<a href="{about_url}">{about}</a>
<a href="{LEARN_MORE_URL}" target="_blank" rel="noopener">{learn_more}</a>
</div>
</div>
</main>"#,
        home = url(""),
        description = t("common.description"),
        about_url = url("/about"),
        about = t("common.about"),
        learn_more = t("common.learn_more"),
    );

    document(lang, &site.title(&translator.t(lang, "common.home")), "landing", &body)
}
