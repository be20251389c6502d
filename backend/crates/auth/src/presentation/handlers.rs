//! HTTP Handlers
//!
//! Form posts answer with a redirect. Failures the visitor can fix travel to
//! the next page as a flash message; everything else propagates as an
//! [`AuthError`] response.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Form;
use std::sync::Arc;

use platform::cookie::extract_cookie;
use platform::crypto::is_url_token;
use platform::i18n::Translator;
use platform::site::SiteConfig;

use crate::application::config::AuthConfig;
use crate::application::{
    ActivateUseCase, OtpUseCase, PasswordResetUseCase, SignInInput, SignInOutcome, SignInUseCase,
    SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::mail::SharedMailer;
use crate::domain::repository::AuthStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ActivationQuery, CodePath, ForgetForm, LangPath, ResetForm, ResetPath, ResetQuery,
    SignInForm, SignUpForm, TokenPath, VerifyForm,
};
use crate::presentation::flash::Flash;
use crate::presentation::views::{self, PageContext};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: AuthStore,
    M: SharedMailer,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
    pub site: Arc<SiteConfig>,
    pub translator: Arc<Translator>,
}

impl<R, M> AuthAppState<R, M>
where
    R: AuthStore,
    M: SharedMailer,
{
    pub fn new(
        repo: R,
        mailer: M,
        config: AuthConfig,
        site: Arc<SiteConfig>,
        translator: Arc<Translator>,
    ) -> Self {
        Self {
            repo: Arc::new(repo),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
            site,
            translator,
        }
    }

    fn lang(&self, raw: &str) -> String {
        self.site.resolve_lang(raw).to_string()
    }

    fn redirect(&self, lang: &str, path: &str) -> Response {
        Redirect::to(&self.site.url(lang, path)).into_response()
    }

    fn redirect_with_cookie(&self, lang: &str, path: &str, cookie: String) -> Response {
        (
            AppendHeaders([(header::SET_COOKIE, cookie)]),
            Redirect::to(&self.site.url(lang, path)),
        )
            .into_response()
    }

    fn redirect_with_flash(&self, lang: &str, path: &str, flash: Flash) -> AuthResult<Response> {
        let cookie = flash.to_set_cookie(&self.config)?;
        Ok(self.redirect_with_cookie(lang, path, cookie))
    }

    /// Flash the translated message of a user-facing error and redirect;
    /// any other error is returned as is.
    fn flash_error(&self, err: AuthError, lang: &str, path: &str) -> AuthResult<Response> {
        let Some(key) = err.message_key() else {
            return Err(err);
        };
        err.log();
        let message = self.translator.t(lang, key);
        self.redirect_with_flash(lang, path, Flash::error(message))
    }

    /// Render a page through the auth layout, consuming the pending flash
    fn render(
        &self,
        headers: &HeaderMap,
        lang: &str,
        path: &str,
        title_key: &str,
        page: impl FnOnce(&PageContext<'_>) -> String,
    ) -> Response {
        let flash = Flash::from_headers(headers, &self.config);
        let had_flash = flash.is_some();

        let ctx = PageContext {
            site: &self.site,
            translator: &self.translator,
            lang,
            path,
            title: self.site.title(&self.translator.t(lang, title_key)),
            flash,
        };
        let html = Html(page(&ctx));

        if had_flash {
            (
                AppendHeaders([(header::SET_COOKIE, Flash::clear_cookie(&self.config))]),
                html,
            )
                .into_response()
        } else {
            html.into_response()
        }
    }
}

// ============================================================================
// Sign In / Sign Out
// ============================================================================

/// GET /{lang}/signin
pub async fn signin_page<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    state.render(&headers, &lang, "/signin", "common.signin", views::signin_page)
}

/// POST /{lang}/signin
pub async fn sign_in<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    Form(form): Form<SignInForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    let remember_me = form.remember_me();

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: form.email,
        password: form.password,
        remember_me,
        lang: lang.clone(),
    };

    match use_case.execute(input).await {
        Ok(SignInOutcome::Authenticated {
            session_token,
            remember_me,
        }) => {
            let cookie = state
                .config
                .session_cookie(remember_me)
                .build_set_cookie(&session_token);
            Ok(state.redirect_with_cookie(&lang, "", cookie))
        }
        Ok(SignInOutcome::OtpRequired { code }) => {
            Ok(state.redirect(&lang, &format!("/verify/{code}")))
        }
        Err(e) => state.flash_error(e, &lang, "/signin"),
    }
}

/// GET|POST /{lang}/signout
pub async fn sign_out<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);

    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        match use_case.execute(&token).await {
            Ok(()) => {}
            // A forged or stale cookie is cleared all the same
            Err(e) if !e.kind().is_server_error() => {
                tracing::debug!(error = %e, "Sign out without a valid session");
            }
            Err(e) => return Err(e),
        }
    }

    let cookie = state.config.session_cookie(false).build_delete_cookie();
    Ok(state.redirect_with_cookie(&lang, "", cookie))
}

// ============================================================================
// Sign Up / Activation
// ============================================================================

/// GET /{lang}/signup
pub async fn signup_page<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    state.render(&headers, &lang, "/signup", "common.signup", views::signup_page)
}

/// POST /{lang}/signup
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    Form(form): Form<SignUpForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    let use_case =
        SignUpUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone());

    let input = SignUpInput {
        email: form.email,
        password: form.password,
        first_name: form.firstname,
        last_name: form.lastname,
        lang: lang.clone(),
    };

    match use_case.execute(input).await {
        Ok(_) => {
            let message = state.translator.t(&lang, "common.check_email");
            state.redirect_with_flash(&lang, "/signin", Flash::success(message))
        }
        Err(e) => state.flash_error(e, &lang, "/signup"),
    }
}

/// GET /{lang}/activate/{token}
pub async fn activate<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(TokenPath { lang, token }): Path<TokenPath>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    activate_token(&state, &state.lang(&lang), &token).await
}

/// GET /{lang}/activate?activation_token=
pub async fn activate_query<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    Query(query): Query<ActivationQuery>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    activate_token(&state, &state.lang(&lang), &query.activation_token).await
}

async fn activate_token<R, M>(
    state: &AuthAppState<R, M>,
    lang: &str,
    token: &str,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    match ActivateUseCase::new(state.repo.clone()).execute(token).await {
        Ok(()) => Ok(state.redirect(lang, "/signin")),
        Err(e) => state.flash_error(e, lang, "/signin"),
    }
}

// ============================================================================
// Password Reset
// ============================================================================

/// GET /{lang}/forget
pub async fn forget_page<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    state.render(&headers, &lang, "/forget", "common.forget_password", views::forget_page)
}

/// POST /{lang}/forget
pub async fn forget<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    Form(form): Form<ForgetForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    // Same answer whether or not the address is known
    use_case.forget(&form.email, &lang).await?;

    let message = state.translator.t(&lang, "common.check_email");
    state.redirect_with_flash(&lang, "/forget", Flash::success(message))
}

/// GET /{lang}/reset/{token}
pub async fn reset_page<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(TokenPath { lang, token }): Path<TokenPath>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    let path = format!("/reset/{token}");
    state.render(&headers, &lang, &path, "common.reset_password", |ctx| {
        views::reset_page(ctx, &token)
    })
}

/// GET /{lang}/reset?reset_token=
pub async fn reset_page_query<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
    Query(query): Query<ResetQuery>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    state.render(&headers, &lang, "/reset", "common.reset_password", |ctx| {
        views::reset_page(ctx, &query.reset_token)
    })
}

/// POST /{lang}/reset and /{lang}/reset/{token}
///
/// The form's `reset_token` wins over the path token.
pub async fn reset<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(path): Path<ResetPath>,
    Form(form): Form<ResetForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&path.lang);
    let token = if form.reset_token.is_empty() {
        path.token.unwrap_or_default()
    } else {
        form.reset_token
    };

    let use_case = PasswordResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    match use_case.reset(&token, form.password).await {
        Ok(()) => Ok(state.redirect(&lang, "/signin")),
        Err(e) => state.flash_error(e, &lang, "/signin"),
    }
}

// ============================================================================
// Two-step Verification
// ============================================================================

/// GET /{lang}/verify/{code}
pub async fn verify_page<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(CodePath { lang, code }): Path<CodePath>,
    headers: HeaderMap,
) -> Response
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    let path = format!("/verify/{code}");
    state.render(&headers, &lang, &path, "common.2sv", |ctx| {
        views::verify_page(ctx, &code)
    })
}

/// POST /{lang}/verify/{code}
pub async fn verify<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(CodePath { lang, code }): Path<CodePath>,
    Form(form): Form<VerifyForm>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    let code = if form.code.is_empty() { code } else { form.code };

    // Not a code we could have issued, and not safe to echo into a Location
    if !is_url_token(&code) {
        return state.flash_error(AuthError::InvalidOtp, &lang, "/signin");
    }

    let use_case = OtpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    match use_case.verify(&form.otp, &code).await {
        Ok(verified) => {
            let cookie = state
                .config
                .session_cookie(verified.remember_me)
                .build_set_cookie(&verified.session_token);
            Ok(state.redirect_with_cookie(&lang, "", cookie))
        }
        Err(e) => state.flash_error(e, &lang, &format!("/verify/{code}")),
    }
}

/// GET /{lang}/resend and /{lang}/resend/
pub async fn resend_without_code<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(LangPath { lang }): Path<LangPath>,
) -> Response
where
    R: AuthStore,
    M: SharedMailer,
{
    state.redirect(&state.lang(&lang), "/signin")
}

/// GET /{lang}/resend/{code}
pub async fn resend<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(CodePath { lang, code }): Path<CodePath>,
) -> AuthResult<Response>
where
    R: AuthStore,
    M: SharedMailer,
{
    let lang = state.lang(&lang);
    let use_case = OtpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    match use_case.resend(&code, &lang).await {
        Ok(new_code) => Ok(state.redirect(&lang, &format!("/verify/{new_code}"))),
        Err(e) if e.is_user_facing() => {
            e.log();
            Ok(state.redirect(&lang, "/signin"))
        }
        Err(e) => Err(e),
    }
}
