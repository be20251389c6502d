//! HTTP tests for the auth pages.
//!
//! Tests verify:
//! - Redirect targets of every form post
//! - Session and flash cookies
//! - Two-step verification through the `/verify/{code}` and `/resend` pages

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use auth::domain::value_object::email::Email;
use auth::{
    AuthAppState, AuthConfig, MailKind, MemoryAuthRepository, MemoryMailer, UserRepository,
    auth_router_generic,
};
use platform::i18n::Translator;
use platform::site::SiteConfig;

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "TestPassword123!";

struct TestApp {
    router: Router,
    repo: MemoryAuthRepository,
    mailer: MemoryMailer,
}

impl TestApp {
    fn new(two_step_verification: bool) -> Self {
        let repo = MemoryAuthRepository::new();
        let mailer = MemoryMailer::new();
        let config = AuthConfig {
            two_step_verification,
            ..AuthConfig::development()
        };
        let state = AuthAppState::new(
            repo.clone(),
            mailer.clone(),
            config,
            Arc::new(SiteConfig::default()),
            Arc::new(Translator::embedded("en").unwrap()),
        );

        Self {
            router: auth_router_generic(state),
            repo,
            mailer,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, form: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Sign up through the form and follow the mailed activation link
    async fn active_user(&self) {
        let response = self
            .post(
                "/en/signup",
                &format!("email={EMAIL}&password={PASSWORD}&firstname=Ada&lastname=Lovelace"),
            )
            .await;
        assert_eq!(location(&response), "/en/signin");

        let Some(MailKind::Activation { token }) = self.mailer.last_to(EMAIL).await.map(|m| m.kind)
        else {
            panic!("activation mail not sent");
        };

        let response = self.get(&format!("/en/activate/{token}"), None).await;
        assert_eq!(location(&response), "/en/signin");
    }

    async fn is_active(&self) -> bool {
        self.repo
            .find_by_email(&Email::new(EMAIL).unwrap())
            .await
            .unwrap()
            .is_some_and(|user| user.is_active())
    }

    async fn mailed_otp(&self) -> u32 {
        match self.mailer.last_to(EMAIL).await.map(|m| m.kind) {
            Some(MailKind::OneTimeCode { otp }) => otp,
            other => panic!("expected one-time code mail, got {other:?}"),
        }
    }

    async fn pending_code(&self) -> Option<String> {
        self.repo
            .find_by_email(&Email::new(EMAIL).unwrap())
            .await
            .unwrap()
            .and_then(|user| user.one_time_code)
            .map(|code| code.token)
    }
}

fn location(response: &Response<Body>) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

/// Full `Set-Cookie` value for cookie `name`
fn set_cookie<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{name}=")))
}

/// `name=value` pair to send back in a `Cookie` header
fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ============================================================================
// Sign In
// ============================================================================

#[tokio::test]
async fn test_signin_page_renders() {
    let app = TestApp::new(false);

    let response = app.get("/ru/signin", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<title>Вход | Quantum</title>"));
    assert!(html.contains(r#"action="/ru/signin""#));
}

#[tokio::test]
async fn test_signin_without_two_step_opens_session() {
    let app = TestApp::new(false);
    app.active_user().await;

    let response = app
        .post("/en/signin", &format!("email={EMAIL}&password={PASSWORD}&remember=1"))
        .await;
    assert_eq!(location(&response), "/en");

    let cookie = set_cookie(&response, "quantum_session").unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age="));
    assert_eq!(app.repo.session_count().await, 1);
}

#[tokio::test]
async fn test_signin_with_two_step_redirects_to_verify() {
    let app = TestApp::new(true);
    app.active_user().await;

    let response = app
        .post("/en/signin", &format!("email={EMAIL}&password={PASSWORD}"))
        .await;

    let code = app.pending_code().await.unwrap();
    assert_eq!(location(&response), format!("/en/verify/{code}"));
    assert!(set_cookie(&response, "quantum_session").is_none());
    assert_eq!(app.repo.session_count().await, 0);
}

#[tokio::test]
async fn test_bad_credentials_flash_on_next_render() {
    let app = TestApp::new(false);
    app.active_user().await;

    let response = app
        .post("/en/signin", &format!("email={EMAIL}&password=WrongPassword1!"))
        .await;
    assert_eq!(location(&response), "/en/signin");

    let flash = cookie_pair(set_cookie(&response, "quantum_flash").unwrap()).to_string();

    let page = app.get("/en/signin", Some(&flash)).await;
    assert!(set_cookie(&page, "quantum_flash").unwrap().contains("Max-Age=0"));

    let html = body_text(page).await;
    assert!(html.contains("flash-error"));
    assert!(html.contains("Incorrect credentials"));

    // Shown once
    let html = body_text(app.get("/en/signin", None).await).await;
    assert!(!html.contains("Incorrect credentials"));
}

#[tokio::test]
async fn test_unsupported_lang_falls_back_to_default() {
    let app = TestApp::new(false);

    let response = app.post("/fr/signin", "email=nobody@example.com&password=x").await;
    assert_eq!(location(&response), "/en/signin");
}

#[tokio::test]
async fn test_signout_clears_session() {
    let app = TestApp::new(false);
    app.active_user().await;

    let response = app
        .post("/en/signin", &format!("email={EMAIL}&password={PASSWORD}"))
        .await;
    let session = cookie_pair(set_cookie(&response, "quantum_session").unwrap()).to_string();

    let response = app.get("/en/signout", Some(&session)).await;
    assert_eq!(location(&response), "/en");
    assert!(
        set_cookie(&response, "quantum_session")
            .unwrap()
            .contains("Max-Age=0")
    );
    assert_eq!(app.repo.session_count().await, 0);

    // Without a cookie it still lands on the home page
    let response = app.get("/ru/signout", None).await;
    assert_eq!(location(&response), "/ru");
}

// ============================================================================
// Sign Up / Password Reset
// ============================================================================

#[tokio::test]
async fn test_signup_failure_returns_to_form() {
    let app = TestApp::new(false);

    let response = app
        .post("/en/signup", "email=bob@example.com&password=password123&firstname=Bob&lastname=B")
        .await;
    assert_eq!(location(&response), "/en/signup");
    assert!(set_cookie(&response, "quantum_flash").is_some());
    assert!(app.mailer.messages().await.is_empty());
}

#[tokio::test]
async fn test_forget_and_reset() {
    let app = TestApp::new(false);
    app.active_user().await;

    let response = app.post("/en/forget", &format!("email={EMAIL}")).await;
    assert_eq!(location(&response), "/en/forget");
    let flash = cookie_pair(set_cookie(&response, "quantum_flash").unwrap()).to_string();
    let html = body_text(app.get("/en/forget", Some(&flash)).await).await;
    assert!(html.contains("Check your email"));

    let Some(MailKind::PasswordReset { token }) = app.mailer.last_to(EMAIL).await.map(|m| m.kind)
    else {
        panic!("reset mail not sent");
    };

    let html = body_text(app.get(&format!("/en/reset/{token}"), None).await).await;
    assert!(html.contains(&format!(r#"name="reset_token" value="{token}""#)));

    let response = app
        .post("/en/reset", &format!("reset_token={token}&password=BrandNewPass456!"))
        .await;
    assert_eq!(location(&response), "/en/signin");

    let response = app
        .post("/en/signin", &format!("email={EMAIL}&password=BrandNewPass456!"))
        .await;
    assert_eq!(location(&response), "/en");
}

#[tokio::test]
async fn test_activation_by_query_parameter() {
    let app = TestApp::new(false);
    app.post(
        "/en/signup",
        &format!("email={EMAIL}&password={PASSWORD}&firstname=Ada&lastname=Lovelace"),
    )
    .await;
    let Some(MailKind::Activation { token }) = app.mailer.last_to(EMAIL).await.map(|m| m.kind)
    else {
        panic!("activation mail not sent");
    };

    let response = app
        .get(&format!("/ru/activate?activation_token={token}"), None)
        .await;
    assert_eq!(location(&response), "/ru/signin");
    assert!(set_cookie(&response, "quantum_flash").is_none());
    assert!(app.is_active().await);
}

#[tokio::test]
async fn test_bad_activation_still_goes_to_signin() {
    let app = TestApp::new(false);

    for uri in [
        "/en/activate/nope",
        "/en/activate?activation_token=nope",
        "/en/activate?activation_token=",
        "/en/activate",
    ] {
        let response = app.get(uri, None).await;
        assert_eq!(location(&response), "/en/signin", "{uri}");

        let flash = cookie_pair(set_cookie(&response, "quantum_flash").unwrap()).to_string();
        let html = body_text(app.get("/en/signin", Some(&flash)).await).await;
        assert!(html.contains("The link is invalid"), "{uri}");
    }
}

#[tokio::test]
async fn test_reset_page_by_query_parameter() {
    let app = TestApp::new(false);

    let response = app.get("/en/reset?reset_token=abc_123", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"name="reset_token" value="abc_123""#));
    assert!(html.contains(r#"action="/en/reset""#));
}

#[tokio::test]
async fn test_failed_reset_flashes_on_signin() {
    let app = TestApp::new(false);
    app.active_user().await;

    let response = app
        .post("/en/reset", "reset_token=unknown&password=BrandNewPass456!")
        .await;
    assert_eq!(location(&response), "/en/signin");

    let flash = cookie_pair(set_cookie(&response, "quantum_flash").unwrap()).to_string();
    let html = body_text(app.get("/en/signin", Some(&flash)).await).await;
    assert!(html.contains("flash-error"));
    assert!(html.contains("The link is invalid"));

    // The old password still works
    let response = app
        .post("/en/signin", &format!("email={EMAIL}&password={PASSWORD}"))
        .await;
    assert_eq!(location(&response), "/en");
}

#[tokio::test]
async fn test_unknown_email_gets_same_answer() {
    let app = TestApp::new(false);

    let response = app.post("/en/forget", "email=nobody@example.com").await;
    assert_eq!(location(&response), "/en/forget");
    assert!(set_cookie(&response, "quantum_flash").is_some());
    assert!(app.mailer.messages().await.is_empty());
}

// ============================================================================
// Two-step Verification
// ============================================================================

#[tokio::test]
async fn test_verify_code() {
    let app = TestApp::new(true);
    app.active_user().await;
    app.post("/en/signin", &format!("email={EMAIL}&password={PASSWORD}"))
        .await;
    let code = app.pending_code().await.unwrap();
    let otp = app.mailed_otp().await;

    let page = body_text(app.get(&format!("/en/verify/{code}"), None).await).await;
    assert!(page.contains(&format!(r#"name="code" value="{code}""#)));

    let wrong = if otp == 999_999 { 100_000 } else { otp + 1 };
    let response = app
        .post(&format!("/en/verify/{code}"), &format!("otp={wrong}&code={code}"))
        .await;
    assert_eq!(location(&response), format!("/en/verify/{code}"));
    assert!(set_cookie(&response, "quantum_flash").is_some());

    let response = app
        .post(&format!("/en/verify/{code}"), &format!("otp={otp}&code={code}"))
        .await;
    assert_eq!(location(&response), "/en");
    assert!(set_cookie(&response, "quantum_session").is_some());
    assert_eq!(app.repo.session_count().await, 1);
}

#[tokio::test]
async fn test_verify_with_malformed_code_flashes_on_signin() {
    let app = TestApp::new(true);
    app.active_user().await;
    app.post("/en/signin", &format!("email={EMAIL}&password={PASSWORD}"))
        .await;
    let code = app.pending_code().await.unwrap();

    let response = app
        .post(&format!("/en/verify/{code}"), "otp=1&code=x%0Ay")
        .await;
    assert_eq!(location(&response), "/en/signin");

    let flash = cookie_pair(set_cookie(&response, "quantum_flash").unwrap()).to_string();
    let html = body_text(app.get("/en/signin", Some(&flash)).await).await;
    assert!(html.contains("Incorrect verification code"));

    // The pending code is untouched
    assert_eq!(app.pending_code().await, Some(code));
}

#[tokio::test]
async fn test_resend_without_code_goes_to_signin() {
    let app = TestApp::new(true);

    for uri in ["/en/resend", "/en/resend/"] {
        let response = app.get(uri, None).await;
        assert_eq!(location(&response), "/en/signin");
    }
    assert!(app.mailer.messages().await.is_empty());
}

#[tokio::test]
async fn test_resend_issues_new_code() {
    let app = TestApp::new(true);
    app.active_user().await;
    app.post("/en/signin", &format!("email={EMAIL}&password={PASSWORD}"))
        .await;
    let code = app.pending_code().await.unwrap();

    let response = app.get(&format!("/en/resend/{code}"), None).await;
    let new_code = app.pending_code().await.unwrap();
    assert_ne!(new_code, code);
    assert_eq!(location(&response), format!("/en/verify/{new_code}"));

    // The replaced code is no longer known
    let response = app.get(&format!("/en/resend/{code}"), None).await;
    assert_eq!(location(&response), "/en/signin");
}
