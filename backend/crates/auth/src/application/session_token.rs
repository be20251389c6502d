//! Session Tokens
//!
//! The session cookie holds `<session uuid>.<HMAC-SHA256 signature>`, so a
//! forged id is rejected before any database lookup.

use chrono::Duration;
use platform::crypto::{SignatureError, sign, verify_signed};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

pub fn issue(config: &AuthConfig, session_id: Uuid) -> AuthResult<String> {
    sign(&config.session_secret, &session_id.to_string()).map_err(signature_error)
}

pub fn parse(config: &AuthConfig, token: &str) -> AuthResult<Uuid> {
    let payload = verify_signed(&config.session_secret, token).map_err(signature_error)?;
    payload.parse().map_err(|_| AuthError::SessionInvalid)
}

/// Persist a new session for `user_id` and return its cookie token
pub async fn open_session<S>(
    session_repo: &S,
    config: &AuthConfig,
    user_id: UserId,
    remember_me: bool,
) -> AuthResult<String>
where
    S: AuthSessionRepository,
{
    let ttl = Duration::from_std(config.session_ttl(remember_me))
        .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

    let session = AuthSession::new(user_id, remember_me, ttl);
    session_repo.create(&session).await?;

    tracing::info!(
        user_id = %user_id,
        session_id = %session.session_id,
        remember_me,
        "Session opened"
    );

    issue(config, session.session_id)
}

fn signature_error(err: SignatureError) -> AuthError {
    match err {
        SignatureError::InvalidKey => AuthError::Internal("Invalid session secret".to_string()),
        SignatureError::Malformed | SignatureError::Mismatch => AuthError::SessionInvalid,
    }
}
