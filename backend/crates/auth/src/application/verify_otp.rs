//! One-time Code Use Case
//!
//! Second sign-in step of two-step verification: check the mailed code, or
//! mail a new one under a new verification token.

use chrono::Duration;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::open_session;
use crate::domain::mail::{MailKind, MailMessage, Mailer};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::one_time_code::OneTimeCode;
use crate::error::{AuthError, AuthResult};

/// Verified second step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    pub session_token: String,
    pub remember_me: bool,
}

pub struct OtpUseCase<U, S, M>
where
    U: UserRepository,
    S: AuthSessionRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, S, M> OtpUseCase<U, S, M>
where
    U: UserRepository,
    S: AuthSessionRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            mailer,
            config,
        }
    }

    /// Check `otp` for the pending verification `code` and open a session
    pub async fn verify(&self, otp: &str, code: &str) -> AuthResult<VerifiedSession> {
        let otp: u32 = otp.trim().parse().map_err(|_| AuthError::InvalidOtp)?;

        let mut user = self
            .user_repo
            .find_by_otp_token(code)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        let remember_me = user.consume_one_time_code(otp)?;
        self.user_repo.update(&user).await?;

        let session_token =
            open_session(self.session_repo.as_ref(), &self.config, user.user_id, remember_me)
                .await?;

        tracing::info!(user_id = %user.user_id, "Two-step verification passed");

        Ok(VerifiedSession {
            session_token,
            remember_me,
        })
    }

    /// Replace the pending code of `code` and mail it; returns the new
    /// verification token.
    pub async fn resend(&self, code: &str, lang: &str) -> AuthResult<String> {
        let mut user = self
            .user_repo
            .find_by_otp_token(code)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        let remember_me = user
            .one_time_code
            .as_ref()
            .is_some_and(|pending| pending.remember_me);

        let ttl = Duration::from_std(self.config.otp_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid OTP TTL: {e}")))?;
        let fresh = OneTimeCode::issue(self.config.otp_digits, ttl, remember_me);
        let otp = fresh.otp;
        let token = fresh.token.clone();

        user.set_one_time_code(fresh);
        self.user_repo.update(&user).await?;

        self.mailer
            .send(MailMessage {
                to: user.email.clone(),
                name: user.display_name(),
                lang: lang.to_string(),
                kind: MailKind::OneTimeCode { otp },
            })
            .await?;

        tracing::info!(user_id = %user.user_id, "One-time code resent");
        Ok(token)
    }
}
