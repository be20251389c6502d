//! Sign In Use Case
//!
//! Checks the password, then either opens a session or, in two-step mode,
//! mails a one-time code and hands back the verification token.

use chrono::Duration;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::open_session;
use crate::domain::mail::{MailKind, MailMessage, Mailer};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, one_time_code::OneTimeCode, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
    /// Remember me flag
    pub remember_me: bool,
    /// Language of the one-time code mail
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Session opened; `session_token` goes into the cookie
    Authenticated {
        session_token: String,
        remember_me: bool,
    },
    /// Code mailed; continue at `/verify/{code}`
    OtpRequired { code: String },
}

/// Sign in use case
pub struct SignInUseCase<U, S, M>
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

impl<U, S, M> SignInUseCase<U, S, M>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutcome> {
        // Malformed email reads as unknown, not as a validation error
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = RawPassword::for_login(input.password);
        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active() {
            return Err(AuthError::InactiveAccount);
        }

        if self.config.two_step_verification {
            let ttl = Duration::from_std(self.config.otp_ttl)
                .map_err(|e| AuthError::Internal(format!("Invalid OTP TTL: {e}")))?;
            let code = OneTimeCode::issue(self.config.otp_digits, ttl, input.remember_me);
            let otp = code.otp;
            let token = code.token.clone();

            user.set_one_time_code(code);
            self.user_repo.update(&user).await?;

            self.mailer
                .send(MailMessage {
                    to: user.email.clone(),
                    name: user.display_name(),
                    lang: input.lang,
                    kind: MailKind::OneTimeCode { otp },
                })
                .await?;

            tracing::info!(user_id = %user.user_id, "One-time code issued");
            return Ok(SignInOutcome::OtpRequired { code: token });
        }

        let session_token = open_session(
            self.session_repo.as_ref(),
            &self.config,
            user.user_id,
            input.remember_me,
        )
        .await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutcome::Authenticated {
            session_token,
            remember_me: input.remember_me,
        })
    }
}
