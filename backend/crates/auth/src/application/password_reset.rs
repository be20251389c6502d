//! Password Reset Use Case
//!
//! "Forgot password" mails a reset link; the reset consumes it, stores the
//! new password and signs the account out everywhere.

use platform::crypto::random_token;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::mail::{MailKind, MailMessage, Mailer};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct PasswordResetUseCase<U, S, M>
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

impl<U, S, M> PasswordResetUseCase<U, S, M>
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

    /// Issue a reset token and mail it.
    ///
    /// Returns `None` for unknown or malformed addresses so callers can answer
    /// the same way whether or not the account exists.
    pub async fn forget(&self, email: &str, lang: &str) -> AuthResult<Option<String>> {
        let Ok(email) = Email::new(email) else {
            return Ok(None);
        };

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(None);
        };

        let token = random_token();
        user.request_reset(token.clone());
        self.user_repo.update(&user).await?;

        self.mailer
            .send(MailMessage {
                to: user.email.clone(),
                name: user.display_name(),
                lang: lang.to_string(),
                kind: MailKind::PasswordReset {
                    token: token.clone(),
                },
            })
            .await?;

        tracing::info!(user_id = %user.user_id, "Password reset requested");
        Ok(Some(token))
    }

    pub async fn reset(&self, token: &str, password: String) -> AuthResult<()> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let mut user = self
            .user_repo
            .find_by_reset_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let raw_password = RawPassword::new(password)?;
        user.reset_password(UserPassword::from_raw(&raw_password, self.config.pepper())?);
        self.user_repo.update(&user).await?;

        let revoked = self.session_repo.delete_all_for_user(&user.user_id).await?;

        tracing::info!(
            user_id = %user.user_id,
            sessions_revoked = revoked,
            "Password reset"
        );
        Ok(())
    }
}
