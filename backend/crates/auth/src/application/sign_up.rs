//! Sign Up Use Case
//!
//! Creates an inactive account and mails its activation link.

use platform::crypto::random_token;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::mail::{MailKind, MailMessage, Mailer};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Language of the activation mail
    pub lang: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, M> SignUpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let email = Email::new(input.email)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let activation_token = random_token();
        let user = User::new(
            email,
            password_hash,
            input.first_name.trim().to_string(),
            input.last_name.trim().to_string(),
            activation_token.clone(),
        );

        self.user_repo.create(&user).await?;

        self.mailer
            .send(MailMessage {
                to: user.email.clone(),
                name: user.display_name(),
                lang: input.lang,
                kind: MailKind::Activation {
                    token: activation_token,
                },
            })
            .await?;

        tracing::info!(user_id = %user.user_id, email_domain = user.email.domain(), "User signed up");

        Ok(user)
    }
}
