//! Activate Use Case

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct ActivateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ActivateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Consume `token` and activate its account
    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let mut user = self
            .user_repo
            .find_by_activation_token(token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        user.activate();
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Account activated");
        Ok(())
    }
}
