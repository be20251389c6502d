//! User Entity
//!
//! Account with credentials and the pending tokens of the auth flows.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, one_time_code::OneTimeCode, user_password::UserPassword, user_role::UserRole,
    UserId,
};
use crate::error::{AuthError, AuthResult};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lowercased; used to sign in
    pub email: Email,
    pub password_hash: UserPassword,
    pub first_name: String,
    pub last_name: String,
    pub user_role: UserRole,
    /// Set until the account is activated
    pub activation_token: Option<String>,
    /// Set between "forgot password" and the reset
    pub reset_token: Option<String>,
    /// Set between sign-in and code verification (two-step mode)
    pub one_time_code: Option<OneTimeCode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New inactive user waiting for `activation_token`
    pub fn new(
        email: Email,
        password_hash: UserPassword,
        first_name: String,
        last_name: String,
        activation_token: String,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            first_name,
            last_name,
            user_role: UserRole::default(),
            activation_token: Some(activation_token),
            reset_token: None,
            one_time_code: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.activation_token.is_none()
    }

    pub fn activate(&mut self) {
        self.activation_token = None;
        self.touch();
    }

    pub fn request_reset(&mut self, token: String) {
        self.reset_token = Some(token);
        self.touch();
    }

    /// Replace the password and consume the reset token
    pub fn reset_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.reset_token = None;
        self.touch();
    }

    pub fn set_one_time_code(&mut self, code: OneTimeCode) {
        self.one_time_code = Some(code);
        self.touch();
    }

    /// Check `otp` against the pending code and consume it on success.
    ///
    /// Returns the "remember me" choice made at sign-in.
    pub fn consume_one_time_code(&mut self, otp: u32) -> AuthResult<bool> {
        let code = self
            .one_time_code
            .as_ref()
            .ok_or(AuthError::InvalidOtp)?;
        code.check(otp)?;

        let remember_me = code.remember_me;
        self.one_time_code = None;
        self.touch();
        Ok(remember_me)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
