//! Outgoing Mail Port
//!
//! Use cases describe what to send; rendering and delivery belong to the
//! `Mailer` implementation.

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailKind {
    /// Link to `/activate/{token}`
    Activation { token: String },
    /// Link to `/reset/{token}`
    PasswordReset { token: String },
    /// Second sign-in step code
    OneTimeCode { otp: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: Email,
    /// Recipient's display name, may be empty
    pub name: String,
    /// Language the mail is rendered in
    pub lang: String,
    pub kind: MailKind,
}

/// Mail delivery port
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, message: MailMessage) -> AuthResult<()>;
}

/// Mailer shareable across handlers
pub trait SharedMailer: Mailer + Clone + Send + Sync + 'static {}

impl<T> SharedMailer for T where T: Mailer + Clone + Send + Sync + 'static {}
