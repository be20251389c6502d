//! One-time Code Value Object
//!
//! A pending second sign-in step: the numeric code mailed to the user and
//! the opaque verification token carried in the `/verify/{code}` URL.

use chrono::{DateTime, Duration, Utc};
use platform::crypto::{random_code, random_token};

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode {
    /// Numeric code sent by mail
    pub otp: u32,
    /// URL token identifying the pending verification
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// "Remember me" from the original sign-in, applied once verified
    pub remember_me: bool,
}

impl OneTimeCode {
    /// Fresh code of `digits` digits valid for `ttl`
    pub fn issue(digits: u32, ttl: Duration, remember_me: bool) -> Self {
        Self {
            otp: random_code(digits),
            token: random_token(),
            expires_at: Utc::now() + ttl,
            remember_me,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Mismatch is reported before expiry so a stale page does not reveal
    /// whether a guess was right.
    pub fn check(&self, otp: u32) -> AuthResult<()> {
        if self.otp != otp {
            return Err(AuthError::InvalidOtp);
        }
        if self.is_expired() {
            return Err(AuthError::OtpExpired);
        }
        Ok(())
    }
}
