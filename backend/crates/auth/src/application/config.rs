//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;
use platform::cookie::CookieConfig;
use platform::crypto::random_bytes;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Cookie carrying the one-shot flash message
    pub flash_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL without "Remember Me" (12 hours)
    pub session_ttl_short: Duration,
    /// Session TTL with "Remember Me" (1 week)
    pub session_ttl_long: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Require a mailed one-time code after the password check
    pub two_step_verification: bool,
    /// Lifetime of a one-time code (2 minutes)
    pub otp_ttl: Duration,
    /// Number of digits in a one-time code
    pub otp_digits: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "quantum_session".to_string(),
            flash_cookie_name: "quantum_flash".to_string(),
            session_secret: [0u8; 32],
            session_ttl_short: Duration::from_secs(12 * 3600), // 12 hours
            session_ttl_long: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            two_step_verification: false,
            otp_ttl: Duration::from_secs(120),
            otp_digits: 6,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl(&self, remember_me: bool) -> Duration {
        if remember_me {
            self.session_ttl_long
        } else {
            self.session_ttl_short
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Session cookie; persistent only for "Remember Me" sessions
    pub fn session_cookie(&self, remember_me: bool) -> CookieConfig {
        let max_age = remember_me.then(|| self.session_ttl_long.as_secs());
        CookieConfig::named(&self.session_cookie_name, self.cookie_secure, self.cookie_same_site)
            .with_max_age(max_age)
    }

    pub fn flash_cookie(&self) -> CookieConfig {
        CookieConfig::named(&self.flash_cookie_name, self.cookie_secure, self.cookie_same_site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret_differs() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.session_secret, b.session_secret);
        assert!(a.cookie_secure);
        assert!(!AuthConfig::development().cookie_secure);
    }

    #[test]
    fn test_session_cookie_lifetime() {
        let config = AuthConfig::development();

        let short = config.session_cookie(false).build_set_cookie("t");
        assert!(!short.contains("Max-Age"));

        let long = config.session_cookie(true).build_set_cookie("t");
        assert!(long.contains(&format!("Max-Age={}", 7 * 24 * 3600)));
        assert!(long.starts_with("quantum_session=t"));
    }
}
