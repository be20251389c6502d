//! Flash Messages
//!
//! A one-shot notice carried to the next rendered page in a signed cookie.
//! The value is `base64url(json).signature`; anything that fails to verify
//! or decode is dropped silently.

use axum::http::HeaderMap;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use derive_more::Display;
use platform::cookie::extract_cookie;
use platform::crypto::{sign, verify_signed};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    #[display("error")]
    Error,
    #[display("success")]
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// `Set-Cookie` value storing this flash
    pub fn to_set_cookie(&self, config: &AuthConfig) -> AuthResult<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| AuthError::Internal(format!("Flash encoding failed: {e}")))?;
        let signed = sign(&config.session_secret, &URL_SAFE_NO_PAD.encode(json))
            .map_err(|e| AuthError::Internal(format!("Flash signing failed: {e}")))?;

        Ok(config.flash_cookie().build_set_cookie(&signed))
    }

    /// Pending flash from the request cookies, if any
    pub fn from_headers(headers: &HeaderMap, config: &AuthConfig) -> Option<Self> {
        let raw = extract_cookie(headers, &config.flash_cookie_name)?;

        let decoded = verify_signed(&config.session_secret, &raw)
            .ok()
            .and_then(|payload| URL_SAFE_NO_PAD.decode(payload).ok())
            .and_then(|json| serde_json::from_slice::<Flash>(&json).ok());

        if decoded.is_none() {
            tracing::debug!("Discarding unreadable flash cookie");
        }
        decoded
    }

    /// `Set-Cookie` value removing the flash once shown
    pub fn clear_cookie(config: &AuthConfig) -> String {
        config.flash_cookie().build_delete_cookie()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header};

    fn request_with(set_cookie: &str) -> HeaderMap {
        // "name=value; HttpOnly; ..." -> "name=value"
        let pair = set_cookie.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());
        headers
    }

    #[test]
    fn test_flash_survives_cookie_trip() {
        let config = AuthConfig::development();
        let flash = Flash::error("Incorrect credentials <b>");

        let cookie = flash.to_set_cookie(&config).unwrap();
        assert!(cookie.starts_with("quantum_flash="));

        let read = Flash::from_headers(&request_with(&cookie), &config).unwrap();
        assert_eq!(read, flash);
        assert_eq!(read.kind.to_string(), "error");
    }

    #[test]
    fn test_foreign_signature_is_ignored() {
        let config = AuthConfig::development();
        let cookie = Flash::success("ok").to_set_cookie(&config).unwrap();

        let other = AuthConfig::development();
        assert!(Flash::from_headers(&request_with(&cookie), &other).is_none());
        assert!(Flash::from_headers(&HeaderMap::new(), &config).is_none());
    }

    #[test]
    fn test_clear_cookie_expires() {
        let cookie = Flash::clear_cookie(&AuthConfig::development());
        assert!(cookie.starts_with("quantum_flash=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
