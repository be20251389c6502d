//! Cookies
//!
//! `Set-Cookie` values for the session and flash cookies, and lookup of a
//! single cookie in request headers.

use axum::http::{HeaderMap, header};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes of one named cookie. Always `HttpOnly`, scoped to `/`.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    /// `None` makes a browser-session cookie
    pub max_age_secs: Option<u64>,
}

impl CookieConfig {
    pub fn named(name: impl Into<String>, secure: bool, same_site: SameSite) -> Self {
        Self {
            name: name.into(),
            secure,
            same_site,
            max_age_secs: None,
        }
    }

    pub fn with_max_age(mut self, secs: Option<u64>) -> Self {
        self.max_age_secs = secs;
        self
    }

    pub fn build_set_cookie(&self, value: &str) -> String {
        self.render(value, self.max_age_secs)
    }

    /// Expired, empty cookie of the same name
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = self.render("", Some(0));
        cookie.push_str("; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
        cookie
    }

    fn render(&self, value: &str, max_age: Option<u64>) -> String {
        let mut cookie = format!("{}={}; HttpOnly; Path=/", self.name, value);

        if self.secure {
            cookie.push_str("; Secure");
        }
        let _ = write!(cookie, "; SameSite={}", self.same_site.as_str());
        if let Some(secs) = max_age {
            let _ = write!(cookie, "; Max-Age={secs}");
        }

        cookie
    }
}

/// Value of cookie `name`; empty values count as absent
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_persistent_cookie() {
        let cookie = CookieConfig::named("quantum_session", true, SameSite::Lax)
            .with_max_age(Some(3600))
            .build_set_cookie("abc.sig");

        assert_eq!(
            cookie,
            "quantum_session=abc.sig; HttpOnly; Path=/; Secure; SameSite=Lax; Max-Age=3600"
        );
    }

    #[test]
    fn test_browser_session_cookie() {
        let cookie = CookieConfig::named("quantum_flash", false, SameSite::Strict)
            .build_set_cookie("x");
        assert!(!cookie.contains("Max-Age"));
        assert!(!cookie.contains("Secure"));
        assert!(cookie.ends_with("SameSite=Strict"));
    }

    #[test]
    fn test_delete_cookie() {
        let cookie = CookieConfig::named("quantum_flash", true, SameSite::Lax)
            .with_max_age(Some(3600))
            .build_delete_cookie();

        assert!(cookie.starts_with("quantum_flash=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(!cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1; empty=; s=abc.def"));
        headers.append(header::COOKIE, HeaderValue::from_static("quantum_flash=xyz"));

        assert_eq!(extract_cookie(&headers, "s").as_deref(), Some("abc.def"));
        assert_eq!(extract_cookie(&headers, "quantum_flash").as_deref(), Some("xyz"));
        assert_eq!(extract_cookie(&headers, "empty"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
