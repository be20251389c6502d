//! Environment Configuration
//!
//! Everything the binary reads from the environment (or `.env`), resolved
//! once at startup into the configs of the auth and post crates.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use platform::site::SiteConfig;
use post::PostConfig;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    /// Comma-separated origins allowed to call the JSON API
    pub frontend_origins: Vec<String>,
    pub site: SiteConfig,
    pub auth: AuthConfig,
    pub post: PostConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let listen_addr = var_or("LISTEN_ADDR", DEFAULT_LISTEN_ADDR)
            .parse()
            .context("LISTEN_ADDR must be a socket address")?;

        let frontend_origins = list(&var_or(
            "FRONTEND_ORIGINS",
            "http://localhost:31113,http://127.0.0.1:31113",
        ));

        let site = SiteConfig::new(
            var_or("APP_NAME", "Quantum"),
            var_or("BASE_URL", ""),
            list(&var_or("APP_LANGS", "en,ru,am")),
            env::var("APP_LANG").ok(),
        );

        Ok(Self {
            database_url,
            listen_addr,
            frontend_origins,
            site,
            auth: auth_config()?,
            post: post_config(),
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let base = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    let session_secret = match env::var("SESSION_SECRET") {
        Ok(encoded) => decode_secret(&encoded)?,
        Err(_) if cfg!(debug_assertions) => base.session_secret,
        Err(_) => bail!("SESSION_SECRET must be set in production"),
    };

    let password_pepper = env::var("PASSWORD_PEPPER")
        .ok()
        .filter(|p| !p.is_empty())
        .map(String::into_bytes);

    Ok(AuthConfig {
        session_secret,
        password_pepper,
        two_step_verification: flag("TWO_STEP_VERIFICATION"),
        cookie_secure: env::var("COOKIE_SECURE")
            .map(|v| parse_flag(&v))
            .unwrap_or(base.cookie_secure),
        ..base
    })
}

fn post_config() -> PostConfig {
    let uploads_dir = var_or("UPLOADS_DIR", "public/uploads");
    PostConfig::with_uploads_dir(PathBuf::from(uploads_dir))
}

/// 32-byte secret, base64 encoded
fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("SESSION_SECRET must be base64")?;

    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len()))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn flag(key: &str) -> bool {
    env::var(key).is_ok_and(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
