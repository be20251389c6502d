//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the auth and post crates:
//! - Random tokens, numeric codes and HMAC-signed values
//! - Password hashing (Argon2id)
//! - Cookie building and parsing
//! - Localization dictionaries
//! - HTML escaping and the site-wide configuration (app name, langs, base url)

pub mod cookie;
pub mod crypto;
pub mod html;
pub mod i18n;
pub mod password;
pub mod site;
