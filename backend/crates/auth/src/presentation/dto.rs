//! Form and query payloads of the auth pages

use serde::Deserialize;

/// `{lang}` path segment
#[derive(Debug, Deserialize)]
pub struct LangPath {
    pub lang: String,
}

/// `{lang}/{token}` path segments
#[derive(Debug, Deserialize)]
pub struct TokenPath {
    pub lang: String,
    pub token: String,
}

/// `{lang}/{code}` path segments
#[derive(Debug, Deserialize)]
pub struct CodePath {
    pub lang: String,
    pub code: String,
}

/// `{lang}` with the optional `{token}` of the reset form target
#[derive(Debug, Deserialize)]
pub struct ResetPath {
    pub lang: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
    /// Checkbox: present when ticked
    pub remember: Option<String>,
}

impl SignInForm {
    pub fn remember_me(&self) -> bool {
        self.remember
            .as_deref()
            .is_some_and(|v| !v.is_empty() && v != "0" && v != "off")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForgetForm {
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetForm {
    pub reset_token: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyForm {
    pub otp: String,
    pub code: String,
}

/// `?activation_token=` form of the activation link
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActivationQuery {
    pub activation_token: String,
}

/// `?reset_token=` form of the reset link
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetQuery {
    pub reset_token: String,
}
