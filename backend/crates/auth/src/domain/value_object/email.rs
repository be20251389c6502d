//! Email Value Object
//!
//! Lower-cased and syntax-checked only; the activation link proves the
//! address works.

use std::fmt;

use crate::error::{AuthError, AuthResult};

/// RFC 5321 path limit
const MAX_LENGTH: usize = 254;
const MAX_LOCAL_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.len() > MAX_LENGTH {
            return Err(AuthError::InvalidEmail);
        }
        match email.split_once('@') {
            Some((local, domain)) if valid_local(local) && valid_domain(domain) => Ok(Self(email)),
            _ => Err(AuthError::InvalidEmail),
        }
    }

    /// Stored value, validated when it was written
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part after `@`; logged instead of the full address
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

fn valid_local(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= MAX_LOCAL_LENGTH
        && !local.chars().any(|c| c.is_whitespace() || c == '@')
}

/// At least two dot-separated labels of ASCII letters, digits and inner hyphens
fn valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();

    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
