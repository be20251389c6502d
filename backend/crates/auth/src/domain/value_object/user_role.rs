use std::fmt;

/// Role stored in `users.user_role`. Every account signs up as a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    Member,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
        }
    }

    /// Unknown codes from storage fall back to `Member`
    pub fn from_code(code: &str) -> Self {
        if code != UserRole::Member.code() {
            tracing::warn!(role = code, "Unknown user role code, using member");
        }
        UserRole::Member
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_codes() {
        assert_eq!(UserRole::default().code(), "member");
        assert_eq!(UserRole::from_code("member"), UserRole::Member);
        assert_eq!(UserRole::from_code("admin"), UserRole::Member);
        assert_eq!(UserRole::Member.to_string(), "member");
    }
}
