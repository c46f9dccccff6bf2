use serde::Deserialize;

use crate::error::{DomainError, DomainResult};

/// Transient login input; exists only for the duration of one login attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginCredential {
    pub email: String,
    pub password: String,
}

impl LoginCredential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Trim both fields and require them to be non-empty.
    pub fn normalized(self) -> DomainResult<Self> {
        let email = self.email.trim().to_string();
        let password = self.password.trim().to_string();

        let mut missing = Vec::new();
        if email.is_empty() {
            missing.push("email");
        }
        if password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(DomainError::missing(missing));
        }

        Ok(Self { email, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_password_is_missing() {
        let err = LoginCredential::new("a@x.com", "   ").normalized().unwrap_err();
        assert_eq!(err, DomainError::missing(vec!["password"]));
    }

    #[test]
    fn trims_both_fields() {
        let c = LoginCredential::new(" a@x.com ", " p1").normalized().unwrap();
        assert_eq!(c, LoginCredential::new("a@x.com", "p1"));
    }
}
