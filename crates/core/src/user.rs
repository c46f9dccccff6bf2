//! User account record.
//!
//! The same shape is used on the wire (camelCase JSON) and in storage
//! (attribute names `userId`, `name`, `email`, `password`).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One account as submitted by a client or loaded from the store.
///
/// # Invariants
/// - A *persisted* user has all four fields non-empty and trimmed
///   (enforced by [`User::normalized`] before any write).
/// - `password` is stored verbatim; it never leaves the service (see [`PublicUser`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Trim every field, then require all of them to be non-empty.
    pub fn normalized(self) -> DomainResult<Self> {
        let user = Self {
            user_id: self.user_id.trim().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        };

        let missing: Vec<&'static str> = [
            ("userId", &user.user_id),
            ("name", &user.name),
            ("email", &user.email),
            ("password", &user.password),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(k, _)| k)
        .collect();

        if !missing.is_empty() {
            return Err(DomainError::missing(missing));
        }
        Ok(user)
    }

    /// Drop the password, producing the representation returned to callers.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            user_id: self.user_id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Caller-facing view of a [`User`] (no password field at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
}
