//! Credential resolution for login.
//!
//! Matching is plaintext equality on `email` and `password`, evaluated by the
//! store's scan filter. There is no hashing and no constant-time comparison.

use accounts_core::{DomainError, DomainResult, LoginCredential, PublicUser, User};

/// Attribute equalities a stored record must satisfy to match a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialQuery {
    pub email: String,
    pub password: String,
}

impl CredentialQuery {
    /// At most one record is ever needed to decide a login.
    pub const LIMIT: usize = 1;

    /// `(attribute, expected value)` pairs, all of which must hold.
    pub fn attribute_equalities(&self) -> [(&'static str, &str); 2] {
        [("email", &self.email), ("password", &self.password)]
    }
}

impl From<LoginCredential> for CredentialQuery {
    fn from(c: LoginCredential) -> Self {
        Self {
            email: c.email,
            password: c.password,
        }
    }
}

/// Resolve scan matches into the authenticated user.
///
/// The first match wins; the password is stripped before the record leaves.
pub fn authenticate(matches: Vec<User>) -> DomainResult<PublicUser> {
    matches
        .into_iter()
        .next()
        .map(User::into_public)
        .ok_or(DomainError::AuthenticationFailed)
}
