use std::collections::HashMap;

use thiserror::Error;

/// Header carrying the shared secret (exact, case-sensitive key).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared secret expected in [`API_KEY_HEADER`].
///
/// `Debug` is redacted so the secret never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiKeyError {
    #[error("missing x-api-key header")]
    Missing,

    #[error("x-api-key does not match")]
    Mismatch,
}

/// Guard for protected operations.
///
/// With no key configured the guard admits every request.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGuard {
    expected: Option<ApiKey>,
}

impl ApiKeyGuard {
    pub fn new(expected: Option<ApiKey>) -> Self {
        Self { expected }
    }

    pub fn disabled() -> Self {
        Self { expected: None }
    }

    /// Check the request headers against the configured key.
    pub fn check(&self, headers: &HashMap<String, String>) -> Result<(), ApiKeyError> {
        let Some(expected) = &self.expected else {
            return Ok(());
        };

        let presented = headers.get(API_KEY_HEADER).ok_or(ApiKeyError::Missing)?;
        if presented != expected.as_str() {
            tracing::debug!("api key mismatch");
            return Err(ApiKeyError::Mismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn disabled_guard_admits_anything() {
        let guard = ApiKeyGuard::disabled();
        assert!(guard.check(&HashMap::new()).is_ok());
    }

    #[test]
    fn enabled_guard_requires_matching_header() {
        let guard = ApiKeyGuard::new(Some(ApiKey::new("s3cret")));
        assert_eq!(guard.check(&HashMap::new()), Err(ApiKeyError::Missing));
        assert_eq!(
            guard.check(&headers(&[("x-api-key", "nope")])),
            Err(ApiKeyError::Mismatch)
        );
        assert!(guard.check(&headers(&[("x-api-key", "s3cret")])).is_ok());
    }

    #[test]
    fn header_name_is_case_sensitive() {
        let guard = ApiKeyGuard::new(Some(ApiKey::new("s3cret")));
        assert_eq!(
            guard.check(&headers(&[("X-Api-Key", "s3cret")])),
            Err(ApiKeyError::Missing)
        );
    }

    #[test]
    fn debug_redacts_secret() {
        assert_eq!(format!("{:?}", ApiKey::new("s3cret")), "ApiKey(***)");
    }
}
