//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, client-caused failures (bad input,
/// unknown keys, credential mismatch). Storage failures belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request body was not valid JSON for the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// One or more required fields were empty after trimming.
    #[error("missing fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// A requested record does not exist.
    #[error("not found")]
    NotFound,

    /// Supplied credentials did not match a stored record.
    #[error("authentication failed")]
    AuthenticationFailed,
}

impl DomainError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn missing(fields: Vec<&'static str>) -> Self {
        Self::Validation { missing: fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields_in_order() {
        let err = DomainError::missing(vec!["name", "password"]);
        assert_eq!(err.to_string(), "missing fields: name, password");
    }
}
