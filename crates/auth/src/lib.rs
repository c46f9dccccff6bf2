//! `accounts-auth`: shared-secret guard and credential resolution.
//!
//! This crate is intentionally decoupled from HTTP and storage: it sees header
//! maps and already-loaded records, never sockets or backends.

pub mod api_key;
pub mod login;

pub use api_key::{API_KEY_HEADER, ApiKey, ApiKeyError, ApiKeyGuard};
pub use login::{CredentialQuery, authenticate};
