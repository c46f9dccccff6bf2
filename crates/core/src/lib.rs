//! `accounts-core`: user record model and input normalization.
//!
//! This crate contains **pure domain** types (no transport or storage concerns).

pub mod credential;
pub mod error;
pub mod id;
pub mod user;
pub mod validate;

pub use credential::LoginCredential;
pub use error::{DomainError, DomainResult};
pub use id::UserId;
pub use user::{PublicUser, User};
pub use validate::{decode_credential, decode_user};
