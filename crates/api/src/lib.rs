//! HTTP API: request dispatch, operation handlers, and response mapping.
//!
//! The core (`router`, `handlers`, `response`) is transport-neutral: it consumes
//! an [`envelope::Request`] and always produces an [`envelope::Response`].
//! `http` adapts that contract to a real axum listener.

pub mod app;
pub mod envelope;
pub mod errors;
pub mod handlers;
pub mod http;
pub mod response;
pub mod router;

pub use envelope::{Method, Request, Response};
pub use router::{Route, Router, RoutingTable};
