//! Operation handlers: one business action per request.
//!
//! Each handler owns the request's values for its lifetime and returns either a
//! finished response or an [`ApiError`] the router renders for it.

use axum::http::StatusCode;
use tokio_util::sync::CancellationToken;

use accounts_auth::{ApiKeyGuard, CredentialQuery, authenticate};
use accounts_core::{DomainError, UserId, decode_credential, decode_user};
use accounts_infra::StoreGateway;

use crate::envelope::{Request, Response};
use crate::errors::ApiError;
use crate::response::{empty, json_message, json_response};

/// Query parameter naming the user for lookups.
pub const USER_ID_PARAM: &str = "userId";

/// Dependencies shared by the user operations.
#[derive(Debug, Clone)]
pub struct Handlers {
    gateway: StoreGateway,
    guard: ApiKeyGuard,
}

impl Handlers {
    pub fn new(gateway: StoreGateway, guard: ApiKeyGuard) -> Self {
        Self { gateway, guard }
    }

    /// `POST /users`: guard → decode → normalize → put.
    pub async fn create_user(
        &self,
        req: &Request,
        cancel: &CancellationToken,
    ) -> Result<Response, ApiError> {
        // Rejected callers never reach the store.
        self.guard.check(&req.headers)?;

        let user = decode_user(&req.body)?;
        self.gateway.put_user(&user, cancel).await?;

        tracing::info!(user_id = %user.user_id, "user created");
        Ok(json_message(StatusCode::CREATED, "user created"))
    }

    /// `GET /users?userId=…` (lookup mode).
    pub async fn get_user(
        &self,
        req: &Request,
        cancel: &CancellationToken,
    ) -> Result<Response, ApiError> {
        let id: UserId = req
            .query
            .get(USER_ID_PARAM)
            .map(String::as_str)
            .unwrap_or_default()
            .parse()?;

        let user = self
            .gateway
            .get_user(&id, cancel)
            .await?
            .ok_or(DomainError::NotFound)?;

        Ok(json_response(StatusCode::OK, Some(&user.into_public())))
    }

    /// `GET /users` with a JSON credential body (login mode).
    pub async fn login_user(
        &self,
        req: &Request,
        cancel: &CancellationToken,
    ) -> Result<Response, ApiError> {
        let query = CredentialQuery::from(decode_credential(&req.body)?);
        let matches = self.gateway.find_by_credentials(&query, cancel).await?;
        let user = authenticate(matches)?;

        tracing::info!(user_id = %user.user_id, "login succeeded");
        Ok(json_response(StatusCode::OK, Some(&user)))
    }
}

/// `HEAD /health`: no input, no side effects, no failure mode.
pub fn health() -> Response {
    empty(StatusCode::NO_CONTENT)
}

/// `OPTIONS /users`: static CORS preflight acknowledgement.
pub fn preflight() -> Response {
    json_message(StatusCode::OK, "ok")
}
