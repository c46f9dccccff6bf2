//! Error → response mapping, in one place.
//!
//! Client-caused errors (bad input, unknown id, bad credentials, bad api key)
//! map to 4xx and are only logged at debug. Store and record failures map to
//! 500 and are the only errors logged as operational problems.

use axum::http::StatusCode;
use thiserror::Error;

use accounts_auth::ApiKeyError;
use accounts_core::DomainError;
use accounts_infra::{GatewayError, StoreError};

use crate::envelope::Response;
use crate::response::json_error;
use crate::router::Route;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    ApiKey(#[from] ApiKeyError),
}

impl ApiError {
    /// Render the error for the operation that produced it.
    pub fn into_response(self, route: Route) -> Response {
        match self {
            ApiError::Domain(e) => domain_error_to_response(e, route),
            ApiError::Gateway(e) => gateway_error_to_response(e, route),
            ApiError::ApiKey(e) => {
                tracing::debug!(error = %e, ?route, "api key rejected");
                json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
            }
        }
    }
}

fn domain_error_to_response(err: DomainError, route: Route) -> Response {
    tracing::debug!(error = %err, ?route, "client error");
    match err {
        DomainError::MalformedInput(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_json", "invalid json")
        }
        DomainError::Validation { .. } => match route {
            Route::LoginUser => json_error(
                StatusCode::BAD_REQUEST,
                "missing_credentials",
                "email and password required",
            ),
            Route::GetUser => {
                json_error(StatusCode::BAD_REQUEST, "missing_user_id", "userId required")
            }
            _ => json_error(StatusCode::BAD_REQUEST, "missing_fields", err.to_string()),
        },
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::AuthenticationFailed => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid email or password",
        ),
    }
}

fn gateway_error_to_response(err: GatewayError, route: Route) -> Response {
    match err {
        GatewayError::Store(StoreError::Cancelled) => {
            tracing::warn!(?route, "store call cancelled");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", "storage error")
        }
        GatewayError::Store(e) => {
            tracing::error!(error = %e, ?route, "store call failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", "storage error")
        }
        GatewayError::Record(e) => {
            tracing::error!(error = %e, ?route, "stored record could not be decoded");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "unmarshal_error", "unmarshal error")
        }
    }
}
