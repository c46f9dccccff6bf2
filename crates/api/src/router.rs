//! Router/dispatcher: maps `(method, path)` to exactly one operation.
//!
//! The routing table is an explicit map built once at startup. Lookup is an
//! exact string match: no path parameters, no wildcards, no trailing-slash
//! folding. Anything unmatched is a well-formed 405, never a fault.

use std::collections::HashMap;

use axum::http::StatusCode;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use accounts_auth::ApiKeyGuard;
use accounts_infra::{AppConfig, GetUsersMode, StoreGateway};

use crate::envelope::{Method, Request, Response};
use crate::handlers::{self, Handlers};
use crate::response::json_error;

/// Operations the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    CreateUser,
    GetUser,
    LoginUser,
    Health,
    Preflight,
}

#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    routes: HashMap<(Method, String), Route>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard route set under `prefix`.
    ///
    /// `GET {prefix}/users` is bound to exactly one operation, chosen by `mode`.
    pub fn standard(prefix: &str, mode: GetUsersMode) -> Self {
        let users = format!("{prefix}/users");
        let health = format!("{prefix}/health");
        let get_users = match mode {
            GetUsersMode::Login => Route::LoginUser,
            GetUsersMode::Lookup => Route::GetUser,
        };

        Self::new()
            .route(Method::Post, &users, Route::CreateUser)
            .route(Method::Get, &users, get_users)
            .route(Method::Head, &health, Route::Health)
            .route(Method::Options, &users, Route::Preflight)
    }

    pub fn route(mut self, method: Method, path: impl Into<String>, route: Route) -> Self {
        self.routes.insert((method, path.into()), route);
        self
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Option<Route> {
        self.routes.get(&(method.clone(), path.to_string())).copied()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Request dispatcher.
///
/// Owns the routing table and the injected handler dependencies; holds no
/// per-request state, so one instance serves all concurrent requests.
#[derive(Debug, Clone)]
pub struct Router {
    table: RoutingTable,
    handlers: Handlers,
}

impl Router {
    pub fn new(table: RoutingTable, handlers: Handlers) -> Self {
        Self { table, handlers }
    }

    /// Standard wiring from configuration and a constructed gateway.
    pub fn from_config(config: &AppConfig, gateway: StoreGateway) -> Self {
        let table = RoutingTable::standard(&config.route_prefix, config.get_users_mode);
        let guard = ApiKeyGuard::new(config.api_key.clone());
        Self::new(table, Handlers::new(gateway, guard))
    }

    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// Handle one request start to finish.
    ///
    /// Always yields a response; `cancel` aborts any in-flight store call.
    pub async fn dispatch(&self, req: Request, cancel: &CancellationToken) -> Response {
        let span = tracing::info_span!(
            "request",
            request_id = %Uuid::now_v7(),
            method = %req.method,
            path = %req.path,
        );

        async move {
            let Some(route) = self.table.resolve(&req.method, &req.path) else {
                tracing::debug!("no route");
                return method_not_allowed();
            };

            let result = match route {
                Route::CreateUser => self.handlers.create_user(&req, cancel).await,
                Route::GetUser => self.handlers.get_user(&req, cancel).await,
                Route::LoginUser => self.handlers.login_user(&req, cancel).await,
                Route::Health => Ok(handlers::health()),
                Route::Preflight => Ok(handlers::preflight()),
            };

            let response = result.unwrap_or_else(|e| e.into_response(route));
            tracing::info!(?route, status = response.status.as_u16(), "request handled");
            response
        }
        .instrument(span)
        .await
    }
}

pub fn method_not_allowed() -> Response {
    json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "method_not_allowed",
        "method not allowed",
    )
}
