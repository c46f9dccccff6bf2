//! axum adapter: turns real HTTP traffic into envelopes and back.
//!
//! All routing lives in [`Router`]; axum only sees a single fallback handler,
//! so unknown methods and paths still get the JSON 405 instead of axum's own.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use tokio_util::sync::CancellationToken;

use crate::envelope::{Request, Response};
use crate::response::json_error;
use crate::router::Router;

/// Largest request body accepted before the router is consulted.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct HttpState {
    pub router: Arc<Router>,
    /// Parent of every per-request cancellation token.
    pub shutdown: CancellationToken,
}

pub fn build_app(router: Arc<Router>, shutdown: CancellationToken) -> axum::Router {
    axum::Router::new()
        .fallback(handle)
        .with_state(HttpState { router, shutdown })
}

async fn handle(
    State(state): State<HttpState>,
    req: axum::extract::Request,
) -> axum::response::Response {
    let req = match into_envelope(req).await {
        Ok(req) => req,
        Err(resp) => return into_http(resp),
    };

    let cancel = state.shutdown.child_token();
    let resp = state.router.dispatch(req, &cancel).await;
    into_http(resp)
}

async fn into_envelope(req: axum::extract::Request) -> Result<Request, Response> {
    let (parts, body) = req.into_parts();

    let query = match Query::<HashMap<String, String>>::try_from_uri(&parts.uri) {
        Ok(Query(q)) => q,
        Err(e) => {
            tracing::debug!(error = %e, "unparseable query string ignored");
            HashMap::new()
        }
    };

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        tracing::debug!(error = %e, "request body rejected");
        json_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "payload_too_large",
            "request body too large",
        )
    })?;

    Ok(Request {
        method: parts.method.as_str().into(),
        path: parts.uri.path().to_string(),
        query,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn into_http(resp: Response) -> axum::response::Response {
    let mut out = axum::response::Response::new(Body::from(resp.body));
    *out.status_mut() = resp.status;

    for (name, value) in &resp.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(n), Ok(v)) => {
                out.headers_mut().insert(n, v);
            }
            _ => tracing::warn!(header = %name, "dropping invalid response header"),
        }
    }
    out
}
