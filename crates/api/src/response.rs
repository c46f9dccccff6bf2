//! Response builder: every reply leaves through here.
//!
//! Header policy is fixed and centralized; serialization failures degrade to a
//! literal 500 payload, so building a response can never fail.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::json;

use crate::envelope::Response;

/// Body used when the real payload cannot be serialized.
pub const SERIALIZATION_FALLBACK_BODY: &str =
    r#"{"error":"serialization_error","message":"json marshal failed"}"#;

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Methods".to_string(),
            "GET,POST,HEAD,OPTIONS".to_string(),
        ),
        (
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type,x-api-key".to_string(),
        ),
    ])
}

/// Serialize `body` (or nothing) into a response with the standard headers.
///
/// `None` yields an empty body, not `null`.
pub fn json_response<T>(status: StatusCode, body: Option<&T>) -> Response
where
    T: Serialize + ?Sized,
{
    let payload = match body.map(serde_json::to_string).transpose() {
        Ok(payload) => payload.unwrap_or_default(),
        Err(e) => {
            tracing::error!(error = %e, status = status.as_u16(), "response serialization failed");
            return Response {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                headers: default_headers(),
                body: SERIALIZATION_FALLBACK_BODY.to_string(),
            };
        }
    };

    Response {
        status,
        headers: default_headers(),
        body: payload,
    }
}

/// `{"error": code, "message": message}` with the given status.
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    json_response(
        status,
        Some(&json!({
            "error": code,
            "message": message.into(),
        })),
    )
}

/// `{"message": message}` with the given status.
pub fn json_message(status: StatusCode, message: &str) -> Response {
    json_response(status, Some(&json!({ "message": message })))
}

pub fn empty(status: StatusCode) -> Response {
    json_response::<()>(status, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("boom"))
        }
    }

    #[test]
    fn every_response_carries_cors_and_content_type() {
        let r = json_message(StatusCode::OK, "ok");
        assert_eq!(r.header("Content-Type"), Some("application/json"));
        assert_eq!(r.header("Access-Control-Allow-Origin"), Some("*"));
        assert!(r.header("Access-Control-Allow-Methods").is_some());
        assert!(r.header("Access-Control-Allow-Headers").is_some());
        assert_eq!(r.body, r#"{"message":"ok"}"#);
    }

    #[test]
    fn absent_body_is_empty_not_null() {
        let r = empty(StatusCode::NO_CONTENT);
        assert_eq!(r.status, StatusCode::NO_CONTENT);
        assert!(r.body.is_empty());
    }

    #[test]
    fn serialization_failure_degrades_to_500_json() {
        let r = json_response(StatusCode::OK, Some(&Unserializable));
        assert_eq!(r.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(r.header("Content-Type"), Some("application/json"));
        assert_eq!(r.json()["error"], "serialization_error");
    }

    #[test]
    fn error_shape_is_code_and_message() {
        let r = json_error(StatusCode::BAD_REQUEST, "invalid_json", "invalid json");
        assert_eq!(
            r.json(),
            json!({ "error": "invalid_json", "message": "invalid json" })
        );
    }
}
