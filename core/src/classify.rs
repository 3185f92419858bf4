//! Mapping of (endpoint, HTTP status, JSON body) to an outcome.
//!
//! # Design
//! The Polr API reuses status codes with different meanings per endpoint: a
//! 400 on shorten usually means the custom ending is taken, a 401 on lookup
//! may mean the secret-URL key is wrong. `classify` therefore takes the call
//! that produced the response alongside it, and evaluates status codes before
//! looking at the body shape. The rules, in order:
//!
//! 1. transport failure: `ServerOrConnection`
//! 2. body is not JSON (any status): `BadApiResponse`
//! 3. 401: `UnauthorizedKey`, naming the url key only on a keyed lookup
//! 4. 400: `CustomEndingUnavailable` on shorten with an ending, else
//!    `BadApiRequest`
//! 5. 403 on shorten: `QuotaExceeded`
//! 6. 500: `ServerOrConnection`
//! 7. 404 on lookup: `Classified::NotFound`
//! 8. `action` matches and `result` is non-null: `Classified::Result`
//! 9. anything else: `UnexpectedResponse`

use serde_json::Value;

use crate::error::{ApiError, RejectedKey};
use crate::http::HttpResponse;
use crate::transport::TransportError;

/// The operation a response belongs to, with the inputs that change how its
/// status codes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call<'a> {
    Shorten { custom_ending: Option<&'a str> },
    Lookup { url_key: Option<&'a str> },
}

impl Call<'_> {
    /// Value of the `action` field in a successful response.
    pub fn action(&self) -> &'static str {
        match self {
            Call::Shorten { .. } => "shorten",
            Call::Lookup { .. } => "lookup",
        }
    }
}

/// Non-error outcome of a classified response.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// The `result` field of a successful response.
    Result(Value),
    /// Lookup answered 404.
    NotFound,
}

pub fn classify(
    call: Call<'_>,
    response: Result<HttpResponse, TransportError>,
) -> Result<Classified, ApiError> {
    let response = response.map_err(|e| ApiError::ServerOrConnection(e.to_string()))?;
    let data: Value = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::BadApiResponse(e.to_string()))?;

    tracing::debug!(action = call.action(), status = response.status, "classifying response");

    match (response.status, call) {
        (401, Call::Lookup { url_key: Some(_) }) => {
            return Err(ApiError::UnauthorizedKey(RejectedKey::UrlKey))
        }
        (401, _) => return Err(ApiError::UnauthorizedKey(RejectedKey::ApiKey)),
        (400, Call::Shorten { custom_ending: Some(ending) }) => {
            return Err(ApiError::CustomEndingUnavailable(ending.to_string()))
        }
        (400, _) => return Err(ApiError::BadApiRequest),
        (403, Call::Shorten { .. }) => return Err(ApiError::QuotaExceeded),
        (500, _) => {
            return Err(ApiError::ServerOrConnection(
                "HTTP 500 Internal Server Error".to_string(),
            ))
        }
        (404, Call::Lookup { .. }) => return Ok(Classified::NotFound),
        _ => {}
    }

    let action_matches = data.get("action").and_then(Value::as_str) == Some(call.action());
    match data.get("result") {
        Some(result) if action_matches && !result.is_null() => Ok(Classified::Result(result.clone())),
        _ => Err(ApiError::UnexpectedResponse {
            expected: call.action(),
            body: response.body,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    const SHORTEN: Call<'static> = Call::Shorten { custom_ending: None };
    const SHORTEN_CUSTOM: Call<'static> = Call::Shorten { custom_ending: Some("mine") };
    const LOOKUP: Call<'static> = Call::Lookup { url_key: None };
    const LOOKUP_KEYED: Call<'static> = Call::Lookup { url_key: Some("k3y") };

    fn respond(status: u16, body: Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(status, body.to_string()))
    }

    fn kind(call: Call<'_>, status: u16) -> ErrorKind {
        classify(call, respond(status, json!({"error": "nope"})))
            .unwrap_err()
            .kind()
    }

    #[test]
    fn shorten_success_returns_result() {
        let out = classify(
            SHORTEN,
            respond(200, json!({"action": "shorten", "result": "https://ti.ny/abcd"})),
        )
        .unwrap();
        assert_eq!(out, Classified::Result(json!("https://ti.ny/abcd")));
    }

    #[test]
    fn unauthorized_on_every_call() {
        assert_eq!(
            classify(SHORTEN, respond(401, json!({}))).unwrap_err(),
            ApiError::UnauthorizedKey(RejectedKey::ApiKey)
        );
        assert_eq!(
            classify(LOOKUP, respond(401, json!({}))).unwrap_err(),
            ApiError::UnauthorizedKey(RejectedKey::ApiKey)
        );
        assert_eq!(
            classify(LOOKUP_KEYED, respond(401, json!({}))).unwrap_err(),
            ApiError::UnauthorizedKey(RejectedKey::UrlKey)
        );
    }

    #[test]
    fn bad_request_depends_on_call() {
        assert_eq!(
            classify(SHORTEN_CUSTOM, respond(400, json!({}))).unwrap_err(),
            ApiError::CustomEndingUnavailable("mine".to_string())
        );
        assert_eq!(kind(SHORTEN, 400), ErrorKind::BadApiRequest);
        assert_eq!(kind(LOOKUP, 400), ErrorKind::BadApiRequest);
    }

    #[test]
    fn forbidden_is_quota_only_on_shorten() {
        assert_eq!(kind(SHORTEN, 403), ErrorKind::QuotaExceeded);
        assert_eq!(kind(SHORTEN_CUSTOM, 403), ErrorKind::QuotaExceeded);
        assert_eq!(kind(LOOKUP, 403), ErrorKind::UnexpectedResponse);
    }

    #[test]
    fn internal_server_error_on_every_call() {
        assert_eq!(kind(SHORTEN, 500), ErrorKind::ServerOrConnection);
        assert_eq!(kind(LOOKUP_KEYED, 500), ErrorKind::ServerOrConnection);
    }

    #[test]
    fn not_found_only_on_lookup() {
        assert_eq!(
            classify(LOOKUP, respond(404, json!({"error": "not found"}))).unwrap(),
            Classified::NotFound
        );
        assert_eq!(kind(SHORTEN, 404), ErrorKind::UnexpectedResponse);
    }

    #[test]
    fn malformed_body_wins_over_status() {
        for status in [200, 400, 401, 403, 404, 500] {
            for call in [SHORTEN, SHORTEN_CUSTOM, LOOKUP, LOOKUP_KEYED] {
                let err = classify(call, Ok(HttpResponse::new(status, "<html>oops</html>")))
                    .unwrap_err();
                assert_eq!(err.kind(), ErrorKind::BadApiResponse, "{status} {call:?}");
            }
        }
    }

    #[test]
    fn transport_failure_is_server_or_connection() {
        let err = classify(SHORTEN, Err(TransportError("connection refused".to_string())))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::ServerOrConnection("connection refused".to_string())
        );
    }

    #[test]
    fn mismatched_action_is_unexpected() {
        let err = classify(
            SHORTEN,
            respond(200, json!({"action": "lookup", "result": "https://ti.ny/abcd"})),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnexpectedResponse { expected: "shorten", .. }
        ));
    }

    #[test]
    fn null_or_missing_result_is_unexpected() {
        assert_eq!(
            classify(LOOKUP, respond(200, json!({"action": "lookup", "result": null})))
                .unwrap_err()
                .kind(),
            ErrorKind::UnexpectedResponse
        );
        assert_eq!(
            classify(LOOKUP, respond(200, json!({"action": "lookup"})))
                .unwrap_err()
                .kind(),
            ErrorKind::UnexpectedResponse
        );
        assert_eq!(
            classify(LOOKUP, respond(200, json!(["lookup"])))
                .unwrap_err()
                .kind(),
            ErrorKind::UnexpectedResponse
        );
    }
}
