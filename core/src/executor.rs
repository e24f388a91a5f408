//! Request building and response parsing.
//!
//! # Design
//! `RequestExecutor` never touches the network. `build` turns an endpoint
//! into an absolute `HttpRequest` with JSON and auth headers attached;
//! `parse` turns an `HttpResponse` into a typed envelope or an `ApiError`.
//! `FleetClient` runs a `Transport` in between.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::envelope::ApiResponse;
use crate::error::{ApiError, NETWORK_ERROR, REQUEST_FAILED};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::TokenProvider;

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct RequestExecutor {
    base_url: String,
    tokens: TokenProvider,
}

impl RequestExecutor {
    pub fn new(config: &ClientConfig, tokens: TokenProvider) -> Self {
        Self {
            base_url: config.base_url.clone(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }

    /// Build one request. Caller headers replace defaults of the same name;
    /// the bearer header is added last when a session token exists.
    pub fn build(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<String>,
        extra_headers: &[(&str, &str)],
    ) -> HttpRequest {
        let mut headers = vec![(CONTENT_TYPE.to_string(), JSON.to_string())];
        for (name, value) in extra_headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                Some(slot) => slot.1 = value.to_string(),
                None => headers.push((name.to_string(), value.to_string())),
            }
        }

        let token = self.tokens.token();
        if let Some(token) = &token {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case(AUTHORIZATION));
            headers.push((AUTHORIZATION.to_string(), format!("Bearer {token}")));
        }

        let url = format!("{}{endpoint}", self.base_url);
        tracing::debug!(%method, %url, authenticated = token.is_some(), "building request");

        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Serialize `payload` as the JSON body and build the request.
    pub fn build_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.build(method, endpoint, Some(body), &[]))
    }

    /// Unwrap the envelope of a 2xx response, or turn a failure into
    /// `ApiError::RequestFailed`. The `success` flag is not consulted.
    pub fn parse<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<T>, ApiError> {
        tracing::debug!(status = response.status, "parsing response");
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Map non-2xx responses to `RequestFailed`, preferring the body's `error`
/// field, then `message`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::RequestFailed {
        status: response.status,
        message: failure_message(&response.body),
    })
}

fn failure_message(body: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return NETWORK_ERROR.to_string(),
    };
    ["error", "message"]
        .iter()
        .filter_map(|field| value.get(*field).and_then(|v| v.as_str()))
        .find(|text| !text.is_empty())
        .unwrap_or(REQUEST_FAILED)
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::{MemoryStore, SessionStore, SESSION_KEY};

    fn executor(session: Option<&str>) -> RequestExecutor {
        let store = MemoryStore::new();
        if let Some(raw) = session {
            store.set(SESSION_KEY, raw).unwrap();
        }
        RequestExecutor::new(
            &ClientConfig::new("http://localhost:8080/api"),
            TokenProvider::new(Arc::new(store)),
        )
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_without_session_has_json_header_only() {
        let req = executor(None).build(HttpMethod::Get, "/trucks", None, &[]);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/api/trucks");
        assert_eq!(
            req.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_with_session_adds_bearer_header() {
        let req = executor(Some(r#"{"token":"tok"}"#)).build(HttpMethod::Get, "/drivers", None, &[]);
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
    }

    #[test]
    fn caller_headers_merge_over_defaults() {
        let req = executor(None).build(
            HttpMethod::Post,
            "/shipments",
            Some("{}".to_string()),
            &[("content-type", "application/merge-patch+json"), ("X-Request-Id", "42")],
        );
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.header("Content-Type"), Some("application/merge-patch+json"));
        assert_eq!(req.header("x-request-id"), Some("42"));
    }

    #[test]
    fn session_token_overrides_caller_authorization() {
        let req = executor(Some(r#"{"token":"real"}"#)).build(
            HttpMethod::Get,
            "/dashboard",
            None,
            &[("Authorization", "Bearer stale")],
        );
        let auth: Vec<_> = req
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth[0].1, "Bearer real");
    }

    #[test]
    fn corrupted_session_builds_anonymous_request() {
        let req = executor(Some("not json at all")).build(HttpMethod::Get, "/track/X", None, &[]);
        assert_eq!(req.header("Authorization"), None);
    }

    #[test]
    fn empty_session_token_sends_no_authorization() {
        let req = executor(Some(r#"{"token":""}"#)).build(HttpMethod::Get, "/track/A", None, &[]);
        assert_eq!(req.header("Authorization"), None);
    }

    #[test]
    fn base_url_prefixes_every_endpoint() {
        let executor = executor(None);
        assert_eq!(executor.base_url(), "http://localhost:8080/api");
        let req = executor.build(HttpMethod::Delete, "/trucks/3", None, &[]);
        assert_eq!(req.url, format!("{}/trucks/3", executor.base_url()));
    }

    #[test]
    fn build_json_serializes_body() {
        let req = executor(None)
            .build_json(HttpMethod::Put, "/warehouses/1/inventory", &serde_json::json!({"changeAmount": -5}))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["changeAmount"], -5);
    }

    #[test]
    fn parse_returns_envelope_data() {
        let resp: ApiResponse<serde_json::Value> = executor(None)
            .parse(response(200, r#"{"success":true,"data":{"a":1},"timestamp":"T"}"#))
            .unwrap();
        assert_eq!(resp.data, serde_json::json!({"a": 1}));
        assert_eq!(resp.timestamp, "T");
    }

    #[test]
    fn failure_prefers_error_field() {
        let err = executor(None)
            .parse::<serde_json::Value>(response(400, r#"{"error":"X","message":"Y"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { status: 400, .. }));
        assert_eq!(err.to_string(), "X");
    }

    #[test]
    fn failure_falls_back_to_message_field() {
        let err = executor(None)
            .parse::<serde_json::Value>(response(404, r#"{"success":false,"message":"Y"}"#))
            .unwrap_err();
        assert_eq!(err.message(), "Y");
    }

    #[test]
    fn failure_with_json_but_no_text_is_generic() {
        let err = executor(None)
            .parse::<serde_json::Value>(response(500, r#"{"success":false}"#))
            .unwrap_err();
        assert_eq!(err.message(), "Request failed");
    }

    #[test]
    fn failure_with_unparseable_body_is_network_error() {
        let err = executor(None)
            .parse::<serde_json::Value>(response(502, "<html>Bad Gateway</html>"))
            .unwrap_err();
        assert_eq!(err.message(), "Network error");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn malformed_success_body_is_deserialization_error() {
        let err = executor(None)
            .parse::<serde_json::Value>(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
