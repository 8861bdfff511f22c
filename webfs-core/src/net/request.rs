//! src/net/request.rs
//! ============================================================================
//! # RequestClient: Uniform HTTP Call Wrapper
//!
//! Every network call in the crate goes through [`RequestClient::request`]
//! and resolves to the same [`RequestResult`] shape whether the server
//! answered 200 or 500. Only transport-level failures (DNS, connection
//! refused, timeout) surface as an error. The method is chosen by the body:
//! no body means GET, any [`RequestBody`] means POST.

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tracing::trace;

use crate::error::AppError;

/// Payload for a POST request. Callers that have nothing to send pass
/// `None` to [`RequestClient::request`] and get a GET. There is no variant
/// for arbitrary payload types: unsupported payloads are unrepresentable
/// instead of failing at call time.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON-serialized object body, `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Verbatim string body, `Content-Type: application/x-www-form-urlencoded`.
    Form(String),
    /// POST with no payload (used by endpoints that key off the method).
    Empty,
}

/// The uniform shape every network call resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    /// True for 2xx status codes.
    pub ok: bool,
    pub status: u16,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RequestClient {
    http: reqwest::Client,
}

impl RequestClient {
    /// Builds the underlying client with a cookie store so stored
    /// credentials ride along on every call.
    pub fn new() -> Result<Self, AppError> {
        let http: reqwest::Client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http })
    }

    /// Issues the request and collects the body. HTTP error statuses are
    /// ordinary results here, never `Err`.
    pub async fn request(
        &self,
        url: &str,
        body: Option<RequestBody>,
        headers: &HeaderMap,
    ) -> Result<RequestResult, AppError> {
        let request: reqwest::Request = self.build(url, body, headers)?;
        trace!("{} {}", request.method(), request.url());

        let response = self.http.execute(request).await?;
        let status: u16 = response.status().as_u16();
        let ok: bool = response.status().is_success();
        let text: String = response.text().await?;

        Ok(RequestResult { ok, status, text })
    }

    /// Pure request-construction step, kept separate so the body/header
    /// contract is testable without any network.
    fn build(
        &self,
        url: &str,
        body: Option<RequestBody>,
        headers: &HeaderMap,
    ) -> Result<reqwest::Request, AppError> {
        let url: reqwest::Url =
            reqwest::Url::parse(url).map_err(|e| AppError::InvalidUrl(e.to_string()))?;

        let builder = match &body {
            None => self.http.get(url),
            Some(_) => self.http.post(url),
        }
        .headers(headers.clone());

        // Content type is decided by the payload kind and wins over any
        // caller-supplied header, matching the transport contract.
        let builder = match body {
            None | Some(RequestBody::Empty) => builder,
            Some(RequestBody::Json(value)) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(&value)?),
            Some(RequestBody::Form(raw)) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(raw),
        };

        builder.build().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use reqwest::header::{AUTHORIZATION, HeaderValue};
    use serde_json::json;

    fn client() -> RequestClient {
        RequestClient::new().expect("client should build")
    }

    fn body_bytes(request: &reqwest::Request) -> &[u8] {
        request
            .body()
            .and_then(|b| b.as_bytes())
            .expect("request should carry an inline body")
    }

    #[test]
    fn no_body_means_get() {
        let request = client()
            .build("http://files.test/api/file", None, &HeaderMap::new())
            .unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert!(request.body().is_none());
        assert!(request.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn json_body_roundtrip() {
        let value = json!({"a": 1});
        let request = client()
            .build(
                "http://files.test/api/file",
                Some(RequestBody::Json(value.clone())),
                &HeaderMap::new(),
            )
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            body_bytes(&request),
            serde_json::to_string(&value).unwrap().as_bytes()
        );
    }

    #[test]
    fn form_body_is_sent_verbatim() {
        let request = client()
            .build(
                "http://files.test/api/file",
                Some(RequestBody::Form("a=1&b=two".to_string())),
                &HeaderMap::new(),
            )
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(body_bytes(&request), b"a=1&b=two");
    }

    #[test]
    fn empty_body_posts_without_payload() {
        let request = client()
            .build(
                "http://files.test/api/file",
                Some(RequestBody::Empty),
                &HeaderMap::new(),
            )
            .unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert!(request.body().is_none());
    }

    #[test]
    fn caller_headers_are_preserved() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("sesame"));
        let request = client()
            .build("http://files.test/api/file", None, &headers)
            .unwrap();
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "sesame");
    }

    #[test]
    fn bad_url_fails_fast() {
        let result = client().build("not a url", None, &HeaderMap::new());
        assert!(matches!(result, Err(AppError::InvalidUrl(_))));
    }
}
