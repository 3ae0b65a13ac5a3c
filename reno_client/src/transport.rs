//! # Service Transport
//!
//! HTTP plumbing shared by the calculation and template endpoints: one
//! `reqwest` client with a cookie jar, and the CSRF contract — the token
//! is read from the `csrftoken` cookie and echoed in the `X-CSRFToken`
//! header on every non-GET request.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use reno_core::errors::{EstimateError, EstimateResult};

/// Cookie the service sets the CSRF token in
const CSRF_COOKIE: &str = "csrftoken";
/// Header the token is echoed in on mutating requests
const CSRF_HEADER: &str = "X-CSRFToken";

/// Error body shape the service uses for failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the calculation/template services.
///
/// Holds the base URL and a cookie jar; the CSRF cookie is either set by
/// a previous response or installed directly via [`set_csrf_token`]
/// for non-browser embeddings.
///
/// [`set_csrf_token`]: ServiceClient::set_csrf_token
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base: Url,
    http: Client,
    jar: Arc<Jar>,
}

impl ServiceClient {
    /// Build a client for the service at `base_url`
    pub fn new(base_url: &str) -> EstimateResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| EstimateError::transport(format!("invalid base URL: {e}")))?;

        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .user_agent(format!("RenoCalc/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .cookie_provider(jar.clone())
            .build()
            .map_err(|e| EstimateError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(ServiceClient { base, http, jar })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Install a CSRF token as if the service had set the cookie
    pub fn set_csrf_token(&self, token: &str) {
        self.jar
            .add_cookie_str(&format!("{CSRF_COOKIE}={token}"), &self.base);
    }

    /// Current CSRF token, read from the cookie jar
    pub fn csrf_token(&self) -> Option<String> {
        let cookies = self.jar.cookies(&self.base)?;
        let cookies = cookies.to_str().ok()?;
        cookies.split("; ").find_map(|pair| {
            pair.strip_prefix(CSRF_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_string)
        })
    }

    /// Request builder for `path`, with the CSRF header attached to every
    /// non-GET request
    pub(crate) fn request(&self, method: Method, path: &str) -> EstimateResult<RequestBuilder> {
        let url = self
            .base
            .join(path)
            .map_err(|e| EstimateError::transport(format!("invalid request path: {e}")))?;

        let mut builder = self.http.request(method.clone(), url);
        if method != Method::GET {
            if let Some(token) = self.csrf_token() {
                builder = builder.header(CSRF_HEADER, token);
            }
        }
        Ok(builder)
    }

    pub(crate) fn get(&self, path: &str) -> EstimateResult<RequestBuilder> {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> EstimateResult<RequestBuilder> {
        self.request(Method::POST, path)
    }

    pub(crate) fn delete(&self, path: &str) -> EstimateResult<RequestBuilder> {
        self.request(Method::DELETE, path)
    }
}

/// Map a send-level reqwest error to the transport class
pub(crate) fn transport_error(e: reqwest::Error) -> EstimateError {
    EstimateError::transport(e.to_string())
}

/// Decode a response body.
///
/// Non-success statuses surface the body's `error` message when one is
/// present, or a generic fallback; a 2xx body that fails to decode is a
/// malformed response.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> EstimateResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.error)
            .unwrap_or_else(|| "request failed".to_string());
        return Err(EstimateError::service_rejected(status.as_u16(), message));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| EstimateError::malformed_response(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = ServiceClient::new("not a url").unwrap_err();
        assert_eq!(err.error_code(), "TRANSPORT");
    }

    #[test]
    fn test_csrf_token_roundtrip() {
        let client = ServiceClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.csrf_token(), None);

        client.set_csrf_token("tok123");
        assert_eq!(client.csrf_token(), Some("tok123".to_string()));
    }

    #[test]
    fn test_csrf_header_on_mutating_requests_only() {
        let client = ServiceClient::new("http://localhost:8000/").unwrap();
        client.set_csrf_token("tok123");

        let post = client.post("/save-template/").unwrap().build().unwrap();
        assert_eq!(post.headers().get(CSRF_HEADER).unwrap(), "tok123");

        let delete = client
            .delete("/delete-current-template/")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(delete.headers().get(CSRF_HEADER).unwrap(), "tok123");

        let get = client.get("/get-template/1/").unwrap().build().unwrap();
        assert!(get.headers().get(CSRF_HEADER).is_none());
    }

    #[test]
    fn test_no_header_without_token() {
        let client = ServiceClient::new("http://localhost:8000/").unwrap();
        let post = client.post("/calculate-materials/").unwrap().build().unwrap();
        assert!(post.headers().get(CSRF_HEADER).is_none());
    }
}
