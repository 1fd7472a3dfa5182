//! Generic request helper.
//!
//! `Fetcher` exposes one method per HTTP verb. Each issues exactly one
//! transport call and folds every outcome into `Result<_, HttpError>`:
//! no retry, no timeout, no caching and no logging.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HttpError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Per-call body and headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` as the JSON body and set `content-type`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, HttpError> {
        let body = serde_json::to_string(value).map_err(|_| HttpError::Unexpected)?;
        Ok(Self::new()
            .body(body)
            .header("content-type", "application/json"))
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Stateless request helper over a shared transport.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher").finish_non_exhaustive()
    }
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET `url` and decode the JSON body as `T`. Any body in `options` is
    /// ignored.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: FetchOptions,
    ) -> Result<T, HttpError> {
        let response = self.send(HttpMethod::Get, url, options.headers, None).await?;
        serde_json::from_str(&response.body).map_err(|_| HttpError::Unexpected)
    }

    pub async fn post(&self, url: &str, options: FetchOptions) -> Result<(), HttpError> {
        self.send(HttpMethod::Post, url, options.headers, options.body)
            .await
            .map(drop)
    }

    pub async fn put(&self, url: &str, options: FetchOptions) -> Result<(), HttpError> {
        self.send(HttpMethod::Put, url, options.headers, options.body)
            .await
            .map(drop)
    }

    pub async fn patch(&self, url: &str, options: FetchOptions) -> Result<(), HttpError> {
        self.send(HttpMethod::Patch, url, options.headers, options.body)
            .await
            .map(drop)
    }

    /// DELETE `url`. Any body in `options` is ignored.
    pub async fn delete(&self, url: &str, options: FetchOptions) -> Result<(), HttpError> {
        self.send(HttpMethod::Delete, url, options.headers, None)
            .await
            .map(drop)
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        };
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|_| HttpError::Unexpected)?;
        check_status(response)
    }
}

/// Map non-2xx responses to `HttpError::FetchFailed`.
fn check_status(response: HttpResponse) -> Result<HttpResponse, HttpError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(HttpError::FetchFailed {
            status: response.status,
        })
    }
}
