//! HTTP boundary to the banking service.
//!
//! Everything above this module talks to [`RemoteApi`]; the reqwest-backed
//! [`HttpApiClient`] is the production implementation. A non-2xx status is a
//! transport failure here, the same way the service's other clients treat it.

use std::{error::Error as StdError, fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use shared::error::ApiError;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_reqwest(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// One call against the service, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub page: Option<u32>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            page: None,
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, None)
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// A 2xx response. `body` is `Null` when the service sent nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid service url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Setup(#[source] reqwest::Error),
    #[error("request to `{path}` failed: {source}")]
    Network {
        path: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    #[error("`{path}` responded with status {status}")]
    Status {
        path: String,
        status: u16,
        message: Option<String>,
    },
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

pub struct HttpApiClient {
    http: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` of `None` leaves requests unbounded.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let parsed = Url::parse(base_url).map_err(|source| TransportError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::Setup)?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RemoteApi for HttpApiClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let ApiRequest {
            method,
            path,
            page,
            body,
        } = request;

        debug!(%method, path = %path, ?page, "sending service request");

        let mut builder = self.http.request(method.as_reqwest(), self.endpoint(&path));
        if let Some(page) = page {
            builder = builder.query(&[("page", page)]);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let res = builder
            .send()
            .await
            .map_err(|source| TransportError::Network {
                path: path.clone(),
                source: Box::new(source),
            })?;
        let status = res.status();
        let text = res.text().await.map_err(|source| TransportError::Network {
            path: path.clone(),
            source: Box::new(source),
        })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                path,
                status: status.as_u16(),
                message: ApiError::from_body(&text).map(|err| err.message),
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
