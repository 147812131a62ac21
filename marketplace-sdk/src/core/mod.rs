//! Core abstractions for the marketplace SDK
//!
//! This module provides the trait interfaces the data-access layer is built
//! on:
//!
//! - `Transport`: issues one network call, no timeout of its own required
//! - `Timer`: produces the deadline a call is raced against
//! - `RequestExecutor`: runs a `RequestDescriptor` and always yields an envelope
//! - `ClientBuilder`: builder pattern for assembling a `DataClient`

pub mod builder;
pub mod executor;
pub mod timer;

pub use builder::ClientBuilder;
pub use executor::HttpExecutor;
pub use timer::TokioTimer;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{de::DeserializeOwned, Serialize};

use crate::envelope::ApiResponse;
use crate::error::{Result, ServiceError};

/// Header every descriptor carries unless overridden
pub const CONTENT_TYPE: &str = "Content-Type";

/// Media type of request and response bodies
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A single request, built fresh for every call and immutable afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    target: String,
    method: HttpMethod,
    body: Option<String>,
    timeout: Option<Duration>,
    headers: BTreeMap<String, String>,
    /// Lower-cased names set per call, which configured headers never replace
    pinned: BTreeSet<String>,
}

impl RequestDescriptor {
    /// Create a descriptor without a body
    pub fn new(method: HttpMethod, target: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), JSON_MEDIA_TYPE.to_string());

        Self {
            target: target.into(),
            method,
            body: None,
            timeout: None,
            headers,
            pinned: BTreeSet::new(),
        }
    }

    /// GET descriptor
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, target)
    }

    /// POST descriptor with a JSON body
    pub fn post<B: Serialize + ?Sized>(target: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(HttpMethod::Post, target).with_json_body(body)
    }

    /// PUT descriptor with a JSON body
    pub fn put<B: Serialize + ?Sized>(target: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(HttpMethod::Put, target).with_json_body(body)
    }

    /// DELETE descriptor
    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, target)
    }

    /// Serialize `body` as the JSON payload
    pub fn with_json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let encoded = serde_json::to_string(body)
            .map_err(|e| ServiceError::serialization(format!("Failed to serialize request body: {}", e)))?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Override the executor's default timeout for this call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a header for this call only, replacing any existing header of the
    /// same name. Configured client headers do not override it.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.pinned.insert(name.to_ascii_lowercase());
        self.replace_header(name, value.into());
        self
    }

    /// Apply client-wide headers on top of the built-in defaults.
    ///
    /// Precedence: per-call [`with_header`](Self::with_header), then these,
    /// then the default `Content-Type`.
    pub fn with_configured_headers(mut self, headers: &HashMap<String, String>) -> Self {
        for (name, value) in headers {
            if !self.pinned.contains(&name.to_ascii_lowercase()) {
                self.replace_header(name.clone(), value.clone());
            }
        }
        self
    }

    fn replace_header(&mut self, name: String, value: String) {
        self.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value);
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of an answered request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Response with a JSON-encoded body
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network primitive used by the executor.
///
/// An `Err` means no HTTP answer was obtained (DNS, refused connection,
/// unreachable network). Any answer, whatever its status, is an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse>;
}

/// Source of deadlines.
///
/// Dropping the returned future cancels the pending deadline.
pub trait Timer: Send + Sync {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Trait responsible for executing requests with strong typing.
///
/// `execute` classifies every transport outcome into an [`ApiResponse`]; an
/// `Err` is reserved for requests that could not even be built.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute a request whose payload decodes as `R`
    async fn execute<R>(&self, request: RequestDescriptor) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned + Send + 'static;

    /// Execute a GET request
    async fn get<R>(&self, target: &str) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned + Send + 'static,
    {
        self.execute(RequestDescriptor::get(target)).await
    }

    /// Execute a POST request with a JSON body
    async fn post<B, R>(&self, target: &str, body: &B) -> Result<ApiResponse<R>>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send + 'static,
    {
        let request = RequestDescriptor::post(target, body)?;
        self.execute(request).await
    }

    /// Execute a PUT request with a JSON body
    async fn put<B, R>(&self, target: &str, body: &B) -> Result<ApiResponse<R>>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send + 'static,
    {
        let request = RequestDescriptor::put(target, body)?;
        self.execute(request).await
    }

    /// Execute a DELETE request
    async fn delete<R>(&self, target: &str) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned + Send + 'static,
    {
        self.execute(RequestDescriptor::delete(target)).await
    }
}
