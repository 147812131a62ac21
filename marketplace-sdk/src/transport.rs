//! HTTP transport backed by reqwest
//!
//! Builds the shared HTTP client and forwards descriptors to the network. The
//! transport has no timeout of its own; deadlines belong to the executor.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use tracing::debug;

use crate::core::{HttpMethod, RawResponse, RequestDescriptor, Transport};
use crate::error::{Result, ServiceError};

/// Build a standard HTTP client with default headers
pub fn build_http_client(
    user_agent: &str,
    default_headers: &HashMap<String, String>,
    compression: bool,
) -> Result<Client> {
    let mut headers = HeaderMap::new();

    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .map_err(|e| ServiceError::configuration(format!("Invalid user agent: {}", e)))?,
    );

    for (key, value) in default_headers {
        let header_name = HeaderName::from_str(key)
            .map_err(|e| ServiceError::configuration(format!("Invalid header name: {}", e)))?;

        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ServiceError::configuration(format!("Invalid header value: {}", e)))?;

        headers.insert(header_name, header_value);
    }

    Client::builder()
        .default_headers(headers)
        .gzip(compression)
        .build()
        .map_err(|e| ServiceError::configuration(format!("Failed to build HTTP client: {}", e)))
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Transport issuing real HTTP requests
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        let mut builder = self
            .client
            .request(Method::from(request.method()), request.target());

        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body() {
            builder = builder.body(body.to_owned());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        // An unreadable body counts as "no payload"; the status still decides
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                debug!(status, error = %e, "failed to read response body");
                Vec::new()
            }
        };

        Ok(RawResponse { status, body })
    }
}
