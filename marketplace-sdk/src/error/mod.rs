//! Error handling for the marketplace SDK
//!
//! This module provides the error taxonomy used below the envelope boundary:
//! - Categorizes failures (timeout, transport, server, not found, ...)
//! - Adds context to errors for logging
//! - Collapses any error into an [`ApiResponse`] with its synthesized status
//! - Provides a convenient Result type alias

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::envelope::{status, ApiResponse, TIMEOUT_MESSAGE};

pub mod mapping;

/// Result type for SDK operations that may raise
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Why a request produced no payload
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The timer fired before a response arrived
    #[error("{0}")]
    Timeout(String),

    /// DNS, connection refused, network unreachable and similar
    #[error("{0}")]
    Transport(String),

    /// Non-2xx answer from the remote source
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Nothing could resolve the requested identifier
    #[error("{0}")]
    NotFound(String),

    /// A request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A response body or bundled document could not be decoded
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Another error plus where it happened
    #[error("{inner}")]
    WithContext {
        inner: Box<ServiceError>,
        context: ErrorContext,
    },
}

impl ServiceError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Error for a non-2xx status and the message derived from its body
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Wrap this error with `context`
    pub fn with_context(self, context: ErrorContext) -> Self {
        Self::WithContext {
            inner: Box::new(self),
            context,
        }
    }

    /// Wrap this error with a one-entry context
    pub fn with_context_value(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.with_context(ErrorContext::new().with(key, value))
    }

    /// The error without any context wrappers
    pub fn root(&self) -> &ServiceError {
        match self {
            Self::WithContext { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Component named by the outermost context, if any
    pub fn service_name(&self) -> Option<&str> {
        match self {
            Self::WithContext { context, .. } => Some(&context.service),
            _ => None,
        }
    }

    /// Check if the timer fired
    pub fn is_timeout(&self) -> bool {
        matches!(self.root(), Self::Timeout(_))
    }

    /// The status code an envelope reports for this error
    pub fn envelope_status(&self) -> u16 {
        match self.root() {
            Self::Timeout(_) => status::REQUEST_TIMEOUT,
            Self::Server { status, .. } => *status,
            Self::NotFound(_) => status::NOT_FOUND,
            _ => status::INTERNAL_ERROR,
        }
    }

    /// Collapse this error into a failed envelope
    pub fn into_response<T>(self) -> ApiResponse<T> {
        if self.is_timeout() {
            return ApiResponse::timeout();
        }
        let status = self.envelope_status();
        ApiResponse::failure(self.to_string(), status)
    }
}

/// Where and when an error was observed
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Component that generated the error
    pub service: String,

    pub observed_at: DateTime<Utc>,

    pub status_code: Option<u16>,

    pub request_id: Option<String>,

    /// URL that was called
    pub endpoint: Option<String>,

    /// Free-form key/values, sorted for stable log output
    pub data: BTreeMap<String, String>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            service: "unknown".to_string(),
            observed_at: Utc::now(),
            status_code: None,
            request_id: None,
            endpoint: None,
            data: BTreeMap::new(),
        }
    }
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context attributed to `service`
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Self::default()
        }
    }

    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Record a key/value
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.data.insert(key.into(), value.to_string());
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }
}

/// Transport-level reqwest failures; the URL becomes the context endpoint
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        let classified = if err.is_timeout() {
            Self::timeout(TIMEOUT_MESSAGE)
        } else if err.is_connect() {
            Self::transport(format!("Connection failed: {}", err))
        } else if err.is_redirect() {
            Self::transport(format!("Redirect loop: {}", err))
        } else if err.is_request() || err.is_builder() {
            Self::transport(format!("Request could not be sent: {}", err))
        } else if err.is_decode() || err.is_body() {
            Self::parsing(format!("Unreadable response body: {}", err))
        } else {
            Self::transport(format!("HTTP client failure: {}", err))
        };

        let context = ErrorContext::for_service("transport");
        let context = match err.url() {
            Some(url) => context.endpoint(url.as_str()),
            None => context,
        };
        classified.with_context(context)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err)).with_context(ErrorContext::for_service("json"))
    }
}
