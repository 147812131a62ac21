//! Uniform response envelope
//!
//! Every operation of the SDK yields an [`ApiResponse`], never a raised error.
//! The envelope carries either a payload or an error message together with an
//! HTTP-style status code, which is synthesized when no round trip happened.

use serde::{Deserialize, Serialize};

/// Status codes the SDK synthesizes or relies on
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const NOT_FOUND: u16 = 404;
    pub const REQUEST_TIMEOUT: u16 = 408;
    pub const INTERNAL_ERROR: u16 = 500;
}

/// Message reported when the timeout fires before a response arrives
pub const TIMEOUT_MESSAGE: &str = "Request timeout";

/// The `{ data, error, status }` result of a data-access operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload, absent on failure
    pub data: Option<T>,

    /// Failure description, absent on success
    pub error: Option<String>,

    /// HTTP-style status code
    pub status: u16,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying a payload
    pub fn ok(data: T, status: u16) -> Self {
        Self {
            data: Some(data),
            error: None,
            status,
        }
    }

    /// Failed envelope carrying an error message
    pub fn failure(error: impl Into<String>, status: u16) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            status,
        }
    }

    /// Envelope for a timer that fired before the response arrived
    pub fn timeout() -> Self {
        Self::failure(TIMEOUT_MESSAGE, status::REQUEST_TIMEOUT)
    }

    /// Envelope for an identifier that no source could resolve
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure(message, status::NOT_FOUND)
    }

    /// Successful response without a parseable payload
    pub(crate) fn without_payload(status: u16) -> Self {
        Self {
            data: None,
            error: None,
            status,
        }
    }

    /// A usable envelope has no error and a payload
    pub fn is_usable(&self) -> bool {
        self.error.is_none() && self.data.is_some()
    }

    /// Convert the payload while keeping error and status
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            data: self.data.map(f),
            error: self.error,
            status: self.status,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Empty successful sequence, as returned by short-circuited searches
    pub fn empty() -> Self {
        Self::ok(Vec::new(), status::OK)
    }
}
