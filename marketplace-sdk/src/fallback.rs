//! Remote-first access with local substitution
//!
//! Every domain operation runs through [`with_local_fallback`]: the remote
//! envelope is returned as-is when usable, otherwise the operation's
//! [`FailurePolicy`] decides what the caller sees. A raised executor error and
//! an unusable envelope take the same path.

use std::future::Future;

use tracing::{debug, warn};

use crate::envelope::{status, ApiResponse};
use crate::error::Result;

/// Message used when an identifier lookup names no specific entity
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "Not found";

/// What to return when the remote source gave nothing usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Serve the local value with status 200, or 404 when the local lookup misses
    Substitute,

    /// Always report success; the local value is returned with `status`
    FailOpen { status: u16 },

    /// Never substitute; report the operation's not-found message
    FailClosed,
}

/// Identity and failure policy of one domain operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub service: &'static str,
    pub name: &'static str,
    pub policy: FailurePolicy,
    pub not_found: &'static str,
}

impl Operation {
    /// Read operation served from local data on failure
    pub const fn substitute(service: &'static str, name: &'static str) -> Self {
        Self {
            service,
            name,
            policy: FailurePolicy::Substitute,
            not_found: DEFAULT_NOT_FOUND_MESSAGE,
        }
    }

    /// Operation that always reports success
    pub const fn fail_open(service: &'static str, name: &'static str, status: u16) -> Self {
        Self {
            service,
            name,
            policy: FailurePolicy::FailOpen { status },
            not_found: DEFAULT_NOT_FOUND_MESSAGE,
        }
    }

    /// Operation with no local substitute
    pub const fn fail_closed(service: &'static str, name: &'static str, not_found: &'static str) -> Self {
        Self {
            service,
            name,
            policy: FailurePolicy::FailClosed,
            not_found,
        }
    }

    /// Message reported when nothing resolves the request
    pub const fn not_found_message(mut self, message: &'static str) -> Self {
        self.not_found = message;
        self
    }
}

/// Where the returned envelope came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Remote,
    Local,
    Unresolved,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::Remote => "remote",
            ResultSource::Local => "local",
            ResultSource::Unresolved => "unresolved",
        }
    }
}

/// Await the remote call, then apply the operation's failure policy.
///
/// `local` is only evaluated when the remote result is unusable and the policy
/// allows substitution. Returning `None` from it means the local lookup missed.
pub async fn with_local_fallback<T, Fut, F>(operation: &Operation, remote: Fut, local: F) -> ApiResponse<T>
where
    Fut: Future<Output = Result<ApiResponse<T>>>,
    F: FnOnce() -> Option<T>,
{
    let remote = remote.await;
    resolve(operation, remote, local).0
}

/// Apply the failure policy to an already obtained remote result
pub fn resolve<T, F>(operation: &Operation, remote: Result<ApiResponse<T>>, local: F) -> (ApiResponse<T>, ResultSource)
where
    F: FnOnce() -> Option<T>,
{
    let reason = match remote {
        Ok(response) if response.is_usable() => {
            debug!(
                service = operation.service,
                operation = operation.name,
                status = response.status,
                source = ResultSource::Remote.as_str(),
                "remote result used"
            );
            return (response, ResultSource::Remote);
        }
        Ok(response) => response
            .error
            .unwrap_or_else(|| format!("HTTP {} without payload", response.status)),
        Err(err) => err.to_string(),
    };

    let (response, source) = match operation.policy {
        FailurePolicy::Substitute => match local() {
            Some(value) => (ApiResponse::ok(value, status::OK), ResultSource::Local),
            None => (ApiResponse::not_found(operation.not_found), ResultSource::Unresolved),
        },
        FailurePolicy::FailOpen { status } => match local() {
            Some(value) => (ApiResponse::ok(value, status), ResultSource::Local),
            None => (ApiResponse::not_found(operation.not_found), ResultSource::Unresolved),
        },
        FailurePolicy::FailClosed => (ApiResponse::not_found(operation.not_found), ResultSource::Unresolved),
    };

    warn!(
        service = operation.service,
        operation = operation.name,
        reason = %reason,
        status = response.status,
        source = source.as_str(),
        "remote result unusable, applying fallback policy"
    );

    (response, source)
}
