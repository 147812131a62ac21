//! Time-bounded request executor
//!
//! Races the transport against a deadline and normalizes whatever happens
//! first into an [`ApiResponse`]. Exactly one attempt is made per call.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{RawResponse, RequestDescriptor, RequestExecutor, Timer, TokioTimer, Transport};
use crate::config::DEFAULT_TIMEOUT_MS;
use crate::envelope::ApiResponse;
use crate::error::{mapping, Result};
use crate::transport::ReqwestTransport;
use crate::util::{generate_request_id, truncate_string};

/// Characters of an unusable body kept in debug logs
const BODY_PREVIEW_CHARS: usize = 120;

/// Executor issuing requests through a [`Transport`] under a [`Timer`] deadline
pub struct HttpExecutor<T = ReqwestTransport, C = TokioTimer> {
    transport: T,
    timer: C,
    default_timeout: Duration,
    headers: HashMap<String, String>,
}

impl<T: Transport> HttpExecutor<T, TokioTimer> {
    /// Executor using the tokio clock and the default timeout
    pub fn new(transport: T) -> Self {
        Self::with_timer(transport, TokioTimer)
    }
}

impl<T: Transport, C: Timer> HttpExecutor<T, C> {
    /// Executor using a custom deadline source
    pub fn with_timer(transport: T, timer: C) -> Self {
        Self {
            transport,
            timer,
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            headers: HashMap::new(),
        }
    }

    /// Timeout applied to descriptors that do not carry their own
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Headers merged into every descriptor, see
    /// [`RequestDescriptor::with_configured_headers`]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: Transport, C: Timer> RequestExecutor for HttpExecutor<T, C> {
    async fn execute<R>(&self, request: RequestDescriptor) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let request = request.with_configured_headers(&self.headers);
        let timeout = request.timeout().unwrap_or(self.default_timeout);
        let request_id = generate_request_id();
        let started = Instant::now();

        debug!(
            request_id = %request_id,
            method = %request.method(),
            url = request.target(),
            timeout_ms = timeout.as_millis() as u64,
            "dispatching request"
        );

        // The deadline future lives only inside this block, so it is released
        // on every exit path: answer, transport failure or expiry.
        let outcome = {
            let deadline = self.timer.sleep(timeout);
            tokio::select! {
                biased;
                sent = self.transport.send(&request) => Some(sent),
                _ = deadline => None,
            }
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;

        let response = match outcome {
            None => {
                warn!(
                    request_id = %request_id,
                    method = %request.method(),
                    url = request.target(),
                    elapsed_ms,
                    "request timed out"
                );
                ApiResponse::timeout()
            }
            Some(Err(err)) => {
                warn!(
                    request_id = %request_id,
                    method = %request.method(),
                    url = request.target(),
                    elapsed_ms,
                    error = %err,
                    "transport failure"
                );
                err.into_response()
            }
            Some(Ok(raw)) => classify(raw),
        };

        debug!(
            request_id = %request_id,
            status = response.status,
            category = mapping::classify_status(response.status),
            elapsed_ms,
            "request finished"
        );

        Ok(response)
    }
}

/// Turn an answered request into an envelope; the HTTP status decides success
fn classify<R: DeserializeOwned>(raw: RawResponse) -> ApiResponse<R> {
    if raw.is_success() {
        return match serde_json::from_slice::<R>(&raw.body) {
            Ok(data) => ApiResponse::ok(data, raw.status),
            Err(err) => {
                debug!(
                    status = raw.status,
                    error = %err,
                    body = %truncate_string(&String::from_utf8_lossy(&raw.body), BODY_PREVIEW_CHARS),
                    "response body is not a usable payload"
                );
                ApiResponse::without_payload(raw.status)
            }
        };
    }

    let body = serde_json::from_slice::<Value>(&raw.body).ok();
    mapping::map_http_error(raw.status, body.as_ref()).into_response()
}
