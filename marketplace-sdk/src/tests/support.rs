//! Shared doubles for the test modules

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use mockall::mock;
use serde::de::DeserializeOwned;

use crate::client::DataClient;
use crate::core::{ClientBuilder, RawResponse, RequestDescriptor, RequestExecutor, Timer, Transport};
use crate::envelope::ApiResponse;
use crate::error::{Result, ServiceError};

mock! {
    pub Transport {}

    #[async_trait]
    impl Transport for Transport {
        async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse>;
    }
}

/// Timer that counts armed and released deadlines
#[derive(Clone, Default)]
pub struct RecordingTimer {
    pub armed: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
}

impl RecordingTimer {
    pub fn armed(&self) -> usize {
        self.armed.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

struct ReleaseGuard(Arc<AtomicUsize>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl Timer for RecordingTimer {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.armed.fetch_add(1, Ordering::SeqCst);
        let guard = ReleaseGuard(Arc::clone(&self.released));
        async move {
            let _guard = guard;
            tokio::time::sleep(duration).await;
        }
        .boxed()
    }
}

/// Transport that answers after a fixed delay on the tokio clock
pub struct DelayedTransport {
    pub delay: Duration,
    pub response: RawResponse,
}

#[async_trait]
impl Transport for DelayedTransport {
    async fn send(&self, _request: &RequestDescriptor) -> Result<RawResponse> {
        tokio::time::sleep(self.delay).await;
        Ok(self.response.clone())
    }
}

/// What a [`ScriptedExecutor`] does on every call
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Raise instead of returning an envelope
    Raise,
    /// Return a failed envelope with this status
    Fail(u16),
    /// Return a success status without a payload
    Empty(u16),
}

/// Executor that never reaches the network and records every target
pub struct ScriptedExecutor {
    outcome: Outcome,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute<R>(&self, request: RequestDescriptor) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned + Send + 'static,
    {
        self.calls.lock().unwrap().push(request.target().to_string());

        match self.outcome {
            Outcome::Raise => Err(ServiceError::transport("executor unavailable")),
            Outcome::Fail(status) => Ok(ApiResponse::failure("Service unavailable", status)),
            Outcome::Empty(status) => Ok(ApiResponse::without_payload(status)),
        }
    }
}

pub const TEST_BASE_URL: &str = "http://api.test";

/// Client over a scripted executor
pub fn scripted_client(outcome: Outcome) -> DataClient<ScriptedExecutor> {
    ClientBuilder::new()
        .base_url(TEST_BASE_URL)
        .build_with_executor(ScriptedExecutor::new(outcome))
        .expect("Failed to build scripted client")
}

/// Client issuing real requests against a mock server
pub fn http_client(base_url: &str, timeout: Duration) -> DataClient {
    ClientBuilder::new()
        .base_url(base_url)
        .timeout(timeout)
        .build()
        .expect("Failed to build HTTP client")
}
