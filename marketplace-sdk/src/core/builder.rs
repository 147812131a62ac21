//! Client builder implementation
//!
//! Assembles configuration, transport, timer, executor, endpoint resolver and
//! local dataset into a [`DataClient`]. Every setting has a default.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::{HttpExecutor, RequestExecutor, Timer, TokioTimer, Transport};
use crate::client::DataClient;
use crate::config::{DataClientConfig, ServiceConfig};
use crate::dataset::LocalDataset;
use crate::error::Result;
use crate::transport::{build_http_client, ReqwestTransport};

/// Builder for [`DataClient`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    /// Starting configuration, defaults when absent
    config: Option<DataClientConfig>,

    /// Base URL override
    base_url: Option<String>,

    /// Request timeout override
    timeout: Option<Duration>,

    /// User agent override
    user_agent: Option<String>,

    /// Headers added on top of the configured ones
    custom_headers: HashMap<String, String>,

    /// Local fallback data, the bundled copy when absent
    dataset: Option<Arc<LocalDataset>>,

    /// Accept gzip-compressed responses
    compression: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            config: None,
            base_url: None,
            timeout: None,
            user_agent: None,
            custom_headers: HashMap::new(),
            dataset: None,
            compression: true,
        }
    }
}

impl ClientBuilder {
    /// Create a new client builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration
    pub fn config(mut self, config: DataClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the base URL every endpoint is resolved against
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(key.into(), value.into());
        self
    }

    /// Use a specific local dataset
    pub fn dataset(mut self, dataset: Arc<LocalDataset>) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Enable or disable compression
    pub fn compression(mut self, enabled: bool) -> Self {
        self.compression = enabled;
        self
    }

    /// The effective configuration, validated
    pub fn resolve_config(&self) -> Result<DataClientConfig> {
        let mut config = self.config.clone().unwrap_or_default();

        if let Some(ref base_url) = self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            // Round up so a sub-millisecond timeout stays non-zero
            config.timeout_ms = u64::try_from(timeout.as_micros().div_ceil(1000)).unwrap_or(u64::MAX);
        }
        if let Some(ref user_agent) = self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
            .headers
            .extend(self.custom_headers.iter().map(|(k, v)| (k.clone(), v.clone())));

        config.validate()?;
        Ok(config)
    }

    /// Build a client issuing real HTTP requests
    pub fn build(self) -> Result<DataClient> {
        let config = self.resolve_config()?;
        let http_client = build_http_client(&config.user_agent, &config.headers, self.compression)?;
        self.build_with_transport(ReqwestTransport::new(http_client))
    }

    /// Build a client over a custom transport
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<DataClient<HttpExecutor<T>>> {
        self.build_with_timer(transport, TokioTimer)
    }

    /// Build a client over a custom transport and deadline source
    pub fn build_with_timer<T: Transport, C: Timer>(
        self,
        transport: T,
        timer: C,
    ) -> Result<DataClient<HttpExecutor<T, C>>> {
        let config = self.resolve_config()?;
        let executor = HttpExecutor::with_timer(transport, timer)
            .default_timeout(config.timeout())
            .headers(config.headers.clone());
        self.assemble(config, executor)
    }

    /// Build a client over any request executor
    pub fn build_with_executor<E: RequestExecutor>(self, executor: E) -> Result<DataClient<E>> {
        let config = self.resolve_config()?;
        self.assemble(config, executor)
    }

    fn assemble<E: RequestExecutor>(self, config: DataClientConfig, executor: E) -> Result<DataClient<E>> {
        let dataset = match self.dataset {
            Some(dataset) => dataset,
            None => LocalDataset::shared()?,
        };
        Ok(DataClient::new(config, Arc::new(executor), dataset))
    }
}
