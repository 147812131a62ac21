//! Configuration management for the data client
//!
//! This module provides utilities for loading and validating the client
//! configuration, with support for environment variables.

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ServiceError};

/// Default base address of the marketplace API
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("marketplace-sdk/", env!("CARGO_PKG_VERSION"));

/// Source of raw configuration strings
pub trait ConfigProvider: Send + Sync {
    /// Raw value of `key`, or a configuration error when it is not set
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Typed accessors shared by every provider
pub trait ConfigProviderExt: ConfigProvider {
    /// Value of `key` if set
    fn get_optional(&self, key: &str) -> Option<String> {
        self.get_string(key).ok()
    }

    /// Value of `key`, or `default` when it is not set
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Unsigned integer value of `key`
    fn get_u64(&self, key: &str) -> Result<u64> {
        let raw = self.get_string(key)?;
        raw.trim().parse::<u64>().map_err(|e| {
            ServiceError::configuration(format!("Key {} is not an unsigned integer ({}): {}", key, raw, e))
        })
    }

    /// Unsigned integer value of `key`, `default` when unset, an error when malformed
    fn get_u64_or(&self, key: &str, default: u64) -> Result<u64> {
        match self.get_optional(key) {
            Some(_) => self.get_u64(key),
            None => Ok(default),
        }
    }

    /// Boolean value of `key`; accepts true/false, yes/no, on/off and 1/0
    fn get_bool(&self, key: &str) -> Result<bool> {
        let raw = self.get_string(key)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ServiceError::configuration(format!("Key {} is not a boolean: {}", key, raw))),
        }
    }

    /// `NAME=value` pairs separated by `;`, as used for extra request headers
    fn get_pairs(&self, key: &str) -> Result<HashMap<String, String>> {
        let raw = match self.get_optional(key) {
            Some(raw) => raw,
            None => return Ok(HashMap::new()),
        };

        raw.split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .split_once('=')
                    .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                    .ok_or_else(|| ServiceError::configuration(format!("Key {} has a malformed entry: {}", key, entry)))
            })
            .collect()
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Reads `PREFIX_NAMESPACE_KEY` environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    prefix: Option<String>,
    namespace: Option<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leading segment of every variable name, e.g. `MARKETPLACE`
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Segment placed between the prefix and the key
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Variable name for `key`: upper-cased, non-alphanumerics turned into `_`
    pub(crate) fn format_key(&self, key: &str) -> String {
        let normalized = key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_");

        [self.prefix.as_deref(), self.namespace.as_deref(), Some(normalized.as_str())]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let name = self.format_key(key);

        env::var(&name).map_err(|e| match e {
            env::VarError::NotPresent => ServiceError::configuration(format!("{} is not set", name)),
            env::VarError::NotUnicode(_) => ServiceError::configuration(format!("{} is not valid unicode", name)),
        })
    }
}

/// Fixed key/value pairs, for tests and embedded setups
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("{} is not set", key)))
    }
}

/// Chain of providers; the first one that knows a key wins
#[derive(Default)]
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider with the lowest precedence so far
    pub fn add_provider(&mut self, provider: impl ConfigProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Builder form of [`add_provider`](Self::add_provider)
    pub fn with_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.add_provider(provider);
        self
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.providers
            .iter()
            .find_map(|provider| provider.get_string(key).ok())
            .ok_or_else(|| ServiceError::configuration(format!("{} is not set by any provider", key)))
    }
}

/// Provider reading the `MARKETPLACE_*` environment variables
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> =
    Lazy::new(|| Arc::new(EnvConfigProvider::new().with_prefix("MARKETPLACE")));

/// Configuration that can check itself before use
pub trait ServiceConfig: Debug + Send + Sync {
    fn validate(&self) -> Result<()>;

    /// Name used in error messages and log fields
    fn service_name(&self) -> &str;
}

/// Settings of the request executor and endpoint resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataClientConfig {
    /// Base address every endpoint is resolved against
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// User agent header value
    pub user_agent: String,

    /// Headers added to every request. They replace the default
    /// `Content-Type` but not headers a descriptor sets per call.
    pub headers: HashMap<String, String>,
}

impl Default for DataClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
        }
    }
}

impl DataClientConfig {
    /// Load configuration from a config provider.
    ///
    /// Reads `api_base_url`, `api_timeout_ms`, `api_user_agent` and
    /// `api_headers` (`Name=value;Other=value`); each falls back to its
    /// default when absent.
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let config = Self {
            base_url: provider.get_string_or("api_base_url", DEFAULT_BASE_URL),
            timeout_ms: provider.get_u64_or("api_timeout_ms", DEFAULT_TIMEOUT_MS)?,
            user_agent: provider.get_string_or("api_user_agent", DEFAULT_USER_AGENT),
            headers: provider.get_pairs("api_headers")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the `MARKETPLACE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_provider(&**DEFAULT_PROVIDER)
    }

    /// The timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ServiceConfig for DataClientConfig {
    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ServiceError::configuration("API base URL is required"));
        }

        Url::parse(&self.base_url).map_err(|e| {
            ServiceError::configuration(format!("API base URL must be absolute ({}): {}", self.base_url, e))
        })?;

        if self.timeout_ms == 0 {
            return Err(ServiceError::configuration("API timeout must be greater than zero"));
        }

        Ok(())
    }

    fn service_name(&self) -> &str {
        "marketplace-api"
    }
}
