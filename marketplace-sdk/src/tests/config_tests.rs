//! Tests for configuration management functionality
//!
//! These tests verify that the configuration providers and the client
//! configuration loader work correctly.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env;
    use std::time::Duration;

    use crate::config::{
        CompositeConfigProvider, ConfigProvider, ConfigProviderExt, DataClientConfig, EnvConfigProvider,
        MemoryConfigProvider, ServiceConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS,
    };

    #[test]
    fn test_memory_config_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("api_base_url", "https://marketplace.example/api");
        provider.set("api_timeout_ms", "1500");
        provider.set("verbose", "yes");

        assert_eq!(provider.get_string("api_base_url").unwrap(), "https://marketplace.example/api");
        assert_eq!(provider.get_u64("api_timeout_ms").unwrap(), 1500);
        assert!(provider.get_bool("verbose").unwrap());

        // Defaults
        assert_eq!(provider.get_string_or("missing", "default"), "default");
        assert_eq!(provider.get_u64_or("missing", 60).unwrap(), 60);
        assert_eq!(provider.get_optional("missing"), None);

        assert!(provider.get_string("missing").is_err());
        assert!(provider.get_u64("api_base_url").is_err());
        assert!(provider.get_u64_or("api_base_url", 60).is_err());
    }

    #[test]
    fn test_env_config_provider() {
        env::set_var("TEST_MARKETPLACE_API_BASE_URL", "https://env.example/api");
        env::set_var("TEST_MARKETPLACE_API_TIMEOUT_MS", "2500");
        env::set_var("TEST_MARKETPLACE_API_HEADERS", "X-Tenant=garage");

        let provider = EnvConfigProvider::new().with_prefix("TEST_MARKETPLACE");

        assert_eq!(provider.get_string("api_base_url").unwrap(), "https://env.example/api");
        assert_eq!(provider.get_u64("api-timeout-ms").unwrap(), 2500);
        assert!(provider.get_string("NON_EXISTENT").is_err());

        let config = DataClientConfig::from_provider(&provider).unwrap();
        assert_eq!(config.base_url, "https://env.example/api");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.headers.get("X-Tenant").map(String::as_str), Some("garage"));

        env::remove_var("TEST_MARKETPLACE_API_BASE_URL");
        env::remove_var("TEST_MARKETPLACE_API_TIMEOUT_MS");
        env::remove_var("TEST_MARKETPLACE_API_HEADERS");
    }

    #[test]
    fn test_composite_config_provider() {
        let mut memory_provider = MemoryConfigProvider::new();
        memory_provider.set("api_base_url", "http://memory.example/api");

        env::set_var("TEST_COMPOSITE_API_BASE_URL", "http://env.example/api");
        env::set_var("TEST_COMPOSITE_API_TIMEOUT_MS", "900");

        let env_provider = EnvConfigProvider::new().with_prefix("TEST_COMPOSITE");

        let composite = CompositeConfigProvider::new()
            .with_provider(memory_provider)
            .with_provider(env_provider);

        // First provider wins, later ones fill the gaps
        let config = DataClientConfig::from_provider(&composite).unwrap();
        assert_eq!(config.base_url, "http://memory.example/api");
        assert_eq!(config.timeout_ms, 900);

        assert!(composite.get_string("NON_EXISTENT").is_err());

        env::remove_var("TEST_COMPOSITE_API_BASE_URL");
        env::remove_var("TEST_COMPOSITE_API_TIMEOUT_MS");
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = DataClientConfig::from_provider(&MemoryConfigProvider::new()).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut values = HashMap::new();
        values.insert("api_timeout_ms".to_string(), "soon".to_string());
        assert!(DataClientConfig::from_provider(&MemoryConfigProvider::with_values(values)).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("api_timeout_ms", 0);
        assert!(DataClientConfig::from_provider(&provider).is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("api_base_url", "/relative/api");
        assert!(DataClientConfig::from_provider(&provider).is_err());
    }

    #[test]
    fn test_service_name() {
        assert_eq!(DataClientConfig::default().service_name(), "marketplace-api");
    }
}
