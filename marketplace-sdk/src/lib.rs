//! # Marketplace SDK
//!
//! Resilient access to the marketplace API used by the lead wizard.
//!
//! This crate provides:
//!
//! - A time-bounded request executor that turns every outcome into an
//!   `{ data, error, status }` envelope
//! - Domain services for companies, locations, questions, suppliers, leads
//!   and search criteria
//! - A local dataset substituted whenever the remote source has nothing usable
//! - Configuration management utilities
//!
//! ## Architecture
//!
//! - `Transport`: issues one network call
//! - `Timer`: the deadline a call is raced against
//! - `RequestExecutor`: classifies the outcome into an `ApiResponse`
//! - `with_local_fallback`: remote first, then the operation's `FailurePolicy`
//! - `DataClient`: owns one instance of every domain service
//! - `ServiceError`: error type for the few paths that raise

// Re-export core modules
pub mod core;
pub use crate::core::{ClientBuilder, HttpExecutor, RequestDescriptor, RequestExecutor, Timer, TokioTimer, Transport};

// Re-export the envelope
pub mod envelope;
pub use envelope::ApiResponse;

// Re-export error handling
pub mod error;
pub use error::{ErrorContext, Result, ServiceError};

// Re-export configuration management
pub mod config;
pub use config::{ConfigProvider, ConfigProviderExt, DataClientConfig, ServiceConfig};

pub mod client;
pub use client::DataClient;

pub mod dataset;
pub use dataset::LocalDataset;

pub mod endpoints;
pub use endpoints::{CriteriaKind, Endpoints};

pub mod fallback;
pub use fallback::{with_local_fallback, FailurePolicy, Operation};

pub mod models;
pub mod services;
pub mod transport;

// Utility module for common functionality
pub mod util;

#[cfg(test)]
mod tests;

/// Create a new default client builder
pub fn client() -> crate::core::ClientBuilder {
    crate::core::ClientBuilder::new()
}
