//! Unit tests for the marketplace SDK
//!
//! This module contains tests for various components of the SDK.

pub mod support;

pub mod config_tests;
pub mod leads_tests;
pub mod service_http_tests;
