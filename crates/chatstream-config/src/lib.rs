//! Configuration for chatstream
//!
//! Resolves the model run configuration and vendor credentials from the
//! environment, and optional endpoint and telemetry settings from a TOML file.

#![allow(clippy::must_use_candidate)]

pub mod credentials;
pub mod endpoints;
pub mod env;
pub mod error;
mod loader;
pub mod model;
pub mod provider;
pub mod telemetry;

use serde::Deserialize;

pub use credentials::ProviderCredentials;
pub use endpoints::ProviderEndpoints;
pub use env::{EnvSource, ProcessEnv};
pub use error::ConfigError;
pub use model::ModelRunConfig;
pub use provider::Provider;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Optional settings read from the TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Base URL overrides per provider
    #[serde(default)]
    pub endpoints: ProviderEndpoints,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Fully resolved process configuration
///
/// Built once at startup and handed to the stream orchestrator.
#[derive(Debug)]
pub struct Config {
    /// Model, sampling parameters and the provider detected from the model id
    pub model: ModelRunConfig,
    /// Vendor API credentials
    pub credentials: ProviderCredentials,
    /// Vendor base URL overrides
    pub endpoints: ProviderEndpoints,
    /// Logging and trace export
    pub telemetry: TelemetryConfig,
}
