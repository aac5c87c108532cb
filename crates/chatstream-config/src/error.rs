use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving configuration
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable was set but could not be parsed
    #[error("{key} must be {expected}, got `{value}`: {reason}")]
    InvalidNumber {
        /// Environment variable name
        key: &'static str,
        /// Raw value as read
        value: String,
        /// Expected numeric type
        expected: &'static str,
        /// Parser message
        reason: String,
    },

    /// The settings file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the settings schema
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Path that was parsed
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// The settings parsed but are inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
