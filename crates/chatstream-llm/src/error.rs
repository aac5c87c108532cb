use chatstream_config::{ConfigError, Provider};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while running a chat turn
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No adapter exists for the resolved provider
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(Provider),

    /// The vendor call failed or its stream broke
    #[error("{provider} request failed: {source}")]
    Provider {
        /// Vendor that failed
        provider: Provider,
        /// What went wrong
        source: ProviderFailure,
    },

    /// The conversation cannot be expressed for the active provider
    #[error("cannot format conversation: {0}")]
    Format(String),
}

impl LlmError {
    /// Build a vendor failure for `provider`
    pub fn provider(provider: Provider, source: impl Into<ProviderFailure>) -> Self {
        Self::Provider {
            provider,
            source: source.into(),
        }
    }

    /// Vendor that produced this error, if it came from a vendor call
    pub const fn failed_provider(&self) -> Option<Provider> {
        match self {
            Self::Provider { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}

/// Underlying cause of a vendor failure
#[derive(Debug, Error)]
pub enum ProviderFailure {
    /// Connection, TLS or body transfer failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Vendor answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: StatusCode,
        /// Vendor error message, or the raw body when it has no known shape
        message: String,
    },

    /// The server-sent event stream could not be read
    #[error("stream error: {0}")]
    Stream(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stream chunk was not valid JSON for the vendor's chunk shape
    #[error("malformed chunk: {0}")]
    Decode(#[from] serde_json::Error),

    /// The vendor reported an error inside the stream
    #[error("{kind}: {message}")]
    Vendor {
        /// Vendor error type
        kind: String,
        /// Vendor error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    #[test]
    fn stream_failure_keeps_its_cause() {
        let cause = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        let err = LlmError::provider(Provider::Anthropic, ProviderFailure::Stream(Box::new(cause)));

        let failure = err.source().unwrap();
        assert_eq!(failure.to_string(), "stream error: reset by peer");
        let cause = failure.source().unwrap();
        assert_eq!(cause.downcast_ref::<io::Error>().unwrap().kind(), io::ErrorKind::ConnectionReset);
    }
}
