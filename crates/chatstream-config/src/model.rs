use std::fmt::Display;
use std::str::FromStr;

use crate::env::{EnvSource, LLM_MAX_TOKENS, LLM_MODEL, LLM_TEMPERATURE};
use crate::error::ConfigError;
use crate::provider::Provider;

/// Model used when `LLM_MODEL` is unset
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Temperature used when `LLM_TEMPERATURE` is unset
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Token limit used when `LLM_MAX_TOKENS` is unset
pub const DEFAULT_MAX_TOKENS: i64 = 2000;

/// Immutable model settings shared by every request for the process lifetime
///
/// Temperature and token limit are passed through to the vendor as-is;
/// range checks are left to the vendor API.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRunConfig {
    /// Model identifier sent to the vendor
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: i64,
    /// Vendor detected from the model identifier
    pub provider: Provider,
}

impl ModelRunConfig {
    /// Build a config, detecting the provider from the model id
    pub fn new(model: impl Into<String>, temperature: f64, max_tokens: i64) -> Self {
        let model = model.into();
        let provider = Provider::detect(&model);

        Self {
            model,
            temperature,
            max_tokens,
            provider,
        }
    }

    /// Resolve from `LLM_MODEL`, `LLM_TEMPERATURE` and `LLM_MAX_TOKENS`
    ///
    /// Unset variables fall back to their defaults. A numeric variable that is
    /// set but unparseable is an error rather than silently defaulted.
    pub fn resolve(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let model = env.var(LLM_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        let temperature = parse_var(env, LLM_TEMPERATURE, "a float")?.unwrap_or(DEFAULT_TEMPERATURE);
        let max_tokens = parse_var(env, LLM_MAX_TOKENS, "an integer")?.unwrap_or(DEFAULT_MAX_TOKENS);

        let config = Self::new(model, temperature, max_tokens);

        tracing::debug!(
            model = %config.model,
            provider = %config.provider,
            temperature = config.temperature,
            max_tokens = config.max_tokens,
            "resolved model run config"
        );

        Ok(config)
    }
}

impl Default for ModelRunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
    }
}

/// Parse an optional numeric variable, ignoring surrounding whitespace
fn parse_var<T>(env: &impl EnvSource, key: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = env.var(key) else {
        return Ok(None);
    };

    match raw.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(ConfigError::InvalidNumber {
            key,
            value: raw,
            expected,
            reason: e.to_string(),
        }),
    }
}
