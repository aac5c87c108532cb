//! Programmatic configuration builder for integration tests

use std::collections::HashMap;

use chatstream_config::{Config, Provider, Settings};
use url::Url;

/// Builder for constructing test configurations
///
/// Environment values come from an in-memory map, never the process
/// environment, so tests can run in parallel.
pub struct ConfigBuilder {
    env: HashMap<String, String>,
    settings: Settings,
}

impl ConfigBuilder {
    /// Start from a model id; the provider is detected from it
    pub fn new(model: &str) -> Self {
        let env = HashMap::from([("LLM_MODEL".to_owned(), model.to_owned())]);

        Self {
            env,
            settings: Settings::default(),
        }
    }

    /// Set an environment value
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Point `provider` at a mock backend
    pub fn with_endpoint(mut self, provider: Provider, base_url: &str) -> Self {
        let url: Url = base_url.parse().expect("valid URL");

        match provider {
            Provider::OpenAi => self.settings.endpoints.openai = Some(url),
            Provider::Anthropic => self.settings.endpoints.anthropic = Some(url),
            Provider::Gemini => self.settings.endpoints.gemini = Some(url),
            other => panic!("no endpoint slot for {other}"),
        }

        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        Config::from_settings(self.settings, &self.env).expect("valid test config")
    }
}
