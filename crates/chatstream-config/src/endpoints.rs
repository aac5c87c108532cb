use serde::Deserialize;
use url::Url;

use crate::provider::Provider;

/// Base URL overrides per provider
///
/// Unset entries use the vendor's public API endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEndpoints {
    /// `OpenAI`-compatible base URL (e.g. `https://api.openai.com/v1`)
    #[serde(default)]
    pub openai: Option<Url>,
    /// Anthropic base URL (e.g. `https://api.anthropic.com/v1`)
    #[serde(default)]
    pub anthropic: Option<Url>,
    /// Gemini base URL (e.g. `https://generativelanguage.googleapis.com/v1beta`)
    #[serde(default)]
    pub gemini: Option<Url>,
}

impl ProviderEndpoints {
    /// Base URL override for the given provider
    pub const fn base_url(&self, provider: Provider) -> Option<&Url> {
        match provider {
            Provider::OpenAi => self.openai.as_ref(),
            Provider::Anthropic => self.anthropic.as_ref(),
            Provider::Gemini => self.gemini.as_ref(),
        }
    }

    /// Iterate over configured overrides
    pub fn overrides(&self) -> impl Iterator<Item = (Provider, &Url)> {
        [Provider::OpenAi, Provider::Anthropic, Provider::Gemini]
            .into_iter()
            .filter_map(|provider| self.base_url(provider).map(|url| (provider, url)))
    }
}
