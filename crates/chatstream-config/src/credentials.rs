use secrecy::SecretString;

use crate::env::{ANTHROPIC_API_KEY, EnvSource, GOOGLE_API_KEY, OPENAI_API_KEY, OPENAI_ORGANIZATION};
use crate::provider::Provider;

/// Vendor API credentials
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    /// `OpenAI` API key
    pub openai_api_key: Option<SecretString>,
    /// `OpenAI` organization id
    pub openai_organization: Option<String>,
    /// Anthropic API key
    pub anthropic_api_key: Option<SecretString>,
    /// Google API key for Gemini
    pub google_api_key: Option<SecretString>,
}

impl ProviderCredentials {
    /// Read all credentials from the environment
    ///
    /// Empty values are treated as unset.
    pub fn from_env(env: &impl EnvSource) -> Self {
        Self {
            openai_api_key: secret_var(env, OPENAI_API_KEY),
            openai_organization: non_empty_var(env, OPENAI_ORGANIZATION),
            anthropic_api_key: secret_var(env, ANTHROPIC_API_KEY),
            google_api_key: secret_var(env, GOOGLE_API_KEY),
        }
    }

    /// API key for the given provider, if configured
    pub const fn api_key(&self, provider: Provider) -> Option<&SecretString> {
        match provider {
            Provider::OpenAi => self.openai_api_key.as_ref(),
            Provider::Anthropic => self.anthropic_api_key.as_ref(),
            Provider::Gemini => self.google_api_key.as_ref(),
        }
    }
}

fn non_empty_var(env: &impl EnvSource, key: &str) -> Option<String> {
    env.var(key).filter(|value| !value.is_empty())
}

fn secret_var(env: &impl EnvSource, key: &str) -> Option<SecretString> {
    non_empty_var(env, key).map(SecretString::from)
}
