use std::collections::HashMap;
use std::hash::BuildHasher;

/// Model identifier
pub const LLM_MODEL: &str = "LLM_MODEL";
/// Sampling temperature
pub const LLM_TEMPERATURE: &str = "LLM_TEMPERATURE";
/// Maximum tokens to generate
pub const LLM_MAX_TOKENS: &str = "LLM_MAX_TOKENS";
/// `OpenAI` API key
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// `OpenAI` organization id
pub const OPENAI_ORGANIZATION: &str = "OPENAI_ORGANIZATION";
/// Anthropic API key
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
/// Google API key used for Gemini
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

/// Source of configuration values keyed by environment variable name
pub trait EnvSource {
    /// Look up a variable, returning `None` when it is unset
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-unicode values are treated as unset
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
