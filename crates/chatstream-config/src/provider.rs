use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Model id prefixes served by the `OpenAI` API
const OPENAI_PREFIXES: &[&str] = &["gpt-", "text-davinci-"];

/// Model id prefix served by the Anthropic Messages API
const ANTHROPIC_PREFIX: &str = "claude-";

/// Model id prefix served by the Gemini API
const GEMINI_PREFIX: &str = "gemini";

/// Supported LLM vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum Provider {
    /// `OpenAI` chat completions API
    OpenAi,
    /// Anthropic Messages API
    Anthropic,
    /// Google Gemini API
    Gemini,
}

impl Provider {
    /// Detect the provider serving a model id
    ///
    /// Prefixes are checked in order and the first match wins. Unknown
    /// model ids fall back to `OpenAI`.
    pub fn detect(model_id: &str) -> Self {
        if OPENAI_PREFIXES.iter().any(|prefix| model_id.starts_with(prefix)) {
            Self::OpenAi
        } else if model_id.starts_with(ANTHROPIC_PREFIX) {
            Self::Anthropic
        } else if model_id.starts_with(GEMINI_PREFIX) {
            Self::Gemini
        } else {
            Self::OpenAi
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn openai_prefixes() {
        assert_eq!(Provider::detect("gpt-4o"), Provider::OpenAi);
        assert_eq!(Provider::detect("gpt-3.5-turbo"), Provider::OpenAi);
        assert_eq!(Provider::detect("text-davinci-003"), Provider::OpenAi);
    }

    #[test]
    fn anthropic_prefix() {
        assert_eq!(Provider::detect("claude-2"), Provider::Anthropic);
        assert_eq!(Provider::detect("claude-3-5-sonnet-latest"), Provider::Anthropic);
    }

    #[test]
    fn gemini_prefix() {
        assert_eq!(Provider::detect("gemini-1.5-pro"), Provider::Gemini);
        assert_eq!(Provider::detect("gemini"), Provider::Gemini);
    }

    #[test]
    fn unknown_models_fall_back_to_openai() {
        assert_eq!(Provider::detect(""), Provider::OpenAi);
        assert_eq!(Provider::detect("llama-3-70b"), Provider::OpenAi);
        // Prefixes are case sensitive
        assert_eq!(Provider::detect("Claude-3"), Provider::OpenAi);
        // "claude" without the dash is not an Anthropic id
        assert_eq!(Provider::detect("claude"), Provider::OpenAi);
    }

    #[test]
    fn textual_form_is_lowercase() {
        assert_eq!(Provider::OpenAi.to_string(), "openai");
        assert_eq!(Provider::Anthropic.as_ref(), "anthropic");
        assert_eq!(Provider::from_str("gemini").unwrap(), Provider::Gemini);
    }
}
