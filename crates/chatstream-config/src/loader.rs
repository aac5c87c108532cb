use std::path::Path;

use crate::credentials::ProviderCredentials;
use crate::env::EnvSource;
use crate::error::ConfigError;
use crate::model::ModelRunConfig;
use crate::{Config, Settings};

impl Settings {
    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate that the settings are internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is not an HTTP(S) URL or the sampling
    /// rate is outside `0.0..=1.0`
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (provider, url) in self.endpoints.overrides() {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "endpoint for {provider} must use http or https, got `{url}`"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.telemetry.sampling_rate) {
            return Err(ConfigError::Invalid(format!(
                "telemetry.sampling_rate must be between 0.0 and 1.0, got {}",
                self.telemetry.sampling_rate
            )));
        }

        Ok(())
    }
}

impl Config {
    /// Resolve the process configuration
    ///
    /// Model settings and credentials come from `env`; endpoint overrides and
    /// telemetry come from the settings file when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file is unusable or a numeric
    /// environment value is malformed
    pub fn load(path: Option<&Path>, env: &impl EnvSource) -> Result<Self, ConfigError> {
        let settings = path.map(Settings::load).transpose()?.unwrap_or_default();
        Self::from_settings(settings, env)
    }

    /// Combine already-loaded settings with the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric environment value is malformed
    pub fn from_settings(settings: Settings, env: &impl EnvSource) -> Result<Self, ConfigError> {
        let model = ModelRunConfig::resolve(env)?;
        let credentials = ProviderCredentials::from_env(env);

        Ok(Self {
            model,
            credentials,
            endpoints: settings.endpoints,
            telemetry: settings.telemetry,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;
    use crate::provider::Provider;
    use crate::telemetry::{ExportProtocol, LogFormat};

    fn write_settings(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chatstream.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn no_file_uses_defaults() {
        let config = Config::load(None, &HashMap::<String, String>::new()).unwrap();
        assert_eq!(config.model, ModelRunConfig::default());
        assert!(config.endpoints.openai.is_none());
        assert_eq!(config.telemetry.service_name, "chatstream");
        assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn parses_endpoints_and_telemetry() {
        let settings: Settings = toml::from_str(
            r#"
            [endpoints]
            anthropic = "http://localhost:9000/v1"

            [telemetry]
            service_name = "chat-cli"
            log_format = "json"
            sampling_rate = 0.5

            [telemetry.exporter]
            endpoint = "http://localhost:4318"
            protocol = "http_proto"
            "#,
        )
        .unwrap();

        settings.validate().unwrap();

        assert_eq!(
            settings.endpoints.base_url(Provider::Anthropic).map(url::Url::as_str),
            Some("http://localhost:9000/v1")
        );
        assert!(settings.endpoints.base_url(Provider::Gemini).is_none());
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
        let exporter = settings.telemetry.exporter.unwrap();
        assert_eq!(exporter.protocol, ExportProtocol::HttpProto);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Settings, _> = toml::from_str("[endpoints]\nmistral = \"http://localhost\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn non_http_endpoint_is_invalid() {
        let settings: Settings = toml::from_str("[endpoints]\nopenai = \"ftp://example.com\"\n").unwrap();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("openai"));
    }

    #[test]
    fn sampling_rate_out_of_range_is_invalid() {
        let settings: Settings = toml::from_str("[telemetry]\nsampling_rate = 2.0\n").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn load_reads_file_and_env() {
        let (_dir, path) = write_settings("[endpoints]\ngemini = \"http://127.0.0.1:8080/v1beta\"\n");
        let env = HashMap::from([("LLM_MODEL".to_owned(), "gemini-pro".to_owned())]);

        let config = Config::load(Some(&path), &env).unwrap();

        assert_eq!(config.model.provider, Provider::Gemini);
        assert!(config.endpoints.gemini.is_some());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Some(Path::new("/nonexistent/chatstream.toml")), &HashMap::<String, String>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_numeric_env_fails_load() {
        let env = HashMap::from([("LLM_TEMPERATURE".to_owned(), "hot".to_owned())]);
        assert!(matches!(
            Config::load(None, &env),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }
}
