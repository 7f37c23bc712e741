//! Configuration for tai-ta
//!
//! Settings resolve in priority order: CLI argument → `TAI_CONFIG` env
//! var → platform config directory → compiled defaults, with individual
//! env overrides for the values that differ per deployment (service
//! URLs, API key).

use serde::Deserialize;
use std::path::Path;
use tai_common::Result;
use tracing::info;

const CONFIG_ENV_VAR: &str = "TAI_CONFIG";
const CONFIG_APP_DIR: &str = "terrain-ai";

/// Full service configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub service: ServiceSection,
    pub geology: GeologySection,
    pub classifier: ClassifierSection,
    pub fallback: FallbackSection,
}

/// HTTP bind settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Remote geology service settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeologySection {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for GeologySection {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8001".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Vision classifier endpoint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models/google/vit-base-patch16-224"
                .to_string(),
            api_key: None,
            timeout_seconds: 30,
        }
    }
}

/// Failure-handling policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FallbackSection {
    /// When true, a classifier outage yields a synthetic plausible result
    /// instead of an error. Set to false to surface outages to the caller
    /// as 503.
    pub synthetic_on_classifier_failure: bool,
}

impl Default for FallbackSection {
    fn default() -> Self {
        Self {
            synthetic_on_classifier_failure: true,
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration from file and environment.
    pub fn resolve(cli_config: Option<&Path>) -> Result<Self> {
        let path = tai_common::config::resolve_config_file(cli_config, CONFIG_ENV_VAR, CONFIG_APP_DIR);
        let mut config: ServiceConfig = tai_common::config::load_config(path.as_deref())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply per-deployment env overrides on top of the file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TAI_GEOLOGY_URL") {
            info!("Geology service URL overridden from environment");
            self.geology.base_url = url;
        }
        if let Ok(url) = std::env::var("TAI_CLASSIFIER_URL") {
            info!("Classifier endpoint overridden from environment");
            self.classifier.endpoint = url;
        }
        if let Ok(key) = std::env::var("TAI_CLASSIFIER_API_KEY") {
            info!("Classifier API key loaded from environment");
            self.classifier.api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_are_sensible() {
        let config = ServiceConfig::default();
        assert_eq!(config.service.host, "127.0.0.1");
        assert_eq!(config.service.port, 8000);
        assert!(config.fallback.synthetic_on_classifier_failure);
        assert!(config.classifier.api_key.is_none());
    }

    #[test]
    #[serial]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let toml = r#"
            [service]
            port = 9000

            [fallback]
            synthetic_on_classifier_failure = false
        "#;

        let config: ServiceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.service.port, 9000);
        assert_eq!(config.service.host, "127.0.0.1");
        assert!(!config.fallback.synthetic_on_classifier_failure);
        assert_eq!(config.geology.timeout_seconds, 30);
    }

    #[test]
    #[serial]
    fn env_overrides_replace_file_values() {
        std::env::set_var("TAI_GEOLOGY_URL", "http://geo.internal:9001");
        std::env::set_var("TAI_CLASSIFIER_API_KEY", "hf_test");

        let mut config = ServiceConfig::default();
        config.apply_env_overrides();

        std::env::remove_var("TAI_GEOLOGY_URL");
        std::env::remove_var("TAI_CLASSIFIER_API_KEY");

        assert_eq!(config.geology.base_url, "http://geo.internal:9001");
        assert_eq!(config.classifier.api_key.as_deref(), Some("hf_test"));
    }
}
