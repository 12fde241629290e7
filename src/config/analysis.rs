//! Analysis service configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::analysis::AnalysisClientConfig;

/// Configuration for the external clustering/analysis service
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Base URL of the analysis service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AnalysisConfig {
    /// Build the HTTP client configuration.
    pub fn client_config(&self) -> AnalysisClientConfig {
        AnalysisClientConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAnalysisUrl);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8500".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn non_http_url_is_rejected() {
        let config = AnalysisConfig {
            base_url: "ftp://analysis".to_string(),
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidAnalysisUrl)
        ));
    }

    #[test]
    fn client_config_strips_trailing_slash() {
        let config = AnalysisConfig {
            base_url: "http://analysis:8500/".to_string(),
            ..AnalysisConfig::default()
        };
        assert_eq!(config.client_config().base_url, "http://analysis:8500");
    }
}
