//! HTTP adapter for the external clustering/analysis service.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, TalkSessionId};
use crate::ports::AnalysisService;

/// Configuration for the analysis service client.
#[derive(Debug, Clone)]
pub struct AnalysisClientConfig {
    /// Base URL of the analysis service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. The analysis calls are fire-and-forget, so
    /// a short timeout only bounds the detached task's lifetime.
    pub timeout: Duration,
}

impl Default for AnalysisClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8500".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct AnalysisRequest {
    talk_session_id: String,
}

/// reqwest-backed implementation of [`AnalysisService`].
pub struct HttpAnalysisService {
    client: reqwest::Client,
    config: AnalysisClientConfig,
}

impl HttpAnalysisService {
    /// Creates the client.
    ///
    /// # Errors
    ///
    /// - `ExternalServiceError` when the HTTP client cannot be built
    pub fn new(config: AnalysisClientConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::ExternalServiceError,
                    format!("Failed to build analysis HTTP client: {}", e),
                )
            })?;
        Ok(Self { client, config })
    }

    async fn post(&self, path: &str, talk_session_id: TalkSessionId) -> Result<(), DomainError> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&AnalysisRequest {
                talk_session_id: talk_session_id.to_string(),
            })
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::ExternalServiceError,
                    format!("Analysis request to {} failed: {}", url, e),
                )
            })?;

        if !response.status().is_success() {
            return Err(DomainError::new(
                ErrorCode::ExternalServiceError,
                format!("Analysis service returned {} for {}", response.status(), url),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn start_analysis(&self, talk_session_id: TalkSessionId) -> Result<(), DomainError> {
        self.post("/analysis/start", talk_session_id).await
    }

    async fn generate_report(&self, talk_session_id: TalkSessionId) -> Result<(), DomainError> {
        self.post("/analysis/report", talk_session_id).await
    }
}
