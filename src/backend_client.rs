use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::translate::{TranslationBackend, TranslationRequest, TranslationResponse};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:9000";

/// HTTP client for any service speaking the `/translate` contract
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request, surfacing transport and HTTP failures as errors
    pub async fn try_translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, ClientError> {
        let url = format!("{}/translate", self.base_url);
        debug!(
            "Sending request to {} (src_lang={}, dst_lang={}, target_hw={})",
            url,
            request.source_language,
            request.destination_language,
            request.target_hardware.as_deref().unwrap_or("N/A"),
        );

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let result: TranslationResponse = response.json().await?;
        debug!("Response status: {}", result.status);
        if let Some(log) = &result.raw_log {
            debug!("Backend log: {}", log);
        }
        Ok(result)
    }

    /// Send a request; every failure comes back as an `"error"` response
    pub async fn translate(&self, request: &TranslationRequest) -> TranslationResponse {
        match self.try_translate(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Translate request failed: {}", e);
                e.into_failure()
            }
        }
    }

    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl TranslationBackend for BackendClient {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn translate(&self, request: &TranslationRequest) -> TranslationResponse {
        BackendClient::translate(self, request).await
    }
}
