use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

use super::wire::{ErrorEnvelope, RequestDocument, SentimentRequest, SentimentResponse};
use super::{Analyzer, AnalyzerError};
use crate::config::AnalyzerConfig;
use crate::sentiment::RawResponse;

const SENTIMENT_PATH: &str = "text/analytics/v3.1/sentiment";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const DOCUMENT_ID: &str = "1";

/// Client for the Text Analytics sentiment endpoint with opinion mining enabled
pub struct TextAnalyticsClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    language: String,
}

impl TextAnalyticsClient {
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        if config.endpoint.is_empty() {
            anyhow::bail!("Analyzer endpoint is not configured");
        }
        if config.api_key.is_empty() {
            anyhow::bail!("Analyzer API key is not configured");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let url = format!(
            "{}/{}?opinionMining=true",
            config.endpoint.trim_end_matches('/'),
            SENTIMENT_PATH
        );

        info!("Text Analytics client ready: {}", url);

        Ok(Self {
            http,
            url,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Analyzer for TextAnalyticsClient {
    async fn analyze(&self, text: &str) -> Result<RawResponse, AnalyzerError> {
        let request = SentimentRequest {
            documents: vec![RequestDocument {
                id: DOCUMENT_ID,
                language: &self.language,
                text,
            }],
        };

        debug!("Sending {} chars to {}", text.len(), self.url);

        let response = self
            .http
            .post(&self.url)
            .header(KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalyzerError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalyzerError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(service_error(status, &body));
        }

        let parsed: SentimentResponse =
            serde_json::from_str(&body).map_err(|e| AnalyzerError::Decode(e.to_string()))?;

        if let Some(failed) = parsed.errors.into_iter().find(|e| e.id == DOCUMENT_ID) {
            return Err(AnalyzerError::Service {
                code: failed.error.code,
                message: failed.error.message,
            });
        }

        let document = parsed
            .documents
            .into_iter()
            .find(|d| d.id == DOCUMENT_ID)
            .ok_or_else(|| AnalyzerError::Decode("response contained no document".to_string()))?;

        Ok(document.into_raw()?)
    }

    fn name(&self) -> &str {
        "text-analytics"
    }
}

fn service_error(status: StatusCode, body: &str) -> AnalyzerError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => AnalyzerError::Service {
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => AnalyzerError::Service {
            code: status.as_u16().to_string(),
            message: body.chars().take(200).collect(),
        },
    }
}
