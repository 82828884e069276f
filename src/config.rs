use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::capture::CaptureConfig;
use crate::sentiment::DEFAULT_MIXED_THRESHOLD;

/// Prefix for environment overrides, e.g. `LOQA_SENTIMENT__SERVICE__HTTP__PORT`
const ENV_PREFIX: &str = "LOQA_SENTIMENT";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub capture: CaptureSection,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Cognitive Services endpoint, e.g. https://<resource>.cognitiveservices.azure.com
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            language: default_language(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Largest positive/negative gap still reported as Mixed
    #[serde(default = "default_mixed_threshold")]
    pub mixed_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mixed_threshold: default_mixed_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureSection {
    #[serde(default = "default_capture_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_nats_url")]
    pub nats_url: String,
    /// Must match the STT publisher's session id; a random one is generated when absent
    pub session_id: Option<String>,
}

impl Default for CaptureSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_capture_timeout(),
            nats_url: default_nats_url(),
            session_id: None,
        }
    }
}

impl CaptureSection {
    pub fn to_capture_config(&self) -> CaptureConfig {
        let defaults = CaptureConfig::default();
        let session_id = match &self.session_id {
            Some(id) => id.clone(),
            None => {
                warn!(
                    "capture.session_id not set, using generated {}; transcripts from the STT service will not match it",
                    defaults.session_id
                );
                defaults.session_id
            }
        };

        CaptureConfig {
            session_id,
            timeout: Duration::from_secs(self.timeout_secs),
            nats_url: self.nats_url.clone(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_mixed_threshold() -> f64 {
    DEFAULT_MIXED_THRESHOLD
}

fn default_capture_timeout() -> u64 {
    10
}

fn default_nats_url() -> String {
    "nats://localhost:4222".to_string()
}

impl Config {
    /// Load from a config file plus `LOQA_SENTIMENT__*` overrides, then fill
    /// missing analyzer credentials from `AZURE_API_KEY` / `AZURE_ENDPOINT`
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to load config from {}", path))?;

        let cfg: Self = settings.try_deserialize()?;

        Ok(cfg.with_credential_fallback(
            std::env::var("AZURE_API_KEY").ok(),
            std::env::var("AZURE_ENDPOINT").ok(),
        ))
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Use the given credentials only where the config left them empty
    pub fn with_credential_fallback(
        mut self,
        api_key: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        if self.analyzer.api_key.is_empty() {
            if let Some(key) = api_key {
                self.analyzer.api_key = key;
            }
        }
        if self.analyzer.endpoint.is_empty() {
            if let Some(endpoint) = endpoint {
                self.analyzer.endpoint = endpoint;
            }
        }
        self
    }
}
