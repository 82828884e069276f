use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for voice capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Session identifier used to filter transcripts (e.g., "capture-<uuid>")
    pub session_id: String,

    /// Upper bound on a single capture attempt
    /// Default: 10 seconds
    pub timeout: Duration,

    /// NATS server URL for the STT service
    pub nats_url: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            session_id: format!("capture-{}", uuid::Uuid::new_v4()),
            timeout: Duration::from_secs(10),
            nats_url: "nats://localhost:4222".to_string(),
        }
    }
}
