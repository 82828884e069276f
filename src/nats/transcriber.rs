use futures::stream::StreamExt;
use std::time::Duration;
use tracing::{info, warn};

use super::client::NatsClient;
use super::messages::TranscriptMessage;
use crate::capture::{CaptureError, Transcriber};

/// Transcriber backed by the loqa STT service over NATS.
///
/// Each `listen` opens its own connection, so an unreachable server is
/// reported per attempt as `ServiceUnavailable`.
pub struct NatsTranscriber {
    nats_url: String,
    session_id: String,
}

impl NatsTranscriber {
    pub fn new(nats_url: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            nats_url: nats_url.into(),
            session_id: session_id.into(),
        }
    }
}

#[async_trait::async_trait]
impl Transcriber for NatsTranscriber {
    async fn listen(&self, timeout: Duration) -> Result<String, CaptureError> {
        let client = NatsClient::connect(&self.nats_url, self.session_id.clone())
            .await
            .map_err(|e| CaptureError::ServiceUnavailable(format!("{:#}", e)))?;

        let mut subscriber = client
            .subscribe_final_transcripts()
            .await
            .map_err(|e| CaptureError::ServiceUnavailable(format!("{:#}", e)))?;

        info!("Waiting up to {:?} for speech on {}", timeout, client.session_id());

        let wait = async {
            while let Some(msg) = subscriber.next().await {
                match serde_json::from_slice::<TranscriptMessage>(&msg.payload) {
                    Ok(transcript) if transcript.is_final_for(client.session_id()) => {
                        return transcript.into_capture_result();
                    }
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Failed to parse transcript message: {}", e);
                    }
                }
            }

            Err(CaptureError::ServiceUnavailable(
                "transcript stream closed".to_string(),
            ))
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(result) => result,
            Err(_) => Err(CaptureError::Other(format!(
                "no transcript within {}s",
                timeout.as_secs_f64()
            ))),
        }
    }

    fn name(&self) -> &str {
        "nats"
    }
}
