use anyhow::{Context, Result};
use async_nats::Client;
use tracing::info;

/// Subject loqa-core publishes finished utterances on
pub const FINAL_TRANSCRIPT_SUBJECT: &str = "stt.text.final";

pub struct NatsClient {
    client: Client,
    session_id: String,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str, session_id: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client, session_id })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Subscribe to final transcript messages
    pub async fn subscribe_final_transcripts(&self) -> Result<async_nats::Subscriber> {
        // Partial transcripts go to stt.text.partial and are of no use for a
        // one-shot capture; filtering by session_id happens on the payload
        info!("Subscribing to transcripts on {}", FINAL_TRANSCRIPT_SUBJECT);

        let subscriber = self
            .client
            .subscribe(FINAL_TRANSCRIPT_SUBJECT)
            .await
            .context("Failed to subscribe to transcripts")?;

        info!("Subscribed to {}", FINAL_TRANSCRIPT_SUBJECT);

        Ok(subscriber)
    }
}
