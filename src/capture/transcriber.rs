use std::time::Duration;

use super::error::CaptureError;

/// Speech-to-text collaborator
///
/// Implementations:
/// - NATS: waits for the next final transcript from the loqa STT service
/// - Tests: scripted transcribers returning canned results
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Wait for one utterance and return its text
    ///
    /// Must give up after `timeout`. The session enforces the same bound, so an
    /// implementation that overruns is reported as a timeout anyway.
    async fn listen(&self, timeout: Duration) -> Result<String, CaptureError>;

    /// Get transcriber name for logging
    fn name(&self) -> &str;
}
