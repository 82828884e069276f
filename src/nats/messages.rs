use serde::{Deserialize, Serialize};

use crate::capture::CaptureError;

/// Transcript message received from STT service
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub session_id: String,
    pub text: String,
    pub partial: bool,
    pub timestamp: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl TranscriptMessage {
    /// Whether this message finishes an utterance for `session_id`
    pub fn is_final_for(&self, session_id: &str) -> bool {
        !self.partial && self.session_id == session_id
    }

    /// Recognized text, or `Unintelligible` when the STT service heard nothing usable
    pub fn into_capture_result(self) -> Result<String, CaptureError> {
        let text = self.text.trim();
        if text.is_empty() {
            Err(CaptureError::Unintelligible)
        } else {
            Ok(text.to_string())
        }
    }
}
