use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::config::CaptureConfig;
use super::error::CaptureError;
use super::transcriber::Transcriber;

/// The two states of the microphone toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    Idle,
    Recording,
}

/// What a call to [`CaptureSession::start`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A capture ran and produced text
    Transcribed(String),
    /// The session was already recording, so the request stopped it instead
    Stopped,
}

/// Snapshot of a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureStatus {
    pub session_id: String,
    pub state: CaptureState,
    /// When the current recording started, if one is active
    pub started_at: Option<DateTime<Utc>>,
    /// A transcription call is still running (possibly after a stop)
    pub in_flight: bool,
    /// Captures that ended with text
    pub completed_captures: usize,
    /// Captures that ended with an error or timeout
    pub failed_captures: usize,
}

#[derive(Debug)]
struct SessionState {
    state: CaptureState,
    /// Set while the transcriber is being awaited, including after a `stop`
    in_flight: bool,
    attempts: u64,
    started_at: Option<DateTime<Utc>>,
    completed: usize,
    failed: usize,
}

/// Voice capture toggle guarding a single bounded transcription call.
///
/// Clones share the same state, so every holder sees one session.
#[derive(Clone)]
pub struct CaptureSession {
    config: CaptureConfig,
    transcriber: Arc<dyn Transcriber>,
    inner: Arc<Mutex<SessionState>>,
}

impl CaptureSession {
    pub fn new(config: CaptureConfig, transcriber: Arc<dyn Transcriber>) -> Self {
        info!(
            "Creating capture session: {} (transcriber={}, timeout={:?})",
            config.session_id,
            transcriber.name(),
            config.timeout
        );

        Self {
            config,
            transcriber,
            inner: Arc::new(Mutex::new(SessionState {
                state: CaptureState::Idle,
                in_flight: false,
                attempts: 0,
                started_at: None,
                completed: 0,
                failed: 0,
            })),
        }
    }

    /// Start a capture, or stop the current one if already recording.
    ///
    /// Holds the calling task until the transcriber answers or the configured
    /// timeout elapses. The session is `Idle` again before this returns.
    ///
    /// After a `stop`, the stopped transcription keeps running until it returns.
    /// Until then a new start is refused, so the transcriber never has two
    /// calls in flight.
    pub async fn start(&self) -> Result<CaptureOutcome, CaptureError> {
        let attempt = {
            let mut inner = self.inner.lock().await;
            if inner.state == CaptureState::Recording {
                warn!("Capture already recording; stopping instead");
                Self::reset(&mut inner);
                return Ok(CaptureOutcome::Stopped);
            }
            if inner.in_flight {
                warn!("Previous capture still in progress; refusing to start");
                return Err(CaptureError::Other(
                    "previous capture still in progress".to_string(),
                ));
            }

            inner.state = CaptureState::Recording;
            inner.in_flight = true;
            inner.attempts += 1;
            inner.started_at = Some(Utc::now());
            inner.attempts
        };

        info!("Capture started: {} (attempt {})", self.config.session_id, attempt);

        // the attempt owns its cleanup, so a dropped caller cannot leave in_flight set
        let session = self.clone();
        let result = match tokio::spawn(async move { session.run_attempt().await }).await {
            Ok(result) => result,
            Err(e) => Err(CaptureError::Other(format!("capture task failed: {}", e))),
        };

        match result {
            Ok(text) => {
                info!("Capture complete: {} chars", text.len());
                Ok(CaptureOutcome::Transcribed(text))
            }
            Err(e) => {
                warn!("Capture failed: {}", e);
                Err(e)
            }
        }
    }

    async fn run_attempt(&self) -> Result<String, CaptureError> {
        let timeout = self.config.timeout;
        let result = match tokio::time::timeout(timeout, self.transcriber.listen(timeout)).await {
            Ok(result) => result,
            Err(_) => Err(CaptureError::Other(format!(
                "no speech recognized within {}s",
                timeout.as_secs_f64()
            ))),
        };

        let mut inner = self.inner.lock().await;
        match &result {
            Ok(_) => inner.completed += 1,
            Err(_) => inner.failed += 1,
        }
        // no other start can succeed while in_flight is set, so any
        // Recording state here belongs to this attempt
        inner.in_flight = false;
        Self::reset(&mut inner);

        result
    }

    /// Dashboard button semantics; identical to [`start`](Self::start)
    pub async fn toggle(&self) -> Result<CaptureOutcome, CaptureError> {
        self.start().await
    }

    /// Force the session back to `Idle`; returns whether it was recording.
    ///
    /// An in-flight transcription is not interrupted. Its result is still
    /// delivered to whoever called `start`, and new starts are refused until
    /// it returns.
    pub async fn stop(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.state == CaptureState::Idle {
            return false;
        }

        info!("Stopping capture session: {}", self.config.session_id);
        Self::reset(&mut inner);
        true
    }

    pub async fn state(&self) -> CaptureState {
        self.inner.lock().await.state
    }

    pub async fn status(&self) -> CaptureStatus {
        let inner = self.inner.lock().await;
        CaptureStatus {
            session_id: self.config.session_id.clone(),
            state: inner.state,
            started_at: inner.started_at,
            in_flight: inner.in_flight,
            completed_captures: inner.completed,
            failed_captures: inner.failed,
        }
    }

    fn reset(inner: &mut SessionState) {
        inner.state = CaptureState::Idle;
        inner.started_at = None;
    }
}
