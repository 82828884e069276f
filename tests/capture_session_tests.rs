// Integration tests for the voice capture toggle
//
// These tests drive the Idle/Recording guard with scripted transcribers,
// without any audio device or STT service.

use anyhow::Result;
use loqa_sentiment::capture::{
    CaptureConfig, CaptureError, CaptureOutcome, CaptureSession, CaptureState, Transcriber,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Returns the same result every time, counting calls
struct ScriptedTranscriber {
    result: Result<String, CaptureError>,
    calls: AtomicUsize,
}

impl ScriptedTranscriber {
    fn new(result: Result<String, CaptureError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn listen(&self, _timeout: Duration) -> Result<String, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Blocks until released, like a microphone waiting for speech
struct GatedTranscriber {
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

fn gated() -> Arc<GatedTranscriber> {
    Arc::new(GatedTranscriber {
        entered: Notify::new(),
        release: Notify::new(),
        calls: AtomicUsize::new(0),
        active: AtomicUsize::new(0),
        max_active: AtomicUsize::new(0),
    })
}

#[async_trait::async_trait]
impl Transcriber for GatedTranscriber {
    async fn listen(&self, _timeout: Duration) -> Result<String, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok("hello from the gate".to_string())
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// Never answers within any reasonable timeout
struct SilentTranscriber;

#[async_trait::async_trait]
impl Transcriber for SilentTranscriber {
    async fn listen(&self, _timeout: Duration) -> Result<String, CaptureError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok("too late".to_string())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

fn config(timeout: Duration) -> CaptureConfig {
    CaptureConfig {
        session_id: "test-capture".to_string(),
        timeout,
        nats_url: "nats://localhost:4222".to_string(),
    }
}

#[test]
fn test_capture_config_default() {
    let config = CaptureConfig::default();

    assert_eq!(config.timeout, Duration::from_secs(10), "Default should be 10 seconds");
    assert!(config.session_id.starts_with("capture-"));
}

#[tokio::test]
async fn test_new_session_is_idle() {
    let session = CaptureSession::new(
        config(Duration::from_secs(1)),
        ScriptedTranscriber::new(Ok("hi".to_string())),
    );

    assert_eq!(session.state().await, CaptureState::Idle);
}

#[tokio::test]
async fn test_successful_capture_returns_text_and_idles() -> Result<()> {
    let transcriber = ScriptedTranscriber::new(Ok("the food was great".to_string()));
    let session = CaptureSession::new(config(Duration::from_secs(1)), transcriber.clone());

    let outcome = session.start().await?;

    assert_eq!(
        outcome,
        CaptureOutcome::Transcribed("the food was great".to_string())
    );
    assert_eq!(session.state().await, CaptureState::Idle);
    assert_eq!(transcriber.calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.status().await.completed_captures, 1);

    Ok(())
}

#[tokio::test]
async fn test_failures_return_to_idle() {
    let failures = [
        CaptureError::Unintelligible,
        CaptureError::ServiceUnavailable("connection refused".to_string()),
        CaptureError::Other("device busy".to_string()),
    ];

    for failure in failures {
        let session = CaptureSession::new(
            config(Duration::from_secs(1)),
            ScriptedTranscriber::new(Err(failure.clone())),
        );

        assert_eq!(session.start().await, Err(failure));
        assert_eq!(session.state().await, CaptureState::Idle);
        assert_eq!(session.status().await.failed_captures, 1);
    }
}

#[tokio::test]
async fn test_retry_after_failure() {
    let session = CaptureSession::new(
        config(Duration::from_secs(1)),
        ScriptedTranscriber::new(Err(CaptureError::Unintelligible)),
    );

    assert!(session.start().await.is_err());
    assert!(session.start().await.is_err());
    assert_eq!(session.status().await.failed_captures, 2);
}

#[tokio::test]
async fn test_timeout_is_other_failure() {
    let session = CaptureSession::new(
        config(Duration::from_millis(50)),
        Arc::new(SilentTranscriber),
    );

    match session.start().await {
        Err(CaptureError::Other(msg)) => assert!(msg.contains("no speech")),
        other => panic!("expected timeout failure, got {:?}", other),
    }
    assert_eq!(session.state().await, CaptureState::Idle);
}

#[tokio::test]
async fn test_second_start_while_recording_stops_instead() -> Result<()> {
    let transcriber = gated();
    let session = CaptureSession::new(config(Duration::from_secs(5)), transcriber.clone());

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.start().await })
    };

    transcriber.entered.notified().await;
    assert_eq!(session.state().await, CaptureState::Recording);

    // toggle contract: second start stops, never records twice
    let second = session.start().await?;
    assert_eq!(second, CaptureOutcome::Stopped);
    assert_eq!(session.state().await, CaptureState::Idle);
    assert_eq!(transcriber.calls.load(Ordering::SeqCst), 1);

    // the in-flight call is not interrupted and still delivers its text
    transcriber.release.notify_one();
    let first = first.await??;
    assert_eq!(
        first,
        CaptureOutcome::Transcribed("hello from the gate".to_string())
    );
    assert_eq!(session.state().await, CaptureState::Idle);

    Ok(())
}

#[tokio::test]
async fn test_stop_while_recording() -> Result<()> {
    let transcriber = gated();
    let session = CaptureSession::new(config(Duration::from_secs(5)), transcriber.clone());

    let handle = {
        let session = session.clone();
        tokio::spawn(async move { session.toggle().await })
    };

    transcriber.entered.notified().await;
    assert!(session.stop().await, "stop should report an active recording");
    assert_eq!(session.state().await, CaptureState::Idle);

    transcriber.release.notify_one();
    handle.await??;

    Ok(())
}

#[tokio::test]
async fn test_stop_on_idle_is_noop() {
    let session = CaptureSession::new(
        config(Duration::from_secs(1)),
        ScriptedTranscriber::new(Ok("hi".to_string())),
    );

    let before = session.status().await;
    assert!(!session.stop().await);
    assert!(!session.stop().await);
    let after = session.status().await;

    assert_eq!(after.state, CaptureState::Idle);
    assert_eq!(before.state, after.state);
    assert_eq!(before.completed_captures, after.completed_captures);
    assert!(after.started_at.is_none());
}

#[tokio::test]
async fn test_status_reports_start_time_while_recording() -> Result<()> {
    let transcriber = gated();
    let session = CaptureSession::new(config(Duration::from_secs(5)), transcriber.clone());

    let handle = {
        let session = session.clone();
        tokio::spawn(async move { session.start().await })
    };

    transcriber.entered.notified().await;
    let status = session.status().await;
    assert_eq!(status.state, CaptureState::Recording);
    assert!(status.started_at.is_some());
    assert_eq!(status.session_id, "test-capture");

    transcriber.release.notify_one();
    handle.await??;

    Ok(())
}

#[tokio::test]
async fn test_start_after_stop_waits_for_in_flight_capture() -> Result<()> {
    let transcriber = gated();
    let session = CaptureSession::new(config(Duration::from_secs(5)), transcriber.clone());

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.start().await })
    };

    transcriber.entered.notified().await;
    assert!(session.stop().await);
    assert_eq!(session.state().await, CaptureState::Idle);
    assert!(session.status().await.in_flight);

    // the stopped call is still running, so a new start must not reach the transcriber
    match session.start().await {
        Err(CaptureError::Other(msg)) => assert!(msg.contains("still in progress")),
        other => panic!("expected refusal while in flight, got {:?}", other),
    }
    assert_eq!(session.state().await, CaptureState::Idle);
    assert_eq!(transcriber.calls.load(Ordering::SeqCst), 1);

    // late completion delivers its text and leaves the session idle
    transcriber.release.notify_one();
    assert_eq!(
        first.await??,
        CaptureOutcome::Transcribed("hello from the gate".to_string())
    );
    assert_eq!(session.state().await, CaptureState::Idle);
    assert!(!session.status().await.in_flight);

    // once the old call has returned, a new capture runs normally
    let second = {
        let session = session.clone();
        tokio::spawn(async move { session.start().await })
    };
    transcriber.entered.notified().await;
    assert_eq!(session.state().await, CaptureState::Recording);
    transcriber.release.notify_one();
    second.await??;

    assert_eq!(transcriber.calls.load(Ordering::SeqCst), 2);
    assert_eq!(transcriber.max_active.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_dropped_caller_still_clears_in_flight() -> Result<()> {
    let transcriber = gated();
    let session = CaptureSession::new(config(Duration::from_secs(5)), transcriber.clone());

    let caller = {
        let session = session.clone();
        tokio::spawn(async move { session.start().await })
    };
    transcriber.entered.notified().await;

    // e.g. the HTTP client went away mid-capture
    caller.abort();
    assert!(caller.await.is_err());
    assert!(session.status().await.in_flight);

    transcriber.release.notify_one();
    for _ in 0..100 {
        if !session.status().await.in_flight {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let status = session.status().await;
    assert!(!status.in_flight, "the abandoned attempt should still finish");
    assert_eq!(status.state, CaptureState::Idle);
    assert_eq!(status.completed_captures, 1);

    Ok(())
}
