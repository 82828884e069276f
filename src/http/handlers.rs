use super::state::AppState;
use crate::analyzer::AnalyzerError;
use crate::capture::{CaptureError, CaptureOutcome, CaptureState};
use crate::pipeline::PipelineError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CaptureResponse {
    pub state: CaptureState,
    /// Recognized text when a capture completed
    pub transcript: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StopCaptureResponse {
    pub state: CaptureState,
    pub was_recording: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl ToString) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

fn pipeline_status(e: &PipelineError) -> StatusCode {
    match e {
        PipelineError::EmptyInput => StatusCode::BAD_REQUEST,
        PipelineError::Analyzer(AnalyzerError::Transport(_)) => StatusCode::SERVICE_UNAVAILABLE,
        PipelineError::Analyzer(_) | PipelineError::Analysis(_) => StatusCode::BAD_GATEWAY,
    }
}

fn capture_status_code(e: &CaptureError) -> StatusCode {
    match e {
        CaptureError::Unintelligible => StatusCode::UNPROCESSABLE_ENTITY,
        CaptureError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        CaptureError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /analyze
/// Analyze text and return verdict, score cards and opinion tree
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    match state.pipeline.analyze_text(&req.text).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            let status = pipeline_status(&e);
            if status == StatusCode::BAD_REQUEST {
                warn!("Rejected analyze request: {}", e);
            } else {
                error!("Analysis failed: {}", e);
            }
            error_response(status, e)
        }
    }
}

/// POST /capture/toggle
/// Start a voice capture, or stop the one in progress
pub async fn toggle_capture(State(state): State<AppState>) -> impl IntoResponse {
    match state.capture.toggle().await {
        Ok(CaptureOutcome::Transcribed(text)) => {
            info!("Capture returned transcript");
            (
                StatusCode::OK,
                Json(CaptureResponse {
                    state: state.capture.state().await,
                    transcript: Some(text),
                    message: "Capture complete".to_string(),
                }),
            )
                .into_response()
        }
        Ok(CaptureOutcome::Stopped) => (
            StatusCode::OK,
            Json(CaptureResponse {
                state: state.capture.state().await,
                transcript: None,
                message: "Capture stopped".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(capture_status_code(&e), e),
    }
}

/// POST /capture/stop
/// Force the capture session to idle
pub async fn stop_capture(State(state): State<AppState>) -> impl IntoResponse {
    let was_recording = state.capture.stop().await;

    (
        StatusCode::OK,
        Json(StopCaptureResponse {
            state: state.capture.state().await,
            was_recording,
        }),
    )
}

/// GET /capture/status
/// Get status of the capture session
pub async fn capture_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.capture.status().await))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
