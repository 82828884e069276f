//! HTTP API for the dashboard front end
//!
//! This module provides a REST API over the analysis pipeline and capture toggle:
//! - POST /analyze - Score text and return the dashboard report
//! - POST /capture/toggle - Start a voice capture, or stop the active one
//! - POST /capture/stop - Force the capture session back to idle
//! - GET /capture/status - Query capture session state
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{AnalyzeRequest, CaptureResponse, ErrorResponse, StopCaptureResponse};
pub use routes::create_router;
pub use state::AppState;
