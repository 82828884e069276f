use crate::capture::CaptureSession;
use crate::pipeline::Pipeline;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline (analyzer client + interpretation)
    pub pipeline: Arc<Pipeline>,

    /// The single voice capture toggle
    pub capture: CaptureSession,
}

impl AppState {
    pub fn new(pipeline: Pipeline, capture: CaptureSession) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            capture,
        }
    }
}
