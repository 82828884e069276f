//! Voice capture
//!
//! This module provides the `CaptureSession` toggle that manages:
//! - The Idle/Recording state guard (at most one capture in flight)
//! - A bounded wait on the speech-to-text collaborator
//! - Classification of capture failures

mod config;
mod error;
mod session;
mod transcriber;

pub use config::CaptureConfig;
pub use error::CaptureError;
pub use session::{CaptureOutcome, CaptureSession, CaptureState, CaptureStatus};
pub use transcriber::Transcriber;
