/// Capture-path failures. All of them are recoverable: the session is back to
/// `Idle` by the time one is returned, and the caller may simply start again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// Audio was captured but could not be understood
    #[error("Could not understand audio")]
    Unintelligible,

    /// The speech recognition service could not be reached
    #[error("Speech recognition service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Anything else, including timeouts
    #[error("Voice input failed: {0}")]
    Other(String),
}
