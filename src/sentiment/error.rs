/// Failures while interpreting an analyzer response
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// A required field is missing or holds an unusable value
    #[error("Malformed analyzer response: {0}")]
    MalformedResponse(String),

    /// A sentiment value outside Positive/Negative/Neutral/Mixed
    #[error("Unknown sentiment label: {0:?}")]
    UnknownSentimentLabel(String),
}
