//! Remote sentiment analysis
//!
//! The `Analyzer` trait is the seam between the interpretation pipeline and
//! whatever service scores the text.

mod client;
pub mod wire;

pub use client::TextAnalyticsClient;

use crate::sentiment::{AnalysisError, RawResponse};

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// The service could not be reached or the connection failed mid-request
    #[error("Analyzer unreachable: {0}")]
    Transport(String),

    /// The service answered with an error
    #[error("Analyzer error {code}: {message}")]
    Service { code: String, message: String },

    /// The reply was not valid sentiment JSON
    #[error("Failed to decode analyzer reply: {0}")]
    Decode(String),

    /// The reply parsed but its opinion links were inconsistent
    #[error(transparent)]
    Malformed(#[from] AnalysisError),
}

/// Sentiment/opinion-mining collaborator
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Score one document with opinion mining
    async fn analyze(&self, text: &str) -> Result<RawResponse, AnalyzerError>;

    /// Get analyzer name for logging
    fn name(&self) -> &str;
}
