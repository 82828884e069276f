//! Result interpretation for sentiment analysis
//!
//! This module turns an analyzer response into presentation data:
//! - `verdict`: document scores → one overall label with a fixed tie-break policy
//! - `tree`: nested sentence/opinion/assessment records → numbered, immutable tree
//! - `raw`: the unvalidated response shape the tree builder consumes

mod error;
pub mod raw;
mod scores;
mod tree;
mod verdict;

pub use error::AnalysisError;
pub use raw::{RawAssessment, RawOpinion, RawResponse, RawScores, RawSentence, RawTarget};
pub use scores::{ConfidenceScores, SentimentLabel};
pub use tree::{build, build_json, AnalysisResult, Assessment, OpinionTarget, Sentence};
pub use verdict::{classify, classify_default, Verdict, VerdictColor, DEFAULT_MIXED_THRESHOLD};
