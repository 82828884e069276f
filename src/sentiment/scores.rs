use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::AnalysisError;

/// Probability-like distribution over positive/neutral/negative for a unit of text.
///
/// Each value lies in `[0.0, 1.0]`. The three values usually sum to ~1.0 but
/// nothing downstream relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScores {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl ConfidenceScores {
    /// Build a score triple, rejecting values outside `[0.0, 1.0]` (including NaN)
    pub fn new(positive: f64, neutral: f64, negative: f64) -> Result<Self, AnalysisError> {
        for (name, value) in [("positive", positive), ("neutral", neutral), ("negative", negative)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::MalformedResponse(format!(
                    "{} score {} is outside [0, 1]",
                    name, value
                )));
            }
        }

        Ok(Self {
            positive,
            neutral,
            negative,
        })
    }

    /// Sum of the three scores (advisory only)
    pub fn total(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

/// Per-item sentiment attached to sentences' targets and assessments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = AnalysisError;

    /// Case-insensitive: the service emits lowercase labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            "mixed" => Ok(SentimentLabel::Mixed),
            _ => Err(AnalysisError::UnknownSentimentLabel(s.to_string())),
        }
    }
}
