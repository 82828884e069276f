use serde::{Deserialize, Serialize};
use std::fmt;

use super::scores::ConfidenceScores;

/// Maximum positive/negative gap still treated as polarized text
pub const DEFAULT_MIXED_THRESHOLD: f64 = 0.20;

/// Overall document sentiment shown in the summary panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Positive,
    Negative,
    Neutral,
    Mixed,
    Inconclusive,
}

/// Display hint for a verdict. Derived from the label, never the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictColor {
    Green,
    Red,
    Blue,
    Amber,
    Gray,
}

impl VerdictColor {
    /// Theme value used by the dashboard
    pub fn hex(&self) -> &'static str {
        match self {
            VerdictColor::Green => "#28A745",
            VerdictColor::Red => "#DC3545",
            VerdictColor::Blue => "#17A2B8",
            VerdictColor::Amber => "#FFC107",
            VerdictColor::Gray => "gray70",
        }
    }
}

impl Verdict {
    pub fn color(&self) -> VerdictColor {
        match self {
            Verdict::Positive => VerdictColor::Green,
            Verdict::Negative => VerdictColor::Red,
            Verdict::Neutral => VerdictColor::Blue,
            Verdict::Mixed => VerdictColor::Amber,
            Verdict::Inconclusive => VerdictColor::Gray,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Positive => "Positive",
            Verdict::Negative => "Negative",
            Verdict::Neutral => "Neutral",
            Verdict::Mixed => "Mixed",
            Verdict::Inconclusive => "Inconclusive",
        }
    }

    /// Summary line for the overall-analysis panel
    pub fn summary(&self) -> String {
        match self {
            Verdict::Inconclusive => "Sentiment analysis complete.".to_string(),
            label => format!("The overall sentiment appears to be {}.", label.as_str()),
        }
    }

    /// Which classification rule produced this verdict
    pub fn rationale(&self) -> &'static str {
        match self {
            Verdict::Positive => "positive score strictly exceeds neutral and negative",
            Verdict::Negative => "negative score strictly exceeds positive and neutral",
            Verdict::Neutral => "neutral score strictly exceeds positive and negative",
            Verdict::Mixed => "no single maximum; positive and negative within the mixed threshold",
            Verdict::Inconclusive => "no single maximum and positive/negative gap at or above the mixed threshold",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify document scores into a single verdict.
///
/// Rules are evaluated in order and the first match wins:
/// 1. strict maximum positive → `Positive`
/// 2. strict maximum negative → `Negative`
/// 3. strict maximum neutral → `Neutral`
/// 4. `|positive - negative| < mixed_threshold` → `Mixed`
/// 5. anything else → `Inconclusive`
///
/// A strict winner is never reclassified as `Mixed`, even when positive and
/// negative happen to be close.
pub fn classify(scores: &ConfidenceScores, mixed_threshold: f64) -> Verdict {
    let ConfidenceScores {
        positive,
        neutral,
        negative,
    } = *scores;

    if positive > neutral && positive > negative {
        Verdict::Positive
    } else if negative > positive && negative > neutral {
        Verdict::Negative
    } else if neutral > positive && neutral > negative {
        Verdict::Neutral
    } else if (positive - negative).abs() < mixed_threshold {
        Verdict::Mixed
    } else {
        Verdict::Inconclusive
    }
}

/// [`classify`] with [`DEFAULT_MIXED_THRESHOLD`]
pub fn classify_default(scores: &ConfidenceScores) -> Verdict {
    classify(scores, DEFAULT_MIXED_THRESHOLD)
}
