use serde::Serialize;
use tracing::{debug, warn};

use super::error::AnalysisError;
use super::raw::{RawAssessment, RawOpinion, RawResponse, RawScores, RawSentence};
use super::scores::{ConfidenceScores, SentimentLabel};
use super::verdict::{classify, Verdict};

/// Leaf of the opinion tree: one assessment phrase about a target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    text: String,
    sentiment: SentimentLabel,
    is_negated: bool,
}

impl Assessment {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentiment(&self) -> SentimentLabel {
        self.sentiment
    }

    pub fn is_negated(&self) -> bool {
        self.is_negated
    }
}

/// A target phrase within a sentence and the assessments made about it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpinionTarget {
    index: usize,
    text: String,
    sentiment: SentimentLabel,
    assessments: Vec<Assessment>,
}

impl OpinionTarget {
    /// 1-based position within the parent sentence
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentiment(&self) -> SentimentLabel {
        self.sentiment
    }

    /// Assessments in arrival order
    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentence {
    index: usize,
    text: String,
    confidence_scores: ConfidenceScores,
    targets: Vec<OpinionTarget>,
}

impl Sentence {
    /// 1-based position within the document
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn confidence_scores(&self) -> &ConfidenceScores {
        &self.confidence_scores
    }

    /// Opinion targets in arrival order; may be empty
    pub fn targets(&self) -> &[OpinionTarget] {
        &self.targets
    }
}

/// Validated, numbered presentation tree for one analyzed document.
///
/// Immutable once built: there are no setters, and a fresh response must go
/// through [`build`] again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    confidence_scores: ConfidenceScores,
    sentences: Vec<Sentence>,
}

impl AnalysisResult {
    pub fn confidence_scores(&self) -> &ConfidenceScores {
        &self.confidence_scores
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Document-level verdict, using the classifier on the document scores only
    pub fn verdict(&self, mixed_threshold: f64) -> Verdict {
        classify(&self.confidence_scores, mixed_threshold)
    }

    /// Total opinion targets across all sentences
    pub fn target_count(&self) -> usize {
        self.sentences.iter().map(|s| s.targets.len()).sum()
    }
}

/// Build the presentation tree from a raw analyzer response.
///
/// Order is preserved at every level and indices are assigned positionally.
/// Sentiment labels are taken from the source as-is; nothing is recomputed.
pub fn build(raw: &RawResponse) -> Result<AnalysisResult, AnalysisError> {
    let result = build_inner(raw);

    match &result {
        Ok(tree) => debug!(
            "Built opinion tree: {} sentences, {} targets",
            tree.sentences.len(),
            tree.target_count()
        ),
        Err(e) => warn!("Rejected analyzer response: {}", e),
    }

    result
}

/// Deserialize a JSON analyzer response and build the tree
pub fn build_json(json: &str) -> Result<AnalysisResult, AnalysisError> {
    let raw: RawResponse = serde_json::from_str(json)
        .map_err(|e| AnalysisError::MalformedResponse(format!("invalid JSON: {}", e)))?;
    build(&raw)
}

fn build_inner(raw: &RawResponse) -> Result<AnalysisResult, AnalysisError> {
    let confidence_scores = scores_at(raw.confidence_scores.as_ref(), "confidence_scores")?;

    let sentences = raw
        .sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| build_sentence(i, sentence))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisResult {
        confidence_scores,
        sentences,
    })
}

fn build_sentence(position: usize, raw: &RawSentence) -> Result<Sentence, AnalysisError> {
    let path = format!("sentences[{}]", position);

    let text = required(raw.text.as_ref(), &path, "text")?;
    let confidence_scores =
        scores_at(raw.confidence_scores.as_ref(), &format!("{}.confidence_scores", path))?;

    let targets = raw
        .opinions
        .iter()
        .enumerate()
        .map(|(j, opinion)| build_target(j, opinion, &format!("{}.opinions[{}]", path, j)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Sentence {
        index: position + 1,
        text,
        confidence_scores,
        targets,
    })
}

fn build_target(
    position: usize,
    raw: &RawOpinion,
    path: &str,
) -> Result<OpinionTarget, AnalysisError> {
    let target = raw
        .target
        .as_ref()
        .ok_or_else(|| missing(path, "target"))?;

    let target_path = format!("{}.target", path);
    let text = required(target.text.as_ref(), &target_path, "text")?;
    let sentiment = label_at(target.sentiment.as_deref(), &target_path)?;

    let assessments = raw
        .assessments
        .iter()
        .enumerate()
        .map(|(k, assessment)| {
            build_assessment(assessment, &format!("{}.assessments[{}]", path, k))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OpinionTarget {
        index: position + 1,
        text,
        sentiment,
        assessments,
    })
}

fn build_assessment(raw: &RawAssessment, path: &str) -> Result<Assessment, AnalysisError> {
    Ok(Assessment {
        text: required(raw.text.as_ref(), path, "text")?,
        sentiment: label_at(raw.sentiment.as_deref(), path)?,
        is_negated: raw.is_negated,
    })
}

fn scores_at(raw: Option<&RawScores>, path: &str) -> Result<ConfidenceScores, AnalysisError> {
    let raw = raw.ok_or_else(|| AnalysisError::MalformedResponse(format!("missing {}", path)))?;

    let positive = raw.positive.ok_or_else(|| missing(path, "positive"))?;
    let neutral = raw.neutral.ok_or_else(|| missing(path, "neutral"))?;
    let negative = raw.negative.ok_or_else(|| missing(path, "negative"))?;

    ConfidenceScores::new(positive, neutral, negative).map_err(|e| match e {
        AnalysisError::MalformedResponse(msg) => {
            AnalysisError::MalformedResponse(format!("{}: {}", path, msg))
        }
        other => other,
    })
}

fn label_at(raw: Option<&str>, path: &str) -> Result<SentimentLabel, AnalysisError> {
    raw.ok_or_else(|| missing(path, "sentiment"))?.parse()
}

fn required(value: Option<&String>, path: &str, field: &str) -> Result<String, AnalysisError> {
    value.cloned().ok_or_else(|| missing(path, field))
}

fn missing(path: &str, field: &str) -> AnalysisError {
    AnalysisError::MalformedResponse(format!("missing {}.{}", path, field))
}
