use std::sync::Arc;
use tracing::{error, info};

use crate::analyzer::{Analyzer, AnalyzerError};
use crate::report::AnalysisReport;
use crate::sentiment::{self, AnalysisError};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Please enter some text to analyze")]
    EmptyInput,

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Text in, dashboard report out: remote analysis, tree building, verdict
pub struct Pipeline {
    analyzer: Arc<dyn Analyzer>,
    mixed_threshold: f64,
}

impl Pipeline {
    pub fn new(analyzer: Arc<dyn Analyzer>, mixed_threshold: f64) -> Self {
        Self {
            analyzer,
            mixed_threshold,
        }
    }

    pub fn mixed_threshold(&self) -> f64 {
        self.mixed_threshold
    }

    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisReport, PipelineError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        info!("Analyzing {} chars with {}", text.len(), self.analyzer.name());

        let raw = self.analyzer.analyze(text).await.map_err(|e| {
            error!("Analysis request failed: {}", e);
            e
        })?;

        let result = sentiment::build(&raw)?;
        let report = AnalysisReport::new(result, self.mixed_threshold);

        info!(
            "Analysis complete: {} ({} sentences)",
            report.verdict,
            report.result.sentences().len()
        );

        Ok(report)
    }
}
