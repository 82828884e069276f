pub mod analyzer;
pub mod capture;
pub mod config;
pub mod http;
pub mod nats;
pub mod pipeline;
pub mod report;
pub mod sentiment;

pub use analyzer::{Analyzer, AnalyzerError, TextAnalyticsClient};
pub use capture::{
    CaptureConfig, CaptureError, CaptureOutcome, CaptureSession, CaptureState, CaptureStatus,
    Transcriber,
};
pub use config::Config;
pub use http::{create_router, AppState};
pub use nats::{NatsClient, NatsTranscriber, TranscriptMessage};
pub use pipeline::{Pipeline, PipelineError};
pub use report::{format_percent, render_outline, AnalysisReport, ScoreCard};
pub use sentiment::{
    build, build_json, classify, classify_default, AnalysisError, AnalysisResult, Assessment,
    ConfidenceScores, OpinionTarget, RawResponse, Sentence, SentimentLabel, Verdict, VerdictColor,
    DEFAULT_MIXED_THRESHOLD,
};
