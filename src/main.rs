use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loqa_sentiment::{
    create_router, AppState, CaptureError, CaptureOutcome, CaptureSession, Config,
    NatsTranscriber, Pipeline, TextAnalyticsClient,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loqa-sentiment", about = "Sentiment and opinion mining dashboard backend")]
struct Cli {
    /// Config file (without extension)
    #[arg(long, global = true, default_value = "config/loqa-sentiment")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze text from the command line or a file
    Analyze {
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Capture one utterance from the STT service
    Listen {
        /// Analyze the transcript once captured
        #[arg(long)]
        analyze: bool,
    },
    /// Run the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Loqa Sentiment v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);

    match cli.command {
        Command::Analyze { text, file, json } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("Provide --text or --file"),
            };
            analyze(&build_pipeline(&cfg)?, &text, json).await
        }
        Command::Listen { analyze: then_analyze } => {
            let capture = build_capture(&cfg);
            match capture.start().await {
                Ok(CaptureOutcome::Transcribed(text)) => {
                    println!("{}", text);
                    if then_analyze {
                        analyze(&build_pipeline(&cfg)?, &text, false).await?;
                    }
                    Ok(())
                }
                Ok(CaptureOutcome::Stopped) => Ok(()),
                Err(CaptureError::Unintelligible) => {
                    warn!("Sorry, could not understand your voice.");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
        Command::Serve => serve(cfg).await,
    }
}

fn build_pipeline(cfg: &Config) -> Result<Pipeline> {
    let client = TextAnalyticsClient::new(&cfg.analyzer)?;
    Ok(Pipeline::new(Arc::new(client), cfg.analysis.mixed_threshold))
}

fn build_capture(cfg: &Config) -> CaptureSession {
    let capture_config = cfg.capture.to_capture_config();
    let transcriber = NatsTranscriber::new(
        capture_config.nats_url.clone(),
        capture_config.session_id.clone(),
    );
    CaptureSession::new(capture_config, Arc::new(transcriber))
}

async fn analyze(pipeline: &Pipeline, text: &str, json: bool) -> Result<()> {
    let report = pipeline.analyze_text(text).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}

async fn serve(cfg: Config) -> Result<()> {
    let state = AppState::new(build_pipeline(&cfg)?, build_capture(&cfg));
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
