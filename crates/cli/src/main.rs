#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use interview_analyzer_core::analysis::{FallbackAnalyzer, OpenRouterAnalyzer};
use interview_analyzer_core::config::{
    require_api_key, EngineConfig, ModelId, StdEnv, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
    ENV_OPENROUTER_MODEL,
};
use interview_analyzer_core::media::MediaFile;
use interview_analyzer_core::pipeline::Pipeline;
use interview_analyzer_core::report::AnalysisReport;
use interview_analyzer_core::transcribe::SimulatedTranscriptionSource;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "interview-analyzer")]
#[command(about = "Interview performance analysis (transcribe -> AI scoring -> report)")]
struct Args {
    /// Recorded interview file (mp3, wav, m4a, mp4, mov, ...)
    file: PathBuf,

    /// OpenRouter API key; falls back to OPENROUTER_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    #[arg(long, env = ENV_OPENROUTER_MODEL, default_value = DEFAULT_MODEL)]
    model: String,

    /// Timeout for the external analysis call; on expiry the heuristic
    /// analyzer produces the report instead
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Pin the simulated transcription's random source
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as a single JSON line instead of pretty-printed
    #[arg(long)]
    compact: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    // Credential check is fatal and happens before any network call.
    let api_key = require_api_key(args.api_key.clone(), &env)?;
    let model = ModelId::new(args.model.clone())?;

    let config = EngineConfig::new(api_key)
        .with_model(model)
        .with_timeout(Duration::from_secs(args.timeout_secs));

    let file = media_file_from_path(&args.file)?;

    tracing::info!(
        file = %file.name,
        size_bytes = file.size_bytes,
        timeout_secs = args.timeout_secs,
        "starting analysis"
    );

    let report = run_analysis(args.seed, config, file).await?;
    print_report(&report, args.compact)?;

    Ok(())
}

async fn run_analysis(
    seed: Option<u64>,
    config: EngineConfig,
    file: MediaFile,
) -> anyhow::Result<AnalysisReport> {
    let transcription = match seed {
        Some(seed) => SimulatedTranscriptionSource::with_seed(seed),
        None => SimulatedTranscriptionSource::new(),
    };
    let analyzer = FallbackAnalyzer::new(OpenRouterAnalyzer::new(config));
    let pipeline = Pipeline::new(transcription, analyzer);

    let progress = |percent: u8, stage: &str| {
        tracing::info!(percent, stage, "pipeline progress");
    };

    let report = pipeline.run(file, &progress).await?;
    Ok(report)
}

fn media_file_from_path(path: &PathBuf) -> anyhow::Result<MediaFile> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot read file: {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", path.display()))?;
    Ok(MediaFile::new(name, metadata.len(), None))
}

fn print_report(report: &AnalysisReport, compact: bool) -> anyhow::Result<()> {
    let out = if compact {
        serde_json::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    println!("{out}");
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
