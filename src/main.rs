use anyhow::{Context, Result};
use clap::Parser;
use echomind::config::{AppConfig, CliConfig, FileConfig};
use echomind::pipeline::{AnalysisPipeline, PipelineConfig};
use echomind::report::ReportWriter;
use echomind::scoring::{
    Classifier, HuggingFaceSentimentClient, PerspectiveToxicityClient, RemoteClassifier,
    ScorerConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[clap(version, about = "Exploratory personality profiling from chat exports")]
struct CliArgs {
    /// Path to the exported chat transcript (UTF-8 text).
    #[clap(value_parser = parse_path)]
    pub transcript: PathBuf,

    /// Display name of the speaker to profile.
    #[clap(short, long)]
    pub speaker: String,

    /// Directory the report files are written into.
    #[clap(short, long, default_value = "out_report")]
    pub out_dir: PathBuf,

    /// Optional TOML config file; its values override CLI arguments.
    #[clap(short, long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Maximum number of utterances sent to the classifiers.
    #[clap(long, default_value_t = 200)]
    pub sample_size: usize,

    /// Seed for reproducible sampling.
    #[clap(long, default_value_t = 42)]
    pub sample_seed: u64,

    /// Attempts per classifier call before that score degrades to unavailable.
    #[clap(long, default_value_t = 3)]
    pub retry_limit: u32,

    /// Maximum classifier calls in flight at once.
    #[clap(long, default_value_t = 4)]
    pub concurrency_limit: usize,

    /// Language hint forwarded to the toxicity backend.
    #[clap(long, default_value = "ko")]
    pub language: String,

    /// Timeout in seconds per classifier request.
    #[clap(long, default_value_t = 30)]
    pub request_timeout_sec: u64,

    /// Skip external scoring entirely; profile from style metrics alone.
    #[clap(long)]
    pub offline: bool,

    /// Do not derive the MBTI-style type label.
    #[clap(long)]
    pub no_type_mapping: bool,

    /// Hugging Face Inference API token. Falls back to the HF_TOKEN env var.
    #[clap(long)]
    pub hf_token: Option<String>,

    /// Google Perspective API key. Falls back to PERSPECTIVE_API_KEY.
    #[clap(long)]
    pub perspective_key: Option<String>,
}

fn build_classifier(config: &AppConfig) -> Result<Option<Arc<dyn Classifier>>> {
    if config.offline {
        return Ok(None);
    }

    let token = config
        .hf_token
        .clone()
        .context("Hugging Face token missing after config resolution")?;
    let sentiment = HuggingFaceSentimentClient::new(
        token,
        config.sentiment_endpoint.clone(),
        config.request_timeout_sec,
    )?;

    let toxicity = match &config.perspective_api_key {
        Some(key) => Some(PerspectiveToxicityClient::new(
            key.clone(),
            config.language.clone(),
            config.toxicity_endpoint.clone(),
            config.request_timeout_sec,
        )?),
        None => {
            warn!("No Perspective API key configured; toxicity scores will be unavailable");
            None
        }
    };

    Ok(Some(Arc::new(RemoteClassifier::new(sentiment, toxicity))))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    info!(
        "echomind {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };

    let cli_config = CliConfig {
        transcript_path: cli_args.transcript.clone(),
        target_speaker: cli_args.speaker.clone(),
        out_dir: cli_args.out_dir.clone(),
        language: cli_args.language.clone(),
        type_mapping: !cli_args.no_type_mapping,
        sample_size: cli_args.sample_size,
        sample_seed: cli_args.sample_seed,
        retry_limit: cli_args.retry_limit,
        concurrency_limit: cli_args.concurrency_limit,
        request_timeout_sec: cli_args.request_timeout_sec,
        offline: cli_args.offline,
        hf_token: cli_args
            .hf_token
            .clone()
            .or_else(|| std::env::var("HF_TOKEN").ok()),
        perspective_api_key: cli_args
            .perspective_key
            .clone()
            .or_else(|| std::env::var("PERSPECTIVE_API_KEY").ok()),
    };

    let config = AppConfig::resolve(&cli_config, file_config)?;

    let transcript = std::fs::read_to_string(&config.transcript_path)
        .with_context(|| format!("Failed to read transcript {:?}", config.transcript_path))?;

    let classifier = build_classifier(&config)?;
    let toxicity_enabled = !config.offline && config.perspective_api_key.is_some();

    let pipeline_config = PipelineConfig {
        target_speaker: config.target_speaker.clone(),
        sample_strategy: config.sample_strategy,
        sample_seed: config.sample_seed,
        scorer: ScorerConfig {
            concurrency_limit: config.concurrency_limit,
            retry: config.retry.clone(),
            toxicity_enabled,
        },
        lexicons: config.lexicons.clone(),
        trait_weights: config.trait_weights.clone(),
        type_mapping: config.type_mapping,
    };

    let pipeline = AnalysisPipeline::new(pipeline_config, classifier);

    let progress = ProgressBar::hidden();
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );
    progress.set_message("Scoring");

    let report = pipeline
        .analyze_with_progress(&transcript, |done, total| {
            if progress.is_hidden() && total > 0 {
                progress.set_length(total as u64);
                progress.set_draw_target(indicatif::ProgressDrawTarget::stderr());
            }
            progress.set_position(done as u64);
        })
        .await?;
    progress.finish_and_clear();

    let writer = ReportWriter::new(&config.out_dir);
    writer.write_all(&report)?;

    info!("Profile for '{}':", report.target_speaker);
    for (name, score) in report.profile.iter() {
        info!("  {:<18} {:>5.1}", name, score.value);
    }
    if let Some(mapping) = &report.type_mapping {
        info!("  type (heuristic)   {}", mapping.label);
    }
    if report.profile.low_confidence {
        warn!("Low confidence: only {:.0}% of utterances were scored", report.style.scored_fraction * 100.0);
    }
    info!(
        "Report written to {:?} (summary.md / report.json / utterances.csv)",
        writer.out_dir()
    );

    Ok(())
}
