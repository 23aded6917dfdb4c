mod file_config;

pub use file_config::{FileConfig, LexiconPathsConfig};

use crate::analysis::Lexicons;
use crate::profile::WeightTable;
use crate::scoring::RetryPolicy;
use crate::transcript::SampleStrategy;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub transcript_path: PathBuf,
    pub target_speaker: String,
    pub out_dir: PathBuf,
    pub language: String,
    pub type_mapping: bool,
    pub sample_size: usize,
    pub sample_seed: u64,
    pub retry_limit: u32,
    pub concurrency_limit: usize,
    pub request_timeout_sec: u64,
    pub offline: bool,
    pub hf_token: Option<String>,
    pub perspective_api_key: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            transcript_path: PathBuf::new(),
            target_speaker: String::new(),
            out_dir: PathBuf::from("out_report"),
            language: "ko".to_string(),
            type_mapping: true,
            sample_size: 200,
            sample_seed: 42,
            retry_limit: 3,
            concurrency_limit: 4,
            request_timeout_sec: 30,
            offline: false,
            hf_token: None,
            perspective_api_key: None,
        }
    }
}

/// Fully resolved configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub transcript_path: PathBuf,
    pub target_speaker: String,
    pub out_dir: PathBuf,
    pub language: String,
    pub type_mapping: bool,

    pub sample_strategy: SampleStrategy,
    pub sample_seed: u64,

    pub retry: RetryPolicy,
    pub concurrency_limit: usize,
    pub request_timeout_sec: u64,

    pub offline: bool,
    pub hf_token: Option<String>,
    pub sentiment_endpoint: Option<String>,
    pub perspective_api_key: Option<String>,
    pub toxicity_endpoint: Option<String>,

    pub lexicons: Lexicons,
    pub trait_weights: WeightTable,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        if !cli.transcript_path.exists() {
            bail!("Transcript file does not exist: {:?}", cli.transcript_path);
        }
        if !cli.transcript_path.is_file() {
            bail!("Transcript path is not a file: {:?}", cli.transcript_path);
        }

        let target_speaker = file
            .target_speaker
            .clone()
            .unwrap_or_else(|| cli.target_speaker.clone());
        if target_speaker.trim().is_empty() {
            bail!("Target speaker must not be empty (--speaker or target_speaker in config)");
        }

        let out_dir = file
            .out_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.out_dir.clone());

        // A percentage in the config file wins over any fixed count.
        let sample_strategy = match file.sample_percentage {
            Some(ratio) => {
                if !(0.0..=1.0).contains(&ratio) {
                    bail!("sample_percentage must be between 0.0 and 1.0, got {}", ratio);
                }
                SampleStrategy::Percentage { ratio }
            }
            None => SampleStrategy::FixedCount {
                count: file.sample_size.unwrap_or(cli.sample_size),
            },
        };

        let retry_defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: file.retry_limit.unwrap_or(cli.retry_limit),
            initial_backoff_ms: file
                .initial_backoff_ms
                .unwrap_or(retry_defaults.initial_backoff_ms),
            max_backoff_ms: file.max_backoff_ms.unwrap_or(retry_defaults.max_backoff_ms),
            backoff_multiplier: file
                .backoff_multiplier
                .unwrap_or(retry_defaults.backoff_multiplier),
        };

        let hf_token = file.hf_token.clone().or_else(|| cli.hf_token.clone());
        if !cli.offline && hf_token.is_none() {
            bail!(
                "No Hugging Face token configured; pass --hf-token, set HF_TOKEN, \
                 or run with --offline"
            );
        }

        let lexicon_paths = file.lexicons.clone().unwrap_or_default();
        let lexicons = Lexicons::with_overrides(
            lexicon_paths.self_reference.as_deref().map(Path::new),
            lexicon_paths.hedges.as_deref().map(Path::new),
            lexicon_paths.certainty.as_deref().map(Path::new),
        )?;

        Ok(Self {
            transcript_path: cli.transcript_path.clone(),
            target_speaker,
            out_dir,
            language: file.language.clone().unwrap_or_else(|| cli.language.clone()),
            type_mapping: file.type_mapping.unwrap_or(cli.type_mapping),
            sample_strategy,
            sample_seed: file.sample_seed.unwrap_or(cli.sample_seed),
            retry,
            concurrency_limit: file
                .concurrency_limit
                .unwrap_or(cli.concurrency_limit)
                .max(1),
            request_timeout_sec: file.request_timeout_sec.unwrap_or(cli.request_timeout_sec),
            offline: cli.offline,
            hf_token,
            sentiment_endpoint: file.sentiment_endpoint,
            perspective_api_key: file
                .perspective_api_key
                .or_else(|| cli.perspective_api_key.clone()),
            toxicity_endpoint: file.toxicity_endpoint,
            lexicons,
            trait_weights: file.trait_weights.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Feature;
    use std::io::Write;

    fn make_transcript_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[민수] [오후 2:01] 안녕").unwrap();
        file
    }

    fn make_cli(transcript: &tempfile::NamedTempFile) -> CliConfig {
        CliConfig {
            transcript_path: transcript.path().to_path_buf(),
            target_speaker: "민수".to_string(),
            hf_token: Some("hf_test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_cli_only() {
        let transcript = make_transcript_file();
        let cli = make_cli(&transcript);

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.target_speaker, "민수");
        assert_eq!(config.out_dir, PathBuf::from("out_report"));
        assert_eq!(
            config.sample_strategy,
            SampleStrategy::FixedCount { count: 200 }
        );
        assert_eq!(config.sample_seed, 42);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.concurrency_limit, 4);
        assert!(!config.offline);
        assert_eq!(config.trait_weights, WeightTable::default());
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let transcript = make_transcript_file();
        let cli = make_cli(&transcript);

        let file_config = FileConfig {
            target_speaker: Some("지영".to_string()),
            out_dir: Some("/toml/reports".to_string()),
            sample_size: Some(50),
            sample_seed: Some(7),
            retry_limit: Some(5),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        assert_eq!(config.target_speaker, "지영");
        assert_eq!(config.out_dir, PathBuf::from("/toml/reports"));
        assert_eq!(
            config.sample_strategy,
            SampleStrategy::FixedCount { count: 50 }
        );
        assert_eq!(config.sample_seed, 7);
        assert_eq!(config.retry.max_attempts, 5);
        // CLI value used when TOML doesn't specify
        assert_eq!(config.concurrency_limit, 4);
    }

    #[test]
    fn test_resolve_missing_transcript_error() {
        let cli = CliConfig {
            transcript_path: PathBuf::from("/nonexistent/chat.txt"),
            target_speaker: "민수".to_string(),
            hf_token: Some("hf_test".to_string()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_empty_speaker_error() {
        let transcript = make_transcript_file();
        let cli = CliConfig {
            transcript_path: transcript.path().to_path_buf(),
            target_speaker: "  ".to_string(),
            hf_token: Some("hf_test".to_string()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must not be empty"));
    }

    #[test]
    fn test_resolve_online_requires_token() {
        let transcript = make_transcript_file();
        let cli = CliConfig {
            transcript_path: transcript.path().to_path_buf(),
            target_speaker: "민수".to_string(),
            hf_token: None,
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("--offline"));
    }

    #[test]
    fn test_resolve_offline_needs_no_token() {
        let transcript = make_transcript_file();
        let cli = CliConfig {
            transcript_path: transcript.path().to_path_buf(),
            target_speaker: "민수".to_string(),
            offline: true,
            hf_token: None,
            ..Default::default()
        };
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert!(config.offline);
        assert!(config.hf_token.is_none());
    }

    #[test]
    fn test_sample_percentage_takes_precedence() {
        let transcript = make_transcript_file();
        let cli = make_cli(&transcript);
        let file_config = FileConfig {
            sample_size: Some(50),
            sample_percentage: Some(0.25),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();
        assert_eq!(
            config.sample_strategy,
            SampleStrategy::Percentage { ratio: 0.25 }
        );
    }

    #[test]
    fn test_sample_percentage_out_of_range() {
        let transcript = make_transcript_file();
        let cli = make_cli(&transcript);
        let file_config = FileConfig {
            sample_percentage: Some(1.5),
            ..Default::default()
        };

        assert!(AppConfig::resolve(&cli, Some(file_config)).is_err());
    }

    #[test]
    fn test_trait_weights_from_file() {
        let transcript = make_transcript_file();
        let cli = make_cli(&transcript);

        let file_config: FileConfig = toml::from_str(
            r#"
            [trait_weights.openness]
            baseline = 5.0
            [trait_weights.openness.weights]
            lexical_diversity = 95.0
            "#,
        )
        .unwrap();

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();
        assert_eq!(config.trait_weights.openness.baseline, 5.0);
        assert_eq!(
            config
                .trait_weights
                .openness
                .weights
                .get(&Feature::LexicalDiversity),
            Some(&95.0)
        );
    }

    #[test]
    fn test_concurrency_limit_floor() {
        let transcript = make_transcript_file();
        let cli = make_cli(&transcript);
        let file_config = FileConfig {
            concurrency_limit: Some(0),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();
        assert_eq!(config.concurrency_limit, 1);
    }
}
