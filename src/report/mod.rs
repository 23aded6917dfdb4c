//! Report rendering: Markdown summary, JSON record, per-utterance CSV.

use crate::pipeline::AnalysisReport;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const SUMMARY_FILE: &str = "summary.md";
const JSON_FILE: &str = "report.json";
const CSV_FILE: &str = "utterances.csv";

/// Writes the three report files into one output directory.
pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write summary.md, report.json and utterances.csv.
    pub fn write_all(&self, report: &AnalysisReport) -> Result<()> {
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.out_dir))?;

        self.write_json(report)?;
        self.write_csv(report)?;
        self.write_markdown(report)?;
        Ok(())
    }

    fn write_json(&self, report: &AnalysisReport) -> Result<()> {
        let path = self.out_dir.join(JSON_FILE);
        let json =
            serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))
    }

    fn write_csv(&self, report: &AnalysisReport) -> Result<()> {
        let path = self.out_dir.join(CSV_FILE);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create {:?}", path))?;

        let by_index: std::collections::HashMap<usize, &crate::scoring::UtteranceScore> = report
            .scores
            .iter()
            .map(|s| (s.utterance_index, s))
            .collect();

        writer.write_record(["index", "text", "sentiment", "confidence", "toxicity"])?;
        for utterance in &report.utterances {
            let score = by_index.get(&utterance.index);
            let (sentiment, confidence) = match score.and_then(|s| s.sentiment) {
                Some(s) => (s.label.as_str().to_string(), format!("{:.3}", s.confidence)),
                None => ("unavailable".to_string(), String::new()),
            };
            let toxicity = score
                .and_then(|s| s.toxicity)
                .map(|t| format!("{:.3}", t))
                .unwrap_or_default();
            writer.write_record([
                utterance.index.to_string(),
                utterance.text.clone(),
                sentiment,
                confidence,
                toxicity,
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_markdown(&self, report: &AnalysisReport) -> Result<()> {
        let path = self.out_dir.join(SUMMARY_FILE);
        std::fs::write(&path, render_markdown(report))
            .with_context(|| format!("Failed to write {:?}", path))
    }
}

fn render_markdown(report: &AnalysisReport) -> String {
    let mut md = String::new();
    let style = &report.style;

    let _ = writeln!(md, "# Personality report (exploratory)\n");
    let _ = writeln!(md, "Speaker: **{}**\n", report.target_speaker);

    let _ = writeln!(md, "## Key metrics\n");
    let _ = writeln!(
        md,
        "- Utterances: {} analyzed of {} by this speaker ({} in transcript)",
        style.utterance_count, report.selected_count, report.parsed_count
    );
    let _ = writeln!(
        md,
        "- Sentiment (pos / neu / neg): {:.2} / {:.2} / {:.2}",
        style.sentiment.positive_ratio,
        style.sentiment.neutral_ratio,
        style.sentiment.negative_ratio
    );
    let _ = writeln!(md, "- Average toxicity: {:.3}", style.avg_toxicity);
    let _ = writeln!(
        md,
        "- Lexical diversity (TTR): {}",
        style
            .type_token_ratio
            .map(|v| format!("{:.3}", v))
            .unwrap_or_else(|| "n/a".to_string())
    );
    let _ = writeln!(
        md,
        "- Average utterance length: {:.1} tokens",
        style.avg_tokens_per_utterance
    );
    let _ = writeln!(
        md,
        "- Question rate: {:.0}% of sentences",
        style.sentence_endings.interrogative_ratio() * 100.0
    );
    if style.scored_fraction < 1.0 {
        let _ = writeln!(
            md,
            "- **Scored fraction: {:.0}%** — sentiment/toxicity partially unavailable",
            style.scored_fraction * 100.0
        );
    }

    let _ = writeln!(md, "\n## Big Five (exploratory, 0-100)\n");
    for (name, score) in report.profile.iter() {
        let _ = writeln!(md, "### {} — {:.1}\n", capitalize(name), score.value);
        let _ = writeln!(md, "| feature | value | weight | points |");
        let _ = writeln!(md, "|---|---|---|---|");
        let _ = writeln!(md, "| baseline | | | {:+.1} |", score.baseline);
        for c in &score.contributions {
            let _ = writeln!(
                md,
                "| {} | {:.2} | {:+.0} | {:+.1} |",
                c.feature.as_str(),
                c.value,
                c.weight,
                c.points
            );
        }
        let _ = writeln!(md);
    }

    if let Some(mapping) = &report.type_mapping {
        let _ = writeln!(md, "## Type mapping (heuristic): {}\n", mapping.label);
        for r in &mapping.rationale {
            let _ = writeln!(md, "- **{}** → {}: {}", r.dimension, r.letter, r.explanation);
        }
        let _ = writeln!(md);
    }

    let _ = writeln!(
        md,
        "> Text-based exploratory estimate, not a psychological assessment."
    );
    if report.profile.low_confidence {
        let _ = writeln!(
            md,
            ">\n> Confidence is reduced: most utterances could not be scored."
        );
    }
    md
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
