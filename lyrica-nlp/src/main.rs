//! lyrica - comparative text analysis driver
//!
//! Loads stopwords once, ingests every `--doc` in parallel, and writes the
//! rendering data (Sankey links, word-cloud panels, sentiment bars) as JSON.
//!
//! ```text
//! lyrica analyze --stopwords stopwords.txt \
//!     --doc "table:Taylor Swift=TaylorSwift.csv" \
//!     --doc "text:Notes=notes.txt" \
//!     --output report.json
//! lyrica init-config
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use lyrica_common::config::{default_config_path, write_toml_config};
use lyrica_common::{ConfigResolver, LoggingConfig, TomlConfig};
use lyrica_nlp::ingest::{FailurePolicy, IngestJob, ParallelIngestor};
use lyrica_nlp::lexicon::LexiconScorer;
use lyrica_nlp::parsers::{PlainTextParser, TabularParser};
use lyrica_nlp::render::{AnalysisReport, ReportOptions};
use lyrica_nlp::{CorpusRegistry, DocumentSource, Parser, StopwordSet};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for lyrica
#[derive(ClapParser, Debug)]
#[command(name = "lyrica")]
#[command(about = "Comparative text analysis across labeled documents")]
#[command(version)]
struct Args {
    /// Config file (defaults to LYRICA_CONFIG, then the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest documents and export rendering data
    Analyze(AnalyzeArgs),
    /// Write a config file holding the compiled defaults
    InitConfig(InitConfigArgs),
}

#[derive(clap::Args, Debug)]
struct InitConfigArgs {
    /// Target file (defaults to --config, then the platform config dir)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Stopword file (overrides LYRICA_STOPWORDS and the config file)
    #[arg(short, long)]
    stopwords: Option<PathBuf>,

    /// Document as [text:|table:][LABEL=]PATH, repeatable, order preserved.
    /// A LABEL cannot contain a path separator, so `dir/a=b.txt` is a path.
    #[arg(short, long = "doc", value_parser = parse_doc_spec, required = true)]
    docs: Vec<DocSpec>,

    /// Text column read from tabular documents
    #[arg(long)]
    text_column: Option<String>,

    /// Words kept per label for link data
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Word-cloud grid rows
    #[arg(long)]
    grid_rows: Option<usize>,

    /// Word-cloud grid columns
    #[arg(long)]
    grid_cols: Option<usize>,

    /// Continue past failing documents instead of aborting the batch
    #[arg(long)]
    keep_going: bool,

    /// Per-document parse deadline in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// JSON report path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocKind {
    Text,
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DocSpec {
    kind: DocKind,
    label: Option<String>,
    path: PathBuf,
}

fn parse_doc_spec(raw: &str) -> Result<DocSpec, String> {
    let (kind, rest) = if let Some(rest) = raw.strip_prefix("table:") {
        (DocKind::Table, rest)
    } else if let Some(rest) = raw.strip_prefix("text:") {
        (DocKind::Text, rest)
    } else {
        (DocKind::Text, raw)
    };

    // Only an '=' before any path separator introduces a label
    let (label, path) = match rest.split_once('=') {
        Some((label, path)) if !label.contains(['/', '\\']) => {
            (Some(label.trim().to_string()), path)
        }
        _ => (None, rest),
    };

    if path.trim().is_empty() {
        return Err(format!("missing path in document spec '{}'", raw));
    }
    if label.as_deref() == Some("") {
        return Err(format!("empty label in document spec '{}'", raw));
    }

    Ok(DocSpec {
        kind,
        label,
        path: PathBuf::from(path.trim()),
    })
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.as_str().into());

    let file_layer = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = match &args.config {
        Some(path) => ConfigResolver::with_path(path),
        None => ConfigResolver::new(),
    };

    match args.command {
        Command::Analyze(analyze) => {
            // Logging settings live in the config, so its origin is logged
            // once the subscriber exists
            let (config, origin) = resolver
                .resolve()
                .context("Failed to load configuration")?;

            init_tracing(&config.logging)?;
            info!("Starting lyrica v{}", env!("CARGO_PKG_VERSION"));
            origin.log();

            run_analyze(&resolver, &config, analyze).await
        }
        Command::InitConfig(init) => {
            init_tracing(&LoggingConfig::default())?;

            let target = match init.path.or(args.config) {
                Some(path) => path,
                None => default_config_path()
                    .context("No platform config directory, pass --path")?,
            };
            run_init_config(&target, init.force)
        }
    }
}

fn run_init_config(target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            target.display()
        );
    }

    write_toml_config(&TomlConfig::default(), target)
        .with_context(|| format!("Failed to write config {}", target.display()))?;
    info!("Wrote default configuration to {}", target.display());
    Ok(())
}

async fn run_analyze(
    resolver: &ConfigResolver,
    config: &TomlConfig,
    args: AnalyzeArgs,
) -> Result<()> {
    // Stopwords are loaded once and shared by every parse
    let stopwords = match resolver.resolve_stopwords_path(args.stopwords.as_deref(), config) {
        Some(path) => StopwordSet::load(&path).context("Failed to load stopwords")?,
        None => {
            warn!("No stopword source configured, nothing will be filtered");
            StopwordSet::empty()
        }
    };
    info!(count = stopwords.len(), "Stopwords ready");

    let text_column = args
        .text_column
        .unwrap_or_else(|| config.text_column.clone());
    let plain: Arc<dyn Parser> = Arc::new(PlainTextParser);
    let tabular: Arc<dyn Parser> = Arc::new(TabularParser::new(text_column));

    let jobs: Vec<IngestJob> = args
        .docs
        .into_iter()
        .map(|doc| {
            let parser = match doc.kind {
                DocKind::Text => Arc::clone(&plain),
                DocKind::Table => Arc::clone(&tabular),
            };
            let job = IngestJob::new(DocumentSource::File(doc.path), parser);
            match doc.label {
                Some(label) => job.with_label(label),
                None => job,
            }
        })
        .collect();

    let policy = if args.keep_going {
        FailurePolicy::CollectAndContinue
    } else {
        FailurePolicy::FailFast
    };
    let mut ingestor = ParallelIngestor::new(policy);
    if let Some(ms) = args.deadline_ms {
        ingestor = ingestor.with_deadline(Duration::from_millis(ms));
    }

    let mut registry = CorpusRegistry::new(Arc::new(stopwords));
    let outcome = ingestor
        .ingest(&mut registry, jobs)
        .await
        .context("Ingestion aborted")?;
    for failure in &outcome.failures {
        warn!(source = %failure.source_id, "Skipped: {}", failure.message);
    }
    info!(labels = registry.len(), "Corpus loaded");

    let options = ReportOptions {
        top_k: args.top_k.unwrap_or(config.top_k),
        grid_rows: args.grid_rows.unwrap_or(config.grid_rows),
        grid_cols: args.grid_cols.unwrap_or(config.grid_cols),
    };
    let scorer = LexiconScorer::new();
    let report = AnalysisReport::build(&registry, &scorer, options)
        .context("Failed to build report")?;
    let json = serde_json::to_string_pretty(&report)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_spec_with_kind_and_label() {
        let spec = parse_doc_spec("table:Taylor Swift=data/TaylorSwift.csv").unwrap();
        assert_eq!(spec.kind, DocKind::Table);
        assert_eq!(spec.label.as_deref(), Some("Taylor Swift"));
        assert_eq!(spec.path, PathBuf::from("data/TaylorSwift.csv"));
    }

    #[test]
    fn test_doc_spec_defaults_to_text_without_label() {
        let spec = parse_doc_spec("notes.txt").unwrap();
        assert_eq!(spec.kind, DocKind::Text);
        assert!(spec.label.is_none());
    }

    #[test]
    fn test_doc_spec_rejects_missing_path() {
        assert!(parse_doc_spec("text:A=").is_err());
        assert!(parse_doc_spec("=a.txt").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let args = Args::try_parse_from([
            "lyrica",
            "analyze",
            "--doc",
            "a.txt",
            "--doc",
            "table:B=b.csv",
            "--keep-going",
            "-k",
            "3",
        ])
        .unwrap();
        let Command::Analyze(analyze) = args.command else {
            panic!("Expected analyze subcommand");
        };
        assert_eq!(analyze.docs.len(), 2);
        assert!(analyze.keep_going);
        assert_eq!(analyze.top_k, Some(3));
    }

    #[test]
    fn test_doc_spec_equals_inside_path_is_not_a_label() {
        let spec = parse_doc_spec("data/a=b.txt").unwrap();
        assert!(spec.label.is_none());
        assert_eq!(spec.path, PathBuf::from("data/a=b.txt"));

        let spec = parse_doc_spec("table:A=data/x=y.csv").unwrap();
        assert_eq!(spec.label.as_deref(), Some("A"));
        assert_eq!(spec.path, PathBuf::from("data/x=y.csv"));
    }

    #[test]
    fn test_init_config_subcommand_parses() {
        let args =
            Args::try_parse_from(["lyrica", "init-config", "--path", "cfg.toml", "--force"])
                .unwrap();
        let Command::InitConfig(init) = args.command else {
            panic!("Expected init-config subcommand");
        };
        assert_eq!(init.path, Some(PathBuf::from("cfg.toml")));
        assert!(init.force);
    }

    #[test]
    fn test_init_config_writes_loadable_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("lyrica").join("config.toml");

        run_init_config(&target, false).unwrap();

        let loaded = ConfigResolver::with_path(&target).load().unwrap();
        assert_eq!(loaded, TomlConfig::default());
    }

    #[test]
    fn test_init_config_refuses_overwrite_without_force() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("config.toml");
        std::fs::write(&target, "top_k = 9\n").unwrap();

        assert!(run_init_config(&target, false).is_err());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "top_k = 9\n");

        run_init_config(&target, true).unwrap();
        let loaded = ConfigResolver::with_path(&target).load().unwrap();
        assert_eq!(loaded.top_k, 5);
    }
}
