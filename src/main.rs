// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use transqa::app_config::{self, Config};
use transqa::{
    BatchDetector, DetectedError, DetectionContext, Domain, ErrorDetector, QualityReport, TranslationPair,
    ValidationEngine,
};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect translation errors in one pair or a batch of pairs
    Detect(DetectArgs),

    /// Compare detected errors with annotated ground truth
    Validate(ValidateArgs),

    /// Generate shell completions for transqa
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct DetectArgs {
    /// Source text
    #[arg(long, conflicts_with = "input")]
    source: Option<String>,

    /// Target (translated) text
    #[arg(long, requires = "source")]
    target: Option<String>,

    /// JSON file with an array of {source, target} pairs
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Domain of the text
    #[arg(short, long, default_value = "general")]
    domain: Domain,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Minimum confidence of reported errors (0-100)
    #[arg(long)]
    threshold: Option<f64>,

    /// Skip semantic analysis
    #[arg(long)]
    no_semantic: bool,

    /// Skip contextual analysis
    #[arg(long)]
    no_contextual: bool,

    /// Include an MQM quality report
    #[arg(short, long)]
    report: bool,

    /// Write JSON output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// JSON file with detected errors
    #[arg(long, value_name = "FILE")]
    detected: PathBuf,

    /// JSON file with ground-truth errors
    #[arg(long, value_name = "FILE")]
    ground_truth: PathBuf,

    /// Write JSON output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// transqa - Translation Quality Assurance
///
/// Detects translation-quality errors in bilingual text pairs and classifies
/// them into the MQM taxonomy.
#[derive(Parser, Debug)]
#[command(name = "transqa")]
#[command(version)]
#[command(about = "Translation quality error detection")]
#[command(long_about = "transqa flags translation-quality issues in source/target text pairs, \
classifies them into the MQM taxonomy and validates detections against ground truth.

EXAMPLES:
    transqa detect --source 'Uses AES encryption.' --target 'Usa cifrado.' -d technical
    transqa detect -i pairs.json -s en -t de --report
    transqa validate --detected detected.json --ground-truth annotated.json
    transqa completions bash > transqa.bash

CONFIGURATION:
    Configuration is read from transqa.json by default. You can specify a
    different file with --config. Missing files fall back to built-in defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "transqa.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept every level here; the effective level is set below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "transqa", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(level_filter(config.log_level));

    match cli.command {
        Commands::Detect(args) => run_detect(args, config).await,
        Commands::Validate(args) => run_validate(args, config),
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::from_file(config_path)
    } else {
        warn!("Config file not found at '{}', using defaults.", config_path);
        Ok(Config::default())
    }
}

#[derive(Serialize)]
struct DetectOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    errors: Vec<DetectedError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<QualityReport>,
}

async fn run_detect(args: DetectArgs, config: Config) -> Result<()> {
    let threshold = args
        .threshold
        .unwrap_or(config.detection.default_quality_threshold);

    let mut context = DetectionContext::new(args.domain)
        .with_quality_threshold(threshold)
        .with_semantic_analysis(!args.no_semantic)
        .with_contextual_analysis(!args.no_contextual);
    context.source_language = args.source_language.clone();
    context.target_language = args.target_language.clone();
    context.validate().context("Invalid detection settings")?;

    let detector = Arc::new(ErrorDetector::builder().with_config(config).build()?);

    let pairs = match (&args.input, &args.source, &args.target) {
        (Some(path), _, _) => read_json::<Vec<TranslationPair>>(path)?,
        (None, Some(source), Some(target)) => vec![TranslationPair::new(source, target)],
        _ => return Err(anyhow!("Either --input or both --source and --target are required")),
    };

    info!("Analysing {} pair(s) in the {} domain", pairs.len(), context.domain);

    let word_counts: Vec<usize> = pairs
        .iter()
        .map(|pair| detector.features(&pair.source, context.source_language_hint()).tokens.len())
        .collect();

    let results = BatchDetector::new(detector.clone())
        .detect_batch_with_progress(pairs, &context, |done, total| {
            log::debug!("Progress: {}/{}", done, total);
        })
        .await?;

    let output: Vec<DetectOutput> = results
        .into_iter()
        .zip(word_counts)
        .map(|(result, words)| DetectOutput {
            report: args
                .report
                .then(|| QualityReport::from_errors(&result.errors, words)),
            id: result.id,
            errors: result.errors,
        })
        .collect();

    if let Some(report) = output.iter().find_map(|o| o.report.as_ref()) {
        info!("{}", report.summary());
    }

    if output.len() == 1 && args.input.is_none() {
        write_json(&output[0], args.output.as_deref())
    } else {
        write_json(&output, args.output.as_deref())
    }
}

fn run_validate(args: ValidateArgs, config: Config) -> Result<()> {
    let detected: Vec<DetectedError> = read_json(&args.detected)?;
    let ground_truth: Vec<DetectedError> = read_json(&args.ground_truth)?;

    let result = ValidationEngine::new(config.validation).validate(&detected, &ground_truth);
    info!(
        "Precision {:.2}, recall {:.2}, F1 {:.2}",
        result.precision, result.recall, result.f1_score
    );

    write_json(&result, args.output.as_deref())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
