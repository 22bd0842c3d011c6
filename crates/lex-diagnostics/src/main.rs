//! CLI entry point for data quality diagnostics.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lex_diagnostics::{
    CorrelationMethod, DiagnosticsConfig, DiagnosticsReport, DiagnosticsRunner, ReportGenerator,
    SavedReport, TextReporter, load_csv,
};
use std::io::Write;
use std::path::Path;
use tracing::{error, info};

/// CLI-compatible correlation method enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliCorrelationMethod {
    /// Linear correlation on raw values
    Pearson,
    /// Rank correlation (Pearson on midranks)
    Spearman,
}

impl From<CliCorrelationMethod> for CorrelationMethod {
    fn from(cli: CliCorrelationMethod) -> Self {
        match cli {
            CliCorrelationMethod::Pearson => CorrelationMethod::Pearson,
            CliCorrelationMethod::Spearman => CorrelationMethod::Spearman,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Data Quality Diagnostics for CSV files",
    long_about = "Profiles a CSV file: structure, missing values, duplicates,\n\
                  IQR outliers and Pearson/Spearman correlations.\n\
                  The input is never modified.\n\n\
                  EXAMPLES:\n  \
                  # Full text report\n  \
                  lex-diagnostics -i students.csv\n\n  \
                  # Check an identifier column and widen the outlier fences\n  \
                  lex-diagnostics -i students.csv --key-column Student_ID --multiplier 3\n\n  \
                  # Spearman only, machine-readable\n  \
                  lex-diagnostics -i students.csv --method spearman --json | jq .outliers"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Output directory for --emit-report
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// IQR multiplier for outlier fences
    #[arg(short, long, default_value = "1.5")]
    multiplier: f64,

    /// Identifier column checked for repeated values
    #[arg(short, long)]
    key_column: Option<String>,

    /// Correlation method (repeatable; defaults to pearson and spearman)
    #[arg(long = "method", value_enum)]
    methods: Vec<CliCorrelationMethod>,

    /// Number of ranked outlier columns shown in the text report
    #[arg(long, default_value = "10")]
    top: usize,

    /// Output JSON to stdout instead of the text report
    ///
    /// Disables all progress logs; only outputs the JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_diagnostics.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the report)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;

    let table = load_csv(&args.input)?;
    info!(
        "{} numeric / {} categorical columns",
        table.numeric_column_count(),
        table.column_count() - table.numeric_column_count()
    );

    let mut builder = DiagnosticsRunner::builder().config(config);
    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }
    let report = builder.build()?.run(&table);

    handle_output(report, &args).inspect_err(|e| error!("Failed to write output: {:#}", e))
}

/// Map CLI flags onto the configuration builder.
fn build_config(args: &Args) -> Result<DiagnosticsConfig> {
    let mut config_builder = DiagnosticsConfig::builder()
        .fence_multiplier(args.multiplier)
        .top_outlier_columns(args.top);

    if !args.methods.is_empty() {
        config_builder = config_builder
            .correlation_methods(args.methods.iter().map(|&m| CorrelationMethod::from(m)));
    }

    if let Some(ref key) = args.key_column {
        config_builder = config_builder.key_column(key);
    }

    Ok(config_builder.build()?)
}

/// Handle output based on CLI flags.
///
/// Output behavior:
/// - Default: Print the text report to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Also write the JSON report to a file
fn handle_output(report: DiagnosticsReport, args: &Args) -> Result<()> {
    let top = report.config.top_outlier_columns;

    let report = if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let generator = ReportGenerator::new(&args.output);
        let saved = SavedReport::new(&args.input, report);
        let report_path = generator.write_report_to_file(&saved, &input_stem)?;
        info!("Report written to: {}", report_path.display());
        saved.diagnostics
    } else {
        report
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    TextReporter::new(top)
        .write(&report, &mut out)
        .context("Failed to write text report")?;
    writeln!(out)?;
    writeln!(out, "Use --json for machine-readable output")?;
    if !args.emit_report {
        writeln!(out, "Use --emit-report to save the JSON report")?;
    }
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
