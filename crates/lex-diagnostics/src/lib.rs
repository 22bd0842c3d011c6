//! Data Quality Diagnostics Library
//!
//! Read-only diagnostics for tabular data, built with Rust and Polars.
//!
//! # Overview
//!
//! Given a table (typically loaded from CSV), this library computes:
//!
//! - **Structural Summary**: shape, column kinds and descriptive statistics
//! - **Missing Values**: per-column and global missing-cell counts
//! - **Duplicates**: repeated full rows and repeated identifier values
//! - **Outliers**: Tukey IQR fences, per-cell outlier masks and a column ranking
//! - **Correlation**: pairwise-complete Pearson and Spearman matrices
//! - **Progress Reporting**: one update per analyzer
//!
//! The input table is never modified. Degenerate data (empty tables, constant
//! columns, absent key columns) never fails a run; undefined statistics are
//! `None` and the conditions are listed as [`DiagnosticNotice`]s.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_diagnostics::{load_csv, DiagnosticsConfig, DiagnosticsRunner, TextReporter};
//!
//! let table = load_csv("student_lifestyle.csv")?;
//!
//! let config = DiagnosticsConfig::builder()
//!     .key_column("Student_ID")
//!     .build()?;
//!
//! let report = DiagnosticsRunner::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run(&table);
//!
//! TextReporter::default().write(&report, &mut std::io::stdout())?;
//! ```
//!
//! # Using the analyzers directly
//!
//! Every analyzer is a plain function of the table:
//!
//! ```rust,ignore
//! use lex_diagnostics::{CorrelationEngine, CorrelationMethod, OutlierDetector};
//!
//! let outliers = OutlierDetector::new(3.0).detect(&table);
//! let spearman = CorrelationEngine::compute(&table, CorrelationMethod::Spearman);
//! ```

pub mod config;
pub mod correlation;
pub mod error;
pub mod pipeline;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, DiagnosticsConfig, DiagnosticsConfigBuilder};
pub use correlation::CorrelationEngine;
pub use error::{DiagnosticsError, Result as DiagnosticsResult, ResultExt};
pub use pipeline::{
    ClosureProgressReporter, DiagnosticStage, DiagnosticsRunner, DiagnosticsRunnerBuilder,
    ProgressReporter, ProgressUpdate,
};
pub use profiler::{MissingValueProfiler, StructuralSummarizer};
pub use quality::{DuplicateDetector, OutlierDetector};
pub use reporting::{ReportGenerator, SavedReport, TextReporter};
pub use table::{Column, ColumnData, Table, load_csv};
pub use types::{
    CategoricalStatistics, ColumnKind, ColumnMissing, ColumnOutliers, ColumnStatistics,
    ColumnSummary, CorrelationAnalysis, CorrelationMatrix, CorrelationMethod, DiagnosticNotice,
    DiagnosticsReport, DuplicateReport, Fence, MissingReport, MissingTotals, NumericStatistics,
    OutlierAnalysis, OutlierReport, RankedColumn, StructuralSummary,
};
