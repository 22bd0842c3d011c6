//! Orchestrates the five analyzers over one table.

use crate::config::{ConfigValidationError, DiagnosticsConfig};
use crate::correlation::CorrelationEngine;
use crate::pipeline::progress::{
    ClosureProgressReporter, DiagnosticStage, ProgressReporter, ProgressUpdate,
};
use crate::profiler::{MissingValueProfiler, StructuralSummarizer};
use crate::quality::{DuplicateDetector, OutlierDetector};
use crate::table::Table;
use crate::types::{DiagnosticNotice, DiagnosticsReport};
use std::sync::Arc;
use tracing::{info, info_span, warn};

/// Runs every diagnostic over a table and assembles the report.
///
/// Use [`DiagnosticsRunner::builder()`] to attach a progress reporter.
///
/// # Example
///
/// ```rust,ignore
/// use lex_diagnostics::{load_csv, DiagnosticsConfig, DiagnosticsRunner};
///
/// let table = load_csv("students.csv")?;
/// let config = DiagnosticsConfig::builder().key_column("Student_ID").build()?;
///
/// let report = DiagnosticsRunner::new(config)?.run(&table);
/// println!("{} duplicate rows", report.duplicates.full_row_duplicate_count);
/// ```
pub struct DiagnosticsRunner {
    config: DiagnosticsConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(DiagnosticsRunner: Send, Sync);

impl DiagnosticsRunner {
    /// Create a runner without progress reporting.
    pub fn new(config: DiagnosticsConfig) -> Result<Self, ConfigValidationError> {
        Self::builder().config(config).build()
    }

    /// Create a new runner builder.
    pub fn builder() -> DiagnosticsRunnerBuilder {
        DiagnosticsRunnerBuilder::default()
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Run all diagnostics.
    ///
    /// The table is only read. Running twice over the same table yields equal
    /// reports.
    pub fn run(&self, table: &Table) -> DiagnosticsReport {
        let span = info_span!(
            "diagnostics",
            rows = table.row_count(),
            columns = table.column_count()
        );
        let _guard = span.enter();

        info!("Starting diagnostics...");
        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Initializing,
            0.0,
            "Starting diagnostics...",
        ));
        let mut notices = Vec::new();
        if table.is_empty() {
            warn!("Table has no rows or no columns");
            notices.push(DiagnosticNotice::EmptyInput);
        }

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::StructuralSummary,
            0.0,
            "Summarizing structure...",
        ));
        let structure = StructuralSummarizer::summarize(table);

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::MissingValues,
            0.0,
            "Counting missing values...",
        ));
        let missing = MissingValueProfiler::profile(table);

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Duplicates,
            0.0,
            "Detecting duplicates...",
        ));
        let key_column = self.config.key_column.as_deref();
        let duplicates = DuplicateDetector::detect(table, key_column);
        if let (Some(key), None) = (key_column, duplicates.key_duplicate_count) {
            notices.push(DiagnosticNotice::MissingKeyColumn {
                column: key.to_string(),
            });
        }

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Outliers,
            0.0,
            format!(
                "Detecting outliers (IQR x {})...",
                self.config.fence_multiplier
            ),
        ));
        let outliers = OutlierDetector::new(self.config.fence_multiplier).detect(table);
        if table.numeric_column_count() == 0 {
            notices.push(DiagnosticNotice::NoNumericColumns);
        }

        self.report_progress(ProgressUpdate::new(
            DiagnosticStage::Correlation,
            0.0,
            "Computing correlations...",
        ));
        let correlations = CorrelationEngine::compute_all(table, &self.config.correlation_methods);
        if !self.config.correlation_methods.is_empty() {
            let degenerate = CorrelationEngine::degenerate_columns(table);
            if !degenerate.is_empty() {
                warn!(
                    "Correlations undefined for zero-variance columns: {}",
                    degenerate.join(", ")
                );
                notices.push(DiagnosticNotice::DegenerateColumns {
                    columns: degenerate,
                });
            }
        }

        info!("Diagnostics complete ({} notices)", notices.len());
        self.report_progress(ProgressUpdate::complete("Diagnostics complete"));

        DiagnosticsReport {
            structure,
            missing,
            duplicates,
            outliers,
            correlations,
            notices,
            config: self.config.clone(),
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for [`DiagnosticsRunner`].
#[derive(Default)]
pub struct DiagnosticsRunnerBuilder {
    config: Option<DiagnosticsConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl DiagnosticsRunnerBuilder {
    /// Set the run configuration.
    pub fn config(mut self, config: DiagnosticsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during a run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// ```rust,ignore
    /// let runner = DiagnosticsRunner::builder()
    ///     .on_progress(|update| {
    ///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
    ///     })
    ///     .build()?;
    /// ```
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the runner.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<DiagnosticsRunner, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(DiagnosticsRunner {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use crate::types::{CorrelationMethod, OutlierAnalysis};
    use std::sync::Mutex;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::numeric("A", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)]),
            Column::numeric("B", vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0), Some(50.0)]),
            Column::numeric("flat", vec![Some(7.0); 5]),
        ])
        .unwrap()
    }

    #[test]
    fn test_builder_default() {
        let runner = DiagnosticsRunner::builder().build().unwrap();
        assert_eq!(runner.config(), &DiagnosticsConfig::default());
        assert!(runner.progress_reporter.is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = DiagnosticsConfig {
            fence_multiplier: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            DiagnosticsRunner::new(config),
            Err(ConfigValidationError::InvalidMultiplier(_))
        ));
    }

    #[test]
    fn test_progress_stages_in_order() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();

        let runner = DiagnosticsRunner::builder()
            .on_progress(move |update| {
                stages_clone.lock().unwrap().push(update.stage);
            })
            .build()
            .unwrap();
        runner.run(&sample_table());

        assert_eq!(*stages.lock().unwrap(), DiagnosticStage::ALL.to_vec());
    }

    #[test]
    fn test_run_collects_every_analysis() {
        let report = DiagnosticsRunner::new(DiagnosticsConfig::default())
            .unwrap()
            .run(&sample_table());

        assert_eq!(report.structure.row_count, 5);
        assert!(!report.missing.has_missing());
        assert_eq!(report.duplicates.full_row_duplicate_count, 0);
        assert_eq!(report.outliers.report().unwrap().outlier_cells, 1);
        assert_eq!(report.correlations.len(), 2);
        assert_eq!(
            report.notices,
            vec![DiagnosticNotice::DegenerateColumns {
                columns: vec!["flat".to_string()],
            }]
        );
    }

    #[test]
    fn test_missing_key_column_notice() {
        let config = DiagnosticsConfig::builder()
            .key_column("Student_ID")
            .build()
            .unwrap();
        let report = DiagnosticsRunner::new(config).unwrap().run(&sample_table());

        assert_eq!(report.duplicates.key_duplicate_count, None);
        assert!(report.notices.contains(&DiagnosticNotice::MissingKeyColumn {
            column: "Student_ID".to_string(),
        }));
    }

    #[test]
    fn test_no_methods_skips_correlation() {
        let config = DiagnosticsConfig::builder()
            .correlation_methods(Vec::<CorrelationMethod>::new())
            .build()
            .unwrap();
        let report = DiagnosticsRunner::new(config).unwrap().run(&sample_table());

        assert!(report.correlations.is_empty());
        assert!(report.notices.is_empty());
    }

    #[test]
    fn test_empty_table_notices() {
        let table = Table::new(Vec::new()).unwrap();
        let report = DiagnosticsRunner::new(DiagnosticsConfig::default())
            .unwrap()
            .run(&table);

        assert_eq!(
            report.notices,
            vec![DiagnosticNotice::EmptyInput, DiagnosticNotice::NoNumericColumns]
        );
        assert_eq!(report.outliers, OutlierAnalysis::NoNumericColumns);
        assert_eq!(report.missing.total.percentage, 0.0);
    }
}
