//! Progress reporting for a diagnostics run.
//!
//! The runner emits one update when each stage starts and a final update
//! when the report is assembled.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_diagnostics::DiagnosticsRunner;
//!
//! let report = DiagnosticsRunner::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run(&table);
//! ```

use serde::{Deserialize, Serialize};

/// Stages of a diagnostics run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticStage {
    /// Validating configuration and inspecting the table
    Initializing,
    /// Shape, column kinds and descriptive statistics
    StructuralSummary,
    /// Per-column and global missing-value counts
    MissingValues,
    /// Full-row and key-column duplicates
    Duplicates,
    /// IQR fences and outlier masks
    Outliers,
    /// Pearson and Spearman matrices
    Correlation,
    /// Report assembled
    Complete,
}

impl DiagnosticStage {
    /// Every stage a run passes through, in order.
    pub const ALL: [DiagnosticStage; 7] = [
        Self::Initializing,
        Self::StructuralSummary,
        Self::MissingValues,
        Self::Duplicates,
        Self::Outliers,
        Self::Correlation,
        Self::Complete,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::StructuralSummary => "Summarizing Structure",
            Self::MissingValues => "Counting Missing Values",
            Self::Duplicates => "Detecting Duplicates",
            Self::Outliers => "Detecting Outliers",
            Self::Correlation => "Computing Correlations",
            Self::Complete => "Complete",
        }
    }

    /// Share of the overall run attributed to this stage (0.0 - 1.0).
    ///
    /// Weights of the working stages sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Initializing => 0.05,
            Self::StructuralSummary => 0.20,
            Self::MissingValues => 0.10,
            Self::Duplicates => 0.15,
            Self::Outliers => 0.20,
            Self::Correlation => 0.30,
            Self::Complete => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Initializing => 0.0,
            Self::StructuralSummary => 0.05,
            Self::MissingValues => 0.25,
            Self::Duplicates => 0.35,
            Self::Outliers => 0.50,
            Self::Correlation => 0.70,
            Self::Complete => 1.0,
        }
    }
}

/// A progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current stage
    pub stage: DiagnosticStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a progress update for a stage.
    pub fn new(stage: DiagnosticStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: DiagnosticStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }
}

/// Receives progress updates during a run.
///
/// Implementations must be `Send + Sync` so a run can execute on a worker
/// thread while updates are consumed elsewhere.
pub trait ProgressReporter: Send + Sync {
    /// Called once per stage. Implementations should not block.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
static_assertions::assert_impl_all!(DiagnosticStage: Send, Sync, Copy);
