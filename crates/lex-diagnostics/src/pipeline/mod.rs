//! Pipeline module.
//!
//! This module provides the diagnostics runner and its progress reporting.

pub mod progress;
mod runner;

pub use progress::{ClosureProgressReporter, DiagnosticStage, ProgressReporter, ProgressUpdate};
pub use runner::{DiagnosticsRunner, DiagnosticsRunnerBuilder};
