//! Report output.
//!
//! - [`TextReporter`]: plain-text sections for the terminal
//! - [`ReportGenerator`]: writes a [`SavedReport`] as `<stem>_diagnostics.json`
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_diagnostics::reporting::{ReportGenerator, SavedReport, TextReporter};
//!
//! TextReporter::default().write(&report, &mut std::io::stdout())?;
//!
//! let generator = ReportGenerator::new("outputs");
//! generator.write_report_to_file(&SavedReport::new("data/students.csv", report), "students")?;
//! ```

mod generator;
mod text;

pub use generator::{ReportGenerator, SavedReport};
pub use text::TextReporter;
