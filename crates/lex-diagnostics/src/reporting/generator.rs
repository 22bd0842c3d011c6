use crate::error::{Result, ResultExt};
use crate::types::DiagnosticsReport;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// A diagnostics report as written to disk.
///
/// The timestamp and input path live only in this wrapper, so the inner
/// report stays identical across runs over the same data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    pub diagnostics: DiagnosticsReport,
}

impl SavedReport {
    pub fn new(input_file: impl Into<String>, diagnostics: DiagnosticsReport) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            diagnostics,
        }
    }
}

/// Writes reports into an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write a report to `<base_name>_diagnostics.json`, creating the output
    /// directory when needed.
    pub fn write_report_to_file(&self, report: &SavedReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).context(format!(
            "Failed to create output directory {}",
            self.output_dir.display()
        ))?;

        let report_path = self
            .output_dir
            .join(format!("{}_diagnostics.json", base_name));
        let mut file = File::create(&report_path)
            .context(format!("Failed to create {}", report_path.display()))?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DiagnosticsRunner;
    use crate::table::{Column, Table};
    use crate::DiagnosticsConfig;

    fn sample_report() -> DiagnosticsReport {
        let table = Table::new(vec![Column::numeric(
            "x",
            vec![Some(1.0), Some(2.0), None, Some(4.0)],
        )])
        .unwrap();
        DiagnosticsRunner::new(DiagnosticsConfig::default())
            .unwrap()
            .run(&table)
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "lex_diagnostics_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = temp_dir("write_report");
        let generator = ReportGenerator::new(&dir);
        let saved = SavedReport::new("data/students.csv", sample_report());

        let path = generator.write_report_to_file(&saved, "students").unwrap();
        assert_eq!(path, dir.join("students_diagnostics.json"));

        let content = fs::read_to_string(&path).unwrap();
        let parsed: SavedReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.input_file, "data/students.csv");
        assert_eq!(parsed.diagnostics, saved.diagnostics);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_generated_at_format() {
        let saved = SavedReport::new("in.csv", sample_report());
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(saved.generated_at.len(), 19);
        assert!(chrono::NaiveDateTime::parse_from_str(&saved.generated_at, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}
