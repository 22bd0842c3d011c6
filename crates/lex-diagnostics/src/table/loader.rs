//! CSV ingestion into a [`Table`].

use super::Table;
use crate::error::{DiagnosticsError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

const SCHEMA_INFERENCE_ROWS: usize = 100;

/// Load a header-bearing CSV file into a normalized [`Table`].
///
/// Tries quote-aware parsing first, then plain parsing, then a pre-cleaned copy
/// of the content for files with broken quoting.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DiagnosticsError::InputNotFound(path.display().to_string()));
    }

    info!("Loading dataset from: {}", path.display());
    let df = read_with_fallbacks(path)?;
    info!("Dataset loaded: {:?}", df.shape());

    Table::from_dataframe(&df).context(format!("Converting {}", path.display()))
}

fn read_with_fallbacks(path: &Path) -> Result<DataFrame> {
    let path_buf = PathBuf::from(path);

    match CsvReadOptions::default()
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path_buf.clone()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Quote-aware loading failed: {}", e),
    }

    match CsvReadOptions::default()
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path_buf))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Loading without quotes failed: {}", e),
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        error!("Could not read file: {}", e);
        DiagnosticsError::Io(e)
    })?;

    CsvReadOptions::default()
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(clean_csv_content(&content)))
        .finish()
        .context(format!("Parsing {}", path.display()))
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_csv("definitely/not/here.csv").unwrap_err();
        assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
    }

    #[test]
    fn test_clean_csv_content() {
        let raw = "a,b\n\n\"\"x\"\",1\n   \n";
        assert_eq!(clean_csv_content(raw), "a,b\n\"x\",1");
    }
}
