//! Human-readable rendering of a [`DiagnosticsReport`].

use crate::types::{
    ColumnStatistics, CorrelationAnalysis, CorrelationMatrix, DiagnosticsReport, OutlierAnalysis,
    StructuralSummary,
};
use std::io::{self, Write};

const RULE_WIDTH: usize = 80;
const NAME_WIDTH: usize = 20;

/// Renders reports as plain text sections.
#[derive(Debug, Clone, Copy)]
pub struct TextReporter {
    top_outlier_columns: usize,
}

impl TextReporter {
    /// `top_outlier_columns` caps the outlier ranking printed.
    pub fn new(top_outlier_columns: usize) -> Self {
        Self {
            top_outlier_columns,
        }
    }

    /// Render to a string.
    pub fn render(&self, report: &DiagnosticsReport) -> String {
        let mut buffer = Vec::new();
        // writing into a Vec never fails
        let _ = self.write(report, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Write every section in order.
    pub fn write(&self, report: &DiagnosticsReport, out: &mut impl Write) -> io::Result<()> {
        write_overview(report, out)?;
        write_column_types(&report.structure, out)?;
        write_statistics(&report.structure, out)?;
        write_missing(report, out)?;
        write_duplicates(report, out)?;
        self.write_outliers(report, out)?;
        for analysis in &report.correlations {
            write_correlation(analysis, out)?;
        }
        if !report.notices.is_empty() {
            section(out, "NOTICES")?;
            for notice in &report.notices {
                writeln!(out, "  ! [{}] {}", notice.code(), notice)?;
            }
        }
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))
    }

    fn write_outliers(&self, report: &DiagnosticsReport, out: &mut impl Write) -> io::Result<()> {
        section(out, "OUTLIERS (IQR)")?;
        let outliers = match &report.outliers {
            OutlierAnalysis::NoNumericColumns => {
                writeln!(out, "  No numeric columns; outlier detection skipped")?;
                return Ok(());
            }
            OutlierAnalysis::Computed(outliers) => outliers,
        };

        writeln!(out, "  Fence multiplier: {}", outliers.multiplier)?;
        writeln!(out, "  Numeric columns: {}", outliers.numeric_column_count)?;
        writeln!(out, "  Total numeric cells: {}", outliers.total_numeric_cells)?;
        writeln!(
            out,
            "  Outlier cells: {} ({:.3}%)",
            outliers.outlier_cells, outliers.outlier_cell_percentage
        )?;
        writeln!(
            out,
            "  Rows with >=1 outlier: {} ({:.3}%)",
            outliers.rows_with_outlier, outliers.rows_with_outlier_percentage
        )?;

        writeln!(out)?;
        writeln!(out, "  Top columns by outlier count:")?;
        for ranked in outliers.ranking.iter().take(self.top_outlier_columns) {
            writeln!(
                out,
                "  {:<width$} {}",
                truncate_str(&ranked.name, NAME_WIDTH - 1),
                ranked.outlier_count,
                width = NAME_WIDTH
            )?;
        }
        if outliers.outlier_cells == 0 {
            writeln!(out, "  No IQR outliers in numeric columns")?;
        }
        Ok(())
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TOP_OUTLIER_COLUMNS)
    }
}

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(40))
}

fn write_overview(report: &DiagnosticsReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "DATA QUALITY DIAGNOSTICS")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    section(out, "OVERVIEW")?;
    writeln!(
        out,
        "  Rows: {} | Columns: {}",
        report.structure.row_count, report.structure.column_count
    )
}

fn write_column_types(structure: &StructuralSummary, out: &mut impl Write) -> io::Result<()> {
    section(out, "COLUMN TYPES")?;
    for column in &structure.columns {
        writeln!(
            out,
            "  {:<width$} {}",
            truncate_str(&column.name, NAME_WIDTH - 1),
            column.kind,
            width = NAME_WIDTH
        )?;
    }
    Ok(())
}

fn write_statistics(structure: &StructuralSummary, out: &mut impl Write) -> io::Result<()> {
    section(out, "DESCRIPTIVE STATISTICS")?;

    let numeric: Vec<_> = structure
        .columns
        .iter()
        .filter_map(|column| match &column.statistics {
            ColumnStatistics::Numeric(stats) => Some((column, stats)),
            ColumnStatistics::Categorical(_) => None,
        })
        .collect();
    if !numeric.is_empty() {
        writeln!(
            out,
            "  {:<20} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        for (column, stats) in numeric {
            writeln!(
                out,
                "  {:<20} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
                truncate_str(&column.name, NAME_WIDTH - 1),
                column.count,
                format_value(stats.mean),
                format_value(stats.std),
                format_value(stats.min),
                format_value(stats.q1),
                format_value(stats.median),
                format_value(stats.q3),
                format_value(stats.max),
            )?;
        }
    }

    let categorical: Vec<_> = structure
        .columns
        .iter()
        .filter_map(|column| match &column.statistics {
            ColumnStatistics::Categorical(stats) => Some((column, stats)),
            ColumnStatistics::Numeric(_) => None,
        })
        .collect();
    if !categorical.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "  {:<20} {:>8} {:>8} {:<20} {:>8}",
            "Column", "count", "unique", "top", "freq"
        )?;
        for (column, stats) in categorical {
            writeln!(
                out,
                "  {:<20} {:>8} {:>8} {:<20} {:>8}",
                truncate_str(&column.name, NAME_WIDTH - 1),
                column.count,
                stats.unique_count,
                truncate_str(stats.mode.as_deref().unwrap_or("nan"), NAME_WIDTH - 1),
                stats.mode_frequency,
            )?;
        }
    }
    Ok(())
}

fn write_missing(report: &DiagnosticsReport, out: &mut impl Write) -> io::Result<()> {
    section(out, "MISSING VALUES")?;
    let total = &report.missing.total;
    writeln!(
        out,
        "  Global: {}/{} cells = {:.3}%",
        total.missing_cells, total.total_cells, total.percentage
    )?;
    if !report.missing.has_missing() {
        return writeln!(out, "  No missing values detected");
    }
    for column in &report.missing.columns {
        writeln!(
            out,
            "  {:<width$} {:>8} {:>9.3}%",
            truncate_str(&column.name, NAME_WIDTH - 1),
            column.count,
            column.percentage,
            width = NAME_WIDTH
        )?;
    }
    Ok(())
}

fn write_duplicates(report: &DiagnosticsReport, out: &mut impl Write) -> io::Result<()> {
    section(out, "DUPLICATES")?;
    let duplicates = &report.duplicates;
    writeln!(
        out,
        "  Duplicate rows: {} ({:.3}%)",
        duplicates.full_row_duplicate_count, duplicates.full_row_duplicate_percentage
    )?;
    match (&duplicates.key_column, duplicates.key_duplicate_count) {
        (Some(key), Some(count)) => writeln!(out, "  Duplicate {}: {}", key, count),
        (Some(key), None) => writeln!(out, "  Key column '{}' not present", key),
        (None, _) => Ok(()),
    }
}

fn write_correlation(analysis: &CorrelationAnalysis, out: &mut impl Write) -> io::Result<()> {
    section(
        out,
        &format!("CORRELATION ({})", analysis.method().as_str().to_uppercase()),
    )?;
    match analysis {
        CorrelationAnalysis::NoNumericColumns { .. } => {
            writeln!(out, "  No numeric columns; correlation skipped")
        }
        CorrelationAnalysis::Computed(matrix) => write_matrix(matrix, out),
    }
}

fn write_matrix(matrix: &CorrelationMatrix, out: &mut impl Write) -> io::Result<()> {
    const CELL_WIDTH: usize = 12;

    write!(out, "  {:<width$}", "", width = NAME_WIDTH)?;
    for name in &matrix.columns {
        write!(
            out,
            " {:>width$}",
            truncate_str(name, CELL_WIDTH - 1),
            width = CELL_WIDTH
        )?;
    }
    writeln!(out)?;

    for (i, name) in matrix.columns.iter().enumerate() {
        write!(
            out,
            "  {:<width$}",
            truncate_str(name, NAME_WIDTH - 1),
            width = NAME_WIDTH
        )?;
        for j in 0..matrix.len() {
            write!(
                out,
                " {:>width$}",
                format_value(matrix.get(i, j)),
                width = CELL_WIDTH
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Four decimals; `nan` for undefined.
fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "nan".to_string(), |v| format!("{:.4}", v))
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DiagnosticsRunner;
    use crate::table::{Column, Table};
    use crate::DiagnosticsConfig;

    fn render(table: &Table, config: DiagnosticsConfig) -> String {
        let top = config.top_outlier_columns;
        let report = DiagnosticsRunner::new(config).unwrap().run(table);
        TextReporter::new(top).render(&report)
    }

    fn sample_table() -> Table {
        Table::new(vec![
            Column::numeric("A", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)]),
            Column::numeric("B", vec![Some(10.0), Some(20.0), None, Some(40.0), Some(50.0)]),
            Column::categorical(
                "city",
                vec![
                    Some("Paris".into()),
                    Some("Lyon".into()),
                    Some("Paris".into()),
                    None,
                    Some("Nice".into()),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_sections_in_order() {
        let text = render(&sample_table(), DiagnosticsConfig::default());
        let headings = [
            "OVERVIEW",
            "COLUMN TYPES",
            "DESCRIPTIVE STATISTICS",
            "MISSING VALUES",
            "DUPLICATES",
            "OUTLIERS (IQR)",
            "CORRELATION (PEARSON)",
            "CORRELATION (SPEARMAN)",
        ];
        let mut last = 0;
        for heading in headings {
            let position = text[last..]
                .find(heading)
                .unwrap_or_else(|| panic!("missing or out of order: {}", heading));
            last += position + heading.len();
        }
    }

    #[test]
    fn test_missing_percentages_three_decimals() {
        let text = render(&sample_table(), DiagnosticsConfig::default());
        assert!(text.contains("Global: 2/15 cells = 13.333%"));
        assert!(text.contains("20.000%"));
    }

    #[test]
    fn test_undefined_coefficients_print_nan() {
        let table = Table::new(vec![
            Column::numeric("flat", vec![Some(7.0); 4]),
            Column::numeric("x", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        ])
        .unwrap();
        let text = render(&table, DiagnosticsConfig::default());
        assert!(text.contains("nan"));
        assert!(text.contains("1.0000"));
        assert!(text.contains("DEGENERATE_COLUMN"));
    }

    #[test]
    fn test_top_outlier_columns_limit() {
        let columns = (0..5)
            .map(|i| {
                Column::numeric(
                    format!("col_{}", i),
                    vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(100.0)],
                )
            })
            .collect();
        let table = Table::new(columns).unwrap();
        let config = DiagnosticsConfig::builder()
            .top_outlier_columns(2)
            .build()
            .unwrap();

        let text = render(&table, config);
        let outliers = &text[text.find("OUTLIERS (IQR)").unwrap()..text.find("CORRELATION").unwrap()];
        assert!(outliers.contains("col_0"));
        assert!(outliers.contains("col_1"));
        assert!(!outliers.contains("col_2"));
    }

    #[test]
    fn test_no_numeric_columns() {
        let table = Table::new(vec![Column::categorical(
            "name",
            vec![Some("a".into()), Some("b".into())],
        )])
        .unwrap();
        let text = render(&table, DiagnosticsConfig::default());
        assert!(text.contains("outlier detection skipped"));
        assert!(text.contains("correlation skipped"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a_very_long_column_name", 10), "a_very_...");
    }
}
