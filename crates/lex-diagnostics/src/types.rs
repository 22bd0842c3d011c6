use crate::config::DiagnosticsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Column Kinds
// ============================================================================

/// Kind tag fixed for each column when the table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Structural Summary
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
}

/// Descriptive statistics for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    /// Number of non-missing values.
    pub count: usize,
    pub statistics: ColumnStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnStatistics {
    Numeric(NumericStatistics),
    Categorical(CategoricalStatistics),
}

/// Every field is `None` when the column has no values to describe.
/// `std` additionally needs at least two values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStatistics {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStatistics {
    pub unique_count: usize,
    pub mode: Option<String>,
    pub mode_frequency: usize,
}

// ============================================================================
// Missing Values
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReport {
    /// Columns with at least one missing value, most affected first.
    pub columns: Vec<ColumnMissing>,
    pub total: MissingTotals,
}

impl MissingReport {
    /// Look up a column's entry. Columns without missing values have none.
    pub fn get(&self, column: &str) -> Option<&ColumnMissing> {
        self.columns.iter().find(|entry| entry.name == column)
    }

    pub fn has_missing(&self) -> bool {
        self.total.missing_cells > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub name: String,
    pub count: usize,
    /// Share of the table's rows, in percent.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingTotals {
    pub missing_cells: usize,
    pub total_cells: usize,
    pub percentage: f64,
}

// ============================================================================
// Duplicates
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Rows equal to an earlier row across every column.
    pub full_row_duplicate_count: usize,
    pub full_row_duplicate_percentage: f64,
    /// Identifier column that was requested, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_column: Option<String>,
    /// Present only when the key column exists in the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_duplicate_count: Option<usize>,
}

// ============================================================================
// Outliers
// ============================================================================

/// Tukey fences for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl Fence {
    /// Build fences from the first and third quartiles.
    ///
    /// A zero IQR collapses the fences onto `[q1, q3]`.
    pub fn from_quartiles(q1: f64, q3: f64, multiplier: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }
    }

    /// Strict comparison: values sitting exactly on a fence are inliers.
    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutlierAnalysis {
    NoNumericColumns,
    Computed(OutlierReport),
}

impl OutlierAnalysis {
    pub fn report(&self) -> Option<&OutlierReport> {
        match self {
            Self::Computed(report) => Some(report),
            Self::NoNumericColumns => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub multiplier: f64,
    pub numeric_column_count: usize,
    pub total_numeric_cells: usize,
    pub outlier_cells: usize,
    pub outlier_cell_percentage: f64,
    pub rows_with_outlier: usize,
    pub rows_with_outlier_percentage: f64,
    /// Per-column results in table order.
    pub columns: Vec<ColumnOutliers>,
    /// Columns by outlier count, descending; ties keep table order.
    pub ranking: Vec<RankedColumn>,
}

impl OutlierReport {
    pub fn column(&self, name: &str) -> Option<&ColumnOutliers> {
        self.columns.iter().find(|column| column.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub name: String,
    /// `None` when the column has no values once missing entries are dropped.
    pub fence: Option<Fence>,
    pub median: Option<f64>,
    pub outlier_count: usize,
    /// One flag per row; missing cells are never flagged.
    pub mask: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedColumn {
    pub name: String,
    pub outlier_count: usize,
}

// ============================================================================
// Correlation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
}

impl CorrelationMethod {
    pub const ALL: [CorrelationMethod; 2] = [Self::Pearson, Self::Spearman];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pearson => "pearson",
            Self::Spearman => "spearman",
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorrelationAnalysis {
    NoNumericColumns { method: CorrelationMethod },
    Computed(CorrelationMatrix),
}

impl CorrelationAnalysis {
    pub fn method(&self) -> CorrelationMethod {
        match self {
            Self::NoNumericColumns { method } => *method,
            Self::Computed(matrix) => matrix.method,
        }
    }

    pub fn matrix(&self) -> Option<&CorrelationMatrix> {
        match self {
            Self::Computed(matrix) => Some(matrix),
            Self::NoNumericColumns { .. } => None,
        }
    }
}

/// Square, symmetric coefficient matrix over the numeric columns.
///
/// `None` marks an undefined coefficient (too few paired observations or a
/// zero-variance column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub method: CorrelationMethod,
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied().flatten()
    }

    /// Coefficient between two columns by name.
    pub fn coefficient(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|name| name == a)?;
        let j = self.columns.iter().position(|name| name == b)?;
        self.get(i, j)
    }

    /// Dense view with NaN for undefined cells, the shape heatmap renderers expect.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        self.values
            .iter()
            .map(|row| row.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
            .collect()
    }
}

// ============================================================================
// Run-level Results
// ============================================================================

/// Non-fatal conditions met during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticNotice {
    /// The table has no rows or no columns; percentages default to zero.
    EmptyInput,
    /// Outlier and correlation analysis do not apply.
    NoNumericColumns,
    /// The requested identifier column is not in the table.
    MissingKeyColumn { column: String },
    /// Numeric columns with zero variance; their correlations are undefined.
    DegenerateColumns { columns: Vec<String> },
}

impl DiagnosticNotice {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::NoNumericColumns => "NO_NUMERIC_COLUMNS",
            Self::MissingKeyColumn { .. } => "MISSING_KEY_COLUMN",
            Self::DegenerateColumns { .. } => "DEGENERATE_COLUMN",
        }
    }
}

impl fmt::Display for DiagnosticNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "table has no rows or no columns"),
            Self::NoNumericColumns => {
                write!(f, "no numeric columns; outliers and correlations skipped")
            }
            Self::MissingKeyColumn { column } => {
                write!(f, "key column '{}' not found; key duplicates skipped", column)
            }
            Self::DegenerateColumns { columns } => write!(
                f,
                "zero-variance columns with undefined correlations: {}",
                columns.join(", ")
            ),
        }
    }
}

/// Everything one diagnostics run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub structure: StructuralSummary,
    pub missing: MissingReport,
    pub duplicates: DuplicateReport,
    pub outliers: OutlierAnalysis,
    pub correlations: Vec<CorrelationAnalysis>,
    pub notices: Vec<DiagnosticNotice>,
    pub config: DiagnosticsConfig,
}

impl DiagnosticsReport {
    pub fn correlation(&self, method: CorrelationMethod) -> Option<&CorrelationAnalysis> {
        self.correlations
            .iter()
            .find(|analysis| analysis.method() == method)
    }
}
