//! Immutable, column-oriented table consumed by every analyzer.
//!
//! Each column carries an explicit [`ColumnKind`] decided once at
//! construction, and every cell is either present or `None`. Floating NaN and
//! infinities are normalized to `None` on the way in, so analyzers only ever
//! filter on `Option`.

mod loader;

pub use loader::load_csv;

use crate::error::{DiagnosticsError, Result, ResultExt};
use crate::types::ColumnKind;
use crate::utils::{is_integer_dtype, is_numeric_dtype};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Values of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Self::Numeric(values) => values.get(row).is_some_and(Option::is_none),
            Self::Categorical(values) => values.get(row).is_some_and(Option::is_none),
        }
    }

    pub fn missing_count(&self) -> usize {
        match self {
            Self::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            Self::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
    /// Exact source values of integer columns. The `f64` view loses precision
    /// above 2^53, so equality checks read these instead.
    integers: Option<Vec<Option<i128>>>,
}

impl Column {
    /// Numeric column. NaN and infinite entries become missing.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
            integers: None,
        }
    }

    /// Numeric column backed by exact integers.
    pub fn integer(name: impl Into<String>, values: Vec<Option<i128>>) -> Self {
        let floats = values.iter().map(|v| v.map(|x| x as f64)).collect();
        Self {
            name: name.into(),
            data: ColumnData::Numeric(floats),
            integers: Some(values),
        }
    }

    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Categorical(values),
            integers: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.data.missing_count()
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Categorical(_) => None,
        }
    }

    /// Exact values when the column was built from integers.
    pub fn as_integer(&self) -> Option<&[Option<i128>]> {
        self.integers.as_deref()
    }

    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Categorical(values) => Some(values),
            ColumnData::Numeric(_) => None,
        }
    }

    /// Non-missing numeric values in row order; empty for categorical columns.
    pub fn present_numeric(&self) -> Vec<f64> {
        self.as_numeric()
            .map(|values| values.iter().flatten().copied().collect())
            .unwrap_or_default()
    }
}

/// Immutable table shared read-only by all analyzers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

static_assertions::assert_impl_all!(Table: Send, Sync);

impl Table {
    /// Build a table, trimming column names and checking shape.
    ///
    /// # Errors
    ///
    /// `LengthMismatch` if columns differ in length, `DuplicateColumn` if two
    /// names collide after trimming.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::with_capacity(columns.len());
        let mut normalized = Vec::with_capacity(columns.len());

        for mut column in columns {
            column.name = column.name.trim().to_string();

            let actual = column.len();
            if actual != row_count {
                return Err(DiagnosticsError::LengthMismatch {
                    column: column.name,
                    expected: row_count,
                    actual,
                });
            }
            if !seen.insert(column.name.clone()) {
                return Err(DiagnosticsError::DuplicateColumn(column.name));
            }
            normalized.push(column);
        }

        Ok(Self {
            columns: normalized,
            row_count,
        })
    }

    /// Convert a polars DataFrame, classifying integer and float columns as
    /// numeric and everything else as categorical.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let name = series.name().to_string();

            let column = if *series.dtype() == DataType::UInt64 {
                let values = series.u64()?.into_iter().map(|v| v.map(i128::from));
                Column::integer(name, values.collect())
            } else if is_integer_dtype(series.dtype()) {
                let ints = series
                    .cast(&DataType::Int64)
                    .context(format!("Casting column '{}' to integer", name))?;
                let values = ints.i64()?.into_iter().map(|v| v.map(i128::from));
                Column::integer(name, values.collect())
            } else if is_numeric_dtype(series.dtype()) {
                let floats = series
                    .cast(&DataType::Float64)
                    .context(format!("Casting column '{}' to float", name))?;
                let values: Vec<Option<f64>> = floats.f64()?.into_iter().collect();
                Column::numeric(name, values)
            } else {
                let strings = series
                    .cast(&DataType::String)
                    .context(format!("Casting column '{}' to string", name))?;
                let values: Vec<Option<String>> = strings
                    .str()?
                    .into_iter()
                    .map(|v| v.map(str::to_string))
                    .collect();
                Column::categorical(name, values)
            };

            debug!(
                "Column '{}' classified as {} ({} missing)",
                column.name(),
                column.kind(),
                column.missing_count()
            );
            columns.push(column);
        }

        Self::new(columns)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `row_count * column_count`.
    pub fn total_cells(&self) -> usize {
        self.row_count * self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|column| column.kind() == ColumnKind::Numeric)
    }

    pub fn numeric_column_count(&self) -> usize {
        self.numeric_columns().count()
    }
}
