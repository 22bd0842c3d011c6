//! Configuration types for a diagnostics run.
//!
//! This module provides configuration options using the builder pattern.

use crate::types::CorrelationMethod;
use serde::{Deserialize, Serialize};

/// Standard Tukey fence constant.
pub const DEFAULT_FENCE_MULTIPLIER: f64 = 1.5;

/// Number of ranked outlier columns shown by the text report.
pub const DEFAULT_TOP_OUTLIER_COLUMNS: usize = 10;

/// Configuration for a diagnostics run.
///
/// Use [`DiagnosticsConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_diagnostics::config::DiagnosticsConfig;
/// use lex_diagnostics::CorrelationMethod;
///
/// let config = DiagnosticsConfig::builder()
///     .fence_multiplier(3.0)
///     .key_column("Student_ID")
///     .correlation_methods([CorrelationMethod::Spearman])
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Multiplier applied to the IQR when computing outlier fences.
    /// Larger values widen the inlier band.
    /// Default: 1.5
    pub fence_multiplier: f64,

    /// Identifier column checked for key duplicates.
    /// Default: None
    pub key_column: Option<String>,

    /// Correlation methods to compute, in output order.
    /// Default: Pearson, Spearman
    pub correlation_methods: Vec<CorrelationMethod>,

    /// How many ranked outlier columns the text report prints.
    /// Default: 10
    pub top_outlier_columns: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            fence_multiplier: DEFAULT_FENCE_MULTIPLIER,
            key_column: None,
            correlation_methods: CorrelationMethod::ALL.to_vec(),
            top_outlier_columns: DEFAULT_TOP_OUTLIER_COLUMNS,
        }
    }
}

impl DiagnosticsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DiagnosticsConfigBuilder {
        DiagnosticsConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.fence_multiplier.is_finite() || self.fence_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier(
                self.fence_multiplier,
            ));
        }

        if let Some(key) = &self.key_column
            && key.trim().is_empty()
        {
            return Err(ConfigValidationError::BlankKeyColumn);
        }

        if self.top_outlier_columns == 0 {
            return Err(ConfigValidationError::InvalidTopColumns(
                self.top_outlier_columns,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid fence multiplier: {0} (must be a finite, non-negative number)")]
    InvalidMultiplier(f64),

    #[error("Key column name must not be blank")]
    BlankKeyColumn,

    #[error("Invalid top outlier column count: {0} (must be at least 1)")]
    InvalidTopColumns(usize),
}

/// Builder for [`DiagnosticsConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct DiagnosticsConfigBuilder {
    fence_multiplier: Option<f64>,
    key_column: Option<String>,
    correlation_methods: Option<Vec<CorrelationMethod>>,
    top_outlier_columns: Option<usize>,
}

impl DiagnosticsConfigBuilder {
    /// Set the IQR fence multiplier.
    pub fn fence_multiplier(mut self, multiplier: f64) -> Self {
        self.fence_multiplier = Some(multiplier);
        self
    }

    /// Set the identifier column used for key-duplicate detection.
    ///
    /// The name is trimmed the same way table column names are.
    pub fn key_column(mut self, column: impl Into<String>) -> Self {
        self.key_column = Some(column.into().trim().to_string());
        self
    }

    /// Set the correlation methods to compute.
    ///
    /// Repeated methods are collapsed; the first occurrence keeps its position.
    /// An empty list skips correlation entirely.
    pub fn correlation_methods(
        mut self,
        methods: impl IntoIterator<Item = CorrelationMethod>,
    ) -> Self {
        let mut unique = Vec::new();
        for method in methods {
            if !unique.contains(&method) {
                unique.push(method);
            }
        }
        self.correlation_methods = Some(unique);
        self
    }

    /// Set how many ranked outlier columns the text report prints.
    pub fn top_outlier_columns(mut self, count: usize) -> Self {
        self.top_outlier_columns = Some(count);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `DiagnosticsConfig` or an error if validation fails.
    pub fn build(self) -> Result<DiagnosticsConfig, ConfigValidationError> {
        let config = DiagnosticsConfig {
            fence_multiplier: self.fence_multiplier.unwrap_or(DEFAULT_FENCE_MULTIPLIER),
            key_column: self.key_column,
            correlation_methods: self
                .correlation_methods
                .unwrap_or_else(|| CorrelationMethod::ALL.to_vec()),
            top_outlier_columns: self
                .top_outlier_columns
                .unwrap_or(DEFAULT_TOP_OUTLIER_COLUMNS),
        };

        config.validate()?;
        Ok(config)
    }
}
