//! Data quality checks: duplicate rows and IQR outliers.

mod duplicates;
mod outliers;

pub use duplicates::DuplicateDetector;
pub use outliers::OutlierDetector;
