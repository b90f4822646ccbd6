pub mod analyzer;
pub mod classifier;
pub mod column;
pub mod stats;
pub mod types;
pub mod utils;

pub use analyzer::SheetAnalyzer;
pub use classifier::{ClassifierConfig, TypeClassifier};
pub use column::{CellValue, Column, ColumnKind};
pub use stats::ColumnStatistics;
pub use types::{ClassificationResult, FieldType, ReportMetadata, SheetReport};
