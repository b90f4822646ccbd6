use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::column::CellValue;

pub const SAMPLE_SIZE: usize = 5;

/// Semantic form-field type a column resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Checkbox,
    Number,
    Date,
    Email,
    Select,
    Textarea,
    Text,
}

/// Per-column classification output. `categories` is populated exactly
/// when `field_type` is `select`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub name: String,
    pub display_name: String,
    pub data_type: String,
    pub field_type: FieldType,
    pub sample_values: SmallVec<[CellValue; SAMPLE_SIZE]>,
    pub null_count: usize,
    pub unique_count: usize,
    pub total_count: usize,
    pub null_percentage: f64,
    pub categories: Option<Vec<CellValue>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetReport {
    pub filename: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ClassificationResult>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub processed_at: String,
    pub memory_usage: usize,
    pub dtypes: BTreeMap<String, String>,
}
