use std::collections::BTreeMap;
use std::io::Cursor;

use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate, Utc};
use rayon::prelude::*;

use super::classifier::TypeClassifier;
use super::column::{CellValue, Column};
use super::types::{ReportMetadata, SheetReport};
use crate::error::AppError;

/// Reads an XLSX workbook from memory and classifies every column of the
/// first sheet. The first row is the header row; each column is
/// classified independently, so the pass runs in parallel across columns.
#[derive(Debug, Default)]
pub struct SheetAnalyzer {
    classifier: TypeClassifier,
}

impl SheetAnalyzer {
    pub fn new(classifier: TypeClassifier) -> Self {
        Self { classifier }
    }

    pub fn analyze_from_bytes(
        &self,
        filename: &str,
        file_data: Bytes,
    ) -> Result<SheetReport, AppError> {
        let start = std::time::Instant::now();
        tracing::info!("Starting sheet analysis for {}", filename);

        let cursor = Cursor::new(file_data);
        let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(|e| {
            tracing::error!("Failed to open workbook: {}", e);
            AppError::FileProcessing(format!("Failed to open Excel file: {}", e))
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| AppError::FileProcessing("No sheets found in workbook".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            AppError::FileProcessing(format!("Failed to read worksheet {}: {}", sheet_name, e))
        })?;

        let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
        let Some((header_row, data_rows)) = rows.split_first() else {
            return Err(AppError::FileProcessing(format!(
                "Sheet {} is empty",
                sheet_name
            )));
        };

        let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();
        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values = data_rows
                    .iter()
                    .map(|row| row.get(idx).map(cell_from_data).unwrap_or(CellValue::Null))
                    .collect();
                Column::new(name.clone(), values)
            })
            .collect();

        let results: Vec<_> = columns
            .par_iter()
            .map(|column| self.classifier.classify(column))
            .collect();

        let memory_usage = columns.iter().map(Column::approx_size).sum();
        let dtypes: BTreeMap<String, String> = results
            .iter()
            .map(|r| (r.name.clone(), r.data_type.clone()))
            .collect();

        tracing::info!(
            "Analyzed {} columns x {} rows in {:?}",
            headers.len(),
            data_rows.len(),
            start.elapsed()
        );

        Ok(SheetReport {
            filename: filename.to_string(),
            row_count: data_rows.len(),
            column_count: headers.len(),
            columns: results,
            metadata: ReportMetadata {
                processed_at: Utc::now().to_rfc3339(),
                memory_usage,
                dtypes,
            },
        })
    }
}

/// Decodes one calamine cell. Blank strings and error cells count as
/// missing, matching how empty spreadsheet cells read back.
pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Excel serial dates count days from 1899-12-30.
fn excel_serial_to_datetime(serial: f64) -> CellValue {
    let seconds = (serial * 86_400.0) as i64;
    match NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(base) => CellValue::DateTime(base + Duration::seconds(seconds)),
        None => CellValue::Null,
    }
}
