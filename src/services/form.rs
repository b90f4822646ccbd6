use chrono::Utc;
use serde::Serialize;

use super::sheet::{CellValue, ClassificationResult, FieldType, SheetReport};

/// Fields with fewer nulls than this are considered mandatory input.
const REQUIRED_NULL_PERCENTAGE: f64 = 10.0;

const EMAIL_VALIDATION_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+$";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CellValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub title: String,
    pub description: String,
    pub fields: Vec<FormField>,
}

pub fn form_from_report(report: &SheetReport) -> FormSchema {
    let fields = report
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| field_from_column(idx, column))
        .collect();

    FormSchema {
        title: format!("{} Form", title_from_filename(&report.filename)),
        description: format!("Auto-generated form from {}", report.filename),
        fields,
    }
}

fn field_from_column(idx: usize, column: &ClassificationResult) -> FormField {
    let mut field = FormField {
        id: format!("field_{}_{}", Utc::now().timestamp_millis(), idx),
        label: column.display_name.clone(),
        field_type: column.field_type,
        required: column.null_percentage < REQUIRED_NULL_PERCENTAGE,
        placeholder: format!("Enter {}", column.display_name.to_lowercase()),
        options: None,
        validation: None,
    };

    match column.field_type {
        FieldType::Select => {
            field.options = Some(column.categories.clone().unwrap_or_default());
        }
        FieldType::Email => {
            field.placeholder = "Enter email address".to_string();
            field.validation = Some(FieldValidation {
                pattern: Some(EMAIL_VALIDATION_PATTERN.to_string()),
                min: None,
                message: "Please enter a valid email address".to_string(),
            });
        }
        FieldType::Number => {
            field.placeholder = "Enter number".to_string();
            field.validation = Some(FieldValidation {
                pattern: None,
                min: Some(0.0),
                message: "Please enter a valid number".to_string(),
            });
        }
        FieldType::Date => {
            field.placeholder = "Select date".to_string();
        }
        FieldType::Textarea => {
            field.placeholder = format!("Enter {}...", column.display_name.to_lowercase());
        }
        FieldType::Checkbox | FieldType::Text => {}
    }

    field
}

/// "employee_data.xlsx" becomes "Employee Data".
fn title_from_filename(filename: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename);

    stem.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
