use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::column::{Column, ColumnKind};
use super::utils::is_date_string;

/// How many leading non-null values the date-parseability probe samples.
pub const DATE_SAMPLE_ROWS: usize = 10;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern compiles"));

/// Signals derived from one column. Computed in a single pass plus the
/// bounded date probe; makes no type decision itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStatistics {
    pub total_count: usize,
    pub null_count: usize,
    pub non_null_count: usize,
    pub unique_count: usize,
    pub unique_ratio: f64,
    pub boolean_coercible: bool,
    pub is_numeric: bool,
    pub is_datetime: bool,
    pub contains_at: bool,
    pub email_ratio: f64,
    pub mean_length: f64,
}

impl ColumnStatistics {
    pub fn compute(column: &Column) -> Self {
        let total_count = column.values().len();
        let mut null_count = 0usize;
        let mut seen = HashSet::new();
        let mut length_sum = 0usize;
        let mut contains_at = false;
        let mut email_matches = 0usize;
        let mut bool_like = 0usize;

        for value in column.values() {
            if value.is_null() {
                null_count += 1;
                continue;
            }
            let text = value.display();
            length_sum += text.chars().count();
            if text.contains('@') {
                contains_at = true;
            }
            if EMAIL_RE.is_match(&text) {
                email_matches += 1;
            }
            if matches!(
                text.to_lowercase().as_str(),
                "true" | "false" | "1" | "0"
            ) {
                bool_like += 1;
            }
            seen.insert(text);
        }

        let non_null_count = total_count - null_count;
        let kind = column.kind();

        Self {
            total_count,
            null_count,
            non_null_count,
            unique_count: seen.len(),
            unique_ratio: ratio(seen.len(), non_null_count),
            boolean_coercible: kind == ColumnKind::Boolean
                || (non_null_count > 0 && bool_like == non_null_count),
            is_numeric: kind.is_numeric(),
            is_datetime: kind == ColumnKind::DateTime || leading_values_are_dates(column),
            contains_at,
            email_ratio: if contains_at {
                ratio(email_matches, non_null_count)
            } else {
                0.0
            },
            mean_length: ratio(length_sum, non_null_count),
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// True when the first [`DATE_SAMPLE_ROWS`] non-null values all parse
/// under the permissive format list. Any failure yields false; parse
/// errors never escape.
fn leading_values_are_dates(column: &Column) -> bool {
    let mut sampled = 0usize;
    for value in column.non_null().take(DATE_SAMPLE_ROWS) {
        if !is_date_string(&value.display()) {
            return false;
        }
        sampled += 1;
    }
    sampled > 0
}
