use std::cmp::Ordering;
use std::collections::HashSet;

use smallvec::SmallVec;

use super::column::{CellValue, Column};
use super::stats::ColumnStatistics;
use super::types::{ClassificationResult, FieldType, SAMPLE_SIZE};
use super::utils::clean_field_name;

const EMAIL_MATCH_RATIO: f64 = 0.5;
const TEXTAREA_MEAN_LENGTH: f64 = 100.0;

/// Thresholds for the `select` rule. Defaults preserve the reference
/// behavior; both are overridable per classifier instance.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub select_unique_ratio: f64,
    pub select_max_categories: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            select_unique_ratio: 0.1,
            select_max_categories: 20,
        }
    }
}

/// Applies the ordered decision policy to a column's statistics and
/// assembles the classification record. Total over all inputs; every
/// branch falls back to `text`.
#[derive(Debug, Default)]
pub struct TypeClassifier {
    config: ClassifierConfig,
}

impl TypeClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, column: &Column) -> ClassificationResult {
        let stats = ColumnStatistics::compute(column);
        let field_type = self.field_type(&stats);

        let sample_values: SmallVec<[CellValue; SAMPLE_SIZE]> =
            column.non_null().take(SAMPLE_SIZE).cloned().collect();

        let categories = if field_type == FieldType::Select {
            Some(sorted_categories(column))
        } else {
            None
        };

        let null_percentage = if stats.total_count == 0 {
            0.0
        } else {
            round2(stats.null_count as f64 / stats.total_count as f64 * 100.0)
        };

        ClassificationResult {
            name: clean_field_name(column.display_name()),
            display_name: column.display_name().to_string(),
            data_type: column.kind().label().to_string(),
            field_type,
            sample_values,
            null_count: stats.null_count,
            unique_count: stats.unique_count,
            total_count: stats.total_count,
            null_percentage,
            categories,
        }
    }

    /// First-match-wins over the rule table. The order is load-bearing:
    /// a column of only 0s and 1s resolves as checkbox before the
    /// numeric rule can see it.
    pub fn field_type(&self, stats: &ColumnStatistics) -> FieldType {
        if stats.non_null_count == 0 {
            return FieldType::Text;
        }

        let rules = [
            (FieldType::Checkbox, stats.boolean_coercible),
            (FieldType::Number, stats.is_numeric),
            (FieldType::Date, stats.is_datetime),
            (
                FieldType::Email,
                stats.contains_at && stats.email_ratio > EMAIL_MATCH_RATIO,
            ),
            (
                FieldType::Select,
                stats.unique_ratio < self.config.select_unique_ratio
                    && stats.unique_count <= self.config.select_max_categories,
            ),
            (FieldType::Textarea, stats.mean_length > TEXTAREA_MEAN_LENGTH),
        ];

        rules
            .iter()
            .find(|(_, matched)| *matched)
            .map(|(field_type, _)| *field_type)
            .unwrap_or(FieldType::Text)
    }
}

/// Distinct non-null values in sorted order. Numeric columns sort
/// numerically; everything else sorts by stringified form.
fn sorted_categories(column: &Column) -> Vec<CellValue> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<CellValue> = column
        .non_null()
        .filter(|value| seen.insert(value.display()))
        .cloned()
        .collect();

    if column.kind().is_numeric() {
        distinct.sort_by(|a, b| {
            a.as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or(Ordering::Equal)
        });
    } else {
        distinct.sort_by_key(|value| value.display());
    }
    distinct
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str, values: &[&str]) -> Column {
        Column::new(
            name,
            values
                .iter()
                .map(|s| CellValue::Text(s.to_string()))
                .collect(),
        )
    }

    fn classify(column: &Column) -> ClassificationResult {
        TypeClassifier::default().classify(column)
    }

    #[test]
    fn empty_column_is_text_with_no_samples() {
        let column = Column::new("Notes", vec![CellValue::Null, CellValue::Null]);
        let result = classify(&column);
        assert_eq!(result.field_type, FieldType::Text);
        assert!(result.sample_values.is_empty());
        assert!(result.categories.is_none());
        assert_eq!(result.null_percentage, 100.0);
    }

    #[test]
    fn zero_row_column_reports_zero_null_percentage() {
        let result = classify(&Column::new("Empty", vec![]));
        assert_eq!(result.field_type, FieldType::Text);
        assert_eq!(result.total_count, 0);
        assert_eq!(result.null_percentage, 0.0);
    }

    #[test]
    fn bool_literal_mix_is_checkbox() {
        let column = Column::new(
            "Active",
            vec![
                CellValue::Bool(true),
                CellValue::Text("false".to_string()),
                CellValue::Text("True".to_string()),
                CellValue::Int(0),
            ],
        );
        assert_eq!(classify(&column).field_type, FieldType::Checkbox);
    }

    #[test]
    fn zero_one_column_is_checkbox_not_number() {
        // rule order tie-break: boolean coercion runs before the numeric rule
        let column = Column::new(
            "Flag",
            vec![CellValue::Int(0), CellValue::Int(1), CellValue::Int(1)],
        );
        assert_eq!(classify(&column).field_type, FieldType::Checkbox);
    }

    #[test]
    fn numeric_columns_are_number_regardless_of_storage() {
        let ints = Column::new("Age", (18i64..30).map(CellValue::Int).collect());
        assert_eq!(classify(&ints).field_type, FieldType::Number);

        let floats = Column::new(
            "Score",
            vec![CellValue::Float(1.5), CellValue::Float(2.25), CellValue::Float(3.75)],
        );
        assert_eq!(classify(&floats).field_type, FieldType::Number);
    }

    #[test]
    fn repeating_numeric_values_stay_number_over_select() {
        // 10 values, 3 unique, ratio 0.3: numeric check precedes select
        let column = Column::new(
            "Code",
            [1, 2, 3, 1, 2, 1, 2, 3, 1, 1]
                .into_iter()
                .map(CellValue::Int)
                .collect(),
        );
        assert_eq!(classify(&column).field_type, FieldType::Number);
    }

    #[test]
    fn date_strings_classify_as_date() {
        let column = text_column("Start", &["2024-01-01", "2024-02-15", "2024-03-30"]);
        assert_eq!(classify(&column).field_type, FieldType::Date);
    }

    #[test]
    fn native_datetime_column_is_date() {
        use chrono::NaiveDate;
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let column = Column::new("When", vec![CellValue::DateTime(dt)]);
        assert_eq!(classify(&column).field_type, FieldType::Date);
    }

    #[test]
    fn majority_email_column_is_email() {
        // 4 of 5 match the pattern: 80% > 50%
        let column = text_column(
            "Contact",
            &["a@x.com", "b@y.com", "c@z.com", "not-email", "d@w.com"],
        );
        assert_eq!(classify(&column).field_type, FieldType::Email);
    }

    #[test]
    fn minority_email_column_is_not_email() {
        let column = text_column("Contact", &["a@x.com", "plain", "words", "here"]);
        assert_ne!(classify(&column).field_type, FieldType::Email);
    }

    #[test]
    fn low_cardinality_column_is_select_with_sorted_categories() {
        // 40 values, 3 unique: ratio 0.075 < 0.1
        let mut values = Vec::new();
        for _ in 0..20 {
            values.push("Red");
        }
        for _ in 0..12 {
            values.push("Blue");
        }
        for _ in 0..8 {
            values.push("Green");
        }
        let result = classify(&text_column("Color", &values));
        assert_eq!(result.field_type, FieldType::Select);
        let categories = result.categories.expect("select carries categories");
        assert_eq!(
            categories,
            vec![
                CellValue::Text("Blue".to_string()),
                CellValue::Text("Green".to_string()),
                CellValue::Text("Red".to_string()),
            ]
        );
    }

    #[test]
    fn moderate_cardinality_is_not_select() {
        // 8 values, 3 unique: ratio 0.375 >= 0.1, falls through to text
        let column = text_column(
            "Color",
            &["Red", "Blue", "Red", "Green", "Blue", "Red", "Green", "Blue"],
        );
        let result = classify(&column);
        assert_eq!(result.field_type, FieldType::Text);
        assert!(result.categories.is_none());
    }

    #[test]
    fn all_unique_short_strings_are_text() {
        let values: Vec<String> = (0..25).map(|i| format!("item-{}", i)).collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        assert_eq!(classify(&text_column("Id", &refs)).field_type, FieldType::Text);
    }

    #[test]
    fn long_unique_strings_are_textarea() {
        let long = "x".repeat(150);
        let values: Vec<CellValue> = ["a", "b", "c"]
            .iter()
            .map(|suffix| CellValue::Text(format!("{}{}", long, suffix)))
            .collect();
        let column = Column::new("Description", values);
        assert_eq!(classify(&column).field_type, FieldType::Textarea);
    }

    #[test]
    fn select_thresholds_are_overridable() {
        let permissive = TypeClassifier::new(ClassifierConfig {
            select_unique_ratio: 0.5,
            select_max_categories: 20,
        });
        let column = text_column(
            "Color",
            &["Red", "Blue", "Red", "Green", "Blue", "Red", "Green", "Blue"],
        );
        let result = permissive.classify(&column);
        assert_eq!(result.field_type, FieldType::Select);
        assert!(result.categories.is_some());
    }

    #[test]
    fn numeric_select_categories_sort_numerically() {
        let select_friendly = TypeClassifier::new(ClassifierConfig {
            select_unique_ratio: 1.1,
            select_max_categories: 20,
        });
        // disable the boolean/numeric short-circuit by mixing in a word
        let column = Column::new(
            "Rank",
            vec![
                CellValue::Int(10),
                CellValue::Int(2),
                CellValue::Text("n/a".to_string()),
            ],
        );
        let result = select_friendly.classify(&column);
        assert_eq!(result.field_type, FieldType::Select);
        // mixed column sorts by stringified form
        let categories = result.categories.unwrap();
        assert_eq!(categories[0].display(), "10");

        let numeric = Column::new("Rank", vec![CellValue::Int(10), CellValue::Int(2)]);
        let sorted = sorted_categories(&numeric);
        assert_eq!(sorted, vec![CellValue::Int(2), CellValue::Int(10)]);
    }

    #[test]
    fn sample_values_keep_original_order_and_cap_at_five() {
        let column = Column::new(
            "Name",
            vec![
                CellValue::Null,
                CellValue::Text("first".to_string()),
                CellValue::Text("second".to_string()),
                CellValue::Null,
                CellValue::Text("third".to_string()),
                CellValue::Text("fourth".to_string()),
                CellValue::Text("fifth".to_string()),
                CellValue::Text("sixth".to_string()),
            ],
        );
        let result = classify(&column);
        assert_eq!(result.sample_values.len(), 5);
        assert_eq!(result.sample_values[0].display(), "first");
        assert_eq!(result.sample_values[4].display(), "fifth");
    }

    #[test]
    fn null_percentage_rounds_to_two_decimals() {
        let column = Column::new(
            "Maybe",
            vec![
                CellValue::Null,
                CellValue::Text("a".to_string()),
                CellValue::Text("b".to_string()),
            ],
        );
        let result = classify(&column);
        assert_eq!(result.null_percentage, 33.33);
        assert!(result.null_percentage >= 0.0 && result.null_percentage <= 100.0);
    }

    #[test]
    fn result_carries_cleaned_and_display_names() {
        let result = classify(&text_column("Employee ID#", &["E1", "E2"]));
        assert_eq!(result.name, "employee_id");
        assert_eq!(result.display_name, "Employee ID#");
        assert_eq!(result.data_type, "string");
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let result = classify(&text_column("Employee ID#", &["E1"]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["fieldType"], "text");
        assert_eq!(json["displayName"], "Employee ID#");
        assert_eq!(json["nullPercentage"], 0.0);
        assert!(json["categories"].is_null());
    }
}
