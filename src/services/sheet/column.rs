use chrono::NaiveDateTime;
use serde::Serialize;

/// A single spreadsheet cell, decoded into its storage kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String form used for uniqueness, pattern matching and length
    /// statistics. Integral floats render without a fractional part so
    /// `1.0` and `1` compare equal.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    f.to_string()
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn approx_size(&self) -> usize {
        let heap = match self {
            CellValue::Text(s) => s.len(),
            _ => 0,
        };
        std::mem::size_of::<Self>() + heap
    }
}

/// Dominant storage kind of a column, inferred from its non-null cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Empty,
    Boolean,
    Integer,
    Real,
    DateTime,
    Text,
    Mixed,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Empty => "empty",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Integer | ColumnKind::Real => "numeric",
            ColumnKind::DateTime => "date",
            ColumnKind::Text | ColumnKind::Mixed => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Real)
    }
}

/// One named spreadsheet column: an ordered, immutable sequence of cells.
#[derive(Debug, Clone)]
pub struct Column {
    display_name: String,
    values: Vec<CellValue>,
}

impl Column {
    pub fn new(display_name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            display_name: display_name.into(),
            values,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn non_null(&self) -> impl Iterator<Item = &CellValue> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Infers the dominant storage kind. A column mixing integers and
    /// floats counts as real; any other mix of kinds is `Mixed`.
    pub fn kind(&self) -> ColumnKind {
        let mut bools = 0usize;
        let mut ints = 0usize;
        let mut floats = 0usize;
        let mut texts = 0usize;
        let mut datetimes = 0usize;
        let mut non_null = 0usize;

        for value in self.non_null() {
            non_null += 1;
            match value {
                CellValue::Bool(_) => bools += 1,
                CellValue::Int(_) => ints += 1,
                CellValue::Float(_) => floats += 1,
                CellValue::Text(_) => texts += 1,
                CellValue::DateTime(_) => datetimes += 1,
                CellValue::Null => {}
            }
        }

        match non_null {
            0 => ColumnKind::Empty,
            n if bools == n => ColumnKind::Boolean,
            n if ints == n => ColumnKind::Integer,
            n if ints + floats == n => ColumnKind::Real,
            n if datetimes == n => ColumnKind::DateTime,
            n if texts == n => ColumnKind::Text,
            _ => ColumnKind::Mixed,
        }
    }

    pub fn approx_size(&self) -> usize {
        self.values.iter().map(CellValue::approx_size).sum()
    }
}
