// ============================================================
// CELL VALUES
// ============================================================
// Nullable scalar cells and per-column type inference

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strings read as missing values, matching the usual CSV/spreadsheet conventions.
pub const NULL_SENTINELS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A",
    "#N/A N/A", "#NA", "<NA>", "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN",
];

/// A single scalar cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Parse a raw text cell: null sentinels, then integers, floats, booleans, text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NULL_SENTINELS.contains(&trimmed) {
            return CellValue::Null;
        }

        if let Ok(value) = trimmed.parse::<i64>() {
            return CellValue::Integer(value);
        }

        // Spellings such as `NAN` that are not null markers stay text
        if let Ok(value) = trimmed.parse::<f64>() {
            if !value.is_nan() {
                return CellValue::Float(value);
            }
        }

        match trimmed {
            "True" | "TRUE" | "true" => CellValue::Bool(true),
            "False" | "FALSE" | "false" => CellValue::Bool(false),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    /// A cell that is already typed as text: only null sentinels are recognised.
    pub fn parse_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NULL_SENTINELS.contains(&trimmed) {
            CellValue::Null
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    /// NaN is a missing value, not a number.
    pub fn float(value: f64) -> Self {
        if value.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(value)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }

    /// Canonical text used when counting values.
    ///
    /// `Integer(5)`, `Float(5.0)` and `Text("5")` share the key `"5"`, so the
    /// same value read from differently typed files is counted together.
    pub fn key(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Convert a non-null cell into its text form.
    pub fn into_text(self) -> Self {
        match self {
            CellValue::Null | CellValue::Text(_) => self,
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(value) => write!(f, "{}", value),
            CellValue::Float(value) => write!(f, "{}", value),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// Inferred type of a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every non-null cell is a number
    Numeric,

    /// At least one non-null cell is not a number
    Text,

    /// No non-null cells at all
    Empty,
}

impl ColumnKind {
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut kind = ColumnKind::Empty;
        for cell in cells {
            if cell.is_null() {
                continue;
            }
            if !cell.is_numeric() {
                return ColumnKind::Text;
            }
            kind = ColumnKind::Numeric;
        }
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(CellValue::parse(" 42 "), CellValue::Integer(42));
        assert_eq!(CellValue::parse("7.5"), CellValue::Float(7.5));
        assert_eq!(CellValue::parse("TRUE"), CellValue::Bool(true));
        assert_eq!(
            CellValue::parse("CVE-2024-0001"),
            CellValue::Text("CVE-2024-0001".to_string())
        );
    }

    #[test]
    fn test_unlisted_nan_spelling_is_text() {
        assert_eq!(CellValue::parse("NAN"), CellValue::Text("NAN".to_string()));
        assert_eq!(CellValue::parse("-Infinity"), CellValue::Float(f64::NEG_INFINITY));
    }

    #[test]
    fn test_null_sentinels() {
        for raw in ["", "  ", "NA", "N/A", "null", "NaN", "#N/A", "None"] {
            assert!(CellValue::parse(raw).is_null(), "{raw:?} should be null");
        }
        assert!(CellValue::float(f64::NAN).is_null());
    }

    #[test]
    fn test_key_unifies_numeric_and_text() {
        assert_eq!(CellValue::Integer(5).key(), Some("5".to_string()));
        assert_eq!(CellValue::Float(5.0).key(), Some("5".to_string()));
        assert_eq!(CellValue::Text("5".to_string()).key(), Some("5".to_string()));
        assert_eq!(CellValue::Null.key(), None);
    }

    #[test]
    fn test_infer_column_kind() {
        let numeric = [CellValue::Integer(1), CellValue::Null, CellValue::Float(2.5)];
        let mixed = [CellValue::Integer(1), CellValue::Text("x".to_string())];
        let empty = [CellValue::Null, CellValue::Null];

        assert_eq!(ColumnKind::infer(&numeric), ColumnKind::Numeric);
        assert_eq!(ColumnKind::infer(&mixed), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(&empty), ColumnKind::Empty);
    }
}
