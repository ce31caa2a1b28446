// ============================================================
// TABLE
// ============================================================
// One parsed CSV file or spreadsheet sheet

use super::{CellValue, ColumnKind};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Where a table came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOrigin {
    pub path: PathBuf,

    /// Sheet name for spreadsheet tables
    pub sheet: Option<String>,
}

impl TableOrigin {
    pub fn file(path: PathBuf) -> Self {
        Self { path, sheet: None }
    }

    pub fn sheet(path: PathBuf, sheet: impl Into<String>) -> Self {
        Self {
            path,
            sheet: Some(sheet.into()),
        }
    }
}

impl fmt::Display for TableOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(sheet) => write!(f, "{} [{}]", self.path.display(), sheet),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// A fixed set of columns and rows aligned to them.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    origin: TableOrigin,
    columns: Vec<String>,
    kinds: Vec<ColumnKind>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table from typed cells, aligning every row to the header
    /// width and inferring each column's kind. In a column that is not
    /// purely numeric, numeric and boolean cells are kept as their text.
    pub fn new(origin: TableOrigin, columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self::build(origin, columns, rows, |cell, _, _| cell.into_text())
    }

    /// Build a table from raw text fields.
    ///
    /// Kinds are inferred from the parsed cells. A column that ends up as
    /// text is rebuilt from the raw fields, so `7.10`, `TRUE` or `1e3` keep
    /// their spelling instead of a re-rendered number.
    pub fn from_text(origin: TableOrigin, columns: Vec<String>, raw_rows: Vec<Vec<String>>) -> Self {
        let parsed: Vec<Vec<CellValue>> = raw_rows
            .iter()
            .map(|row| row.iter().map(|raw| CellValue::parse(raw)).collect())
            .collect();

        Self::build(origin, columns, parsed, |_, row, col| {
            raw_rows[row]
                .get(col)
                .map_or(CellValue::Null, |raw| CellValue::parse_text(raw))
        })
    }

    fn build<F>(origin: TableOrigin, columns: Vec<String>, rows: Vec<Vec<CellValue>>, mut as_text: F) -> Self
    where
        F: FnMut(CellValue, usize, usize) -> CellValue,
    {
        let width = columns.len();
        let mut rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();

        let kinds: Vec<ColumnKind> = (0..width)
            .map(|idx| ColumnKind::infer(rows.iter().map(|row| &row[idx])))
            .collect();

        for (col, kind) in kinds.iter().enumerate() {
            if *kind != ColumnKind::Text {
                continue;
            }
            for (row_idx, row) in rows.iter_mut().enumerate() {
                let cell = std::mem::replace(&mut row[col], CellValue::Null);
                row[col] = as_text(cell, row_idx, col);
            }
        }

        Self {
            origin,
            columns,
            kinds,
            rows,
        }
    }

    pub fn origin(&self) -> &TableOrigin {
        &self.origin
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .position(|column| column == name)
            .map(|idx| self.kinds[idx])
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<CellValue>>) {
        (self.columns, self.rows)
    }
}

/// Clean raw header cells: blanks become `Unnamed: <index>` and repeated
/// names get `.1`, `.2`, ... suffixes so every column name is unique.
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut headers = Vec::new();

    for (idx, name) in raw.into_iter().enumerate() {
        let trimmed = name.as_ref().trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            trimmed.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        headers.push(candidate);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn test_rows_are_padded_to_header_width() {
        let table = Table::new(
            TableOrigin::file(PathBuf::from("a.csv")),
            vec!["CVE".to_string(), "Severity".to_string()],
            vec![vec![text("CVE-1")]],
        );

        assert_eq!(table.rows()[0], vec![text("CVE-1"), CellValue::Null]);
        assert_eq!(table.column_kind("Severity"), Some(ColumnKind::Empty));
    }

    #[test]
    fn test_mixed_column_degrades_to_text() {
        let table = Table::new(
            TableOrigin::file(PathBuf::from("a.csv")),
            vec!["Port".to_string(), "Score".to_string()],
            vec![
                vec![CellValue::Integer(443), CellValue::Float(9.8)],
                vec![text("any"), CellValue::Integer(5)],
            ],
        );

        assert_eq!(table.column_kind("Port"), Some(ColumnKind::Text));
        assert_eq!(table.column_kind("Score"), Some(ColumnKind::Numeric));
        assert_eq!(table.rows()[0][0], text("443"));
        assert_eq!(table.rows()[0][1], CellValue::Float(9.8));
    }

    #[test]
    fn test_text_column_keeps_raw_spelling() {
        let raw = ["OpenSSL", "7.10", "7.1", "Infinity", "NAN", "TRUE", "1e3"];
        let table = Table::from_text(
            TableOrigin::file(PathBuf::from("a.csv")),
            vec!["Software Name".to_string()],
            raw.iter().map(|value| vec![value.to_string()]).collect(),
        );

        assert_eq!(table.column_kind("Software Name"), Some(ColumnKind::Text));
        let cells: Vec<&CellValue> = table.rows().iter().map(|row| &row[0]).collect();
        let expected: Vec<CellValue> = raw.iter().map(|value| text(value)).collect();
        assert_eq!(cells, expected.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_numeric_text_column_keeps_parsed_values() {
        let table = Table::from_text(
            TableOrigin::file(PathBuf::from("a.csv")),
            vec!["CVSS".to_string(), "Note".to_string()],
            vec![
                vec!["7.10".to_string(), "N/A".to_string()],
                vec!["inf".to_string(), "7.1".to_string()],
                vec!["NA".to_string()],
            ],
        );

        assert_eq!(table.column_kind("CVSS"), Some(ColumnKind::Numeric));
        assert_eq!(table.column_kind("Note"), Some(ColumnKind::Numeric));
        assert_eq!(table.rows()[0][0], CellValue::Float(7.1));
        assert_eq!(table.rows()[1][0], CellValue::Float(f64::INFINITY));
        assert_eq!(table.rows()[2], vec![CellValue::Null, CellValue::Null]);
    }

    #[test]
    fn test_normalize_headers() {
        let headers = normalize_headers(["CVE", "", "CVE", " Severity ", "CVE"]);
        assert_eq!(
            headers,
            vec!["CVE", "Unnamed: 1", "CVE.1", "Severity", "CVE.2"]
        );
    }
}
