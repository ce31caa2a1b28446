// ============================================================
// UNIFIED DATASET
// ============================================================
// Column-union concatenation of every loaded table

use super::CellValue;
use std::collections::HashMap;

/// A single logical table over all inputs.
///
/// `columns` is the ordered union of all table columns (first-seen order);
/// every row has exactly `columns.len()` cells, `Null` where the source
/// table lacked the column.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedDataset {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl UnifiedDataset {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        Self {
            columns,
            index,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a column by name; `None` when no input table had it.
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        self.index.get(name).map(|&idx| Column {
            dataset: self,
            idx,
        })
    }
}

/// Borrowed view of one dataset column
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    dataset: &'a UnifiedDataset,
    idx: usize,
}

impl<'a> Column<'a> {
    pub fn values(&self) -> impl Iterator<Item = &'a CellValue> + 'a {
        let dataset = self.dataset;
        let idx = self.idx;
        dataset.rows.iter().map(move |row| &row[idx])
    }
}
