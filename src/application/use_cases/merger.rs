use std::collections::HashMap;

use tracing::debug;

use crate::domain::dataset::{CellValue, Table, UnifiedDataset};
use crate::domain::error::{AppError, Result};

/// Concatenate tables into one dataset over the union of their columns.
///
/// The column set is fixed before any row is copied: columns appear in
/// first-seen order across the tables, and each row gets `Null` for columns
/// its table did not have. Rows keep their input order. An empty input is
/// `EmptyDataset`.
pub fn merge_tables(tables: Vec<Table>) -> Result<UnifiedDataset> {
    if tables.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let mut columns: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for table in &tables {
        for name in table.columns() {
            if !positions.contains_key(name) {
                positions.insert(name.clone(), columns.len());
                columns.push(name.clone());
            }
        }
    }

    let width = columns.len();
    let total_rows: usize = tables.iter().map(Table::row_count).sum();
    let mut rows = Vec::with_capacity(total_rows);
    let table_count = tables.len();

    for table in tables {
        let (table_columns, table_rows) = table.into_parts();
        let mapping: Vec<usize> = table_columns.iter().map(|name| positions[name]).collect();

        for row in table_rows {
            let mut unified = vec![CellValue::Null; width];
            for (cell, &target) in row.into_iter().zip(&mapping) {
                unified[target] = cell;
            }
            rows.push(unified);
        }
    }

    debug!(tables = table_count, columns = width, rows = rows.len(), "Merged tables");
    Ok(UnifiedDataset::new(columns, rows))
}
