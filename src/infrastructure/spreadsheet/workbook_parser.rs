use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use tracing::debug;

use crate::domain::dataset::{normalize_headers, CellValue, Table, TableOrigin};
use crate::domain::error::{AppError, Result};

/// Reads every sheet of a workbook as its own table
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookParser;

impl WorkbookParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse all sheets, in workbook order. Any unreadable sheet fails the whole file.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Table>> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| AppError::ParseError(format!("Failed to open workbook: {}", e)))?;

        let sheet_names = workbook.sheet_names();
        let mut tables = Vec::with_capacity(sheet_names.len());

        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                AppError::ParseError(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;

            let table = table_from_range(TableOrigin::sheet(path.to_path_buf(), &sheet_name), &range);
            debug!(
                sheet = %sheet_name,
                rows = table.row_count(),
                columns = table.columns().len(),
                "Parsed sheet"
            );
            tables.push(table);
        }

        Ok(tables)
    }
}

/// Convert a sheet range into a table, using its first row as the header
pub fn table_from_range(origin: TableOrigin, range: &Range<Data>) -> Table {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return Table::new(origin, Vec::new(), Vec::new());
    };

    let columns = normalize_headers(header_row.iter().map(header_text));
    let body = rows
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>())
        .filter(|row: &Vec<CellValue>| row.iter().any(|cell| !cell.is_null()))
        .collect();

    Table::new(origin, columns, body)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(value) => CellValue::Integer(*value),
        Data::Float(value) => CellValue::float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::String(value) => CellValue::parse_text(value),
        other => other
            .as_datetime()
            .map(|dt| CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or_else(|| CellValue::Text(other.to_string())),
    }
}
