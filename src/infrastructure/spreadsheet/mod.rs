// ============================================================
// SPREADSHEET INFRASTRUCTURE LAYER
// ============================================================
// Workbook reading (xls, xlsx, xlsm, ods) through calamine

mod workbook_parser;

pub use workbook_parser::{table_from_range, WorkbookParser};
