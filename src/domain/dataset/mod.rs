// ============================================================
// DATASET DOMAIN LAYER
// ============================================================
// Tables, cells and the unified dataset built from them
// No I/O, no async

mod cell;
mod load_failure;
mod loader_options;
mod source_file;
mod table;
mod unified;

pub use cell::{CellValue, ColumnKind};
pub use load_failure::LoadFailure;
pub use loader_options::LoaderOptions;
pub use source_file::{SourceFile, SourceKind};
pub use table::{normalize_headers, Table, TableOrigin};
pub use unified::{Column, UnifiedDataset};
