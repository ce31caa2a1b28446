use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceKind {
    Csv,
    Spreadsheet,
    Unsupported,
}

impl SourceKind {
    /// Classify by lowercase file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("csv") => SourceKind::Csv,
            Some("xls" | "xlsx" | "xlsm" | "ods") => SourceKind::Spreadsheet,
            _ => SourceKind::Unsupported,
        }
    }
}

/// A discovered input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        let kind = SourceKind::from_path(&path);
        Self { path, kind }
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(SourceKind::from_path(Path::new("scan.csv")), SourceKind::Csv);
        assert_eq!(SourceKind::from_path(Path::new("SCAN.CSV")), SourceKind::Csv);
        assert_eq!(
            SourceKind::from_path(Path::new("hosts.XLSX")),
            SourceKind::Spreadsheet
        );
        assert_eq!(
            SourceKind::from_path(Path::new("legacy.xls")),
            SourceKind::Spreadsheet
        );
        assert_eq!(
            SourceKind::from_path(Path::new("notes.txt")),
            SourceKind::Unsupported
        );
        assert_eq!(
            SourceKind::from_path(Path::new("no_extension")),
            SourceKind::Unsupported
        );
    }
}
