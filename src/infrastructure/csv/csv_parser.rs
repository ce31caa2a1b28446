// ============================================================
// CSV PARSER
// ============================================================
// Parse one CSV file into one typed table

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use encoding_rs::Encoding;

use crate::domain::dataset::{normalize_headers, LoaderOptions, Table, TableOrigin};
use crate::domain::error::{AppError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV parser with encoding fallback
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Guess the delimiter from the content
    detect_delimiter: bool,

    /// Used for files that are not valid UTF-8
    fallback_encoding: Option<&'static Encoding>,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            detect_delimiter: false,
            fallback_encoding: None,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a parser from loader configuration
    pub fn from_options(options: &LoaderOptions) -> Result<Self> {
        let delimiter = u8::try_from(options.delimiter).map_err(|_| {
            AppError::ConfigError(format!(
                "CSV delimiter must be a single-byte character, got {:?}",
                options.delimiter
            ))
        })?;

        let mut parser = Self::new()
            .with_delimiter(delimiter)
            .with_delimiter_detection(options.detect_delimiter);

        if let Some(label) = &options.fallback_encoding {
            parser = parser.with_fallback_encoding(label)?;
        }

        Ok(parser)
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_delimiter_detection(mut self, detect: bool) -> Self {
        self.detect_delimiter = detect;
        self
    }

    /// Decode non-UTF-8 files with the encoding named by `label` (WHATWG labels)
    pub fn with_fallback_encoding(mut self, label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            AppError::ConfigError(format!("Unknown fallback encoding: {}", label))
        })?;
        self.fallback_encoding = Some(encoding);
        Ok(self)
    }

    /// Parse a CSV file into a table
    pub fn parse_file(&self, path: &Path) -> Result<Table> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::ParseError(format!("Failed to read file: {}", e)))?;
        let content = self.decode(bytes)?;

        self.parse_content(&content, TableOrigin::file(path.to_path_buf()))
    }

    /// Parse CSV content from string. The first record is the header.
    pub fn parse_content(&self, content: &str, origin: TableOrigin) -> Result<Table> {
        let delimiter = if self.detect_delimiter {
            Self::detect_delimiter(content)
        } else {
            self.delimiter
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true) // Short rows are padded below, long rows rejected
            .from_reader(content.as_bytes());

        let raw_headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if raw_headers.is_empty() {
            return Err(AppError::ParseError(
                "No columns to parse from file".to_string(),
            ));
        }

        let columns = normalize_headers(raw_headers.iter());
        let width = columns.len();
        let mut rows = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            if record.len() > width {
                let line = record
                    .position()
                    .map(|pos| pos.line())
                    .unwrap_or(index as u64 + 2);
                return Err(AppError::ParseError(format!(
                    "Expected {} fields in line {}, saw {}",
                    width,
                    line,
                    record.len()
                )));
            }

            // Blank line
            if record.len() <= 1 && record.iter().all(|field| field.is_empty()) {
                continue;
            }

            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Table::from_text(origin, columns, rows))
    }

    /// Strict UTF-8 first, then the configured fallback encoding
    fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        let bytes = if bytes.starts_with(UTF8_BOM) {
            bytes[UTF8_BOM.len()..].to_vec()
        } else {
            bytes
        };

        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(err) => match self.fallback_encoding {
                Some(encoding) => {
                    let (content, _, _) = encoding.decode(err.as_bytes());
                    Ok(content.into_owned())
                }
                None => Err(AppError::ParseError(format!(
                    "File is not valid UTF-8 (invalid byte at offset {})",
                    err.utf8_error().valid_up_to()
                ))),
            },
        }
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &candidates {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::{CellValue, ColumnKind};
    use std::path::PathBuf;

    fn origin() -> TableOrigin {
        TableOrigin::file(PathBuf::from("scan.csv"))
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn test_parse_simple_csv() {
        let content = "CVE,Severity,CVSS\nCVE-1,High,9.8\nCVE-2,Low,3";
        let table = CsvParser::new().parse_content(content, origin()).unwrap();

        assert_eq!(table.columns(), ["CVE", "Severity", "CVSS"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][0], text("CVE-1"));
        assert_eq!(table.rows()[1][2], CellValue::Integer(3));
        assert_eq!(table.column_kind("CVSS"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn test_mixed_column_keeps_each_spelling() {
        let content = "Software Name\nOpenSSL\n7.10\n7.1\nInfinity\nNAN\nTRUE\n1e3\n";
        let table = CsvParser::new().parse_content(content, origin()).unwrap();

        let values: Vec<String> = table.rows().iter().map(|row| row[0].to_string()).collect();
        assert_eq!(values, ["OpenSSL", "7.10", "7.1", "Infinity", "NAN", "TRUE", "1e3"]);
        assert_eq!(table.column_kind("Software Name"), Some(ColumnKind::Text));
    }

    #[test]
    fn test_short_rows_are_padded_and_blank_lines_skipped() {
        let content = "CVE,Severity\nCVE-1\n\nCVE-2,N/A\n";
        let table = CsvParser::new().parse_content(content, origin()).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0], vec![text("CVE-1"), CellValue::Null]);
        assert_eq!(table.rows()[1], vec![text("CVE-2"), CellValue::Null]);
    }

    #[test]
    fn test_long_rows_fail_the_file() {
        let content = "CVE,Severity\nCVE-1,High,extra\n";
        let err = CsvParser::new().parse_content(content, origin()).unwrap_err();
        assert!(matches!(err, AppError::ParseError(msg) if msg.contains("Expected 2 fields")));
    }

    #[test]
    fn test_empty_content_fails() {
        let err = CsvParser::new().parse_content("", origin()).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_header_cleanup() {
        let content = "CVE,,CVE\na,b,c";
        let table = CsvParser::new().parse_content(content, origin()).unwrap();
        assert_eq!(table.columns(), ["CVE", "Unnamed: 1", "CVE.1"]);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvParser::detect_delimiter("a\tb\nc\td"), b'\t');
    }

    #[test]
    fn test_semicolon_file_with_detection() {
        let content = "CVE;Severity\nCVE-1;High";
        let table = CsvParser::new()
            .with_delimiter_detection(true)
            .parse_content(content, origin())
            .unwrap();
        assert_eq!(table.columns(), ["CVE", "Severity"]);
    }

    #[test]
    fn test_invalid_utf8_without_fallback_fails() {
        let err = CsvParser::new()
            .decode(b"OS Name\nWindows\xA0Server\n".to_vec())
            .unwrap_err();
        assert!(matches!(err, AppError::ParseError(msg) if msg.contains("UTF-8")));
    }

    #[test]
    fn test_invalid_utf8_with_fallback_decodes() {
        let parser = CsvParser::new()
            .with_fallback_encoding("windows-1252")
            .unwrap();
        let content = parser.decode(b"Software Name\nCaf\xE9 POS\n".to_vec()).unwrap();
        assert_eq!(content, "Software Name\nCaf\u{e9} POS\n");
    }

    #[test]
    fn test_bom_is_stripped() {
        let content = CsvParser::new()
            .decode(b"\xEF\xBB\xBFCVE\nCVE-1".to_vec())
            .unwrap();
        assert!(content.starts_with("CVE"));
    }

    #[test]
    fn test_unknown_fallback_encoding_is_config_error() {
        let err = CsvParser::new()
            .with_fallback_encoding("klingon-8")
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
