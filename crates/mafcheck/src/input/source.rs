//! Data source abstraction and metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One parsed row keyed by column name, in header order.
pub type Row = IndexMap<String, String>;

/// Tokens that mean "no value" in mutation files (compared case-insensitively).
const NULL_TOKENS: &[&str] = &[
    "",
    "na",
    "n/a",
    "null",
    ".",
    "?",
    "[not available]",
    "[not applicable]",
    "[pending]",
    "[discrepancy]",
    "[completed]",
    "[null]",
];

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of `#` lines before the header.
    pub preamble_lines: usize,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        preamble_lines: usize,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            preamble_lines,
            row_count,
            column_count,
            read_at: Utc::now(),
        }
    }
}

/// Represents parsed tabular data.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order), exactly as many fields as the
    /// file line had.
    pub rows: Vec<Vec<String>>,
    /// 1-based file line of each row.
    pub line_numbers: Vec<usize>,
    /// Number of `#` lines before the header.
    pub preamble_lines: usize,
}

impl DataTable {
    /// Create a new data table. Line numbers are derived from the preamble
    /// length assuming one line per row.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, preamble_lines: usize) -> Self {
        let first = preamble_lines + 2;
        let line_numbers = (first..first + rows.len()).collect();
        Self {
            headers,
            rows,
            line_numbers,
            preamble_lines,
        }
    }

    /// Create a table with explicit line numbers (one per row).
    pub fn with_line_numbers(
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        line_numbers: Vec<usize>,
        preamble_lines: usize,
    ) -> Self {
        Self {
            headers,
            rows,
            line_numbers,
            preamble_lines,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column is present in the header.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// File line number of a row.
    pub fn line_number(&self, row: usize) -> usize {
        self.line_numbers
            .get(row)
            .copied()
            .unwrap_or(self.preamble_lines + row + 2)
    }

    /// Build a column-name keyed row. Short rows are padded with empty
    /// values; extra fields are dropped. The first occurrence of a duplicated
    /// header wins.
    pub fn row_map(&self, row: usize) -> Option<Row> {
        let values = self.rows.get(row)?;
        let mut map = Row::with_capacity(self.headers.len());
        for (idx, header) in self.headers.iter().enumerate() {
            let value = values.get(idx).cloned().unwrap_or_default();
            map.entry(header.clone()).or_insert(value);
        }
        Some(map)
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        NULL_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec!["1".into(), "2".into(), "3".into()],
                vec!["4".into()],
            ],
            1,
        )
    }

    #[test]
    fn test_row_map_pads_short_rows() {
        let t = table();
        let row = t.row_map(1).unwrap();
        assert_eq!(row.get("a").map(String::as_str), Some("4"));
        assert_eq!(row.get("c").map(String::as_str), Some(""));
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_line_numbers_include_preamble_and_header() {
        let t = table();
        assert_eq!(t.line_number(0), 3);
        assert_eq!(t.line_number(1), 4);
    }

    #[test]
    fn test_is_null_value() {
        assert!(DataTable::is_null_value(""));
        assert!(DataTable::is_null_value("NA"));
        assert!(DataTable::is_null_value("n/a"));
        assert!(DataTable::is_null_value("[Not Available]"));
        assert!(DataTable::is_null_value(" . "));
        assert!(!DataTable::is_null_value("-"));
        assert!(!DataTable::is_null_value("unknown"));
        assert!(!DataTable::is_null_value("A"));
    }
}
