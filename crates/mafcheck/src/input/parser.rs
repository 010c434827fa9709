//! Tab-delimited MAF parser.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{MafCheckError, Result};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Lines starting with this byte are comments.
    pub comment: u8,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            comment: b'#',
            max_rows: None,
        }
    }
}

/// Parses mutation annotation files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| MafCheckError::io(path, e))?;
        let size_bytes = file
            .metadata()
            .map_err(|e| MafCheckError::io(path, e))?
            .len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| MafCheckError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_bytes(&contents)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed mutation file"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            table.preamble_lines,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let preamble_lines = count_preamble_lines(bytes, self.config.comment);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .comment(Some(self.config.comment))
            .has_headers(true)
            .quoting(false)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(MafCheckError::EmptyData("No header row found".to_string()));
        }

        let mut rows = Vec::new();
        let mut line_numbers = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(preamble_lines + row_idx + 2);
            rows.push(record.iter().map(str::to_string).collect());
            line_numbers.push(line);
        }

        Ok(DataTable::with_line_numbers(
            headers,
            rows,
            line_numbers,
            preamble_lines,
        ))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Count leading comment lines (e.g. `#version 2.4`).
fn count_preamble_lines(bytes: &[u8], comment: u8) -> usize {
    bytes
        .split(|&b| b == b'\n')
        .take_while(|line| line.first() == Some(&comment))
        .count()
}
