//! Known tumor sample identifiers.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{MafCheckError, Result};

const SAMPLE_ID_COLUMN: &str = "SAMPLE_ID";

/// Read-only set of sample ids defined by the clinical data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleIdSet {
    ids: HashSet<String>,
}

impl SampleIdSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Load sample ids from a file.
    ///
    /// Accepts a clinical sample file (`#` metadata lines, then a
    /// tab-delimited header with a `SAMPLE_ID` column) or a plain list with
    /// one id per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| MafCheckError::io(path, e))?;
        let set = Self::parse(&contents)?;
        tracing::info!(path = %path.display(), samples = set.len(), "loaded sample ids");
        Ok(set)
    }

    /// Parse sample ids from text.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents
            .lines()
            .filter(|l| !l.starts_with('#'))
            .filter(|l| !l.trim().is_empty());

        let Some(first) = lines.next() else {
            return Err(MafCheckError::EmptyData(
                "sample file contains no sample ids".to_string(),
            ));
        };

        let header: Vec<&str> = first.split('\t').map(str::trim).collect();
        let ids: HashSet<String> = match header.iter().position(|h| *h == SAMPLE_ID_COLUMN) {
            Some(idx) => lines
                .filter_map(|line| line.split('\t').nth(idx))
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect(),
            None if header.len() == 1 => std::iter::once(first)
                .chain(lines)
                .map(str::trim)
                .map(str::to_string)
                .collect(),
            None => {
                return Err(MafCheckError::Config(format!(
                    "sample file header has no {} column",
                    SAMPLE_ID_COLUMN
                )));
            }
        };

        Ok(Self { ids })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SampleIdSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clinical_sample_file() {
        let data = "#Patient Identifier\tSample Identifier\n\
                    #Patient id\tSample id\n\
                    #STRING\tSTRING\n\
                    #1\t1\n\
                    PATIENT_ID\tSAMPLE_ID\n\
                    P-1\tS-1\n\
                    P-1\tS-2\n";
        let set = SampleIdSet::parse(data).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("S-2"));
        assert!(!set.contains("P-1"));
    }

    #[test]
    fn test_parse_plain_list() {
        let set = SampleIdSet::parse("S-1\nS-2\n\nS-3\n").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("S-1"));
    }

    #[test]
    fn test_parse_list_with_header() {
        let set = SampleIdSet::parse("SAMPLE_ID\nS-1\n").unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.contains(SAMPLE_ID_COLUMN));
    }

    #[test]
    fn test_parse_missing_column() {
        assert!(SampleIdSet::parse("PATIENT_ID\tAGE\nP-1\t40\n").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(SampleIdSet::parse("#only comments\n").is_err());
    }
}
