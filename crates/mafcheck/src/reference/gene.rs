//! Gene reference table.
//!
//! Maps HUGO gene symbols (and aliases) to Entrez gene ids. The table is loaded
//! once before a validation run and only read afterwards, so it can be shared
//! by reference across worker threads.
//!
//! # Loading
//!
//! ```ignore
//! use mafcheck::reference::GeneReferenceTable;
//!
//! // Tab-delimited export with hugoGeneSymbol / entrezGeneId columns
//! let genes = GeneReferenceTable::from_tsv("genes.tsv")?;
//! assert_eq!(genes.resolve("tp53"), Some(7157));
//! ```

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MafCheckError, Result};

const SYMBOL_HEADERS: &[&str] = &["hugogenesymbol", "hugo_symbol", "symbol"];
const ENTREZ_HEADERS: &[&str] = &["entrezgeneid", "entrez_gene_id", "entrez_id"];
const ALIAS_HEADERS: &[&str] = &["aliases", "alias"];

/// Read-only lookup of gene identifiers.
pub trait GeneReference: Send + Sync {
    /// Resolve a symbol (case-insensitive) to its Entrez gene id.
    fn resolve(&self, symbol: &str) -> Option<i64>;

    /// Whether an Entrez gene id is known.
    fn contains(&self, entrez_gene_id: i64) -> bool;
}

/// A single gene in the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneReferenceEntry {
    /// Official HUGO symbol.
    pub hugo_symbol: String,
    /// NCBI Entrez gene id.
    pub entrez_gene_id: i64,
    /// Alternative symbols.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl GeneReferenceEntry {
    pub fn new(hugo_symbol: impl Into<String>, entrez_gene_id: i64) -> Self {
        Self {
            hugo_symbol: hugo_symbol.into(),
            entrez_gene_id,
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// Statistics about a loaded reference table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneReferenceStats {
    /// Number of genes.
    pub genes: usize,
    /// Number of distinct alias symbols.
    pub aliases: usize,
    /// Aliases shared by more than one gene (never used for resolution).
    pub ambiguous_aliases: usize,
    /// Data source description.
    pub source: String,
}

/// In-memory gene reference table.
#[derive(Debug, Clone, Default)]
pub struct GeneReferenceTable {
    /// Uppercase official symbol to Entrez id.
    symbols: HashMap<String, i64>,
    /// Uppercase alias to every Entrez id that claims it.
    aliases: HashMap<String, Vec<i64>>,
    /// All known Entrez ids.
    entrez_ids: HashSet<i64>,
    stats: GeneReferenceStats,
}

impl GeneReferenceTable {
    /// Build a table from entries.
    pub fn from_entries(entries: impl IntoIterator<Item = GeneReferenceEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            table.insert(entry);
        }
        table.stats.source = "in-memory".to_string();
        table.update_stats();
        table
    }

    /// Load a tab-delimited gene table.
    ///
    /// The header must name a symbol column (`hugoGeneSymbol`, `Hugo_Symbol`
    /// or `symbol`) and an Entrez column (`entrezGeneId`, `Entrez_Gene_Id` or
    /// `entrez_id`). An optional `aliases` column holds `|`- or
    /// `,`-separated symbols.
    pub fn from_tsv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| MafCheckError::io(path, e))?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| MafCheckError::io(path, e))?;

        let mut table = Self::from_tsv_bytes(&contents)?;
        table.stats.source = format!("file: {}", path.display());
        tracing::info!(
            path = %path.display(),
            genes = table.stats.genes,
            aliases = table.stats.aliases,
            "loaded gene reference table"
        );
        Ok(table)
    }

    /// Parse a tab-delimited gene table from bytes.
    pub fn from_tsv_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .comment(Some(b'#'))
            .quoting(false)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let find = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

        let symbol_idx = find(SYMBOL_HEADERS).ok_or_else(|| {
            MafCheckError::Reference("gene table has no symbol column".to_string())
        })?;
        let entrez_idx = find(ENTREZ_HEADERS).ok_or_else(|| {
            MafCheckError::Reference("gene table has no Entrez id column".to_string())
        })?;
        let alias_idx = find(ALIAS_HEADERS);

        let mut table = Self::default();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record?;
            let symbol = record.get(symbol_idx).unwrap_or("").trim();
            let entrez = record.get(entrez_idx).unwrap_or("").trim();
            if symbol.is_empty() || entrez.is_empty() {
                continue;
            }
            let entrez_gene_id = entrez.parse::<i64>().map_err(|_| {
                MafCheckError::Reference(format!(
                    "invalid Entrez id '{}' on data row {}",
                    entrez,
                    row_idx + 1
                ))
            })?;
            let aliases = alias_idx
                .and_then(|idx| record.get(idx))
                .map(|raw| {
                    raw.split(['|', ','])
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            table.insert(GeneReferenceEntry {
                hugo_symbol: symbol.to_string(),
                entrez_gene_id,
                aliases,
            });
        }

        if table.entrez_ids.is_empty() {
            return Err(MafCheckError::Reference(
                "gene table contains no genes".to_string(),
            ));
        }

        table.update_stats();
        Ok(table)
    }

    fn insert(&mut self, entry: GeneReferenceEntry) {
        self.entrez_ids.insert(entry.entrez_gene_id);
        self.symbols
            .insert(entry.hugo_symbol.to_uppercase(), entry.entrez_gene_id);
        for alias in entry.aliases {
            let ids = self.aliases.entry(alias.to_uppercase()).or_default();
            if !ids.contains(&entry.entrez_gene_id) {
                ids.push(entry.entrez_gene_id);
            }
        }
    }

    fn update_stats(&mut self) {
        self.stats.genes = self.entrez_ids.len();
        self.stats.aliases = self.aliases.len();
        self.stats.ambiguous_aliases = self.aliases.values().filter(|ids| ids.len() > 1).count();
    }

    /// Get statistics about the loaded table.
    pub fn stats(&self) -> &GeneReferenceStats {
        &self.stats
    }

    /// Number of genes in the table.
    pub fn len(&self) -> usize {
        self.entrez_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrez_ids.is_empty()
    }
}

impl GeneReference for GeneReferenceTable {
    fn resolve(&self, symbol: &str) -> Option<i64> {
        let key = symbol.trim().to_uppercase();
        if let Some(&id) = self.symbols.get(&key) {
            return Some(id);
        }
        match self.aliases.get(&key).map(Vec::as_slice) {
            Some([id]) => Some(*id),
            _ => None,
        }
    }

    fn contains(&self, entrez_gene_id: i64) -> bool {
        self.entrez_ids.contains(&entrez_gene_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> GeneReferenceTable {
        GeneReferenceTable::from_entries([
            GeneReferenceEntry::new("TP53", 7157).with_aliases(["P53", "LFS1"]),
            GeneReferenceEntry::new("KRAS", 3845).with_aliases(["KRAS2", "SHARED"]),
            GeneReferenceEntry::new("NRAS", 4893).with_aliases(["SHARED"]),
        ])
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let t = table();
        assert_eq!(t.resolve("tp53"), Some(7157));
        assert_eq!(t.resolve(" Kras "), Some(3845));
        assert_eq!(t.resolve("BRAF"), None);
    }

    #[test]
    fn test_resolve_alias() {
        let t = table();
        assert_eq!(t.resolve("p53"), Some(7157));
        assert_eq!(t.resolve("KRAS2"), Some(3845));
    }

    #[test]
    fn test_ambiguous_alias_does_not_resolve() {
        let t = table();
        assert_eq!(t.resolve("SHARED"), None);
        assert_eq!(t.stats().ambiguous_aliases, 1);
    }

    #[test]
    fn test_contains() {
        let t = table();
        assert!(t.contains(4893));
        assert!(!t.contains(1));
    }

    #[test]
    fn test_from_tsv_bytes() {
        let data = b"entrezGeneId\thugoGeneSymbol\ttype\taliases\n\
                     7157\tTP53\tprotein-coding\tP53|LFS1\n\
                     672\tBRCA1\tprotein-coding\t\n";
        let t = GeneReferenceTable::from_tsv_bytes(data).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.resolve("LFS1"), Some(7157));
        assert_eq!(t.resolve("brca1"), Some(672));
    }

    #[test]
    fn test_from_tsv_bytes_missing_column() {
        let data = b"symbol\tname\nTP53\ttumor protein p53\n";
        let err = GeneReferenceTable::from_tsv_bytes(data).unwrap_err();
        assert!(matches!(err, MafCheckError::Reference(_)));
    }

    #[test]
    fn test_from_tsv_bytes_invalid_id() {
        let data = b"Hugo_Symbol\tEntrez_Gene_Id\nTP53\tabc\n";
        assert!(GeneReferenceTable::from_tsv_bytes(data).is_err());
    }

    #[test]
    fn test_from_tsv_bytes_empty_table() {
        let data = b"Hugo_Symbol\tEntrez_Gene_Id\n";
        assert!(GeneReferenceTable::from_tsv_bytes(data).is_err());
    }
}
