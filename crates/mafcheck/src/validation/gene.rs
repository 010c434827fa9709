//! Gene identifier resolution against the reference table.

use serde::{Deserialize, Serialize};

use super::finding::{Finding, FindingCode};
use crate::maf::columns as col;
use crate::reference::GeneReference;

/// Outcome of resolving a record's gene identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum GeneResolution {
    /// Neither symbol nor Entrez id given.
    Absent,
    /// Identifiers resolve to this Entrez id.
    Resolved { entrez_gene_id: i64 },
    /// Identifiers present but unknown to the reference table.
    Unresolved,
    /// The symbol resolves to a different Entrez id than the one provided.
    Mismatch { expected: i64, provided: i64 },
    /// No reference table was supplied; only presence was checked.
    Unchecked,
}

impl GeneResolution {
    /// Whether the record must be rejected.
    pub fn is_rejecting(&self) -> bool {
        matches!(self, GeneResolution::Absent | GeneResolution::Mismatch { .. })
    }
}

/// Resolves Hugo symbol / Entrez id pairs.
pub struct GeneIdentityResolver;

impl GeneIdentityResolver {
    /// Resolve a record's identifiers. Pure: reads the reference table only.
    pub fn resolve(
        symbol: Option<&str>,
        entrez_gene_id: Option<i64>,
        reference: Option<&dyn GeneReference>,
    ) -> (GeneResolution, Vec<Finding>) {
        let mut findings = Vec::new();

        let resolution = match (symbol, entrez_gene_id) {
            (None, None) => {
                findings.push(Finding::error(
                    FindingCode::NoGeneIdentifier,
                    "No gene identifier: both Hugo_Symbol and Entrez_Gene_Id are missing; \
                     this record will not be loaded",
                ));
                GeneResolution::Absent
            }
            (None, Some(entrez)) => {
                findings.push(
                    Finding::warning(
                        FindingCode::SymbolMissing,
                        "Hugo_Symbol is missing, using Entrez_Gene_Id",
                    )
                    .with_column(col::HUGO_SYMBOL),
                );
                match reference {
                    None => GeneResolution::Unchecked,
                    Some(reference) => Self::check_entrez(entrez, reference, &mut findings),
                }
            }
            (Some(symbol), None) => match reference {
                None => GeneResolution::Unchecked,
                Some(reference) => match reference.resolve(symbol) {
                    Some(entrez) => GeneResolution::Resolved {
                        entrez_gene_id: entrez,
                    },
                    None => {
                        findings.push(unknown_symbol(symbol));
                        GeneResolution::Unresolved
                    }
                },
            },
            (Some(symbol), Some(entrez)) => match reference {
                None => GeneResolution::Unchecked,
                Some(reference) => match reference.resolve(symbol) {
                    Some(expected) if expected != entrez => {
                        findings.push(
                            Finding::error(
                                FindingCode::EntrezSymbolMismatch,
                                format!(
                                    "Entrez_Gene_Id {} does not match symbol {} (expected {})",
                                    entrez, symbol, expected
                                ),
                            )
                            .with_column(col::ENTREZ_GENE_ID)
                            .with_value(entrez.to_string()),
                        );
                        GeneResolution::Mismatch {
                            expected,
                            provided: entrez,
                        }
                    }
                    Some(_) => GeneResolution::Resolved {
                        entrez_gene_id: entrez,
                    },
                    None => {
                        findings.push(unknown_symbol(symbol));
                        Self::check_entrez(entrez, reference, &mut findings)
                    }
                },
            },
        };

        (resolution, findings)
    }

    fn check_entrez(
        entrez: i64,
        reference: &dyn GeneReference,
        findings: &mut Vec<Finding>,
    ) -> GeneResolution {
        if reference.contains(entrez) {
            GeneResolution::Resolved {
                entrez_gene_id: entrez,
            }
        } else {
            findings.push(
                Finding::warning(
                    FindingCode::UnknownEntrezId,
                    format!(
                        "Entrez_Gene_Id {} is not known to the reference table; \
                         it might be new or deprecated",
                        entrez
                    ),
                )
                .with_column(col::ENTREZ_GENE_ID)
                .with_value(entrez.to_string()),
            );
            GeneResolution::Unresolved
        }
    }
}

fn unknown_symbol(symbol: &str) -> Finding {
    Finding::warning(
        FindingCode::UnknownSymbol,
        format!(
            "Hugo_Symbol {} is not known to the reference table; \
             it might be new or deprecated",
            symbol
        ),
    )
    .with_column(col::HUGO_SYMBOL)
    .with_value(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{GeneReferenceEntry, GeneReferenceTable};
    use crate::validation::Severity;

    fn reference() -> GeneReferenceTable {
        GeneReferenceTable::from_entries([
            GeneReferenceEntry::new("TP53", 7157),
            GeneReferenceEntry::new("KRAS", 3845),
        ])
    }

    fn codes(findings: &[Finding]) -> Vec<FindingCode> {
        findings.iter().map(|f| f.code).collect()
    }

    #[test]
    fn test_both_absent_is_error() {
        let table = reference();
        let (res, findings) = GeneIdentityResolver::resolve(None, None, Some(&table));
        assert_eq!(res, GeneResolution::Absent);
        assert_eq!(codes(&findings), vec![FindingCode::NoGeneIdentifier]);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_entrez_only_warns() {
        let table = reference();
        let (res, findings) = GeneIdentityResolver::resolve(None, Some(7157), Some(&table));
        assert_eq!(res, GeneResolution::Resolved { entrez_gene_id: 7157 });
        assert_eq!(codes(&findings), vec![FindingCode::SymbolMissing]);
    }

    #[test]
    fn test_unknown_entrez_only() {
        let table = reference();
        let (res, findings) = GeneIdentityResolver::resolve(None, Some(1), Some(&table));
        assert_eq!(res, GeneResolution::Unresolved);
        assert_eq!(
            codes(&findings),
            vec![FindingCode::SymbolMissing, FindingCode::UnknownEntrezId]
        );
    }

    #[test]
    fn test_symbol_only_case_insensitive() {
        let table = reference();
        let (res, findings) = GeneIdentityResolver::resolve(Some("kras"), None, Some(&table));
        assert_eq!(res, GeneResolution::Resolved { entrez_gene_id: 3845 });
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unknown_symbol_warns() {
        let table = reference();
        let (res, findings) = GeneIdentityResolver::resolve(Some("NOTAGENE"), None, Some(&table));
        assert_eq!(res, GeneResolution::Unresolved);
        assert_eq!(codes(&findings), vec![FindingCode::UnknownSymbol]);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_mismatch_is_error() {
        let table = reference();
        let (res, findings) =
            GeneIdentityResolver::resolve(Some("TP53"), Some(3845), Some(&table));
        assert_eq!(
            res,
            GeneResolution::Mismatch {
                expected: 7157,
                provided: 3845
            }
        );
        assert!(res.is_rejecting());
        assert_eq!(codes(&findings), vec![FindingCode::EntrezSymbolMismatch]);
    }

    #[test]
    fn test_matching_pair() {
        let table = reference();
        let (res, findings) =
            GeneIdentityResolver::resolve(Some("TP53"), Some(7157), Some(&table));
        assert_eq!(res, GeneResolution::Resolved { entrez_gene_id: 7157 });
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unknown_symbol_falls_back_to_entrez() {
        let table = reference();
        let (res, findings) =
            GeneIdentityResolver::resolve(Some("OLDNAME"), Some(7157), Some(&table));
        assert_eq!(res, GeneResolution::Resolved { entrez_gene_id: 7157 });
        assert_eq!(codes(&findings), vec![FindingCode::UnknownSymbol]);
    }

    #[test]
    fn test_without_reference() {
        let (res, findings) = GeneIdentityResolver::resolve(Some("TP53"), Some(1), None);
        assert_eq!(res, GeneResolution::Unchecked);
        assert!(findings.is_empty());
    }
}
