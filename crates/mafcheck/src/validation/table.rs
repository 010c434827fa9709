//! File-level checks on the header row.

use std::collections::HashSet;

use super::finding::{Finding, FindingCode, Severity};
use crate::config::{ASCN_NAMESPACE, ValidatorConfig};
use crate::input::DataTable;
use crate::maf::columns as col;

/// Outcome of the file-level checks.
#[derive(Debug, Clone, Default)]
pub struct TableCheck {
    pub findings: Vec<Finding>,
    /// False when the headers are too broken for row rules to run.
    pub rows_checkable: bool,
}

/// Checks the headers of a mutation file.
pub struct TableChecker;

impl TableChecker {
    pub fn check(table: &DataTable, config: &ValidatorConfig) -> TableCheck {
        let mut findings = Vec::new();
        let mut rows_checkable = true;

        for &required in col::REQUIRED_COLUMNS {
            if !table.has_column(required) {
                rows_checkable = false;
                findings.push(
                    Finding::table(
                        Severity::Error,
                        FindingCode::MissingRequiredColumn,
                        format!("Missing required column {}", required),
                    )
                    .with_column(required),
                );
            }
        }

        if !col::GENE_IDENTIFIER_COLUMNS
            .iter()
            .any(|c| table.has_column(c))
        {
            findings.push(Finding::table(
                Severity::Error,
                FindingCode::MissingGeneIdentifierColumn,
                "Hugo_Symbol or Entrez_Gene_Id column needs to be present",
            ));
        }

        if !col::AMINO_ACID_CHANGE_COLUMNS
            .iter()
            .any(|c| table.has_column(c))
        {
            findings.push(Finding::table(
                Severity::Error,
                FindingCode::MissingAminoAcidChangeColumn,
                "HGVSp_Short or Amino_Acid_Change column needs to be present",
            ));
        }

        if !table.has_column(col::SWISSPROT) {
            findings.push(
                Finding::table(
                    Severity::Warning,
                    FindingCode::MissingSwissprotColumn,
                    "SWISSPROT column is not present; protein annotations cannot be linked",
                )
                .with_column(col::SWISSPROT),
            );
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for header in &table.headers {
            if !seen.insert(header.as_str()) && reported.insert(header.as_str()) {
                findings.push(
                    Finding::table(
                        Severity::Error,
                        FindingCode::DuplicateColumn,
                        format!("Column {} appears more than once", header),
                    )
                    .with_column(header),
                );
            }
        }

        if config.has_namespace(ASCN_NAMESPACE) {
            for &column in col::ASCN_COLUMNS {
                if !table.has_column(column) {
                    findings.push(
                        Finding::table(
                            Severity::Error,
                            FindingCode::MissingAscnColumns,
                            format!(
                                "Namespace {} is declared but column {} is missing",
                                ASCN_NAMESPACE, column
                            ),
                        )
                        .with_column(column),
                    );
                }
            }
        }

        if table.row_count() == 0 {
            findings.push(Finding::table(
                Severity::Error,
                FindingCode::EmptyFile,
                "File contains a header but no mutation records",
            ));
        }

        TableCheck {
            findings,
            rows_checkable,
        }
    }
}
