//! The validation report: ordered findings, counts and the pass/fail verdict.

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::classifier::{RecordOutcome, Verdict};
use super::finding::{Finding, SchemaContext, Severity};
use crate::error::Result;

/// A finding placed in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// 1-based data row; absent for file-level findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// 1-based line in the file, counting preamble and header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(flatten)]
    pub finding: Finding,
}

/// Counts of findings by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Counts of records by verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    pub loaded: usize,
    pub warned: usize,
    pub filtered: usize,
    pub rejected: usize,
}

impl VerdictCounts {
    fn add(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Loaded => self.loaded += 1,
            Verdict::Warned => self.warned += 1,
            Verdict::Filtered => self.filtered += 1,
            Verdict::Rejected => self.rejected += 1,
        }
    }

    /// Records eligible for load.
    pub fn loadable(&self) -> usize {
        self.loaded + self.warned
    }
}

/// Verdict of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub row: usize,
    pub line: usize,
    pub verdict: Verdict,
    pub generic_mutated_flag: bool,
}

/// Summary of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub records: usize,
    pub findings: SeverityCounts,
    pub verdicts: VerdictCounts,
}

/// Result of validating one mutation file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// False iff any finding is an error.
    pub passed: bool,
    pub summary: ReportSummary,
    /// Findings ordered by schema context, column, then row.
    pub entries: Vec<ReportEntry>,
    /// Per-record verdicts in file order.
    pub records: Vec<RecordSummary>,
}

impl Report {
    /// Build a report from file-level findings and per-record outcomes.
    ///
    /// `outcomes` holds `(row, line, outcome)` in file order.
    pub fn build(
        table_findings: Vec<Finding>,
        outcomes: Vec<(usize, usize, RecordOutcome)>,
    ) -> Self {
        let mut summary = ReportSummary {
            records: outcomes.len(),
            ..Default::default()
        };

        let mut entries: Vec<ReportEntry> = table_findings
            .into_iter()
            .map(|finding| ReportEntry {
                row: None,
                line: None,
                finding,
            })
            .collect();
        let mut records = Vec::with_capacity(outcomes.len());

        for (row, line, outcome) in outcomes {
            summary.verdicts.add(outcome.verdict);
            records.push(RecordSummary {
                row,
                line,
                verdict: outcome.verdict,
                generic_mutated_flag: outcome.generic_mutated_flag,
            });
            entries.extend(outcome.findings.into_iter().map(|finding| ReportEntry {
                row: Some(row),
                line: Some(line),
                finding,
            }));
        }

        // Stable: findings of one record keep their rule order.
        entries.sort_by(|a, b| {
            (a.finding.schema_context, &a.finding.column, a.row).cmp(&(
                b.finding.schema_context,
                &b.finding.column,
                b.row,
            ))
        });

        for entry in &entries {
            summary.findings.add(entry.finding.severity);
        }

        Self {
            passed: summary.findings.error == 0,
            summary,
            entries,
            records,
        }
    }

    /// Entries with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.finding.is_error())
    }

    /// Entries for one data row.
    pub fn entries_for_row(&self, row: usize) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| e.row == Some(row))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the entries as a tab-separated failure-case table.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        wtr.write_record([
            "schema_context",
            "column",
            "row",
            "line",
            "severity",
            "code",
            "value",
            "message",
        ])?;

        for entry in &self.entries {
            let f = &entry.finding;
            let context = match f.schema_context {
                SchemaContext::Table => "table",
                SchemaContext::Column => "column",
                SchemaContext::Row => "row",
            };
            let row = entry.row.map(|r| r.to_string()).unwrap_or_default();
            let line = entry.line.map(|l| l.to_string()).unwrap_or_default();
            let severity = f.severity.label().to_lowercase();
            let code = f.code.name();
            wtr.write_record([
                context,
                f.column.as_deref().unwrap_or(""),
                row.as_str(),
                line.as_str(),
                severity.as_str(),
                code.as_str(),
                f.value.as_deref().unwrap_or(""),
                f.message.as_str(),
            ])?;
        }

        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FindingCode;

    fn outcome(verdict: Verdict, findings: Vec<Finding>) -> RecordOutcome {
        RecordOutcome {
            verdict,
            findings,
            generic_mutated_flag: false,
        }
    }

    fn sample_report() -> Report {
        let table = vec![Finding::table(
            Severity::Warning,
            FindingCode::MissingSwissprotColumn,
            "no SWISSPROT",
        )
        .with_column("SWISSPROT")];
        let outcomes = vec![
            (
                1,
                3,
                outcome(
                    Verdict::Rejected,
                    vec![
                        Finding::error(FindingCode::AlleleLengthMismatch, "length"),
                        Finding::error(FindingCode::InvalidChromosome, "chrom")
                            .with_column("Chromosome"),
                    ],
                ),
            ),
            (
                2,
                4,
                outcome(
                    Verdict::Loaded,
                    vec![
                        Finding::warning(FindingCode::UnknownSymbol, "symbol")
                            .with_column("Hugo_Symbol"),
                    ],
                ),
            ),
            (3, 5, outcome(Verdict::Loaded, vec![])),
        ];
        Report::build(table, outcomes)
    }

    #[test]
    fn test_summary_counts() {
        let report = sample_report();
        assert!(!report.passed);
        assert_eq!(report.summary.records, 3);
        assert_eq!(report.summary.findings.error, 2);
        assert_eq!(report.summary.findings.warning, 2);
        assert_eq!(report.summary.verdicts.rejected, 1);
        assert_eq!(report.summary.verdicts.loadable(), 2);
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_entries_sorted() {
        let report = sample_report();
        let keys: Vec<_> = report
            .entries
            .iter()
            .map(|e| (e.finding.schema_context, e.finding.column.clone(), e.row))
            .collect();

        assert_eq!(keys[0].0, SchemaContext::Table);
        assert_eq!(keys[1].1.as_deref(), Some("Chromosome"));
        assert_eq!(keys[2].1.as_deref(), Some("Hugo_Symbol"));
        assert_eq!(keys[3].0, SchemaContext::Row);
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_passes_with_warnings_only() {
        let report = Report::build(
            vec![],
            vec![(
                1,
                2,
                outcome(
                    Verdict::Loaded,
                    vec![Finding::warning(FindingCode::MissingAminoAcidChange, "aa")],
                ),
            )],
        );
        assert!(report.passed);
        assert_eq!(report.entries_for_row(1).count(), 1);
    }

    #[test]
    fn test_json_flattens_finding() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value["entries"][0];
        assert_eq!(first["code"], "missing_swissprot_column");
        assert_eq!(first["schema_context"], "table");
        assert!(first.get("row").is_none());
    }

    #[test]
    fn test_write_tsv() {
        let mut out = Vec::new();
        sample_report().write_tsv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("schema_context\tcolumn\trow"));
        assert!(lines[2].contains("invalid_chromosome"));
    }
}
