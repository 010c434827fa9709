//! Whole-file validation: runs the table checks and classifies every row.

use rayon::prelude::*;

use super::classifier::{RecordClassifier, RecordOutcome, Verdict};
use super::context::ValidationContext;
use super::finding::{Finding, FindingCode};
use super::report::Report;
use super::table::TableChecker;
use crate::config::ValidatorConfig;
use crate::error::{MafCheckError, Result};
use crate::input::DataTable;
use crate::maf::columns as col;
use crate::reference::{GeneReference, SampleIdSet};

/// Validates every record of a parsed mutation file.
pub struct BatchValidator {
    classifier: RecordClassifier,
}

impl BatchValidator {
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            classifier: RecordClassifier::new(&config),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        self.classifier.config()
    }

    /// Validate a table against the reference data.
    ///
    /// Fails only on configuration problems, before any row is looked at.
    /// Record problems end up in the report.
    pub fn validate(
        &self,
        table: &DataTable,
        reference: Option<&dyn GeneReference>,
        samples: Option<&SampleIdSet>,
    ) -> Result<Report> {
        let config = self.config();
        if reference.is_none() && config.require_gene_reference {
            return Err(MafCheckError::Config(
                "a gene reference table is required but none was supplied".into(),
            ));
        }

        let table_check = TableChecker::check(table, config);
        if !table_check.rows_checkable {
            tracing::warn!("required columns missing, skipping record validation");
            return Ok(Report::build(table_check.findings, Vec::new()));
        }

        let mut ctx = ValidationContext::new().with_swissprot_column(table.has_column(col::SWISSPROT));
        if let Some(reference) = reference {
            ctx = ctx.with_reference(reference);
        }
        if let Some(samples) = samples {
            ctx = ctx.with_samples(samples);
        }

        let rows = table.row_count();
        let _span = tracing::info_span!("validate_records", rows, parallel = config.parallel)
            .entered();

        let classify = |idx: usize| {
            let outcome = self.classify_row(table, idx, &ctx);
            tracing::trace!(row = idx + 1, verdict = ?outcome.verdict, "classified record");
            (idx + 1, table.line_number(idx), outcome)
        };
        // Both paths keep file order, so the report is the same either way.
        let outcomes: Vec<_> = if config.parallel {
            (0..rows).into_par_iter().map(classify).collect()
        } else {
            (0..rows).map(classify).collect()
        };

        let report = Report::build(table_check.findings, outcomes);
        tracing::info!(
            records = report.summary.records,
            errors = report.summary.findings.error,
            warnings = report.summary.findings.warning,
            loadable = report.summary.verdicts.loadable(),
            passed = report.passed,
            "validation finished"
        );
        Ok(report)
    }

    fn classify_row(&self, table: &DataTable, idx: usize, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let width = table.rows[idx].len();
        if width != table.column_count() {
            return RecordOutcome {
                verdict: Verdict::Rejected,
                findings: vec![Finding::error(
                    FindingCode::MalformedRow,
                    format!(
                        "Row has {} fields but the header has {} columns",
                        width,
                        table.column_count()
                    ),
                )],
                generic_mutated_flag: false,
            };
        }

        match table.row_map(idx) {
            Some(row) => self.classifier.classify_row(&row, ctx),
            None => RecordOutcome {
                verdict: Verdict::Rejected,
                findings: vec![Finding::error(FindingCode::MalformedRow, "Row could not be read")],
                generic_mutated_flag: false,
            },
        }
    }
}

impl Default for BatchValidator {
    fn default() -> Self {
        Self::new()
    }
}
