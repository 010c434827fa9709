//! Per-record state machine deciding whether a record is loaded.
//!
//! Stages run in a fixed order. A stage may move the record to a terminal
//! state; the first terminal state reached is kept. Rejections do not stop
//! evaluation so the report lists every problem with the record, but a
//! filtering stage ends it.
//!
//! Warnings alone leave a record LOADED. WARNED is reserved for records whose
//! validation-status errors were downgraded to warnings by policy.

use serde::{Deserialize, Serialize};

use super::allele::AlleleConsistencyChecker;
use tracing::trace;

use super::context::{RecordCheck, ValidationContext};
use super::fields::FieldChecker;
use super::finding::{Finding, FindingCode, Severity, has_error};
use super::gene::GeneIdentityResolver;
use super::status::ValidationStatusChecker;
use crate::config::{ValidationStatusPolicy, ValidatorConfig};
use crate::input::Row;
use crate::maf::columns as col;
use crate::maf::{MutationRecord, MutationStatus};

/// Final classification of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Loaded without remarks.
    Loaded,
    /// Not loaded, by policy rather than because of an error.
    Filtered,
    /// Loaded, after validation-status errors were downgraded to warnings.
    Warned,
    /// Not loaded because of an error.
    Rejected,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Loaded => "Loaded",
            Verdict::Filtered => "Filtered",
            Verdict::Warned => "Warned",
            Verdict::Rejected => "Rejected",
        }
    }

    /// Whether the record's data is eligible for load.
    pub fn is_loadable(&self) -> bool {
        matches!(self, Verdict::Loaded | Verdict::Warned)
    }
}

/// Result of classifying one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    /// The record lacks an amino acid change and is loaded under the generic
    /// `MUTATED` annotation.
    pub generic_mutated_flag: bool,
}

/// Accumulates findings and the first terminal state.
struct Classification {
    terminal: Option<Verdict>,
    findings: Vec<Finding>,
    downgraded: bool,
}

impl Classification {
    fn new() -> Self {
        Self {
            terminal: None,
            findings: Vec::new(),
            downgraded: false,
        }
    }

    fn settle(&mut self, verdict: Verdict) {
        self.terminal.get_or_insert(verdict);
    }

    /// Add findings, rejecting the record if any is an error.
    fn extend(&mut self, findings: Vec<Finding>) {
        if has_error(&findings) {
            self.settle(Verdict::Rejected);
        }
        self.findings.extend(findings);
    }

    /// Add validation-status errors as warnings.
    fn downgrade(&mut self, findings: Vec<Finding>) {
        for finding in findings {
            if finding.is_error() {
                self.downgraded = true;
                self.findings.push(finding.with_severity(Severity::Warning));
            } else {
                self.findings.push(finding);
            }
        }
    }

    /// Add a filtering finding and end classification.
    fn filter(mut self, finding: Finding) -> RecordOutcome {
        self.findings.push(finding);
        self.settle(Verdict::Filtered);
        self.finish(false)
    }

    fn finish(self, generic_mutated_flag: bool) -> RecordOutcome {
        let verdict = match self.terminal {
            Some(verdict) => verdict,
            None if self.downgraded => Verdict::Warned,
            None => Verdict::Loaded,
        };
        RecordOutcome {
            generic_mutated_flag: generic_mutated_flag && verdict.is_loadable(),
            verdict,
            findings: self.findings,
        }
    }
}

/// Classifies records into LOADED, FILTERED, WARNED or REJECTED.
pub struct RecordClassifier {
    config: ValidatorConfig,
    fields: FieldChecker,
    alleles: AlleleConsistencyChecker,
    status: ValidationStatusChecker,
}

impl RecordClassifier {
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            config: config.clone(),
            fields: FieldChecker::new(config.max_aa_change_length),
            alleles: AlleleConsistencyChecker,
            status: ValidationStatusChecker,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Classify a raw row. Rows that cannot be turned into a record are rejected.
    pub fn classify_row(&self, row: &Row, ctx: &ValidationContext<'_>) -> RecordOutcome {
        match MutationRecord::from_row(row) {
            Ok(record) => self.classify(&record, ctx),
            Err(findings) => RecordOutcome {
                verdict: Verdict::Rejected,
                findings,
                generic_mutated_flag: false,
            },
        }
    }

    /// Classify a record.
    pub fn classify(&self, record: &MutationRecord, ctx: &ValidationContext<'_>) -> RecordOutcome {
        let mut state = Classification::new();
        let classification = record.variant_classification.as_ref();

        // Gene identity
        if record.hugo_symbol.is_none() && record.entrez_gene_id.is_none() {
            let intergenic = classification
                .is_some_and(|c| c.is_in(&self.config.intergenic_classifications));
            let finding = if intergenic {
                Finding::info(
                    FindingCode::IntergenicFiltered,
                    format!(
                        "No gene identifier for {} mutation; record is not loaded",
                        record.classification()
                    ),
                )
            } else {
                Finding::warning(
                    FindingCode::ImpliedIntergenic,
                    "No Entrez_Gene_Id or Hugo_Symbol provided; assuming an intergenic \
                     mutation and not loading the record",
                )
            };
            return state.filter(finding);
        }
        let (resolution, gene_findings) = GeneIdentityResolver::resolve(
            record.hugo_symbol.as_deref(),
            record.entrez_gene_id,
            ctx.reference,
        );
        trace!(?resolution, "gene identity");
        if resolution.is_rejecting() {
            state.settle(Verdict::Rejected);
        }
        state.extend(gene_findings);

        // Filtering by policy
        if let Some(c) = classification.filter(|c| c.is_in(&self.config.skip_classifications)) {
            return state.filter(
                Finding::info(
                    FindingCode::ClassificationFiltered,
                    format!("Variant_Classification {} is not loaded", c.as_str()),
                )
                .with_column(col::VARIANT_CLASSIFICATION)
                .with_value(c.as_str()),
            );
        }
        if let Some(status) = record.mutation_status.as_ref().map(MutationStatus::as_str) {
            if self.config.is_filtered_mutation_status(status) {
                return state.filter(
                    Finding::info(
                        FindingCode::MutationStatusFiltered,
                        format!("Mutation_Status {} is not loaded", status),
                    )
                    .with_column(col::MUTATION_STATUS)
                    .with_value(status),
                );
            }
        }

        state.extend(run_check(&self.fields, record, ctx));
        state.extend(run_check(&self.alleles, record, ctx));

        if let (Some(start), Some(end)) = (record.start_position, record.end_position) {
            if start > end {
                state.extend(vec![
                    Finding::error(
                        FindingCode::StartAfterEnd,
                        format!("Start_Position {} is greater than End_Position {}", start, end),
                    )
                    .with_column(col::END_POSITION)
                    .with_value(end.to_string()),
                ]);
            }
        }

        let status_findings = run_check(&self.status, record, ctx);
        match self.config.validation_status_policy {
            ValidationStatusPolicy::Reject => state.extend(status_findings),
            ValidationStatusPolicy::Downgrade => state.downgrade(status_findings),
        }

        let mut generic_mutated_flag = false;
        if record.aa_change.is_none() && record.classification() != col::SPLICE_SITE {
            state.extend(vec![
                Finding::warning(
                    FindingCode::MissingAminoAcidChange,
                    "No amino acid change given; the record is loaded as a generic MUTATED event",
                )
                .with_column(col::HGVSP_SHORT),
            ]);
            generic_mutated_flag = true;
        }

        state.finish(generic_mutated_flag)
    }
}

fn run_check(
    check: &dyn RecordCheck,
    record: &MutationRecord,
    ctx: &ValidationContext<'_>,
) -> Vec<Finding> {
    let findings = check.check(record, ctx);
    trace!(check = check.name(), findings = findings.len(), "record check");
    findings
}

impl Default for RecordClassifier {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}
