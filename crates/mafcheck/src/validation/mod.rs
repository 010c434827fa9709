//! Rule engine for mutation records.

mod allele;
mod batch;
mod classifier;
mod context;
mod fields;
mod finding;
mod gene;
mod report;
mod status;
mod table;

pub use allele::{AlleleConsistencyChecker, is_valid_allele};
pub use batch::BatchValidator;
pub use classifier::{RecordClassifier, RecordOutcome, Verdict};
pub use context::{RecordCheck, ValidationContext};
pub use fields::FieldChecker;
pub use finding::{Finding, FindingCode, SchemaContext, Severity, has_error};
pub use gene::{GeneIdentityResolver, GeneResolution};
pub use report::{
    RecordSummary, Report, ReportEntry, ReportSummary, SeverityCounts, VerdictCounts,
};
pub use status::ValidationStatusChecker;
pub use table::{TableCheck, TableChecker};
