//! mafcheck: consistency validation for mutation annotation (MAF) files.
//!
//! Each mutation record is checked for gene identity, allele consistency and
//! validation-status consistency, then classified as loaded, warned, filtered
//! or rejected. Results are collected in a deterministic [`Report`].
//!
//! # Example
//!
//! ```no_run
//! use mafcheck::{GeneReferenceTable, MafValidator};
//!
//! let genes = GeneReferenceTable::from_tsv("genes.tsv").unwrap();
//! let outcome = MafValidator::new()
//!     .validate_file("data_mutations.txt", Some(&genes), None)
//!     .unwrap();
//!
//! println!("Errors: {}", outcome.report.summary.findings.error);
//! println!("Passed: {}", outcome.passed());
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod maf;
pub mod reference;
pub mod validation;

mod validator;

pub use crate::validator::{MafValidator, ValidationOutcome};
pub use config::{ValidationStatusPolicy, ValidatorConfig};
pub use error::{MafCheckError, Result};
pub use input::{DataTable, SourceMetadata};
pub use maf::MutationRecord;
pub use reference::{GeneReference, GeneReferenceEntry, GeneReferenceTable, SampleIdSet};
pub use validation::{Finding, FindingCode, Report, Severity, Verdict};
