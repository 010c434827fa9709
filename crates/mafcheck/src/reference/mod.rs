//! Reference data consulted by the record rules.
//!
//! Both the gene table and the sample-id set are loaded once, before any
//! record is validated, and passed explicitly to the validators.

mod gene;
mod samples;

pub use gene::{GeneReference, GeneReferenceEntry, GeneReferenceStats, GeneReferenceTable};
pub use samples::SampleIdSet;
