//! Shared read-only inputs for record validation.

use crate::maf::MutationRecord;
use crate::reference::{GeneReference, SampleIdSet};

use super::finding::Finding;

/// Everything a rule may consult besides the record itself.
///
/// Built once per run and borrowed by every record check, possibly from many
/// threads at once.
#[derive(Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    /// Gene reference table.
    pub reference: Option<&'a dyn GeneReference>,
    /// Sample ids defined by the clinical data.
    pub samples: Option<&'a SampleIdSet>,
    /// Whether the file has a SWISSPROT column.
    pub has_swissprot_column: bool,
}

impl<'a> ValidationContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference(mut self, reference: &'a dyn GeneReference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_samples(mut self, samples: &'a SampleIdSet) -> Self {
        self.samples = Some(samples);
        self
    }

    pub fn with_swissprot_column(mut self, present: bool) -> Self {
        self.has_swissprot_column = present;
        self
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("reference", &self.reference.is_some())
            .field("samples", &self.samples.map(SampleIdSet::len))
            .field("has_swissprot_column", &self.has_swissprot_column)
            .finish()
    }
}

/// A group of rules evaluated against one record.
pub trait RecordCheck: Send + Sync {
    /// Run the rules and return findings.
    fn check(&self, record: &MutationRecord, ctx: &ValidationContext<'_>) -> Vec<Finding>;

    /// Get the check name.
    fn name(&self) -> &'static str;
}
