//! Validator configuration and its JSON persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MafCheckError, Result};
use crate::maf::columns as col;

/// Namespace that enables the allele-specific copy number columns.
pub const ASCN_NAMESPACE: &str = "ascn";

/// What happens to a record whose validation-status rules produce errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatusPolicy {
    /// Report the findings as warnings and keep the record.
    #[default]
    Downgrade,
    /// Report the findings as errors and reject the record.
    Reject,
}

/// Policy knobs for a validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Classifications treated as intergenic when no gene is given.
    pub intergenic_classifications: Vec<String>,
    /// Classifications that are filtered from load.
    pub skip_classifications: Vec<String>,
    /// Mutation statuses that are filtered from load (case-insensitive).
    pub filtered_mutation_statuses: Vec<String>,
    pub validation_status_policy: ValidationStatusPolicy,
    /// Abort the run when no gene reference table is supplied.
    pub require_gene_reference: bool,
    /// Validate records on the rayon thread pool.
    pub parallel: bool,
    /// Declared column namespaces, e.g. `ascn`.
    pub namespaces: Vec<String>,
    pub max_aa_change_length: usize,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            intergenic_classifications: strings(col::INTERGENIC_CLASSIFICATIONS),
            skip_classifications: strings(col::SKIP_CLASSIFICATIONS),
            filtered_mutation_statuses: strings(col::FILTERED_MUTATION_STATUSES),
            validation_status_policy: ValidationStatusPolicy::default(),
            require_gene_reference: true,
            parallel: true,
            namespaces: Vec::new(),
            max_aa_change_length: 255,
        }
    }
}

impl ValidatorConfig {
    /// Whether a column namespace is declared (case-insensitive).
    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces
            .iter()
            .any(|n| n.eq_ignore_ascii_case(namespace))
    }

    /// Whether a mutation status is in the filtered set.
    pub fn is_filtered_mutation_status(&self, status: &str) -> bool {
        self.filtered_mutation_statuses
            .iter()
            .any(|s| s.eq_ignore_ascii_case(status))
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| MafCheckError::io(path, e))?;
        let reader = BufReader::new(file);
        let config: ValidatorConfig = serde_json::from_reader(reader).map_err(|e| {
            MafCheckError::Config(format!(
                "Failed to parse config '{}': {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %path.display(), "loaded validator config");
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| MafCheckError::io(parent, e))?;
            }
        }

        let file = File::create(path).map_err(|e| MafCheckError::io(path, e))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;

        Ok(())
    }
}
