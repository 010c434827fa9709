//! Main MafValidator struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::reference::{GeneReference, SampleIdSet};
use crate::validation::{BatchValidator, Report};

/// Result of validating a mutation file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    pub report: Report,
}

impl ValidationOutcome {
    pub fn passed(&self) -> bool {
        self.report.passed
    }
}

/// Parses a mutation file and validates every record in it.
pub struct MafValidator {
    parser: Parser,
    batch: BatchValidator,
}

impl MafValidator {
    /// Create a validator with default configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            parser: Parser::new(),
            batch: BatchValidator::with_config(config),
        }
    }

    /// Replace the parser settings.
    pub fn with_parser_config(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::with_config(config);
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        self.batch.config()
    }

    /// Validate a mutation file.
    ///
    /// The reference and sample data are borrowed for the duration of the
    /// run and never modified.
    pub fn validate_file(
        &self,
        path: impl AsRef<Path>,
        reference: Option<&dyn GeneReference>,
        samples: Option<&SampleIdSet>,
    ) -> Result<ValidationOutcome> {
        let (table, source) = self.parser.parse_file(path)?;
        let report = self.batch.validate(&table, reference, samples)?;

        Ok(ValidationOutcome { source, report })
    }

    /// Validate mutation data held in memory.
    pub fn validate_bytes(
        &self,
        bytes: &[u8],
        reference: Option<&dyn GeneReference>,
        samples: Option<&SampleIdSet>,
    ) -> Result<Report> {
        let table = self.parser.parse_bytes(bytes)?;
        self.batch.validate(&table, reference, samples)
    }
}

impl Default for MafValidator {
    fn default() -> Self {
        Self::new()
    }
}
