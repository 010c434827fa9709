//! Single-column value checks.

use super::context::{RecordCheck, ValidationContext};
use super::finding::{Finding, FindingCode};
use crate::maf::columns::{self as col, is_known_chromosome};
use crate::maf::{MutationRecord, MutationStatus, ValidationStatus, VariantType};

/// Checks each column value on its own, without looking at other columns.
pub struct FieldChecker {
    max_aa_change_length: usize,
}

impl FieldChecker {
    pub fn new(max_aa_change_length: usize) -> Self {
        Self {
            max_aa_change_length,
        }
    }
}

impl Default for FieldChecker {
    fn default() -> Self {
        Self::new(255)
    }
}

impl RecordCheck for FieldChecker {
    fn check(&self, record: &MutationRecord, ctx: &ValidationContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        if let Some(symbol) = &record.hugo_symbol {
            if symbol.starts_with(|c: char| c.is_ascii_digit()) {
                findings.push(
                    Finding::warning(
                        FindingCode::SymbolStartsWithDigit,
                        "Hugo_Symbol starts with a number",
                    )
                    .with_column(col::HUGO_SYMBOL)
                    .with_value(symbol),
                );
            }
        }

        if let Some(id) = record.entrez_gene_id.filter(|&id| id < 0) {
            findings.push(
                Finding::error(FindingCode::NegativeEntrezId, "Entrez_Gene_Id is negative")
                    .with_column(col::ENTREZ_GENE_ID)
                    .with_value(id.to_string()),
            );
        }

        if let Some(classification) = &record.variant_classification {
            if !classification.is_known() {
                findings.push(
                    Finding::error(
                        FindingCode::InvalidVariantClassification,
                        format!(
                            "Variant_Classification {} is not a supported value",
                            classification.as_str()
                        ),
                    )
                    .with_column(col::VARIANT_CLASSIFICATION)
                    .with_value(classification.as_str()),
                );
            }
        }

        if let Some(VariantType::Other(raw)) = &record.variant_type {
            findings.push(
                Finding::warning(
                    FindingCode::UnknownVariantType,
                    "Variant_Type is not one of SNP, DNP, TNP, ONP, INS or DEL",
                )
                .with_column(col::VARIANT_TYPE)
                .with_value(raw),
            );
        }

        if let Some(build) = &record.ncbi_build {
            if !col::NCBI_BUILDS.contains(&build.as_str()) {
                findings.push(
                    Finding::error(
                        FindingCode::InvalidNcbiBuild,
                        format!("NCBI_Build must be one of {}", col::NCBI_BUILDS.join(", ")),
                    )
                    .with_column(col::NCBI_BUILD)
                    .with_value(build),
                );
            }
        }

        if let Some(chromosome) = &record.chromosome {
            if !is_known_chromosome(chromosome) {
                findings.push(
                    Finding::error(FindingCode::InvalidChromosome, "Chromosome is not known")
                        .with_column(col::CHROMOSOME)
                        .with_value(chromosome),
                );
            }
        }

        if let Some(status) = &record.verification_status {
            let lower = status.to_ascii_lowercase();
            if !col::VERIFICATION_STATUSES.contains(&lower.as_str()) {
                findings.push(
                    Finding::error(
                        FindingCode::InvalidVerificationStatus,
                        "Verification_Status must be Verified, Unknown or NA",
                    )
                    .with_column(col::VERIFICATION_STATUS)
                    .with_value(status),
                );
            }
        }

        if let Some(ValidationStatus::Other(raw)) = &record.validation_status {
            findings.push(
                Finding::warning(
                    FindingCode::UnknownValidationStatus,
                    "Validation_Status is not a recognised value",
                )
                .with_column(col::VALIDATION_STATUS)
                .with_value(raw),
            );
        }

        if let Some(MutationStatus::Other(raw)) = &record.mutation_status {
            findings.push(
                Finding::warning(
                    FindingCode::UnknownMutationStatus,
                    "Mutation_Status is not a recognised value",
                )
                .with_column(col::MUTATION_STATUS)
                .with_value(raw),
            );
        }

        if let Some(change) = &record.aa_change {
            if change.chars().count() > self.max_aa_change_length {
                findings.push(
                    Finding::error(
                        FindingCode::AminoAcidChangeTooLong,
                        format!(
                            "Amino acid change is longer than {} characters",
                            self.max_aa_change_length
                        ),
                    )
                    .with_column(col::HGVSP_SHORT)
                    .with_value(change),
                );
            }
        }

        if ctx.has_swissprot_column && record.swissprot.is_none() {
            findings.push(
                Finding::warning(FindingCode::MissingSwissprot, "SWISSPROT value is empty")
                    .with_column(col::SWISSPROT),
            );
        }

        if let Some(samples) = ctx.samples {
            if !samples.contains(&record.tumor_sample_barcode) {
                findings.push(
                    Finding::error(
                        FindingCode::UnknownSample,
                        "Tumor_Sample_Barcode is not defined in the clinical sample data",
                    )
                    .with_column(col::TUMOR_SAMPLE_BARCODE)
                    .with_value(&record.tumor_sample_barcode),
                );
            }
        }

        let counts = [
            (col::T_REF_COUNT, record.t_ref_count),
            (col::T_ALT_COUNT, record.t_alt_count),
            (col::N_REF_COUNT, record.n_ref_count),
            (col::N_ALT_COUNT, record.n_alt_count),
        ];
        for (column, count) in counts {
            if let Some(count) = count.filter(|&c| c < 0) {
                findings.push(
                    Finding::error(
                        FindingCode::NegativeReadCount,
                        format!("{} is negative", column),
                    )
                    .with_column(column)
                    .with_value(count.to_string()),
                );
            }
        }

        findings
    }

    fn name(&self) -> &'static str {
        "fields"
    }
}
