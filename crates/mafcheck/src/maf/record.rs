//! Typed mutation record built from one MAF row.

use serde::{Deserialize, Serialize};

use super::columns as col;
use crate::input::{DataTable, Row};
use crate::validation::{Finding, FindingCode};

/// Allele-length signature of a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantType {
    Snp,
    Dnp,
    Tnp,
    Onp,
    Ins,
    Del,
    /// Any value outside the six known types, kept verbatim.
    Other(String),
}

impl VariantType {
    pub fn as_str(&self) -> &str {
        match self {
            VariantType::Snp => "SNP",
            VariantType::Dnp => "DNP",
            VariantType::Tnp => "TNP",
            VariantType::Onp => "ONP",
            VariantType::Ins => "INS",
            VariantType::Del => "DEL",
            VariantType::Other(raw) => raw,
        }
    }

    /// Fixed allele length of SNP, DNP and TNP.
    pub fn fixed_length(&self) -> Option<usize> {
        match self {
            VariantType::Snp => Some(1),
            VariantType::Dnp => Some(2),
            VariantType::Tnp => Some(3),
            _ => None,
        }
    }

    /// Nucleotide substitutions, which cannot contain `-`.
    pub fn is_substitution(&self) -> bool {
        matches!(
            self,
            VariantType::Snp | VariantType::Dnp | VariantType::Tnp | VariantType::Onp
        )
    }
}

impl From<&str> for VariantType {
    fn from(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "SNP" => VariantType::Snp,
            "DNP" => VariantType::Dnp,
            "TNP" => VariantType::Tnp,
            "ONP" => VariantType::Onp,
            "INS" => VariantType::Ins,
            "DEL" => VariantType::Del,
            _ => VariantType::Other(value.to_string()),
        }
    }
}

/// Variant_Classification values accepted for loading.
const CLASSIFICATIONS: &[&str] = &[
    "Frame_Shift_Del",
    "Frame_Shift_Ins",
    "In_Frame_Del",
    "In_Frame_Ins",
    "Missense_Mutation",
    "Nonsense_Mutation",
    "Splice_Site",
    "Translation_Start_Site",
    "Nonstop_Mutation",
    "Targeted_Region",
    "De_novo_Start_InFrame",
    "De_novo_Start_OutOfFrame",
    "Silent",
    "Intron",
    "3'UTR",
    "3'Flank",
    "5'UTR",
    "5'Flank",
    "IGR",
    "RNA",
    "Splice_Region",
    "Fusion",
    "Unknown",
];

/// Functional consequence of a mutation.
///
/// Kept as the raw string; [`VariantClassification::is_known`] tells whether
/// it belongs to the allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantClassification(String);

impl VariantClassification {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        CLASSIFICATIONS.contains(&self.0.as_str())
    }

    /// Membership in a configured set of classification names.
    pub fn is_in(&self, set: &[String]) -> bool {
        set.iter().any(|c| c == &self.0)
    }
}

/// Whether a called mutation has been independently confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    Valid,
    Invalid,
    Untested,
    Inconclusive,
    Na,
    Redacted,
    Unknown,
    Other(String),
}

impl ValidationStatus {
    /// Valid or invalid: a validation experiment was performed.
    pub fn is_decided(&self) -> bool {
        matches!(self, ValidationStatus::Valid | ValidationStatus::Invalid)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ValidationStatus::Valid => "Valid",
            ValidationStatus::Invalid => "Invalid",
            ValidationStatus::Untested => "Untested",
            ValidationStatus::Inconclusive => "Inconclusive",
            ValidationStatus::Na => "NA",
            ValidationStatus::Redacted => "Redacted",
            ValidationStatus::Unknown => "Unknown",
            ValidationStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for ValidationStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "valid" => ValidationStatus::Valid,
            "invalid" => ValidationStatus::Invalid,
            "untested" => ValidationStatus::Untested,
            "inconclusive" => ValidationStatus::Inconclusive,
            "na" => ValidationStatus::Na,
            "redacted" => ValidationStatus::Redacted,
            "unknown" => ValidationStatus::Unknown,
            _ => ValidationStatus::Other(value.to_string()),
        }
    }
}

/// Germline vs somatic origin of a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationStatus {
    Germline,
    Somatic,
    PostTranscriptionalModification,
    Unknown,
    Other(String),
}

impl MutationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MutationStatus::Germline => "Germline",
            MutationStatus::Somatic => "Somatic",
            MutationStatus::PostTranscriptionalModification => "Post-transcriptional modification",
            MutationStatus::Unknown => "Unknown",
            MutationStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for MutationStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().replace('-', " ").as_str() {
            "germline" => MutationStatus::Germline,
            "somatic" => MutationStatus::Somatic,
            "post transcriptional modification" => {
                MutationStatus::PostTranscriptionalModification
            }
            "unknown" => MutationStatus::Unknown,
            _ => MutationStatus::Other(value.to_string()),
        }
    }
}

/// The four validation-allele columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationAlleles {
    pub tumor1: Option<String>,
    pub tumor2: Option<String>,
    pub norm1: Option<String>,
    pub norm2: Option<String>,
}

impl ValidationAlleles {
    /// Column name and value, in file order.
    pub fn columns(&self) -> [(&'static str, Option<&str>); 4] {
        [
            (col::TUMOR_VALIDATION_ALLELE1, self.tumor1.as_deref()),
            (col::TUMOR_VALIDATION_ALLELE2, self.tumor2.as_deref()),
            (col::MATCH_NORM_VALIDATION_ALLELE1, self.norm1.as_deref()),
            (col::MATCH_NORM_VALIDATION_ALLELE2, self.norm2.as_deref()),
        ]
    }

    /// All four alleles, if every one is present.
    pub fn complete(&self) -> Option<[&str; 4]> {
        Some([
            self.tumor1.as_deref()?,
            self.tumor2.as_deref()?,
            self.norm1.as_deref()?,
            self.norm2.as_deref()?,
        ])
    }
}

/// One row of a mutation file, with missing values as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub hugo_symbol: Option<String>,
    pub entrez_gene_id: Option<i64>,
    pub ncbi_build: Option<String>,
    pub chromosome: Option<String>,
    pub start_position: Option<i64>,
    pub end_position: Option<i64>,
    pub variant_classification: Option<VariantClassification>,
    pub variant_type: Option<VariantType>,
    pub reference_allele: Option<String>,
    pub tumor_seq_allele1: Option<String>,
    pub tumor_seq_allele2: Option<String>,
    pub tumor_sample_barcode: String,
    pub validation_alleles: ValidationAlleles,
    pub verification_status: Option<String>,
    pub validation_status: Option<ValidationStatus>,
    pub mutation_status: Option<MutationStatus>,
    pub validation_method: Option<String>,
    pub t_ref_count: Option<i64>,
    pub t_alt_count: Option<i64>,
    pub n_ref_count: Option<i64>,
    pub n_alt_count: Option<i64>,
    /// HGVSp_Short, falling back to Amino_Acid_Change.
    pub aa_change: Option<String>,
    pub swissprot: Option<String>,
}

impl MutationRecord {
    /// Build a record from a parsed row.
    ///
    /// Values are trimmed and null tokens become `None`. An unparsable number
    /// or a missing tumor sample barcode makes the row unusable; all such
    /// problems are returned together.
    pub fn from_row(row: &Row) -> Result<Self, Vec<Finding>> {
        let mut problems = Vec::new();
        let text = |name: &str| -> Option<String> {
            row.get(name)
                .map(|v| v.trim())
                .filter(|v| !DataTable::is_null_value(v))
                .map(str::to_string)
        };
        let mut number = |name: &str| -> Option<i64> {
            let raw = text(name)?;
            match parse_integer(&raw) {
                Some(n) => Some(n),
                None => {
                    problems.push(
                        Finding::error(
                            FindingCode::InvalidNumber,
                            format!("{} is not an integer", name),
                        )
                        .with_column(name)
                        .with_value(raw),
                    );
                    None
                }
            }
        };

        // Entrez id 0 is the conventional placeholder for "no gene".
        let entrez_gene_id = number(col::ENTREZ_GENE_ID).filter(|&id| id != 0);
        let start_position = number(col::START_POSITION);
        let end_position = number(col::END_POSITION);
        let t_ref_count = number(col::T_REF_COUNT);
        let t_alt_count = number(col::T_ALT_COUNT);
        let n_ref_count = number(col::N_REF_COUNT);
        let n_alt_count = number(col::N_ALT_COUNT);

        let tumor_sample_barcode = text(col::TUMOR_SAMPLE_BARCODE);
        if tumor_sample_barcode.is_none() {
            problems.push(
                Finding::error(
                    FindingCode::MissingRequiredValue,
                    "Tumor_Sample_Barcode is empty",
                )
                .with_column(col::TUMOR_SAMPLE_BARCODE),
            );
        }

        if !problems.is_empty() {
            return Err(problems);
        }

        Ok(Self {
            hugo_symbol: text(col::HUGO_SYMBOL),
            entrez_gene_id,
            ncbi_build: text(col::NCBI_BUILD),
            chromosome: text(col::CHROMOSOME),
            start_position,
            end_position,
            variant_classification: text(col::VARIANT_CLASSIFICATION)
                .map(VariantClassification::new),
            variant_type: text(col::VARIANT_TYPE).map(|v| VariantType::from(v.as_str())),
            reference_allele: text(col::REFERENCE_ALLELE),
            tumor_seq_allele1: text(col::TUMOR_SEQ_ALLELE1),
            tumor_seq_allele2: text(col::TUMOR_SEQ_ALLELE2),
            tumor_sample_barcode: tumor_sample_barcode.unwrap_or_default(),
            validation_alleles: ValidationAlleles {
                tumor1: text(col::TUMOR_VALIDATION_ALLELE1),
                tumor2: text(col::TUMOR_VALIDATION_ALLELE2),
                norm1: text(col::MATCH_NORM_VALIDATION_ALLELE1),
                norm2: text(col::MATCH_NORM_VALIDATION_ALLELE2),
            },
            verification_status: text(col::VERIFICATION_STATUS),
            validation_status: text(col::VALIDATION_STATUS)
                .map(|v| ValidationStatus::from(v.as_str())),
            mutation_status: text(col::MUTATION_STATUS).map(|v| MutationStatus::from(v.as_str())),
            validation_method: text(col::VALIDATION_METHOD),
            t_ref_count,
            t_alt_count,
            n_ref_count,
            n_alt_count,
            aa_change: text(col::HGVSP_SHORT).or_else(|| text(col::AMINO_ACID_CHANGE)),
            swissprot: text(col::SWISSPROT),
        })
    }

    /// Classification name, or empty when absent.
    pub fn classification(&self) -> &str {
        self.variant_classification
            .as_ref()
            .map(VariantClassification::as_str)
            .unwrap_or("")
    }
}

/// Parse an integer, accepting integral floats such as `672.0`.
fn parse_integer(raw: &str) -> Option<i64> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
