//! Allele alphabet and variant-type consistency rules.
//!
//! Every non-empty allele column must match `^[-ACTG]*$`. When the variant
//! type and all three alleles are present and well formed, the declared type
//! constrains allele lengths:
//!
//! | type | relation |
//! |------|----------|
//! | SNP / DNP / TNP | all alleles of length 1 / 2 / 3 |
//! | ONP | equal lengths, greater than 3 |
//! | INS | span is `len(ref)` or 1; `len(ref)` ≤ both tumor alleles |
//! | DEL | span is `len(ref)`; `len(ref)` > both tumor alleles |
//!
//! Each relation is checked independently, so one record can yield several
//! findings.

use once_cell::sync::Lazy;
use regex::Regex;

use super::context::{RecordCheck, ValidationContext};
use super::finding::{Finding, FindingCode};
use crate::maf::columns as col;
use crate::maf::{MutationRecord, VariantType};

static ALLELE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-ACTG]*$").expect("allele pattern is valid")
});

/// Whether a value uses only the allele alphabet `{A, C, T, G, -}`.
pub fn is_valid_allele(value: &str) -> bool {
    ALLELE_PATTERN.is_match(value)
}

/// Checks allele columns against the declared variant type.
pub struct AlleleConsistencyChecker;

impl AlleleConsistencyChecker {
    /// Check the three sequence alleles. Positions are only needed for the
    /// INS/DEL span rules, which are skipped when either is absent.
    pub fn check(
        variant_type: Option<&VariantType>,
        reference: Option<&str>,
        allele1: Option<&str>,
        allele2: Option<&str>,
        start: Option<i64>,
        end: Option<i64>,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        let columns = [
            (col::REFERENCE_ALLELE, reference),
            (col::TUMOR_SEQ_ALLELE1, allele1),
            (col::TUMOR_SEQ_ALLELE2, allele2),
        ];
        let mut alphabet_ok = true;
        for (column, value) in columns {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                if !is_valid_allele(value) {
                    alphabet_ok = false;
                    findings.push(
                        Finding::error(
                            FindingCode::InvalidAlleleCharacter,
                            format!(
                                "Allele based column {} contains invalid character",
                                column
                            ),
                        )
                        .with_column(column)
                        .with_value(value),
                    );
                }
            }
        }

        let (Some(reference), Some(allele1), Some(allele2)) = (reference, allele1, allele2) else {
            return findings;
        };
        if !alphabet_ok {
            return findings;
        }

        if reference == allele1 && allele1 == allele2 {
            findings.push(Finding::error(
                FindingCode::NoVariation,
                "All values in columns Reference_Allele, Tumor_Seq_Allele1 and \
                 Tumor_Seq_Allele2 are equal",
            ));
        }

        if let Some(variant_type) = variant_type {
            let alleles = Alleles {
                reference,
                allele1,
                allele2,
            };
            let span = start.zip(end);
            check_variant_type(variant_type, &alleles, span, &mut findings);
        }

        findings
    }
}

impl RecordCheck for AlleleConsistencyChecker {
    fn check(&self, record: &MutationRecord, _ctx: &ValidationContext<'_>) -> Vec<Finding> {
        Self::check(
            record.variant_type.as_ref(),
            record.reference_allele.as_deref(),
            record.tumor_seq_allele1.as_deref(),
            record.tumor_seq_allele2.as_deref(),
            record.start_position,
            record.end_position,
        )
    }

    fn name(&self) -> &'static str {
        "allele_consistency"
    }
}

struct Alleles<'a> {
    reference: &'a str,
    allele1: &'a str,
    allele2: &'a str,
}

impl Alleles<'_> {
    fn lengths(&self) -> [usize; 3] {
        [self.reference.len(), self.allele1.len(), self.allele2.len()]
    }

    fn any_deletion(&self) -> bool {
        [self.reference, self.allele1, self.allele2]
            .iter()
            .any(|a| a.contains('-'))
    }
}

fn check_variant_type(
    variant_type: &VariantType,
    alleles: &Alleles<'_>,
    span: Option<(i64, i64)>,
    findings: &mut Vec<Finding>,
) {
    let [ref_len, len1, len2] = alleles.lengths();

    match variant_type {
        VariantType::Snp | VariantType::Dnp | VariantType::Tnp => {
            let expected = variant_type.fixed_length().unwrap_or_default();
            if alleles.lengths().iter().any(|&l| l != expected) {
                findings.push(type_error(
                    FindingCode::AlleleLengthMismatch,
                    format!(
                        "Variant_Type indicates a {}, but length of Reference_Allele, \
                         Tumor_Seq_Allele1 and/or Tumor_Seq_Allele2 do not equal {}",
                        variant_type.as_str(),
                        expected
                    ),
                ));
            }
        }
        VariantType::Onp => {
            if ref_len != len1 || len1 != len2 || ref_len <= 3 {
                findings.push(type_error(
                    FindingCode::AlleleLengthMismatch,
                    "Variant_Type indicates a ONP, but length of Reference_Allele, \
                     Tumor_Seq_Allele1 and 2 are not bigger than 3 or are of unequal lengths",
                ));
            }
        }
        VariantType::Ins => {
            if let Some((start, end)) = span {
                let width = end.checked_sub(start);
                let spans_reference =
                    width.and_then(|w| w.checked_add(1)) == Some(ref_len as i64);
                if !(spans_reference || width == Some(1)) {
                    findings.push(type_error(
                        FindingCode::InsertionPositionMismatch,
                        "Variant_Type indicates insertion, but difference in Start_Position \
                         and End_Position does not equal 1 or the length of the Reference_Allele",
                    ));
                }
            }
            if !(ref_len <= len1 && ref_len <= len2) {
                findings.push(type_error(
                    FindingCode::InsertionAlleleLength,
                    "Variant_Type indicates insertion, but length of Reference_Allele is bigger \
                     than the length of Tumor_Seq_Allele1 and/or 2, indicating a deletion",
                ));
            }
        }
        VariantType::Del => {
            if let Some((start, end)) = span {
                let span_len = end.checked_sub(start).and_then(|w| w.checked_add(1));
                if span_len != Some(ref_len as i64) {
                    findings.push(type_error(
                        FindingCode::DeletionPositionMismatch,
                        "Variant_Type indicates deletion, but the difference between \
                         Start_Position and End_Position is not equal to the length of the \
                         Reference_Allele",
                    ));
                }
            }
            if !(ref_len > len1 && ref_len > len2) {
                findings.push(type_error(
                    FindingCode::DeletionAlleleLength,
                    "Variant_Type indicates deletion, but length of Reference_Allele is not \
                     bigger than the length of Tumor_Seq_Allele1 and Tumor_Seq_Allele2",
                ));
            }
            if ref_len == len1 && ref_len == len2 && !alleles.any_deletion() {
                findings.push(type_error(
                    FindingCode::DeletionLooksLikeSnp,
                    "Variant_Type indicates a deletion, allele based columns are the same \
                     length, but none contains -, indicating a SNP",
                ));
            }
        }
        VariantType::Other(_) => {}
    }

    if variant_type.is_substitution() && alleles.any_deletion() {
        findings.push(type_error(
            FindingCode::DeletionInSubstitution,
            format!(
                "Variant_Type indicates a {}, but Reference_Allele, Tumor_Seq_Allele1 \
                 and/or Tumor_Seq_Allele2 contain deletion (-)",
                variant_type.as_str()
            ),
        ));
    }
}

fn type_error(code: FindingCode, message: impl Into<String>) -> Finding {
    Finding::error(code, message)
}
