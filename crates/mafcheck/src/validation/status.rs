//! Validation-status consistency rules.

use super::allele::is_valid_allele;
use super::context::{RecordCheck, ValidationContext};
use super::finding::{Finding, FindingCode};
use crate::maf::columns as col;
use crate::maf::{MutationRecord, MutationStatus, ValidationAlleles, ValidationStatus};

/// Checks validation alleles and method against the declared statuses.
///
/// Every rule is guarded by the fields it reads: when a guard field is
/// missing the rule yields nothing.
pub struct ValidationStatusChecker;

impl ValidationStatusChecker {
    pub fn check(
        validation_status: Option<&ValidationStatus>,
        validation_method: Option<&str>,
        mutation_status: Option<&MutationStatus>,
        alleles: &ValidationAlleles,
        reference_allele: Option<&str>,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        let Some(status) = validation_status else {
            return findings;
        };
        if !status.is_decided() {
            return findings;
        }

        for (column, value) in alleles.columns() {
            match value {
                None => findings.push(
                    Finding::error(
                        FindingCode::MissingValidationAllele,
                        format!(
                            "Validation_Status is {}, but {} is empty",
                            status.as_str(),
                            column
                        ),
                    )
                    .with_column(column),
                ),
                Some(value) if !is_valid_allele(value) => findings.push(
                    Finding::error(
                        FindingCode::InvalidValidationAllele,
                        format!("{} contains invalid character", column),
                    )
                    .with_column(column)
                    .with_value(value),
                ),
                Some(_) => {}
            }
        }

        let method_defined = validation_method
            .is_some_and(|m| !m.eq_ignore_ascii_case("none") && !m.eq_ignore_ascii_case("na"));
        if !method_defined {
            let mut finding = Finding::error(
                FindingCode::MissingValidationMethod,
                format!(
                    "Validation_Status is {}, but Validation_Method is not defined",
                    status.as_str()
                ),
            )
            .with_column(col::VALIDATION_METHOD);
            if let Some(method) = validation_method {
                finding = finding.with_value(method);
            }
            findings.push(finding);
        }

        let Some([tumor1, tumor2, norm1, norm2]) = alleles.complete() else {
            return findings;
        };
        let tumor_matches_norm = tumor1 == norm1 && tumor2 == norm2;

        if *status == ValidationStatus::Invalid && !tumor_matches_norm {
            findings.push(Finding::error(
                FindingCode::InvalidStatusAlleleMismatch,
                "Validation_Status is invalid, but the Tumor_Validation_Allele and \
                 Match_Norm_Validation_Allele columns are not equal",
            ));
        }

        if *status != ValidationStatus::Valid {
            return findings;
        }

        match mutation_status {
            Some(MutationStatus::Germline) if !tumor_matches_norm => {
                findings.push(Finding::error(
                    FindingCode::GermlineAlleleMismatch,
                    "Validation_Status is valid and Mutation_Status is Germline, but the \
                     Tumor_Validation_Allele columns do not equal the Match_Norm_Validation_Allele columns",
                ));
            }
            Some(MutationStatus::Somatic) => {
                if let Some(reference) = reference_allele {
                    let norm_is_reference = norm1 == norm2 && norm2 == reference;
                    let tumor_differs = tumor1 != reference || tumor2 != reference;
                    if !(norm_is_reference && tumor_differs) {
                        findings.push(Finding::error(
                            FindingCode::SomaticAlleleMismatch,
                            "Validation_Status is valid and Mutation_Status is Somatic, but the \
                             Match_Norm_Validation_Allele columns do not both equal the \
                             Reference_Allele or no Tumor_Validation_Allele differs from it",
                        ));
                    }
                }
            }
            _ => {}
        }

        findings
    }
}

impl RecordCheck for ValidationStatusChecker {
    fn check(&self, record: &MutationRecord, _ctx: &ValidationContext<'_>) -> Vec<Finding> {
        Self::check(
            record.validation_status.as_ref(),
            record.validation_method.as_deref(),
            record.mutation_status.as_ref(),
            &record.validation_alleles,
            record.reference_allele.as_deref(),
        )
    }

    fn name(&self) -> &'static str {
        "validation_status"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alleles(t1: &str, t2: &str, n1: &str, n2: &str) -> ValidationAlleles {
        ValidationAlleles {
            tumor1: Some(t1.into()),
            tumor2: Some(t2.into()),
            norm1: Some(n1.into()),
            norm2: Some(n2.into()),
        }
    }

    fn codes(findings: Vec<Finding>) -> Vec<FindingCode> {
        findings.into_iter().map(|f| f.code).collect()
    }

    #[test]
    fn test_untested_is_inert() {
        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Untested),
            None,
            Some(&MutationStatus::Somatic),
            &ValidationAlleles::default(),
            Some("A"),
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_missing_status_is_inert() {
        let findings = ValidationStatusChecker::check(
            None,
            None,
            None,
            &ValidationAlleles::default(),
            None,
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_valid_with_missing_allele() {
        let mut va = alleles("A", "G", "A", "A");
        va.tumor1 = None;
        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Valid),
            Some("Sanger"),
            Some(&MutationStatus::Somatic),
            &va,
            Some("A"),
        );
        assert_eq!(codes(findings), vec![FindingCode::MissingValidationAllele]);
    }

    #[test]
    fn test_invalid_character() {
        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Valid),
            Some("Sanger"),
            None,
            &alleles("A", "N", "A", "A"),
            Some("A"),
        );
        assert_eq!(codes(findings), vec![FindingCode::InvalidValidationAllele]);
    }

    #[test]
    fn test_method_required() {
        for method in [None, Some("none"), Some("NA")] {
            let findings = ValidationStatusChecker::check(
                Some(&ValidationStatus::Valid),
                method,
                None,
                &alleles("A", "G", "A", "A"),
                Some("A"),
            );
            assert_eq!(codes(findings), vec![FindingCode::MissingValidationMethod]);
        }
    }

    #[test]
    fn test_invalid_requires_tumor_equal_norm() {
        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Invalid),
            Some("Sanger"),
            None,
            &alleles("A", "G", "A", "A"),
            Some("A"),
        );
        assert_eq!(codes(findings), vec![FindingCode::InvalidStatusAlleleMismatch]);

        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Invalid),
            Some("Sanger"),
            None,
            &alleles("A", "A", "A", "A"),
            Some("A"),
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_germline_valid() {
        let ok = ValidationStatusChecker::check(
            Some(&ValidationStatus::Valid),
            Some("Sanger"),
            Some(&MutationStatus::Germline),
            &alleles("A", "G", "A", "G"),
            Some("A"),
        );
        assert!(ok.is_empty());

        let bad = ValidationStatusChecker::check(
            Some(&ValidationStatus::Valid),
            Some("Sanger"),
            Some(&MutationStatus::Germline),
            &alleles("A", "G", "A", "A"),
            Some("A"),
        );
        assert_eq!(codes(bad), vec![FindingCode::GermlineAlleleMismatch]);
    }

    #[test]
    fn test_somatic_valid_one_tumor_allele_differs() {
        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Valid),
            Some("Sanger"),
            Some(&MutationStatus::Somatic),
            &alleles("A", "G", "A", "A"),
            Some("A"),
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_somatic_valid_violations() {
        // Tumor alleles identical to the reference.
        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Valid),
            Some("Sanger"),
            Some(&MutationStatus::Somatic),
            &alleles("A", "A", "A", "A"),
            Some("A"),
        );
        assert_eq!(codes(findings), vec![FindingCode::SomaticAlleleMismatch]);

        // Normal allele differs from the reference.
        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Valid),
            Some("Sanger"),
            Some(&MutationStatus::Somatic),
            &alleles("A", "G", "A", "T"),
            Some("A"),
        );
        assert_eq!(codes(findings), vec![FindingCode::SomaticAlleleMismatch]);
    }

    #[test]
    fn test_somatic_without_reference_is_inert() {
        let findings = ValidationStatusChecker::check(
            Some(&ValidationStatus::Valid),
            Some("Sanger"),
            Some(&MutationStatus::Somatic),
            &alleles("A", "A", "A", "A"),
            None,
        );
        assert!(findings.is_empty());
    }
}
