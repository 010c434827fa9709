//! Integration tests for mafcheck.

use std::io::Write;
use tempfile::NamedTempFile;

use mafcheck::validation::{SchemaContext, Severity};
use mafcheck::{
    FindingCode, GeneReferenceTable, MafCheckError, MafValidator, SampleIdSet,
    ValidationStatusPolicy, ValidatorConfig, Verdict,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const GENES: &str = "hugoGeneSymbol\tentrezGeneId\taliases\n\
                     TP53\t7157\tP53|LFS1\n\
                     KRAS\t3845\tKRAS2\n\
                     BRAF\t673\t\n\
                     EGFR\t1956\tERBB|ERBB1\n";

const HEADER: &str = "Hugo_Symbol\tEntrez_Gene_Id\tTumor_Sample_Barcode\tVariant_Classification\t\
Variant_Type\tReference_Allele\tTumor_Seq_Allele1\tTumor_Seq_Allele2\tStart_Position\tEnd_Position\t\
Validation_Status\tValidation_Method\tMutation_Status\tTumor_Validation_Allele1\t\
Tumor_Validation_Allele2\tMatch_Norm_Validation_Allele1\tMatch_Norm_Validation_Allele2\t\
HGVSp_Short\tSWISSPROT";

fn genes() -> GeneReferenceTable {
    GeneReferenceTable::from_tsv_bytes(GENES.as_bytes()).expect("Failed to load genes")
}

/// One MAF line from `(column, value)` pairs; unspecified columns are empty.
fn line(values: &[(&str, &str)]) -> String {
    HEADER
        .split('\t')
        .map(|column| {
            values
                .iter()
                .find(|(c, _)| *c == column)
                .map(|(_, v)| *v)
                .unwrap_or("")
        })
        .collect::<Vec<_>>()
        .join("\t")
}

fn base() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Hugo_Symbol", "KRAS"),
        ("Entrez_Gene_Id", "3845"),
        ("Tumor_Sample_Barcode", "TCGA-01"),
        ("Variant_Classification", "Missense_Mutation"),
        ("Variant_Type", "SNP"),
        ("Reference_Allele", "C"),
        ("Tumor_Seq_Allele1", "C"),
        ("Tumor_Seq_Allele2", "T"),
        ("Start_Position", "25398284"),
        ("End_Position", "25398284"),
        ("HGVSp_Short", "p.G12D"),
        ("SWISSPROT", "P01116"),
    ]
}

fn with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    let mut values = base();
    for (column, value) in overrides {
        match values.iter_mut().find(|(c, _)| c == column) {
            Some(slot) => slot.1 = *value,
            None => values.push((*column, *value)),
        }
    }
    values
}

fn maf(records: &[Vec<(&str, &str)>]) -> String {
    let mut content = String::from("#version 2.4\n");
    content.push_str(HEADER);
    content.push('\n');
    for record in records {
        content.push_str(&line(record));
        content.push('\n');
    }
    content
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_validate_clean_file() {
    let file = create_test_file(&maf(&[base(), with(&[("Hugo_Symbol", "TP53"), ("Entrez_Gene_Id", "7157")])]));

    let outcome = MafValidator::new()
        .validate_file(file.path(), Some(&genes()), None)
        .expect("Validation failed");

    assert!(outcome.passed());
    assert_eq!(outcome.source.row_count, 2);
    assert_eq!(outcome.report.summary.verdicts.loaded, 2);
    assert!(outcome.report.entries.is_empty());
}

#[test]
fn test_line_numbers_count_preamble_and_header() {
    let file = create_test_file(&maf(&[base(), with(&[("Reference_Allele", "AC")])]));

    let outcome = MafValidator::new()
        .validate_file(file.path(), Some(&genes()), None)
        .expect("Validation failed");

    let entry = outcome.report.errors().next().expect("expected an error");
    assert_eq!(entry.row, Some(2));
    assert_eq!(entry.line, Some(4));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = MafValidator::new().validate_file("/nonexistent/data_mutations.txt", Some(&genes()), None);
    assert!(matches!(result, Err(MafCheckError::Io { .. })));
}

#[test]
fn test_missing_reference_aborts_before_records() {
    let file = create_test_file(&maf(&[base()]));
    let result = MafValidator::new().validate_file(file.path(), None, None);
    assert!(matches!(result, Err(MafCheckError::Config(_))));
}

#[test]
fn test_alias_resolves_symbol() {
    let file = create_test_file(&maf(&[with(&[("Hugo_Symbol", "KRAS2"), ("Entrez_Gene_Id", "")])]));

    let outcome = MafValidator::new()
        .validate_file(file.path(), Some(&genes()), None)
        .expect("Validation failed");

    assert_eq!(outcome.report.records[0].verdict, Verdict::Loaded);
}

#[test]
fn test_unknown_sample_rejected() {
    let file = create_test_file(&maf(&[base(), with(&[("Tumor_Sample_Barcode", "TCGA-99")])]));
    let samples = SampleIdSet::new(["TCGA-01"]);

    let outcome = MafValidator::new()
        .validate_file(file.path(), Some(&genes()), Some(&samples))
        .expect("Validation failed");

    assert_eq!(outcome.report.records[0].verdict, Verdict::Loaded);
    assert_eq!(outcome.report.records[1].verdict, Verdict::Rejected);
    assert_eq!(
        outcome.report.errors().next().map(|e| e.finding.code),
        Some(FindingCode::UnknownSample)
    );
}

#[test]
fn test_missing_required_column_is_table_error() {
    let content = "Hugo_Symbol\tVariant_Classification\tHGVSp_Short\n\
                   TP53\tMissense_Mutation\tp.R273H\n";
    let file = create_test_file(content);

    let outcome = MafValidator::new()
        .validate_file(file.path(), Some(&genes()), None)
        .expect("Validation failed");

    assert!(!outcome.passed());
    assert!(outcome.report.records.is_empty());
    assert!(
        outcome
            .report
            .entries
            .iter()
            .all(|e| e.finding.schema_context == SchemaContext::Table)
    );
    let error = outcome.report.errors().next().expect("expected an error");
    assert_eq!(error.finding.code, FindingCode::MissingRequiredColumn);
    assert_eq!(error.finding.column.as_deref(), Some("Tumor_Sample_Barcode"));
}

#[test]
fn test_report_is_sorted_by_context_column_row() {
    let file = create_test_file(&maf(&[
        with(&[("Reference_Allele", "AC")]),
        with(&[("Hugo_Symbol", "NOTAGENE"), ("Entrez_Gene_Id", "")]),
        with(&[("Start_Position", "25398290")]),
        with(&[("Reference_Allele", "N")]),
    ]));

    let outcome = MafValidator::new()
        .validate_file(file.path(), Some(&genes()), None)
        .expect("Validation failed");

    let keys: Vec<_> = outcome
        .report
        .entries
        .iter()
        .map(|e| (e.finding.schema_context, e.finding.column.clone(), e.row))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_json_and_tsv_output() {
    let file = create_test_file(&maf(&[with(&[("Reference_Allele", "AC")])]));
    let outcome = MafValidator::new()
        .validate_file(file.path(), Some(&genes()), None)
        .expect("Validation failed");

    let json = outcome.report.to_json().expect("JSON failed");
    assert!(json.contains("\"allele_length_mismatch\""));

    let mut tsv = Vec::new();
    outcome.report.write_tsv(&mut tsv).expect("TSV failed");
    let tsv = String::from_utf8(tsv).expect("TSV is UTF-8");
    assert_eq!(tsv.lines().count(), 2);
}

// =============================================================================
// Record scenarios
// =============================================================================

fn run(records: &[Vec<(&str, &str)>], config: ValidatorConfig) -> mafcheck::Report {
    let file = create_test_file(&maf(records));
    MafValidator::with_config(config)
        .validate_file(file.path(), Some(&genes()), None)
        .expect("Validation failed")
        .report
}

#[test]
fn test_scenario_snp_consistent() {
    let report = run(&[base()], ValidatorConfig::default());
    assert!(report.entries.is_empty());
    assert_eq!(report.records[0].verdict, Verdict::Loaded);
}

#[test]
fn test_scenario_snp_wrong_length() {
    let report = run(&[with(&[("Reference_Allele", "AC")])], ValidatorConfig::default());
    assert_eq!(report.records[0].verdict, Verdict::Rejected);
    assert!(report.errors().any(|e| e.finding.code == FindingCode::AlleleLengthMismatch));
}

#[test]
fn test_scenario_intergenic_without_gene() {
    let report = run(
        &[with(&[
            ("Hugo_Symbol", ""),
            ("Entrez_Gene_Id", ""),
            ("Variant_Classification", "IGR"),
        ])],
        ValidatorConfig::default(),
    );

    assert_eq!(report.records[0].verdict, Verdict::Filtered);
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].finding.severity, Severity::Info);
}

#[test]
fn test_scenario_valid_status_missing_allele() {
    let record = with(&[
        ("Validation_Status", "Valid"),
        ("Validation_Method", "Sanger"),
        ("Mutation_Status", "Somatic"),
        ("Tumor_Validation_Allele2", "T"),
        ("Match_Norm_Validation_Allele1", "C"),
        ("Match_Norm_Validation_Allele2", "C"),
    ]);
    let config = ValidatorConfig {
        validation_status_policy: ValidationStatusPolicy::Reject,
        ..Default::default()
    };
    let report = run(&[record.clone()], config);

    let entry = report.errors().next().expect("expected an error");
    assert_eq!(entry.finding.code, FindingCode::MissingValidationAllele);
    assert_eq!(entry.finding.column.as_deref(), Some("Tumor_Validation_Allele1"));

    // Default policy keeps the record and reports a warning.
    let report = run(&[record], ValidatorConfig::default());
    assert_eq!(report.records[0].verdict, Verdict::Warned);
    assert!(report.passed);
}

#[test]
fn test_scenario_somatic_valid_one_allele_differs() {
    let record = with(&[
        ("Validation_Status", "Valid"),
        ("Validation_Method", "Sanger"),
        ("Mutation_Status", "Somatic"),
        ("Tumor_Validation_Allele1", "C"),
        ("Tumor_Validation_Allele2", "T"),
        ("Match_Norm_Validation_Allele1", "C"),
        ("Match_Norm_Validation_Allele2", "C"),
    ]);
    let config = ValidatorConfig {
        validation_status_policy: ValidationStatusPolicy::Reject,
        ..Default::default()
    };
    let report = run(&[record], config);

    assert!(report.entries.is_empty());
    assert_eq!(report.records[0].verdict, Verdict::Loaded);
}

#[test]
fn test_no_gene_outside_intergenic_set_never_loaded() {
    let report = run(
        &[with(&[("Hugo_Symbol", "NA"), ("Entrez_Gene_Id", "0")])],
        ValidatorConfig::default(),
    );
    assert_eq!(report.records[0].verdict, Verdict::Filtered);
    assert_eq!(report.entries[0].finding.severity, Severity::Warning);
}

#[test]
fn test_deletion_record() {
    let report = run(
        &[with(&[
            ("Variant_Classification", "Frame_Shift_Del"),
            ("Variant_Type", "DEL"),
            ("Reference_Allele", "CTT"),
            ("Tumor_Seq_Allele1", "CTT"),
            ("Tumor_Seq_Allele2", "-"),
            ("Start_Position", "100"),
            ("End_Position", "102"),
        ])],
        ValidatorConfig::default(),
    );
    // Tumor_Seq_Allele1 is as long as the reference allele.
    assert!(report.errors().any(|e| e.finding.code == FindingCode::DeletionAlleleLength));

    let report = run(
        &[with(&[
            ("Variant_Classification", "Frame_Shift_Del"),
            ("Variant_Type", "DEL"),
            ("Reference_Allele", "CTT"),
            ("Tumor_Seq_Allele1", "-"),
            ("Tumor_Seq_Allele2", "-"),
            ("Start_Position", "100"),
            ("End_Position", "102"),
        ])],
        ValidatorConfig::default(),
    );
    assert!(report.passed);
}
