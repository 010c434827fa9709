//! MAF column names and the value sets the rules compare against.

pub const HUGO_SYMBOL: &str = "Hugo_Symbol";
pub const ENTREZ_GENE_ID: &str = "Entrez_Gene_Id";
pub const NCBI_BUILD: &str = "NCBI_Build";
pub const CHROMOSOME: &str = "Chromosome";
pub const START_POSITION: &str = "Start_Position";
pub const END_POSITION: &str = "End_Position";
pub const VARIANT_CLASSIFICATION: &str = "Variant_Classification";
pub const VARIANT_TYPE: &str = "Variant_Type";
pub const REFERENCE_ALLELE: &str = "Reference_Allele";
pub const TUMOR_SEQ_ALLELE1: &str = "Tumor_Seq_Allele1";
pub const TUMOR_SEQ_ALLELE2: &str = "Tumor_Seq_Allele2";
pub const TUMOR_SAMPLE_BARCODE: &str = "Tumor_Sample_Barcode";
pub const TUMOR_VALIDATION_ALLELE1: &str = "Tumor_Validation_Allele1";
pub const TUMOR_VALIDATION_ALLELE2: &str = "Tumor_Validation_Allele2";
pub const MATCH_NORM_VALIDATION_ALLELE1: &str = "Match_Norm_Validation_Allele1";
pub const MATCH_NORM_VALIDATION_ALLELE2: &str = "Match_Norm_Validation_Allele2";
pub const VERIFICATION_STATUS: &str = "Verification_Status";
pub const VALIDATION_STATUS: &str = "Validation_Status";
pub const MUTATION_STATUS: &str = "Mutation_Status";
pub const VALIDATION_METHOD: &str = "Validation_Method";
pub const T_REF_COUNT: &str = "t_ref_count";
pub const T_ALT_COUNT: &str = "t_alt_count";
pub const N_REF_COUNT: &str = "n_ref_count";
pub const N_ALT_COUNT: &str = "n_alt_count";
pub const HGVSP_SHORT: &str = "HGVSp_Short";
pub const AMINO_ACID_CHANGE: &str = "Amino_Acid_Change";
pub const SWISSPROT: &str = "SWISSPROT";

/// Headers every mutation file must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[TUMOR_SAMPLE_BARCODE, VARIANT_CLASSIFICATION];

/// At least one of these must be a header.
pub const GENE_IDENTIFIER_COLUMNS: &[&str] = &[HUGO_SYMBOL, ENTREZ_GENE_ID];

/// At least one of these must be a header.
pub const AMINO_ACID_CHANGE_COLUMNS: &[&str] = &[HGVSP_SHORT, AMINO_ACID_CHANGE];

/// Columns required when the `ascn` namespace is declared.
pub const ASCN_COLUMNS: &[&str] = &[
    "ASCN.ASCN_METHOD",
    "ASCN.ASCN_INTEGER_COPY_NUMBER",
    "ASCN.TOTAL_COPY_NUMBER",
    "ASCN.MINOR_COPY_NUMBER",
    "ASCN.CCF_EXPECTED_COPIES",
    "ASCN.CCF_EXPECTED_COPIES_UPPER",
    "ASCN.CLONAL",
    "ASCN.EXPECTED_ALT_COPIES",
];

/// Supported genome builds.
pub const NCBI_BUILDS: &[&str] = &["GRCh37", "GRCh38", "GRCm38", "37", "38"];

/// Allowed Verification_Status values (lowercase).
pub const VERIFICATION_STATUSES: &[&str] = &["verified", "unknown", "na"];

/// Default intergenic-like classifications.
pub const INTERGENIC_CLASSIFICATIONS: &[&str] = &["IGR", "Targeted_Region"];

/// Default classifications that are not loaded.
pub const SKIP_CLASSIFICATIONS: &[&str] = &[
    "Silent", "Intron", "3'UTR", "3'Flank", "5'UTR", "5'Flank", "IGR", "RNA",
];

/// Default mutation statuses that are not loaded.
pub const FILTERED_MUTATION_STATUSES: &[&str] = &["LOH", "None", "Wildtype"];

/// Classification exempt from the amino acid change requirement.
pub const SPLICE_SITE: &str = "Splice_Site";

/// Whether a chromosome name is known (1-23, X, Y, MT, optional `chr` prefix).
pub fn is_known_chromosome(value: &str) -> bool {
    let name = value
        .strip_prefix("chr")
        .or_else(|| value.strip_prefix("CHR"))
        .unwrap_or(value);
    match name {
        "X" | "Y" | "M" | "MT" | "x" | "y" => true,
        n => {
            n.bytes().all(|b| b.is_ascii_digit())
                && !n.starts_with('0')
                && n.parse::<u8>().is_ok_and(|c| (1..=23).contains(&c))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chromosomes() {
        assert!(is_known_chromosome("1"));
        assert!(is_known_chromosome("23"));
        assert!(is_known_chromosome("chrX"));
        assert!(is_known_chromosome("MT"));
        assert!(!is_known_chromosome("24"));
        assert!(!is_known_chromosome("01"));
        assert!(!is_known_chromosome("chrUn_gl000220"));
    }
}
