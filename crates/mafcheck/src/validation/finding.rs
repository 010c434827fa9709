//! Finding types for mutation record issues.

use serde::{Deserialize, Serialize};

/// Identifies which rule produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    // Table-level
    /// File has no data rows.
    EmptyFile,
    /// A required header is absent.
    MissingRequiredColumn,
    /// Neither Hugo_Symbol nor Entrez_Gene_Id is a header.
    MissingGeneIdentifierColumn,
    /// Neither HGVSp_Short nor Amino_Acid_Change is a header.
    MissingAminoAcidChangeColumn,
    /// No SWISSPROT header.
    MissingSwissprotColumn,
    /// The same header appears more than once.
    DuplicateColumn,
    /// ASCN namespace configured but its columns are absent.
    MissingAscnColumns,

    // Structural
    /// Row has a different number of fields than the header.
    MalformedRow,
    /// A value the record cannot be built without is missing.
    MissingRequiredValue,
    /// A numeric field could not be parsed.
    InvalidNumber,

    // Gene identity
    /// Neither gene identifier is present.
    NoGeneIdentifier,
    /// Only the Entrez id is present.
    SymbolMissing,
    /// Symbol not found in the reference table.
    UnknownSymbol,
    /// Entrez id not found in the reference table.
    UnknownEntrezId,
    /// Symbol resolves to a different Entrez id.
    EntrezSymbolMismatch,
    /// No gene identifiers on an intergenic-like record.
    IntergenicFiltered,
    /// No gene identifiers although the classification is genic.
    ImpliedIntergenic,

    // Filters
    /// Variant classification is in the skip set.
    ClassificationFiltered,
    /// Mutation status excludes the record from loading.
    MutationStatusFiltered,

    // Single-field values
    /// Hugo_Symbol starts with a digit.
    SymbolStartsWithDigit,
    /// Entrez_Gene_Id is negative.
    NegativeEntrezId,
    /// Variant_Classification outside the allowed set.
    InvalidVariantClassification,
    /// Variant_Type is not one of the six known types.
    UnknownVariantType,
    /// NCBI_Build is not a supported build.
    InvalidNcbiBuild,
    /// Chromosome is not a known chromosome name.
    InvalidChromosome,
    /// Verification_Status outside the allowed set.
    InvalidVerificationStatus,
    /// Validation_Status outside the allowed set.
    UnknownValidationStatus,
    /// Mutation_Status outside the allowed set.
    UnknownMutationStatus,
    /// Amino acid change value is too long to load.
    AminoAcidChangeTooLong,
    /// SWISSPROT column present but empty for the record.
    MissingSwissprot,
    /// Tumor_Sample_Barcode not defined in the clinical data.
    UnknownSample,
    /// A read count is negative.
    NegativeReadCount,

    // Allele consistency
    /// Allele contains characters outside `-ACTG`.
    InvalidAlleleCharacter,
    /// Allele lengths contradict the declared substitution type.
    AlleleLengthMismatch,
    /// `-` found in a substitution allele.
    DeletionInSubstitution,
    /// Insertion span does not match the reference allele.
    InsertionPositionMismatch,
    /// Insertion reference allele longer than a tumor allele.
    InsertionAlleleLength,
    /// Deletion span does not match the reference allele.
    DeletionPositionMismatch,
    /// Deletion reference allele not longer than both tumor alleles.
    DeletionAlleleLength,
    /// Reference and both tumor alleles are identical.
    NoVariation,
    /// DEL record whose alleles describe a substitution.
    DeletionLooksLikeSnp,

    // Positions
    /// Start_Position is after End_Position.
    StartAfterEnd,

    // Validation status
    /// A validation allele is missing for a valid/invalid call.
    MissingValidationAllele,
    /// A validation allele contains invalid characters.
    InvalidValidationAllele,
    /// Tumor and normal validation alleles differ on an invalid call.
    InvalidStatusAlleleMismatch,
    /// Validation method undefined for a valid/invalid call.
    MissingValidationMethod,
    /// Germline valid call whose tumor and normal alleles differ.
    GermlineAlleleMismatch,
    /// Somatic valid call whose alleles do not show a somatic change.
    SomaticAlleleMismatch,

    // Annotation
    /// No amino acid change for a non-splice-site record.
    MissingAminoAcidChange,
}

impl FindingCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [FindingCode] = &[
        FindingCode::EmptyFile,
        FindingCode::MissingRequiredColumn,
        FindingCode::MissingGeneIdentifierColumn,
        FindingCode::MissingAminoAcidChangeColumn,
        FindingCode::MissingSwissprotColumn,
        FindingCode::DuplicateColumn,
        FindingCode::MissingAscnColumns,
        FindingCode::MalformedRow,
        FindingCode::MissingRequiredValue,
        FindingCode::InvalidNumber,
        FindingCode::NoGeneIdentifier,
        FindingCode::SymbolMissing,
        FindingCode::UnknownSymbol,
        FindingCode::UnknownEntrezId,
        FindingCode::EntrezSymbolMismatch,
        FindingCode::IntergenicFiltered,
        FindingCode::ImpliedIntergenic,
        FindingCode::ClassificationFiltered,
        FindingCode::MutationStatusFiltered,
        FindingCode::SymbolStartsWithDigit,
        FindingCode::NegativeEntrezId,
        FindingCode::InvalidVariantClassification,
        FindingCode::UnknownVariantType,
        FindingCode::InvalidNcbiBuild,
        FindingCode::InvalidChromosome,
        FindingCode::InvalidVerificationStatus,
        FindingCode::UnknownValidationStatus,
        FindingCode::UnknownMutationStatus,
        FindingCode::AminoAcidChangeTooLong,
        FindingCode::MissingSwissprot,
        FindingCode::UnknownSample,
        FindingCode::NegativeReadCount,
        FindingCode::InvalidAlleleCharacter,
        FindingCode::AlleleLengthMismatch,
        FindingCode::DeletionInSubstitution,
        FindingCode::InsertionPositionMismatch,
        FindingCode::InsertionAlleleLength,
        FindingCode::DeletionPositionMismatch,
        FindingCode::DeletionAlleleLength,
        FindingCode::NoVariation,
        FindingCode::DeletionLooksLikeSnp,
        FindingCode::StartAfterEnd,
        FindingCode::MissingValidationAllele,
        FindingCode::InvalidValidationAllele,
        FindingCode::InvalidStatusAlleleMismatch,
        FindingCode::MissingValidationMethod,
        FindingCode::GermlineAlleleMismatch,
        FindingCode::SomaticAlleleMismatch,
        FindingCode::MissingAminoAcidChange,
    ];

    /// Get a human-readable label for the code.
    pub fn label(&self) -> &'static str {
        match self {
            FindingCode::EmptyFile => "Empty file",
            FindingCode::MissingRequiredColumn => "Missing required column",
            FindingCode::MissingGeneIdentifierColumn => "Missing gene identifier column",
            FindingCode::MissingAminoAcidChangeColumn => "Missing amino acid change column",
            FindingCode::MissingSwissprotColumn => "Missing SWISSPROT column",
            FindingCode::DuplicateColumn => "Duplicate column",
            FindingCode::MissingAscnColumns => "Missing ASCN columns",
            FindingCode::MalformedRow => "Malformed row",
            FindingCode::MissingRequiredValue => "Missing required value",
            FindingCode::InvalidNumber => "Invalid number",
            FindingCode::NoGeneIdentifier => "No gene identifier",
            FindingCode::SymbolMissing => "Gene symbol missing",
            FindingCode::UnknownSymbol => "Unknown gene symbol",
            FindingCode::UnknownEntrezId => "Unknown Entrez gene id",
            FindingCode::EntrezSymbolMismatch => "Entrez id does not match symbol",
            FindingCode::IntergenicFiltered => "Intergenic variant filtered",
            FindingCode::ImpliedIntergenic => "Implied intergenic variant",
            FindingCode::ClassificationFiltered => "Classification filtered",
            FindingCode::MutationStatusFiltered => "Mutation status filtered",
            FindingCode::SymbolStartsWithDigit => "Symbol starts with digit",
            FindingCode::NegativeEntrezId => "Negative Entrez gene id",
            FindingCode::InvalidVariantClassification => "Invalid variant classification",
            FindingCode::UnknownVariantType => "Unknown variant type",
            FindingCode::InvalidNcbiBuild => "Invalid NCBI build",
            FindingCode::InvalidChromosome => "Invalid chromosome",
            FindingCode::InvalidVerificationStatus => "Invalid verification status",
            FindingCode::UnknownValidationStatus => "Unknown validation status",
            FindingCode::UnknownMutationStatus => "Unknown mutation status",
            FindingCode::AminoAcidChangeTooLong => "Amino acid change too long",
            FindingCode::MissingSwissprot => "Missing SWISSPROT value",
            FindingCode::UnknownSample => "Unknown sample",
            FindingCode::NegativeReadCount => "Negative read count",
            FindingCode::InvalidAlleleCharacter => "Invalid allele character",
            FindingCode::AlleleLengthMismatch => "Allele length mismatch",
            FindingCode::DeletionInSubstitution => "Deletion in substitution",
            FindingCode::InsertionPositionMismatch => "Insertion position mismatch",
            FindingCode::InsertionAlleleLength => "Insertion allele length",
            FindingCode::DeletionPositionMismatch => "Deletion position mismatch",
            FindingCode::DeletionAlleleLength => "Deletion allele length",
            FindingCode::NoVariation => "No variation declared",
            FindingCode::DeletionLooksLikeSnp => "Deletion looks like SNP",
            FindingCode::StartAfterEnd => "Start after end",
            FindingCode::MissingValidationAllele => "Missing validation allele",
            FindingCode::InvalidValidationAllele => "Invalid validation allele",
            FindingCode::InvalidStatusAlleleMismatch => "Mismatched alleles on invalid call",
            FindingCode::MissingValidationMethod => "Missing validation method",
            FindingCode::GermlineAlleleMismatch => "Germline allele mismatch",
            FindingCode::SomaticAlleleMismatch => "Somatic allele mismatch",
            FindingCode::MissingAminoAcidChange => "Missing amino acid change",
        }
    }

    /// Stable snake_case name, as used in serialized reports.
    pub fn name(&self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Severity the rule reports with under the default configuration.
    pub fn default_severity(&self) -> Severity {
        match self {
            FindingCode::IntergenicFiltered
            | FindingCode::ClassificationFiltered
            | FindingCode::MutationStatusFiltered => Severity::Info,
            FindingCode::MissingSwissprotColumn
            | FindingCode::SymbolMissing
            | FindingCode::UnknownSymbol
            | FindingCode::UnknownEntrezId
            | FindingCode::ImpliedIntergenic
            | FindingCode::SymbolStartsWithDigit
            | FindingCode::UnknownVariantType
            | FindingCode::UnknownValidationStatus
            | FindingCode::UnknownMutationStatus
            | FindingCode::MissingSwissprot
            | FindingCode::MissingAminoAcidChange
            // Downgraded from ERROR by the default validation-status policy.
            | FindingCode::MissingValidationAllele
            | FindingCode::InvalidValidationAllele
            | FindingCode::InvalidStatusAlleleMismatch
            | FindingCode::MissingValidationMethod
            | FindingCode::GermlineAlleleMismatch
            | FindingCode::SomaticAlleleMismatch => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only, e.g. a record filtered silently.
    Info,
    /// Record is loaded with an annotation.
    Warning,
    /// Record is rejected from load.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// Where in the file a finding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaContext {
    /// The file as a whole (headers, empty file).
    Table,
    /// A single column value of a record.
    Column,
    /// A record as a whole, spanning several columns.
    Row,
}

/// An issue found while validating a mutation file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Severity level.
    pub severity: Severity,
    /// Rule that produced the finding.
    pub code: FindingCode,
    /// Scope of the finding.
    pub schema_context: SchemaContext,
    /// Affected column, if the finding is tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Human-readable description.
    pub message: String,
    /// The offending raw value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Finding {
    /// Create a record-level finding not tied to a column.
    pub fn new(severity: Severity, code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            schema_context: SchemaContext::Row,
            column: None,
            message: message.into(),
            value: None,
        }
    }

    /// Create a file-level finding.
    pub fn table(severity: Severity, code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            schema_context: SchemaContext::Table,
            ..Self::new(severity, code, message)
        }
    }

    pub fn error(code: FindingCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: FindingCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn info(code: FindingCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, message)
    }

    /// Attach the finding to a column. Record-level findings become column-level.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        if self.schema_context == SchemaContext::Row {
            self.schema_context = SchemaContext::Column;
        }
        self
    }

    /// Set the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Change the severity, keeping everything else.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Returns true if any finding has error severity.
pub fn has_error(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_error)
}
