//! Validate command - check a mutation file and report findings.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use colored::Colorize;
use mafcheck::validation::ReportEntry;
use mafcheck::{
    GeneReferenceTable, MafValidator, Report, SampleIdSet, Severity, ValidationOutcome,
    ValidationStatusPolicy, ValidatorConfig,
};

use crate::cli::{ReportFormat, ValidateArgs};

/// Findings listed in the human summary before truncating.
const MAX_LISTED: usize = 25;

/// Returns whether the file passed validation.
pub fn run(args: ValidateArgs) -> Result<bool, Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let config = build_config(&args)?;

    let genes = match &args.genes {
        Some(path) => Some(GeneReferenceTable::from_tsv(path)?),
        None => None,
    };
    let samples = match &args.samples {
        Some(path) => Some(SampleIdSet::from_file(path)?),
        None => None,
    };

    tracing::info!(file = %args.file.display(), "validating mutation file");
    let validator = MafValidator::with_config(config);
    let outcome = validator.validate_file(
        &args.file,
        genes
            .as_ref()
            .map(|g| g as &dyn mafcheck::GeneReference),
        samples.as_ref(),
    )?;

    match (&args.output, args.format) {
        (Some(path), format) => {
            write_report(&outcome.report, format.unwrap_or(ReportFormat::Json), path)?;
            print_summary(&outcome, &args.file);
            println!(
                "\n{} {}",
                "Report written to".cyan(),
                path.display().to_string().white()
            );
        }
        (None, Some(format)) => {
            let stdout = io::stdout();
            emit_report(&outcome.report, format, stdout.lock())?;
        }
        (None, None) => print_summary(&outcome, &args.file),
    }

    Ok(outcome.passed())
}

/// Config file (or defaults) with command-line overrides applied.
fn build_config(args: &ValidateArgs) -> Result<ValidatorConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ValidatorConfig::load(path)?,
        None => ValidatorConfig::default(),
    };

    if args.no_parallel {
        config.parallel = false;
    }
    if args.reject_on_validation_status {
        config.validation_status_policy = ValidationStatusPolicy::Reject;
    }
    if args.allow_missing_genes {
        config.require_gene_reference = false;
    }
    for namespace in &args.namespaces {
        if !config.has_namespace(namespace) {
            config.namespaces.push(namespace.clone());
        }
    }

    Ok(config)
}

fn write_report(
    report: &Report,
    format: ReportFormat,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;
    emit_report(report, format, BufWriter::new(file))
}

fn emit_report<W: Write>(
    report: &Report,
    format: ReportFormat,
    mut writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)?;
            writeln!(writer)?;
        }
        ReportFormat::Tsv => report.write_tsv(&mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(outcome: &ValidationOutcome, file: &Path) {
    let report = &outcome.report;
    let summary = &report.summary;

    println!(
        "{} {}",
        "Validated".cyan().bold(),
        file.display().to_string().white()
    );
    println!("  {}", outcome.source.hash.dimmed());
    println!();

    println!("{}", "Records:".yellow().bold());
    println!("  Total:    {}", summary.records.to_string().white().bold());
    println!("  Loaded:   {}", summary.verdicts.loaded.to_string().green());
    println!("  Warned:   {}", summary.verdicts.warned.to_string().yellow());
    println!("  Filtered: {}", summary.verdicts.filtered.to_string().blue());
    println!("  Rejected: {}", summary.verdicts.rejected.to_string().red());
    let generic = report.records.iter().filter(|r| r.generic_mutated_flag).count();
    if generic > 0 {
        println!("  Loaded as generic MUTATED: {}", generic.to_string().magenta());
    }
    println!();

    println!(
        "Found {} findings ({} errors, {} warnings, {} info)",
        report.entries.len().to_string().white().bold(),
        summary.findings.error.to_string().red(),
        summary.findings.warning.to_string().yellow(),
        summary.findings.info.to_string().blue()
    );

    let listed: Vec<&ReportEntry> = report
        .entries
        .iter()
        .filter(|e| e.finding.severity > Severity::Info)
        .take(MAX_LISTED)
        .collect();
    for entry in &listed {
        print_entry(entry);
    }
    let listable = report
        .entries
        .iter()
        .filter(|e| e.finding.severity > Severity::Info)
        .count();
    if listable > listed.len() {
        println!(
            "  ... and {} more (use --output for the full report)",
            listable - listed.len()
        );
    }
    println!();

    if report.passed {
        println!("{}", "PASSED".green().bold());
    } else {
        println!("{}", "FAILED".red().bold());
    }
}

fn print_entry(entry: &ReportEntry) {
    let f = &entry.finding;
    let severity = match f.severity {
        Severity::Error => "error".red(),
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".blue(),
    };
    let location = match entry.line {
        Some(line) => format!("line {}", line),
        None => "file".to_string(),
    };
    let column = f
        .column
        .as_deref()
        .map(|c| format!(" {}:", c))
        .unwrap_or_default();
    println!(
        "  {:>10} [{}]{} {}",
        location.dimmed(),
        severity,
        column.white(),
        f.message
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(file: PathBuf) -> ValidateArgs {
        ValidateArgs {
            file,
            genes: None,
            samples: None,
            config: None,
            output: None,
            format: None,
            no_parallel: false,
            reject_on_validation_status: false,
            namespaces: Vec::new(),
            allow_missing_genes: false,
        }
    }

    #[test]
    fn test_overrides_applied() {
        let mut a = args(PathBuf::from("x.maf"));
        a.no_parallel = true;
        a.reject_on_validation_status = true;
        a.allow_missing_genes = true;
        a.namespaces = vec!["ascn".into(), "ASCN".into()];
        let config = build_config(&a).unwrap();

        assert!(!config.parallel);
        assert!(!config.require_gene_reference);
        assert_eq!(config.validation_status_policy, ValidationStatusPolicy::Reject);
        assert_eq!(config.namespaces, vec!["ascn"]);
    }

    #[test]
    fn test_validate_writes_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let maf = dir.path().join("data_mutations.txt");
        std::fs::write(
            &maf,
            "Hugo_Symbol\tTumor_Sample_Barcode\tVariant_Classification\tVariant_Type\t\
             Reference_Allele\tTumor_Seq_Allele1\tTumor_Seq_Allele2\tHGVSp_Short\tSWISSPROT\n\
             TP53\tS-1\tMissense_Mutation\tSNP\tAC\tA\tT\tp.R273H\tP04637\n",
        )
        .unwrap();
        let genes = dir.path().join("genes.tsv");
        std::fs::write(&genes, "hugoGeneSymbol\tentrezGeneId\nTP53\t7157\n").unwrap();
        let output = dir.path().join("report.tsv");

        let mut a = args(maf);
        a.genes = Some(genes);
        a.output = Some(output.clone());
        a.format = Some(ReportFormat::Tsv);
        let passed = run(a).unwrap();

        assert!(!passed);
        let report = std::fs::read_to_string(output).unwrap();
        assert!(report.contains("allele_length_mismatch"));
    }

    #[test]
    fn test_missing_genes_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let maf = dir.path().join("data_mutations.txt");
        std::fs::write(&maf, "Hugo_Symbol\tTumor_Sample_Barcode\nTP53\tS-1\n").unwrap();

        assert!(run(args(maf)).is_err());
    }
}
