//! Rules command - list every finding the validator can report.

use colored::Colorize;
use mafcheck::{FindingCode, Severity};
use serde::Serialize;

#[derive(Serialize)]
struct RuleInfo {
    code: String,
    severity: Severity,
    label: &'static str,
}

fn rules() -> Vec<RuleInfo> {
    FindingCode::ALL
        .iter()
        .map(|code| RuleInfo {
            code: code.name(),
            severity: code.default_severity(),
            label: code.label(),
        })
        .collect()
}

pub fn run(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rules = rules();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    println!("{}", "Rules (default severity):".yellow().bold());
    for rule in &rules {
        let severity = match rule.severity {
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
            Severity::Info => "info".blue(),
        };
        println!("  {:<36} {:<8} {}", rule.code.white(), severity, rule.label);
    }
    println!();
    println!("{} rules", rules.len().to_string().white().bold());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_cover_every_code() {
        let rules = rules();
        assert_eq!(rules.len(), FindingCode::ALL.len());
        assert!(rules.iter().any(|r| r.code == "no_gene_identifier"));
        assert!(rules.iter().all(|r| !r.code.is_empty()));
    }
}
