//! Validate command: check the built-in ruleset without writing anything.

use crate::cli::common::{CliError, CliResult};
use crate::keydb::KeyDb;
use crate::ruleset;
use crate::validator::{RulesetValidator, ValidationReport};
use clap::Args;
use serde_json::json;

/// Validate the built-in rules against the key database and guard semantics
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Emit a machine-readable JSON report
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as failures
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let rules = ruleset::all();
        let key_db = KeyDb::load()
            .map_err(|e| CliError::io(format!("Failed to load key database: {e}")))?;

        let report = RulesetValidator::new(&rules, &key_db).validate();

        if self.json {
            print_json_report(&report, rules.len());
        } else {
            print_human_report(&report, rules.len());
        }

        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "{} validation errors",
                report.errors.len()
            )));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation(format!(
                "{} warnings (strict mode)",
                report.warnings.len()
            )));
        }

        Ok(())
    }
}

/// Prints the machine-readable report to stdout.
fn print_json_report(report: &ValidationReport, rule_count: usize) {
    let output = json!({
        "valid": report.is_valid(),
        "rules": rule_count,
        "errors": report.errors,
        "warnings": report.warnings,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Prints the human-readable report to stdout.
fn print_human_report(report: &ValidationReport, rule_count: usize) {
    if report.is_valid() && report.warnings.is_empty() {
        println!("✓ {} rules passed validation", rule_count);
    } else {
        println!("{}", report.format_message());
        if report.is_valid() {
            println!("✓ {} rules valid ({} warnings)", rule_count, report.warnings.len());
        }
    }
}
