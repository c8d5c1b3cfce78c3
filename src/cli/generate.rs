//! Generate command: build the ruleset and write it to the host store.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::keydb::KeyDb;
use crate::ruleset;
use crate::validator::RulesetValidator;
use crate::writer::{self, WriteOptions};
use clap::Args;
use std::path::PathBuf;

/// Build the built-in rules and write them to a profile
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Path to karabiner.json (defaults to the configured or host location)
    #[arg(long, value_name = "FILE")]
    pub karabiner: Option<PathBuf>,

    /// Profile to write into (created if missing)
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Skip the pre-write backup copy
    #[arg(long)]
    pub no_backup: bool,

    /// Validate and render without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_default();

        let store_path = match &self.karabiner {
            Some(path) => path.clone(),
            None => match config.paths.karabiner_config {
                Some(path) => path,
                None => writer::locate_config()
                    .map_err(|e| CliError::io(format!("Failed to locate karabiner.json: {e}")))?,
            },
        };

        let profile = self
            .profile
            .clone()
            .unwrap_or_else(|| config.write.profile.clone());

        let rules = ruleset::all();
        let rule_count = rules.len();

        // Validate before touching the store
        let key_db = KeyDb::load()
            .map_err(|e| CliError::io(format!("Failed to load key database: {e}")))?;
        let report = RulesetValidator::new(&rules, &key_db).validate();

        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "Ruleset validation failed:\n{}",
                report.format_message()
            )));
        }

        for warning in &report.warnings {
            eprintln!("⚠️  {warning}");
        }

        let options = WriteOptions {
            backup: !self.no_backup && config.write.backup,
            dry_run: self.dry_run,
        };

        writer::write_to_profile(&store_path, &profile, rules, &options)
            .map_err(|e| CliError::io(format!("Failed to write profile: {e}")))?;

        if self.dry_run {
            println!("✓ Dry run: profile '{}' not written", profile);
        } else {
            println!(
                "✓ Wrote {} rules to profile '{}' in {}",
                rule_count,
                profile,
                store_path.display()
            );
        }

        Ok(())
    }
}
