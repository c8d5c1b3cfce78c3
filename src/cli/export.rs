//! Export command: render the built-in rules as JSON.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::ruleset;
use crate::writer;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Render the built-in rules as JSON
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Render the whole merged document instead of the rules array
    #[arg(long)]
    pub full: bool,

    /// Path to karabiner.json to merge into (only with --full)
    #[arg(long, value_name = "FILE")]
    pub karabiner: Option<PathBuf>,

    /// Profile to merge into (only with --full)
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Minified single-line output
    #[arg(long)]
    pub compact: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        if !self.full && (self.karabiner.is_some() || self.profile.is_some()) {
            return Err(CliError::usage(
                "--karabiner and --profile only apply together with --full",
            ));
        }

        let rules = ruleset::all();

        let rendered = if self.full {
            let config = Config::load().unwrap_or_default();
            let store_path = match &self.karabiner {
                Some(path) => path.clone(),
                None => match config.paths.karabiner_config {
                    Some(path) => path,
                    None => writer::locate_config().map_err(|e| {
                        CliError::io(format!("Failed to locate karabiner.json: {e}"))
                    })?,
                },
            };
            let profile = self
                .profile
                .clone()
                .unwrap_or_else(|| config.write.profile.clone());

            let mut document = writer::load_document(&store_path)
                .map_err(|e| CliError::io(format!("Failed to load store: {e}")))?;
            document.ensure_profile(&profile).replace_rules(rules);

            if self.compact {
                serde_json::to_string(&document)
                    .map_err(|e| CliError::io(format!("Failed to serialize document: {e}")))?
            } else {
                writer::render_document(&document)
                    .map_err(|e| CliError::io(format!("Failed to render document: {e}")))?
            }
        } else if self.compact {
            writer::render_rules_compact(&rules)
                .map_err(|e| CliError::io(format!("Failed to render rules: {e}")))?
        } else {
            writer::render_rules(&rules)
                .map_err(|e| CliError::io(format!("Failed to render rules: {e}")))?
        };

        match &self.out {
            Some(path) => {
                fs::write(path, rendered).map_err(|e| {
                    CliError::io(format!("Failed to write {}: {e}", path.display()))
                })?;
                println!("✓ Exported to {}", path.display());
            }
            None => println!("{rendered}"),
        }

        Ok(())
    }
}
