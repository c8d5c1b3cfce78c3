//! Inspect command: summarize the built-in rules and search the key database.

use crate::cli::common::{CliError, CliResult};
use crate::keydb::KeyDb;
use crate::ruleset;
use clap::Args;

/// Summarize the built-in rules, or search the key database
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Search the key database instead of listing rules
    #[arg(long, value_name = "QUERY")]
    pub find: Option<String>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let key_db = KeyDb::load()
            .map_err(|e| CliError::io(format!("Failed to load key database: {e}")))?;

        if let Some(query) = &self.find {
            let matches = key_db.search(query);
            if matches.is_empty() {
                println!("No key codes matching '{query}'");
                return Ok(());
            }

            println!("{} key codes matching '{query}':", matches.len());
            for key in matches {
                if key.aliases.is_empty() {
                    println!("  {:<32} {} [{}]", key.code, key.name, key.category);
                } else {
                    println!(
                        "  {:<32} {} [{}] (aliases: {})",
                        key.code,
                        key.name,
                        key.category,
                        key.aliases.join(", ")
                    );
                }
            }
            return Ok(());
        }

        let rules = ruleset::all();
        println!("{} rules:", rules.len());
        for rule in &rules {
            let conditional = rule
                .manipulators
                .iter()
                .filter(|m| !m.conditions.is_empty())
                .count();
            println!(
                "  {:<12} {} manipulators ({} conditional)",
                rule.description,
                rule.manipulators.len(),
                conditional
            );
        }

        Ok(())
    }
}
