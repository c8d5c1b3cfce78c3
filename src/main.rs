//! KeyRig - Declarative Karabiner-Elements rule builder and profile writer
//!
//! This binary builds the declared keyboard remapping rules (modifier
//! remaps, an input-source shortcut, a Colemak layer toggle) and writes
//! them into the host's karabiner.json configuration store.

use clap::{Parser, Subcommand};
use keyrig::cli::{ExportArgs, GenerateArgs, InspectArgs, ValidateArgs};
use keyrig::constants::APP_NAME;

/// KeyRig - Declarative Karabiner-Elements rule builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the rules and write them to a profile in karabiner.json
    Generate(GenerateArgs),
    /// Render the rules as JSON without touching the store
    Export(ExportArgs),
    /// Check the rules for unknown keys and guard conflicts
    Validate(ValidateArgs),
    /// Summarize the rules or search the key database
    Inspect(InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Inspect(args) => args.execute(),
    };

    if let Err(error) = result {
        eprintln!("{}: {}", APP_NAME, error);
        std::process::exit(error.exit_code());
    }
}
