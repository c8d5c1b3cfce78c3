//! CLI command handlers for KeyRig.
//!
//! This module provides headless, scriptable access to KeyRig's core
//! functionality for automation, testing, and CI/CD integration.

pub mod common;
pub mod export;
pub mod generate;
pub mod inspect;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use export::ExportArgs;
pub use generate::GenerateArgs;
pub use inspect::InspectArgs;
pub use validate::ValidateArgs;
