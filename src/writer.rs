//! Read-modify-write of the host's configuration store.
//!
//! The writer replaces the complex-modification rules under one named
//! profile of `karabiner.json` and leaves everything else in the document
//! untouched. Writes go through a temp file in the target directory and a
//! rename, and the previous store can be copied aside first.

use crate::models::{KarabinerDocument, Rule};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory (next to the store) that receives pre-write copies.
const BACKUP_DIR: &str = "automatic_backups";

/// Options controlling a profile write.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Copy the existing store aside before overwriting
    pub backup: bool,
    /// Render and report without touching the store
    pub dry_run: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            backup: true,
            dry_run: false,
        }
    }
}

/// Gets the host's configuration store location.
///
/// Karabiner-Elements reads `~/.config/karabiner/karabiner.json` on macOS;
/// there is no platform indirection to resolve.
pub fn locate_config() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join("karabiner").join("karabiner.json"))
}

/// Loads the configuration store, or a fresh empty document if none exists.
pub fn load_document(path: &Path) -> Result<KarabinerDocument> {
    if !path.exists() {
        return Ok(KarabinerDocument::default());
    }

    let content = fs::read_to_string(path)
        .context(format!("Failed to read configuration store: {}", path.display()))?;

    let document: KarabinerDocument = serde_json::from_str(&content).context(format!(
        "Failed to parse configuration store: {}",
        path.display()
    ))?;

    Ok(document)
}

/// Renders rules as pretty JSON.
///
/// Output is deterministic: field order follows the struct declarations
/// and map keys are sorted, so the same input tables always produce
/// byte-identical output.
pub fn render_rules(rules: &[Rule]) -> Result<String> {
    serde_json::to_string_pretty(rules).context("Failed to serialize rules")
}

/// Renders rules as compact single-line JSON.
pub fn render_rules_compact(rules: &[Rule]) -> Result<String> {
    serde_json::to_string(rules).context("Failed to serialize rules")
}

/// Renders a whole document as pretty JSON.
pub fn render_document(document: &KarabinerDocument) -> Result<String> {
    serde_json::to_string_pretty(document).context("Failed to serialize configuration document")
}

/// Replaces the rules under `profile_name` and persists the store.
///
/// The profile is created if absent. Returns the rendered document; with
/// `dry_run` set, nothing is written and no backup is taken.
pub fn write_to_profile(
    path: &Path,
    profile_name: &str,
    rules: Vec<Rule>,
    options: &WriteOptions,
) -> Result<String> {
    let mut document = load_document(path)?;
    document.ensure_profile(profile_name).replace_rules(rules);

    let rendered = render_document(&document)?;

    if options.dry_run {
        return Ok(rendered);
    }

    if options.backup && path.exists() {
        backup_store(path)?;
    }

    persist(path, &rendered)?;
    Ok(rendered)
}

/// Copies the current store into the backup directory, timestamped.
fn backup_store(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .context("Configuration store has no parent directory")?;

    let backup_dir = parent.join(BACKUP_DIR);
    fs::create_dir_all(&backup_dir).context(format!(
        "Failed to create backup directory: {}",
        backup_dir.display()
    ))?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = backup_dir.join(format!("karabiner_{stamp}.json"));

    fs::copy(path, &backup_path).context(format!(
        "Failed to back up configuration store to {}",
        backup_path.display()
    ))?;

    Ok(backup_path)
}

/// Writes content through a temp file in the target directory, then renames.
fn persist(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .context("Configuration store has no parent directory")?;
    fs::create_dir_all(parent).context(format!(
        "Failed to create configuration directory: {}",
        parent.display()
    ))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Configuration store has no file name")?;
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content).context(format!(
        "Failed to write temporary file: {}",
        temp_path.display()
    ))?;

    fs::rename(&temp_path, path).context(format!(
        "Failed to replace configuration store: {}",
        path.display()
    ))?;

    Ok(())
}
