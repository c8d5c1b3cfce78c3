//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Path to the keyrig binary
pub fn keyrig_bin() -> &'static str {
    env!("CARGO_BIN_EXE_keyrig")
}

/// A realistic pre-existing karabiner.json with host-managed settings
/// that the writer must preserve.
pub fn existing_store_json() -> String {
    serde_json::to_string_pretty(&serde_json::json!({
        "global": {
            "check_for_updates_on_startup": true,
            "show_in_menu_bar": false
        },
        "profiles": [
            {
                "name": "Default profile",
                "selected": true,
                "simple_modifications": [
                    {
                        "from": {"key_code": "escape"},
                        "to": [{"key_code": "grave_accent_and_tilde"}]
                    }
                ],
                "complex_modifications": {
                    "parameters": {"basic.to_if_alone_timeout_milliseconds": 1000},
                    "rules": [
                        {"description": "Stale rule", "manipulators": []}
                    ]
                }
            },
            {
                "name": "Gaming",
                "selected": false,
                "complex_modifications": {
                    "rules": [
                        {"description": "Gaming rule", "manipulators": []}
                    ]
                }
            }
        ]
    }))
    .unwrap()
}

/// Creates a temp directory holding a karabiner.json with the given content.
///
/// Returns the store path and the guard keeping the directory alive.
pub fn create_temp_store(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("karabiner.json");
    fs::write(&path, content).expect("Failed to write temp store");
    (path, temp_dir)
}

/// Returns a path to a karabiner.json that does not exist yet.
pub fn missing_temp_store() -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("karabiner.json");
    (path, temp_dir)
}

/// Reads the store back as a JSON value.
pub fn read_store(path: &std::path::Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read store");
    serde_json::from_str(&content).expect("Store is not valid JSON")
}
