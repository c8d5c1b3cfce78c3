//! End-to-end tests for `keyrig generate`.

use std::process::Command;

mod fixtures;
use fixtures::*;

#[test]
fn test_generate_writes_rules_into_existing_profile() {
    let (store_path, _temp_dir) = create_temp_store(&existing_store_json());

    let output = Command::new(keyrig_bin())
        .args([
            "generate",
            "--karabiner",
            store_path.to_str().unwrap(),
            "--no-backup",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "generate should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓"), "Output should indicate success");

    let store = read_store(&store_path);
    let rules = store["profiles"][0]["complex_modifications"]["rules"]
        .as_array()
        .unwrap();
    let names: Vec<&str> = rules
        .iter()
        .map(|r| r["description"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Modifiers", "Input", "Colemak"]);
}

#[test]
fn test_generate_preserves_host_managed_settings() {
    let (store_path, _temp_dir) = create_temp_store(&existing_store_json());

    let status = Command::new(keyrig_bin())
        .args([
            "generate",
            "--karabiner",
            store_path.to_str().unwrap(),
            "--no-backup",
        ])
        .status()
        .expect("Failed to execute command");
    assert!(status.success());

    let store = read_store(&store_path);

    // Global settings and the sibling profile are untouched
    assert_eq!(store["global"]["show_in_menu_bar"], false);
    assert_eq!(store["profiles"][1]["name"], "Gaming");
    assert_eq!(
        store["profiles"][1]["complex_modifications"]["rules"][0]["description"],
        "Gaming rule"
    );

    // Profile-level settings next to the replaced rules survive
    let profile = &store["profiles"][0];
    assert_eq!(profile["selected"], true);
    assert_eq!(
        profile["simple_modifications"][0]["from"]["key_code"],
        "escape"
    );
    assert_eq!(
        profile["complex_modifications"]["parameters"]["basic.to_if_alone_timeout_milliseconds"],
        1000
    );
}

#[test]
fn test_generate_creates_store_and_profile_when_missing() {
    let (store_path, _temp_dir) = missing_temp_store();

    let output = Command::new(keyrig_bin())
        .args([
            "generate",
            "--karabiner",
            store_path.to_str().unwrap(),
            "--no-backup",
        ])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let store = read_store(&store_path);
    assert_eq!(store["profiles"][0]["name"], "Default profile");
    assert_eq!(
        store["profiles"][0]["complex_modifications"]["rules"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn test_generate_custom_profile_name() {
    let (store_path, _temp_dir) = create_temp_store(&existing_store_json());

    let status = Command::new(keyrig_bin())
        .args([
            "generate",
            "--karabiner",
            store_path.to_str().unwrap(),
            "--profile",
            "Experimental",
            "--no-backup",
        ])
        .status()
        .expect("Failed to execute command");
    assert!(status.success());

    let store = read_store(&store_path);

    // Existing profiles untouched, new profile appended
    assert_eq!(
        store["profiles"][0]["complex_modifications"]["rules"][0]["description"],
        "Stale rule"
    );
    assert_eq!(store["profiles"][2]["name"], "Experimental");
    assert_eq!(
        store["profiles"][2]["complex_modifications"]["rules"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn test_generate_backup_keeps_previous_store() {
    let (store_path, temp_dir) = create_temp_store(&existing_store_json());

    let status = Command::new(keyrig_bin())
        .args(["generate", "--karabiner", store_path.to_str().unwrap()])
        .status()
        .expect("Failed to execute command");
    assert!(status.success());

    let backup_dir = temp_dir.path().join("automatic_backups");
    let backups: Vec<_> = std::fs::read_dir(&backup_dir)
        .expect("Backup directory should exist")
        .collect();
    assert_eq!(backups.len(), 1);

    let backup = read_store(&backups[0].as_ref().unwrap().path());
    assert_eq!(
        backup["profiles"][0]["complex_modifications"]["rules"][0]["description"],
        "Stale rule"
    );
}

#[test]
fn test_generate_dry_run_leaves_store_untouched() {
    let (store_path, _temp_dir) = create_temp_store(&existing_store_json());

    let output = Command::new(keyrig_bin())
        .args([
            "generate",
            "--karabiner",
            store_path.to_str().unwrap(),
            "--dry-run",
        ])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.to_lowercase().contains("dry run"));

    let store = read_store(&store_path);
    assert_eq!(
        store["profiles"][0]["complex_modifications"]["rules"][0]["description"],
        "Stale rule"
    );
}

#[test]
fn test_generate_twice_is_idempotent() {
    let (store_path, _temp_dir) = create_temp_store(&existing_store_json());

    for _ in 0..2 {
        let status = Command::new(keyrig_bin())
            .args([
                "generate",
                "--karabiner",
                store_path.to_str().unwrap(),
                "--no-backup",
            ])
            .status()
            .expect("Failed to execute command");
        assert!(status.success());
    }

    let store = read_store(&store_path);
    let rules = store["profiles"][0]["complex_modifications"]["rules"]
        .as_array()
        .unwrap();
    assert_eq!(rules.len(), 3, "re-running must replace, not append");
}
