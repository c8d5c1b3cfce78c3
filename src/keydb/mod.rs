//! Karabiner key-name database and validation.
//!
//! This module provides access to the embedded key-code database,
//! alias canonicalization, and substring search for the inspector.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Modifier names accepted in `from.modifiers` and `to[].modifiers` lists.
///
/// These are not key codes: the generic names ("command", "shift", …) and
/// the wildcard "any" are only meaningful inside modifier lists.
const MODIFIER_NAMES: &[&str] = &[
    "any",
    "command",
    "control",
    "option",
    "shift",
    "fn",
    "caps_lock",
    "left_command",
    "left_control",
    "left_option",
    "left_shift",
    "right_command",
    "right_control",
    "right_option",
    "right_shift",
];

/// Category of key codes for organization in the inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCategory {
    /// Category ID (e.g., "letters", "modifiers")
    pub id: String,
    /// Display name (e.g., "Letters", "Modifiers")
    pub name: String,
    /// Description of what keys are in this category
    pub description: String,
}

/// Individual key-code definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDefinition {
    /// Canonical Karabiner key code (e.g., "semicolon", "caps_lock")
    pub code: String,
    /// Display name (e.g., "Semicolon", "Caps Lock")
    pub name: String,
    /// Category ID
    pub category: String,
    /// Alternative spellings accepted by the builders (e.g., ";")
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Database schema from key_codes.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KeyDatabase {
    version: String,
    categories: Vec<KeyCategory>,
    key_codes: Vec<KeyDefinition>,
}

/// Karabiner key-name database with fast lookup and search.
///
/// The database is embedded in the binary at compile time. Lookup accepts
/// both canonical codes and aliases; `canonicalize` resolves either to the
/// canonical spelling.
#[derive(Debug, Clone)]
pub struct KeyDb {
    /// All key definitions
    key_codes: Vec<KeyDefinition>,
    /// Category definitions
    categories: Vec<KeyCategory>,
    /// Fast lookup by canonical code or alias
    lookup: HashMap<String, usize>,
}

impl KeyDb {
    /// Loads the key-code database from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("key_codes.json");
        let db: KeyDatabase =
            serde_json::from_str(json_data).context("Failed to parse embedded key_codes.json")?;

        let mut lookup = HashMap::new();
        for (idx, key) in db.key_codes.iter().enumerate() {
            lookup.insert(key.code.clone(), idx);
            for alias in &key.aliases {
                lookup.insert(alias.clone(), idx);
            }
        }

        Ok(Self {
            key_codes: db.key_codes,
            categories: db.categories,
            lookup,
        })
    }

    /// Validates a key code or alias against the database.
    #[must_use]
    pub fn is_valid(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    /// Returns true if the name is usable inside a modifier list.
    #[must_use]
    pub fn is_modifier_name(name: &str) -> bool {
        MODIFIER_NAMES.contains(&name)
    }

    /// Resolves a code or alias to the canonical key code.
    #[must_use]
    pub fn canonicalize(&self, key: &str) -> Option<&str> {
        let idx = self.lookup.get(key)?;
        Some(self.key_codes[*idx].code.as_str())
    }

    /// Gets a key definition by code or alias.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&KeyDefinition> {
        let idx = self.lookup.get(key)?;
        self.key_codes.get(*idx)
    }

    /// Case-insensitive substring search over codes, names, and aliases.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&KeyDefinition> {
        let query = query.to_lowercase();
        self.key_codes
            .iter()
            .filter(|key| {
                key.code.to_lowercase().contains(&query)
                    || key.name.to_lowercase().contains(&query)
                    || key.aliases.iter().any(|a| a.to_lowercase() == query)
            })
            .collect()
    }

    /// All categories, in database order.
    #[must_use]
    pub fn categories(&self) -> &[KeyCategory] {
        &self.categories
    }

    /// Number of key definitions in the database.
    #[must_use]
    pub fn len(&self) -> usize {
        self.key_codes.len()
    }

    /// Returns true if the database holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_codes.is_empty()
    }
}
