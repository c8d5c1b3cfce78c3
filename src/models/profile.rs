//! Profile and whole-document models for `karabiner.json`.
//!
//! The writer performs a read-modify-write of the host's configuration
//! store: it replaces the complex-modification rules under one profile and
//! must leave every other host-managed setting untouched. Unknown fields
//! are therefore captured in flattened maps and round-tripped verbatim.

use crate::models::rule::Rule;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `complex_modifications` section of a profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexModifications {
    /// Host tuning parameters (e.g., `basic.to_if_alone_timeout_milliseconds`);
    /// preserved verbatim, never authored here
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    /// Complex-modification rules in evaluation order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// One profile inside the host's configuration store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name (the lookup key for writes)
    pub name: String,
    /// Complex modifications; absent in profiles that never had any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_modifications: Option<ComplexModifications>,
    /// All other host-managed profile settings (simple modifications,
    /// devices, function keys, selection flag), preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Creates an empty profile with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            complex_modifications: None,
            extra: Map::new(),
        }
    }

    /// Replaces all complex-modification rules under this profile.
    ///
    /// Existing `parameters` and sibling settings are kept.
    pub fn replace_rules(&mut self, rules: Vec<Rule>) {
        self.complex_modifications
            .get_or_insert_with(ComplexModifications::default)
            .rules = rules;
    }

    /// Returns the profile's rules, empty if none are present.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        match &self.complex_modifications {
            Some(cm) => &cm.rules,
            None => &[],
        }
    }
}

/// The entire `karabiner.json` document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KarabinerDocument {
    /// Host-global settings, preserved verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<Value>,
    /// All profiles in the store
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// Any future top-level host fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KarabinerDocument {
    /// Finds a profile by name.
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Finds a profile by name, mutably.
    pub fn profile_mut(&mut self, name: &str) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| p.name == name)
    }

    /// Finds a profile by name, appending a fresh one if absent.
    pub fn ensure_profile(&mut self, name: &str) -> &mut Profile {
        let idx = match self.profiles.iter().position(|p| p.name == name) {
            Some(idx) => idx,
            None => {
                self.profiles.push(Profile::new(name));
                self.profiles.len() - 1
            }
        };
        &mut self.profiles[idx]
    }
}
