//! Named rule container.

use crate::models::manipulator::Manipulator;
use serde::{Deserialize, Serialize};

/// A named ordered sequence of manipulators.
///
/// The description is what Karabiner-Elements shows in its complex
/// modifications UI. Order is preserved verbatim; the host applies the
/// first matching manipulator per event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Human-readable rule name shown by the host
    pub description: String,
    /// Manipulators in evaluation order
    #[serde(default)]
    pub manipulators: Vec<Manipulator>,
}

impl Rule {
    /// Creates a rule with the given description and manipulators.
    pub fn new(description: impl Into<String>, manipulators: Vec<Manipulator>) -> Self {
        Self {
            description: description.into(),
            manipulators,
        }
    }
}
