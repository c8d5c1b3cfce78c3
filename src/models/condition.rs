//! Manipulator guard conditions and event-time eligibility.
//!
//! Conditions are predicates evaluated by Karabiner-Elements against the
//! live event context (frontmost application, variable store, active input
//! source). This crate only declares them, but it also reimplements their
//! matching semantics locally so rules can be checked for guard exclusivity
//! before anything is written to the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A single input-source matcher inside an input-source condition.
///
/// Karabiner accepts several selectors here; only the language selector is
/// modeled because it is the only one the host needs for layer gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSourceSpec {
    /// ISO 639-1 language code (e.g., "en")
    pub language: String,
}

/// A guard condition on a manipulator, in the host's wire schema.
///
/// The `type` tag carries both the predicate family and its polarity
/// (`*_if` vs `*_unless`), matching `karabiner.json` exactly. Negation is a
/// polarity flip, so a condition and its [`Condition::unless`] complement
/// partition the event space: for any context exactly one of them matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Frontmost application bundle identifier is in the set
    FrontmostApplicationIf {
        /// Matching bundle identifiers (e.g., "org.gnu.Emacs")
        bundle_identifiers: Vec<String>,
    },
    /// Frontmost application bundle identifier is not in the set
    FrontmostApplicationUnless {
        /// Excluded bundle identifiers
        bundle_identifiers: Vec<String>,
    },
    /// Named host variable equals the value
    VariableIf {
        /// Variable name
        name: String,
        /// Required value
        value: Value,
    },
    /// Named host variable does not equal the value
    VariableUnless {
        /// Variable name
        name: String,
        /// Rejected value
        value: Value,
    },
    /// Active input source matches one of the specs
    InputSourceIf {
        /// Matching input sources
        input_sources: Vec<InputSourceSpec>,
    },
    /// Active input source matches none of the specs
    InputSourceUnless {
        /// Excluded input sources
        input_sources: Vec<InputSourceSpec>,
    },
}

impl Condition {
    /// Returns the complementary condition (flips `*_if` to `*_unless` and
    /// back), keeping the payload unchanged.
    ///
    /// Deriving both sides of a partition from one base condition via
    /// `unless()` guarantees they are exhaustive and mutually exclusive,
    /// which two independently authored conditions would not.
    #[must_use]
    pub fn unless(self) -> Self {
        match self {
            Self::FrontmostApplicationIf { bundle_identifiers } => {
                Self::FrontmostApplicationUnless { bundle_identifiers }
            }
            Self::FrontmostApplicationUnless { bundle_identifiers } => {
                Self::FrontmostApplicationIf { bundle_identifiers }
            }
            Self::VariableIf { name, value } => Self::VariableUnless { name, value },
            Self::VariableUnless { name, value } => Self::VariableIf { name, value },
            Self::InputSourceIf { input_sources } => Self::InputSourceUnless { input_sources },
            Self::InputSourceUnless { input_sources } => Self::InputSourceIf { input_sources },
        }
    }

    /// Evaluates this condition against an event context.
    ///
    /// Mirrors the host's semantics: an unknown frontmost application or
    /// input source matches no `*_if` list, and an unset variable compares
    /// as not-equal to every requested value.
    #[must_use]
    pub fn matches(&self, ctx: &EventContext) -> bool {
        match self {
            Self::FrontmostApplicationIf { bundle_identifiers } => ctx
                .frontmost_application
                .as_ref()
                .is_some_and(|app| bundle_identifiers.iter().any(|id| id == app)),
            Self::FrontmostApplicationUnless { bundle_identifiers } => !ctx
                .frontmost_application
                .as_ref()
                .is_some_and(|app| bundle_identifiers.iter().any(|id| id == app)),
            Self::VariableIf { name, value } => {
                ctx.variables.get(name).is_some_and(|v| v == value)
            }
            Self::VariableUnless { name, value } => {
                !ctx.variables.get(name).is_some_and(|v| v == value)
            }
            Self::InputSourceIf { input_sources } => ctx
                .input_source_language
                .as_ref()
                .is_some_and(|lang| input_sources.iter().any(|s| &s.language == lang)),
            Self::InputSourceUnless { input_sources } => !ctx
                .input_source_language
                .as_ref()
                .is_some_and(|lang| input_sources.iter().any(|s| &s.language == lang)),
        }
    }

    /// Returns the variable name if this is a variable condition.
    #[must_use]
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::VariableIf { name, .. } | Self::VariableUnless { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Snapshot of the host-side state a condition is evaluated against.
///
/// The host owns this state at event time; this local model exists so the
/// validator and tests can exercise guard logic without a running host.
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    /// Bundle identifier of the frontmost application, if known
    pub frontmost_application: Option<String>,
    /// Host variable store (unset variables are simply absent)
    pub variables: HashMap<String, Value>,
    /// Language of the active input source, if known
    pub input_source_language: Option<String>,
}

impl EventContext {
    /// Creates an empty context: no frontmost app, no variables, no input source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frontmost application bundle identifier.
    #[must_use]
    pub fn with_app(mut self, bundle_id: impl Into<String>) -> Self {
        self.frontmost_application = Some(bundle_id.into());
        self
    }

    /// Sets a host variable to a value.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Sets the active input-source language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.input_source_language = Some(language.into());
        self
    }
}
