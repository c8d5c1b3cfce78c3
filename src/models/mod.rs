//! Data models for Karabiner-Elements rules, conditions, and profiles.
//!
//! This module contains the typed wire schema of the host's configuration
//! store. Models are independent of the builder DSL and the CLI; they
//! serialize 1:1 to `karabiner.json`.

pub mod condition;
pub mod manipulator;
pub mod profile;
pub mod rule;

// Re-export all model types
pub use condition::{Condition, EventContext, InputSourceSpec};
pub use manipulator::{
    FromEvent, FromModifiers, Manipulator, ManipulatorKind, SetVariable, ToEvent, VariableAction,
};
pub use profile::{ComplexModifications, KarabinerDocument, Profile};
pub use rule::Rule;
