//! Manipulator data structures in the host's wire schema.
//!
//! A manipulator is one from-key/to-event remap, optionally guarded by
//! conditions. Manipulators are immutable once constructed; use the
//! [`crate::dsl`] builders to assemble them.

use crate::models::condition::{Condition, EventContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Modifier requirements on the source key.
///
/// `mandatory` modifiers must be held for the manipulator to match;
/// `optional` modifiers may be held and are passed through. The special
/// name `"any"` in `optional` makes the manipulator match in any modifier
/// context.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FromModifiers {
    /// Modifiers that must be held
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<String>,
    /// Modifiers that may be held ("any" matches every context)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<String>,
}

impl FromModifiers {
    /// Returns true if neither mandatory nor optional modifiers are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty()
    }
}

/// The source key of a manipulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromEvent {
    /// Karabiner key code of the physical key (e.g., "caps_lock")
    pub key_code: String,
    /// Modifier requirements; omitted from the wire format when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<FromModifiers>,
}

impl FromEvent {
    /// Creates a from-event with no modifier requirements.
    pub fn key(key_code: impl Into<String>) -> Self {
        Self {
            key_code: key_code.into(),
            modifiers: None,
        }
    }

    /// Returns the mandatory modifier set, empty if none.
    #[must_use]
    pub fn mandatory_modifiers(&self) -> &[String] {
        match &self.modifiers {
            Some(m) => &m.mandatory,
            None => &[],
        }
    }
}

/// Payload of a `set_variable` to-event.
///
/// Setting carries a `value`; unsetting carries `"type": "unset"` instead
/// (supported by Karabiner-Elements 14.12 and later).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetVariable {
    /// Host variable name
    pub name: String,
    /// Value to assign (absent when unsetting)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// The literal "unset" marker (absent when assigning)
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<VariableAction>,
}

/// Marker for variable to-events that clear instead of assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableAction {
    /// Remove the variable from the host store
    Unset,
}

/// One output of a manipulator: a synthesized key press or a variable write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToEvent {
    /// Synthesize a key press, optionally with modifiers held
    Key {
        /// Karabiner key code of the synthesized key
        key_code: String,
        /// Modifiers held while the key is pressed
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modifiers: Vec<String>,
    },
    /// Write to a host-managed variable
    Variable {
        /// The variable write intent
        set_variable: SetVariable,
    },
}

impl ToEvent {
    /// Creates a plain key to-event.
    pub fn key(key_code: impl Into<String>) -> Self {
        Self::Key {
            key_code: key_code.into(),
            modifiers: Vec::new(),
        }
    }

    /// Creates a key to-event with synthetically held modifiers.
    pub fn key_with_modifiers<I, S>(key_code: impl Into<String>, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Key {
            key_code: key_code.into(),
            modifiers: modifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a to-event that assigns a host variable.
    pub fn set_variable(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Variable {
            set_variable: SetVariable {
                name: name.into(),
                value: Some(value.into()),
                action: None,
            },
        }
    }

    /// Creates a to-event that unsets a host variable.
    pub fn unset_variable(name: impl Into<String>) -> Self {
        Self::Variable {
            set_variable: SetVariable {
                name: name.into(),
                value: None,
                action: Some(VariableAction::Unset),
            },
        }
    }

    /// Returns the name of the variable this event writes, if any.
    #[must_use]
    pub fn written_variable(&self) -> Option<&str> {
        match self {
            Self::Variable { set_variable } => Some(&set_variable.name),
            Self::Key { .. } => None,
        }
    }

    /// Returns the synthesized key code, if this is a key event.
    #[must_use]
    pub fn key_code(&self) -> Option<&str> {
        match self {
            Self::Key { key_code, .. } => Some(key_code),
            Self::Variable { .. } => None,
        }
    }
}

/// Manipulator kind tag; only "basic" manipulators are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulatorKind {
    /// A basic from/to remap
    #[default]
    Basic,
}

/// A single remap rule: source key, outputs, and guard conditions.
///
/// The host evaluates a rule's manipulators top to bottom per event and
/// applies the first structural match, so ordering within a rule is
/// significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manipulator {
    /// Manipulator kind tag ("basic")
    #[serde(rename = "type", default)]
    pub kind: ManipulatorKind,
    /// Source key and modifier requirements
    pub from: FromEvent,
    /// Outputs applied when the manipulator fires
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<ToEvent>,
    /// Guard conditions, all of which must match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Manipulator {
    /// Returns true if every guard condition matches the context.
    ///
    /// A manipulator without conditions is always eligible.
    #[must_use]
    pub fn is_eligible(&self, ctx: &EventContext) -> bool {
        self.conditions.iter().all(|c| c.matches(ctx))
    }

    /// Returns the names of host variables this manipulator writes.
    #[must_use]
    pub fn written_variables(&self) -> Vec<&str> {
        self.to.iter().filter_map(ToEvent::written_variable).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_key_remap_wire_format() {
        let m = Manipulator {
            kind: ManipulatorKind::Basic,
            from: FromEvent {
                key_code: "left_command".to_string(),
                modifiers: Some(FromModifiers {
                    mandatory: Vec::new(),
                    optional: vec!["any".to_string()],
                }),
            },
            to: vec![ToEvent::key("left_option")],
            conditions: Vec::new(),
        };

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "basic",
                "from": {
                    "key_code": "left_command",
                    "modifiers": {"optional": ["any"]}
                },
                "to": [{"key_code": "left_option"}]
            })
        );
    }

    #[test]
    fn test_set_variable_wire_format() {
        let set = ToEvent::set_variable("colemak", true);
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({"set_variable": {"name": "colemak", "value": true}})
        );

        let unset = ToEvent::unset_variable("colemak");
        assert_eq!(
            serde_json::to_value(&unset).unwrap(),
            json!({"set_variable": {"name": "colemak", "type": "unset"}})
        );
    }

    #[test]
    fn test_to_with_modifiers_wire_format() {
        let to = ToEvent::key_with_modifiers("f12", ["left_command"]);
        assert_eq!(
            serde_json::to_value(&to).unwrap(),
            json!({"key_code": "f12", "modifiers": ["left_command"]})
        );
    }

    #[test]
    fn test_manipulator_without_conditions_is_always_eligible() {
        let m = Manipulator {
            kind: ManipulatorKind::Basic,
            from: FromEvent::key("fn"),
            to: vec![ToEvent::key("left_command")],
            conditions: Vec::new(),
        };

        assert!(m.is_eligible(&EventContext::new()));
        assert!(m.is_eligible(&EventContext::new().with_app("org.gnu.Emacs")));
    }

    #[test]
    fn test_written_variables() {
        let m = Manipulator {
            kind: ManipulatorKind::Basic,
            from: FromEvent::key("k"),
            to: vec![ToEvent::set_variable("colemak", true)],
            conditions: Vec::new(),
        };

        assert_eq!(m.written_variables(), vec!["colemak"]);
    }

    #[test]
    fn test_deserialization_round_trip() {
        let raw = json!({
            "type": "basic",
            "from": {"key_code": "k", "modifiers": {"mandatory": ["left_command", "left_control"]}},
            "to": [{"set_variable": {"name": "colemak", "type": "unset"}}],
            "conditions": [{"type": "variable_if", "name": "colemak", "value": true}]
        });

        let m: Manipulator = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&m).unwrap(), raw);
    }
}
