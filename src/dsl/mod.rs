//! Fluent builders for rules, manipulators, and conditions.
//!
//! Every builder call consumes `self` and returns a new value with one
//! field changed, so there is no shared mutable builder state and a
//! half-built manipulator can be cloned and branched safely. Builders do
//! not validate key names; run [`crate::validator`] before writing.

use crate::models::{
    Condition, FromEvent, FromModifiers, InputSourceSpec, Manipulator, ManipulatorKind, Rule,
    ToEvent,
};
use serde_json::Value;

/// Starts a manipulator for a source key with no modifier requirements.
pub fn map(key: impl Into<String>) -> Map {
    Map {
        from_key: key.into(),
        mandatory: Vec::new(),
        optional: Vec::new(),
        to: Vec::new(),
        conditions: Vec::new(),
    }
}

/// Starts a named rule.
pub fn rule(description: impl Into<String>) -> RuleBuilder {
    RuleBuilder {
        description: description.into(),
        manipulators: Vec::new(),
    }
}

/// Condition: frontmost application bundle identifier is in the set.
pub fn if_app<I, S>(bundle_identifiers: I) -> Condition
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Condition::FrontmostApplicationIf {
        bundle_identifiers: bundle_identifiers.into_iter().map(Into::into).collect(),
    }
}

/// Condition: named host variable equals the value.
pub fn if_var(name: impl Into<String>, value: impl Into<Value>) -> Condition {
    Condition::VariableIf {
        name: name.into(),
        value: value.into(),
    }
}

/// Condition: active input-source language matches.
pub fn if_input_source(language: impl Into<String>) -> Condition {
    Condition::InputSourceIf {
        input_sources: vec![InputSourceSpec {
            language: language.into(),
        }],
    }
}

/// Attaches the same guard set to every manipulator in a batch.
///
/// The shared conditions are appended after each manipulator's own guards,
/// so per-manipulator conditions still apply.
#[must_use]
pub fn with_condition(conditions: Vec<Condition>, manipulators: Vec<Manipulator>) -> Vec<Manipulator> {
    manipulators
        .into_iter()
        .map(|mut m| {
            m.conditions.extend(conditions.iter().cloned());
            m
        })
        .collect()
}

/// Table-driven manipulator expansion.
///
/// Applies the transform to each `(from, to)` entry in table order,
/// producing exactly one manipulator per entry. Editing the table is the
/// only change needed to add or remove a mapping.
#[must_use]
pub fn with_mapper<F>(table: &[(&str, &str)], transform: F) -> Vec<Manipulator>
where
    F: Fn(&str, &str) -> Manipulator,
{
    table
        .iter()
        .map(|&(from, to)| transform(from, to))
        .collect()
}

/// In-progress manipulator.
///
/// Created by [`map`]; finished by [`Map::build`] or any conversion into
/// [`Manipulator`].
#[derive(Debug, Clone)]
pub struct Map {
    from_key: String,
    mandatory: Vec<String>,
    optional: Vec<String>,
    to: Vec<ToEvent>,
    conditions: Vec<Condition>,
}

impl Map {
    /// Requires the given modifiers to be held on the source key.
    #[must_use]
    pub fn mandatory<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory = modifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Matches the source key in any modifier context.
    #[must_use]
    pub fn optional_any(mut self) -> Self {
        self.optional = vec!["any".to_string()];
        self
    }

    /// Adds a target key press.
    #[must_use]
    pub fn to(mut self, key: impl Into<String>) -> Self {
        self.to.push(ToEvent::key(key));
        self
    }

    /// Adds a target key press with synthetically held modifiers.
    #[must_use]
    pub fn to_with<I, S>(mut self, key: impl Into<String>, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.to.push(ToEvent::key_with_modifiers(key, modifiers));
        self
    }

    /// Adds a write intent assigning a host variable.
    #[must_use]
    pub fn set_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.to.push(ToEvent::set_variable(name, value));
        self
    }

    /// Adds a write intent unsetting a host variable.
    #[must_use]
    pub fn unset_var(mut self, name: impl Into<String>) -> Self {
        self.to.push(ToEvent::unset_variable(name));
        self
    }

    /// Attaches a guard condition; repeated calls accumulate conjunctively.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Finishes the manipulator.
    #[must_use]
    pub fn build(self) -> Manipulator {
        let modifiers = if self.mandatory.is_empty() && self.optional.is_empty() {
            None
        } else {
            Some(FromModifiers {
                mandatory: self.mandatory,
                optional: self.optional,
            })
        };

        Manipulator {
            kind: ManipulatorKind::Basic,
            from: FromEvent {
                key_code: self.from_key,
                modifiers,
            },
            to: self.to,
            conditions: self.conditions,
        }
    }
}

impl From<Map> for Manipulator {
    fn from(map: Map) -> Self {
        map.build()
    }
}

/// In-progress rule.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    description: String,
    manipulators: Vec<Manipulator>,
}

impl RuleBuilder {
    /// Appends one manipulator.
    #[must_use]
    pub fn manipulator(mut self, manipulator: impl Into<Manipulator>) -> Self {
        self.manipulators.push(manipulator.into());
        self
    }

    /// Appends a batch of manipulators, preserving order.
    #[must_use]
    pub fn manipulators<I, M>(mut self, manipulators: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Manipulator>,
    {
        self.manipulators
            .extend(manipulators.into_iter().map(Into::into));
        self
    }

    /// Finishes the rule.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule::new(self.description, self.manipulators)
    }
}

impl From<RuleBuilder> for Rule {
    fn from(builder: RuleBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventContext;
    use serde_json::json;

    #[test]
    fn test_map_builds_any_modifier_remap() {
        let m = map("left_command").optional_any().to("left_option").build();

        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            json!({
                "type": "basic",
                "from": {"key_code": "left_command", "modifiers": {"optional": ["any"]}},
                "to": [{"key_code": "left_option"}]
            })
        );
    }

    #[test]
    fn test_map_omits_empty_modifiers() {
        let m = map("right_command").to_with("f12", ["left_command"]).build();
        let value = serde_json::to_value(&m).unwrap();
        assert!(value["from"].get("modifiers").is_none());
    }

    #[test]
    fn test_builder_calls_do_not_share_state() {
        let base = map("caps_lock").optional_any();
        let emacs = if_app(["org.gnu.Emacs"]);

        let inside = base.clone().to("left_control").when(emacs.clone()).build();
        let outside = base.to("left_command").when(emacs.unless()).build();

        assert_eq!(inside.to.len(), 1);
        assert_eq!(outside.to.len(), 1);
        assert_ne!(inside.to, outside.to);
        assert_eq!(inside.conditions[0], outside.conditions[0].clone().unless());
    }

    #[test]
    fn test_with_condition_appends_shared_guards() {
        let manipulators = vec![
            map("s").optional_any().to("r").build(),
            map("d").optional_any().to("s").build(),
        ];

        let guarded = with_condition(
            vec![if_var("colemak", true), if_input_source("en")],
            manipulators,
        );

        assert_eq!(guarded.len(), 2);
        for m in &guarded {
            assert_eq!(m.conditions.len(), 2);
            assert_eq!(m.conditions[0], if_var("colemak", true));
            assert_eq!(m.conditions[1], if_input_source("en"));
        }
    }

    #[test]
    fn test_with_mapper_expands_one_manipulator_per_entry() {
        let table: &[(&str, &str)] = &[("s", "r"), ("d", "s")];
        let expanded = with_mapper(table, |from, to| map(from).optional_any().to(to).build());

        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].from.key_code, "s");
        assert_eq!(expanded[0].to[0].key_code(), Some("r"));
        assert_eq!(expanded[1].from.key_code, "d");
        assert_eq!(expanded[1].to[0].key_code(), Some("s"));
    }

    #[test]
    fn test_removing_a_table_entry_removes_exactly_one_manipulator() {
        let full: &[(&str, &str)] = &[("s", "r"), ("d", "s"), ("f", "t")];
        let trimmed: &[(&str, &str)] = &[("s", "r"), ("f", "t")];
        let transform = |from: &str, to: &str| map(from).optional_any().to(to).build();

        let full_expanded = with_mapper(full, transform);
        let trimmed_expanded = with_mapper(trimmed, transform);

        assert_eq!(full_expanded.len() - trimmed_expanded.len(), 1);
        assert_eq!(trimmed_expanded[0], full_expanded[0]);
        assert_eq!(trimmed_expanded[1], full_expanded[2]);
    }

    #[test]
    fn test_guarded_mapper_scenario() {
        // Table {s: r, d: s} with toggle on and English input source
        let table: &[(&str, &str)] = &[("s", "r"), ("d", "s")];
        let layer = with_condition(
            vec![if_var("colemak", true), if_input_source("en")],
            with_mapper(table, |from, to| map(from).optional_any().to(to).build()),
        );

        let active = EventContext::new()
            .with_variable("colemak", true)
            .with_language("en");
        let toggled_off = EventContext::new().with_language("en");
        let wrong_language = EventContext::new()
            .with_variable("colemak", true)
            .with_language("de");

        assert!(layer.iter().all(|m| m.is_eligible(&active)));
        assert!(layer.iter().all(|m| !m.is_eligible(&toggled_off)));
        assert!(layer.iter().all(|m| !m.is_eligible(&wrong_language)));
    }

    #[test]
    fn test_rule_builder_preserves_order() {
        let built = rule("Modifiers")
            .manipulator(map("left_command").optional_any().to("left_option"))
            .manipulator(map("fn").optional_any().to("left_command"))
            .build();

        assert_eq!(built.description, "Modifiers");
        assert_eq!(built.manipulators[0].from.key_code, "left_command");
        assert_eq!(built.manipulators[1].from.key_code, "fn");
    }
}
