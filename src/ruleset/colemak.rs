//! Colemak letter layer with an on/off toggle.

use crate::dsl::{if_input_source, if_var, map, rule, with_condition, with_mapper};
use crate::models::Rule;

/// Host variable holding the layer's on/off state.
///
/// The host owns the value; this crate only emits the manipulators that
/// read or flip it.
pub const COLEMAK_VAR: &str = "colemak";

/// The chord that toggles the layer.
const TOGGLE_CHORD: &[&str] = &["left_command", "left_control"];

/// Physical-key → replacement-letter table approximating Colemak.
///
/// q w a g z x c are identical in both layouts and stay unmapped. Editing
/// this table is the only change needed to adjust the layer; one
/// manipulator is generated per entry.
pub const COLEMAK_TABLE: &[(&str, &str)] = &[
    ("e", "f"),
    ("r", "p"),
    ("t", "b"),
    ("y", "j"),
    ("u", "l"),
    ("i", "u"),
    ("o", "y"),
    ("p", "semicolon"),
    ("s", "r"),
    ("d", "s"),
    ("f", "t"),
    ("h", "m"),
    ("j", "n"),
    ("k", "e"),
    ("l", "i"),
    ("semicolon", "o"),
    ("v", "d"),
    ("b", "v"),
    ("n", "k"),
    ("m", "h"),
];

/// Builds the "Colemak" rule.
///
/// Two toggle manipulators on command+control+k: one sets the variable
/// while it is unset, the other unsets it while it is set. Their guards
/// partition the variable's states, so the pair is never simultaneously
/// eligible. Then one layer manipulator per table entry, all guarded by
/// the toggle being on AND the input source being English.
#[must_use]
pub fn colemak() -> Rule {
    let layer_on = if_var(COLEMAK_VAR, true);
    let english = if_input_source("en");

    let chord = TOGGLE_CHORD.iter().copied();
    let layer = with_condition(
        vec![layer_on.clone(), english],
        with_mapper(COLEMAK_TABLE, |from, to| {
            map(from).optional_any().to(to).build()
        }),
    );

    rule("Colemak")
        .manipulator(
            map("k")
                .mandatory(chord.clone())
                .set_var(COLEMAK_VAR, true)
                .when(layer_on.clone().unless()),
        )
        .manipulator(
            map("k")
                .mandatory(chord)
                .unset_var(COLEMAK_VAR)
                .when(layer_on),
        )
        .manipulators(layer)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventContext, ToEvent};
    use serde_json::json;

    fn toggle_pair() -> (crate::models::Manipulator, crate::models::Manipulator) {
        let rule = colemak();
        (rule.manipulators[0].clone(), rule.manipulators[1].clone())
    }

    #[test]
    fn test_rule_shape() {
        let rule = colemak();
        assert_eq!(rule.description, "Colemak");
        // Two toggle manipulators plus one per table entry
        assert_eq!(rule.manipulators.len(), 2 + COLEMAK_TABLE.len());
    }

    #[test]
    fn test_toggle_on_sets_variable() {
        let (on, _) = toggle_pair();
        assert_eq!(on.from.key_code, "k");
        assert_eq!(
            on.from.mandatory_modifiers(),
            &["left_command", "left_control"]
        );
        assert_eq!(on.to, vec![ToEvent::set_variable(COLEMAK_VAR, true)]);
    }

    #[test]
    fn test_toggle_off_unsets_variable() {
        let (_, off) = toggle_pair();
        assert_eq!(off.to, vec![ToEvent::unset_variable(COLEMAK_VAR)]);
    }

    #[test]
    fn test_toggle_sequence_from_unset() {
        let (on, off) = toggle_pair();

        // Unset: only the set manipulator is eligible
        let unset = EventContext::new();
        assert!(on.is_eligible(&unset));
        assert!(!off.is_eligible(&unset));

        // After the first activation the variable is true: only unset is eligible
        let set = EventContext::new().with_variable(COLEMAK_VAR, true);
        assert!(!on.is_eligible(&set));
        assert!(off.is_eligible(&set));
    }

    #[test]
    fn test_toggle_pair_never_both_eligible() {
        let (on, off) = toggle_pair();

        let states = [
            EventContext::new(),
            EventContext::new().with_variable(COLEMAK_VAR, false),
            EventContext::new().with_variable(COLEMAK_VAR, true),
        ];

        for ctx in &states {
            assert!(
                !(on.is_eligible(ctx) && off.is_eligible(ctx)),
                "toggle manipulators must be mutually exclusive"
            );
        }
    }

    #[test]
    fn test_layer_manipulators_share_guards() {
        let rule = colemak();
        let layer = &rule.manipulators[2..];

        assert_eq!(layer.len(), COLEMAK_TABLE.len());
        let expected = vec![if_var(COLEMAK_VAR, true), if_input_source("en")];
        for m in layer {
            assert_eq!(m.conditions, expected);
        }
    }

    #[test]
    fn test_layer_follows_table_order() {
        let rule = colemak();
        let layer = &rule.manipulators[2..];

        for (m, (from, to)) in layer.iter().zip(COLEMAK_TABLE) {
            assert_eq!(m.from.key_code, *from);
            assert_eq!(m.to[0].key_code(), Some(*to));
        }
    }

    #[test]
    fn test_layer_inactive_when_toggle_off() {
        let rule = colemak();
        let layer = &rule.manipulators[2..];

        let english_only = EventContext::new().with_language("en");
        let german = EventContext::new().with_language("de");

        for m in layer {
            assert!(!m.is_eligible(&english_only));
            assert!(!m.is_eligible(&german));
        }
    }

    #[test]
    fn test_layer_active_when_toggled_and_english() {
        let rule = colemak();
        let layer = &rule.manipulators[2..];

        let active = EventContext::new()
            .with_variable(COLEMAK_VAR, true)
            .with_language("en");
        let wrong_language = EventContext::new()
            .with_variable(COLEMAK_VAR, true)
            .with_language("de");

        for m in layer {
            assert!(m.is_eligible(&active));
            assert!(!m.is_eligible(&wrong_language));
        }
    }

    #[test]
    fn test_toggle_on_wire_format() {
        let (on, _) = toggle_pair();
        assert_eq!(
            serde_json::to_value(&on).unwrap(),
            json!({
                "type": "basic",
                "from": {
                    "key_code": "k",
                    "modifiers": {"mandatory": ["left_command", "left_control"]}
                },
                "to": [{"set_variable": {"name": "colemak", "value": true}}],
                "conditions": [{"type": "variable_unless", "name": "colemak", "value": true}]
            })
        );
    }
}
