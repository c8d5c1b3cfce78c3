//! Modifier remaps.

use crate::dsl::{if_app, map, rule};
use crate::models::Rule;

/// Bundle identifiers of applications that keep caps_lock as control.
const CONTROL_APPS: &[&str] = &["org.gnu.Emacs"];

/// Builds the "Modifiers" rule.
///
/// Four manipulators, in order:
/// 1. left_command (any context) → left_option
/// 2. fn (any context) → left_command
/// 3. caps_lock (any context) → left_control, in Emacs
/// 4. caps_lock (any context) → left_command, everywhere else
///
/// Manipulators 3 and 4 share one base condition and its negation, so
/// every focused-application state activates exactly one of them.
#[must_use]
pub fn modifiers() -> Rule {
    let in_control_app = if_app(CONTROL_APPS.iter().copied());

    rule("Modifiers")
        .manipulator(map("left_command").optional_any().to("left_option"))
        .manipulator(map("fn").optional_any().to("left_command"))
        .manipulator(
            map("caps_lock")
                .optional_any()
                .to("left_control")
                .when(in_control_app.clone()),
        )
        .manipulator(
            map("caps_lock")
                .optional_any()
                .to("left_command")
                .when(in_control_app.unless()),
        )
        .build()
}
