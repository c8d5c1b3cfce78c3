//! Input-source shortcut bridge.

use crate::dsl::{map, rule};
use crate::models::Rule;

/// Builds the "Input" rule.
///
/// One unconditional manipulator mapping right_command to command+f12,
/// the chord bound in macOS settings to switch the input source.
#[must_use]
pub fn input() -> Rule {
    rule("Input")
        .manipulator(map("right_command").to_with("f12", ["left_command"]))
        .build()
}
