//! The built-in remapping rules.
//!
//! Three rule builders, each producing one named rule, emitted in fixed
//! order into the target profile: modifier remaps, the input-source
//! shortcut bridge, and the Colemak layer with its toggle.

pub mod colemak;
pub mod input;
pub mod modifiers;

pub use colemak::{colemak, COLEMAK_TABLE, COLEMAK_VAR};
pub use input::input;
pub use modifiers::modifiers;

use crate::models::Rule;

/// All built-in rules in write order: Modifiers, Input, Colemak.
#[must_use]
pub fn all() -> Vec<Rule> {
    vec![modifiers(), input(), colemak()]
}
