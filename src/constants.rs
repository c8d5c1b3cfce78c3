//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the default write target.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "KeyRig";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "keyrig";

/// The profile name rules are written to when none is configured.
pub const DEFAULT_PROFILE: &str = "Default profile";
