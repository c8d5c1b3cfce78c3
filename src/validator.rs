//! Ruleset validation before writing to the host store.
//!
//! The builders deliberately accept anything at construction time, the way
//! the host itself silently ignores malformed entries. This module is the
//! explicit check in between: unknown key names, guard conflicts on toggle
//! variables, shadowed manipulators, and layer-table collisions are all
//! surfaced here instead of becoming silent misbehavior at event time.

use crate::keydb::KeyDb;
use crate::models::{Condition, EventContext, Manipulator, Rule, ToEvent};
use serde::Serialize;
use serde_json::{json, Value};

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Critical errors that prevent writing
    pub errors: Vec<ValidationError>,
    /// Non-critical warnings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Validation error with context.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Rule description where the error occurred
    pub rule: Option<String>,
    /// Manipulator index within the rule
    pub manipulator: Option<usize>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            rule: None,
            manipulator: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the rule context.
    #[must_use]
    pub fn in_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Sets the manipulator index context.
    #[must_use]
    pub fn at_manipulator(mut self, index: usize) -> Self {
        self.manipulator = Some(index);
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.rule, self.manipulator) {
            (Some(rule), Some(idx)) => {
                write!(f, "[{} #{}] {}: {}", rule, idx, self.kind, self.message)?;
            }
            (Some(rule), None) => write!(f, "[{}] {}: {}", rule, self.kind, self.message)?,
            _ => write!(f, "{}: {}", self.kind, self.message)?,
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Key name not recognized by the key database
    UnknownKeyCode,
    /// Modifier name not usable in a modifier list
    InvalidModifier,
    /// Two manipulators mutating the same variable can fire simultaneously
    ConflictingGuards,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKeyCode => write!(f, "unknown key code"),
            Self::InvalidModifier => write!(f, "invalid modifier"),
            Self::ConflictingGuards => write!(f, "conflicting guards"),
        }
    }
}

/// Validation warning with context.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// Type of validation warning
    pub kind: ValidationWarningKind,
    /// Rule description where the warning occurred
    pub rule: Option<String>,
    /// Manipulator index within the rule
    pub manipulator: Option<usize>,
    /// Human-readable warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(kind: ValidationWarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            rule: None,
            manipulator: None,
            message: message.into(),
        }
    }

    /// Sets the rule context.
    #[must_use]
    pub fn in_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Sets the manipulator index context.
    #[must_use]
    pub fn at_manipulator(mut self, index: usize) -> Self {
        self.manipulator = Some(index);
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.rule, self.manipulator) {
            (Some(rule), Some(idx)) => {
                write!(f, "[{} #{}] {}: {}", rule, idx, self.kind, self.message)
            }
            (Some(rule), None) => write!(f, "[{}] {}: {}", rule, self.kind, self.message),
            _ => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Types of validation warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarningKind {
    /// A later manipulator can never fire because an earlier one always wins
    ShadowedManipulator,
    /// A substitution target duplicates the output of an unmapped key
    TargetCollision,
    /// A manipulator mutates a variable without guarding on its state
    UnguardedToggle,
}

impl std::fmt::Display for ValidationWarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShadowedManipulator => write!(f, "shadowed manipulator"),
            Self::TargetCollision => write!(f, "target collision"),
            Self::UnguardedToggle => write!(f, "unguarded toggle"),
        }
    }
}

/// Validates a ruleset against the key database and guard semantics.
pub struct RulesetValidator<'a> {
    rules: &'a [Rule],
    key_db: &'a KeyDb,
}

impl<'a> RulesetValidator<'a> {
    /// Creates a validator over the given rules.
    #[must_use]
    pub fn new(rules: &'a [Rule], key_db: &'a KeyDb) -> Self {
        Self { rules, key_db }
    }

    /// Runs all checks and returns the combined report.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        for rule in self.rules {
            self.check_key_names(rule, &mut report);
            self.check_toggle_guards(rule, &mut report);
            self.check_shadowing(rule, &mut report);
            self.check_target_collisions(rule, &mut report);
        }

        report
    }

    /// Checks every key code and modifier name against the database.
    fn check_key_names(&self, rule: &Rule, report: &mut ValidationReport) {
        for (idx, m) in rule.manipulators.iter().enumerate() {
            if !self.key_db.is_valid(&m.from.key_code) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::UnknownKeyCode,
                        format!("'{}' is not a known key code", m.from.key_code),
                    )
                    .in_rule(&rule.description)
                    .at_manipulator(idx),
                );
            }

            if let Some(modifiers) = &m.from.modifiers {
                for name in modifiers.mandatory.iter().chain(&modifiers.optional) {
                    if !KeyDb::is_modifier_name(name) {
                        report.add_error(
                            ValidationError::new(
                                ValidationErrorKind::InvalidModifier,
                                format!("'{}' is not a modifier name", name),
                            )
                            .in_rule(&rule.description)
                            .at_manipulator(idx),
                        );
                    }
                }
            }

            for to in &m.to {
                if let ToEvent::Key { key_code, modifiers } = to {
                    if !self.key_db.is_valid(key_code) {
                        report.add_error(
                            ValidationError::new(
                                ValidationErrorKind::UnknownKeyCode,
                                format!("'{}' is not a known key code", key_code),
                            )
                            .in_rule(&rule.description)
                            .at_manipulator(idx),
                        );
                    }
                    for name in modifiers {
                        // "any" is only meaningful on the from side
                        if name == "any" || !KeyDb::is_modifier_name(name) {
                            report.add_error(
                                ValidationError::new(
                                    ValidationErrorKind::InvalidModifier,
                                    format!("'{}' cannot be held as a to-modifier", name),
                                )
                                .in_rule(&rule.description)
                                .at_manipulator(idx),
                            );
                        }
                    }
                }
            }
        }
    }

    /// Checks that manipulators mutating the same variable can never both fire.
    ///
    /// Guard exclusivity is evaluated, not inferred from shape: both guards
    /// are run against every relevant variable state (unset, false, true,
    /// and any value a guard mentions). A state satisfying both guards is
    /// the oscillation-ambiguity case and is reported as an error.
    fn check_toggle_guards(&self, rule: &Rule, report: &mut ValidationReport) {
        let writers: Vec<(usize, &Manipulator)> = rule
            .manipulators
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.written_variables().is_empty())
            .collect();

        for (idx, m) in &writers {
            for var in m.written_variables() {
                let guards_var = m
                    .conditions
                    .iter()
                    .any(|c| c.variable_name() == Some(var));
                if !guards_var {
                    report.add_warning(
                        ValidationWarning::new(
                            ValidationWarningKind::UnguardedToggle,
                            format!("writes '{}' without guarding on its state", var),
                        )
                        .in_rule(&rule.description)
                        .at_manipulator(*idx),
                    );
                }
            }
        }

        for (a_pos, (a_idx, a)) in writers.iter().enumerate() {
            for (b_idx, b) in writers.iter().skip(a_pos + 1) {
                let shared: Vec<&str> = a
                    .written_variables()
                    .into_iter()
                    .filter(|v| b.written_variables().contains(v))
                    .collect();

                for var in shared {
                    for state in Self::variable_states(var, &[a, b]) {
                        let mut ctx = EventContext::new();
                        if let Some(value) = state {
                            ctx = ctx.with_variable(var, value);
                        }

                        if a.is_eligible(&ctx) && b.is_eligible(&ctx) {
                            report.add_error(
                                ValidationError::new(
                                    ValidationErrorKind::ConflictingGuards,
                                    format!(
                                        "manipulators #{} and #{} both mutate '{}' and are \
                                         simultaneously eligible",
                                        a_idx, b_idx, var
                                    ),
                                )
                                .in_rule(&rule.description)
                                .with_suggestion(
                                    "derive one guard from the other via unless() so they \
                                     partition the variable's states",
                                ),
                            );
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Variable states to probe: unset, false, true, and any guard-mentioned value.
    fn variable_states(var: &str, manipulators: &[&&Manipulator]) -> Vec<Option<Value>> {
        let mut states = vec![None, Some(json!(false)), Some(json!(true))];

        for m in manipulators {
            for c in &m.conditions {
                if let Condition::VariableIf { name, value }
                | Condition::VariableUnless { name, value } = c
                {
                    if name == var && !states.contains(&Some(value.clone())) {
                        states.push(Some(value.clone()));
                    }
                }
            }
        }

        states
    }

    /// Warns when a later manipulator can never fire.
    ///
    /// Two manipulators with the same source key and mandatory modifiers
    /// are compared: if their guards are not structurally complementary and
    /// the earlier one's guards are a subset of the later one's, the host
    /// will always pick the earlier and the later is dead.
    fn check_shadowing(&self, rule: &Rule, report: &mut ValidationReport) {
        let manipulators = &rule.manipulators;

        for i in 0..manipulators.len() {
            for j in (i + 1)..manipulators.len() {
                let (a, b) = (&manipulators[i], &manipulators[j]);

                if self.canonical(&a.from.key_code) != self.canonical(&b.from.key_code) {
                    continue;
                }

                let mut a_mods: Vec<&String> = a.from.mandatory_modifiers().iter().collect();
                let mut b_mods: Vec<&String> = b.from.mandatory_modifiers().iter().collect();
                a_mods.sort();
                b_mods.sort();
                if a_mods != b_mods {
                    continue;
                }

                let complementary = a.conditions.iter().any(|c| {
                    b.conditions.iter().any(|d| *d == c.clone().unless())
                });
                if complementary {
                    continue;
                }

                let subset = a
                    .conditions
                    .iter()
                    .all(|c| b.conditions.contains(c));
                if subset {
                    report.add_warning(
                        ValidationWarning::new(
                            ValidationWarningKind::ShadowedManipulator,
                            format!(
                                "never fires: #{} matches the same key first whenever this \
                                 manipulator is eligible",
                                i
                            ),
                        )
                        .in_rule(&rule.description)
                        .at_manipulator(j),
                    );
                }
            }
        }
    }

    /// Warns about substitution targets that duplicate a passthrough key.
    ///
    /// Only plain letter/punctuation substitutions are considered. A target
    /// that is not itself remapped in the same rule produces the same
    /// output as the untouched physical key, so two keys end up emitting
    /// the same character.
    fn check_target_collisions(&self, rule: &Rule, report: &mut ValidationReport) {
        let substitutions: Vec<(usize, &str, &str)> = rule
            .manipulators
            .iter()
            .enumerate()
            .filter_map(|(idx, m)| {
                let [ToEvent::Key { key_code, modifiers }] = m.to.as_slice() else {
                    return None;
                };
                if !modifiers.is_empty() {
                    return None;
                }
                let from = self.substitution_key(&m.from.key_code)?;
                let to = self.substitution_key(key_code)?;
                Some((idx, from, to))
            })
            .collect();

        if substitutions.len() < 2 {
            return;
        }

        let sources: Vec<&str> = substitutions.iter().map(|(_, from, _)| *from).collect();

        for (idx, _, target) in &substitutions {
            if !sources.contains(target) {
                report.add_warning(
                    ValidationWarning::new(
                        ValidationWarningKind::TargetCollision,
                        format!(
                            "target '{}' is also produced by the unmapped physical key",
                            target
                        ),
                    )
                    .in_rule(&rule.description)
                    .at_manipulator(*idx),
                );
            }
        }

        for (pos, (idx, _, target)) in substitutions.iter().enumerate() {
            let duplicate = substitutions[..pos].iter().any(|(_, _, t)| t == target);
            if duplicate {
                report.add_warning(
                    ValidationWarning::new(
                        ValidationWarningKind::TargetCollision,
                        format!("target '{}' is produced by more than one source key", target),
                    )
                    .in_rule(&rule.description)
                    .at_manipulator(*idx),
                );
            }
        }
    }

    /// Canonical key code, falling back to the literal name.
    fn canonical<'b>(&'b self, key: &'b str) -> &'b str {
        self.key_db.canonicalize(key).unwrap_or(key)
    }

    /// Canonical key code if it denotes a letter or punctuation key.
    fn substitution_key<'b>(&'b self, key: &'b str) -> Option<&'b str> {
        let def = self.key_db.get(key)?;
        if def.category == "letters" || def.category == "punctuation" {
            Some(def.code.as_str())
        } else {
            None
        }
    }
}
