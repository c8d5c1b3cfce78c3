//! Shared CLI error and exit-code types.

/// Result alias for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Process exit codes used by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed successfully
    Success = 0,
    /// Ruleset validation failed
    ValidationFailure = 1,
    /// I/O failure or bad usage
    Error = 2,
}

/// Error produced by a CLI command handler.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Error classification, determines the exit code
    pub kind: CliErrorKind,
    /// Human-readable message printed to stderr
    pub message: String,
}

/// Classification of CLI errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Invalid flags or flag combinations
    Usage,
    /// The ruleset failed validation
    Validation,
    /// Reading or writing a file failed
    Io,
}

impl CliError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Usage,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// The process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationFailure as i32,
            CliErrorKind::Usage | CliErrorKind::Io => ExitCode::Error as i32,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}
