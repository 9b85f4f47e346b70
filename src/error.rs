//! Unified error hierarchy for stepmetrics
//!
//! Errors are layered the same way the parser validates: structural and
//! lexical problems are [`FormatError`], semantic ones are [`ValueError`],
//! bad calculation arguments are [`InvalidInputError`], and labels the
//! calorie dispatch does not know are [`TrackerError::UnknownActivity`].

use thiserror::Error;

/// Top-level error type for all stepmetrics operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// Record or duration token is malformed
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Record is well-formed but a value is out of range
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Calculation received a non-positive argument
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Activity label has no calorie formula
    #[error("unknown activity type: {label}")]
    UnknownActivity { label: String },
}

/// Structural and lexical parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Wrong number of comma-separated fields
    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    /// Field has leading or trailing whitespace
    #[error("whitespace around {field} is not allowed: {value:?}")]
    Whitespace { field: &'static str, value: String },

    /// Step count is not an integer
    #[error("invalid step count {value:?}: {reason}")]
    InvalidSteps { value: String, reason: String },

    /// Activity label is empty
    #[error("activity type is empty")]
    EmptyActivity,

    /// Duration token does not match the grammar
    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },
}

/// Semantic errors on syntactically valid records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("step count must be positive, got {0}")]
    NonPositiveSteps(i64),

    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(String),
}

/// Non-positive argument passed to a calculation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{parameter} must be positive, got {value}")]
pub struct InvalidInputError {
    pub parameter: &'static str,
    pub value: String,
}

impl InvalidInputError {
    pub fn new(parameter: &'static str, value: impl ToString) -> Self {
        Self {
            parameter,
            value: value.to_string(),
        }
    }
}

/// Result type alias for stepmetrics operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Coarse error category, stable across message changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Format,
    Value,
    InvalidInput,
    UnknownActivity,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Format => write!(f, "format"),
            ErrorKind::Value => write!(f, "value"),
            ErrorKind::InvalidInput => write!(f, "invalid_input"),
            ErrorKind::UnknownActivity => write!(f, "unknown_activity"),
        }
    }
}

impl TrackerError {
    pub fn unknown_activity(label: impl Into<String>) -> Self {
        TrackerError::UnknownActivity {
            label: label.into(),
        }
    }

    /// Get the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::Format(_) => ErrorKind::Format,
            TrackerError::Value(_) => ErrorKind::Value,
            TrackerError::InvalidInput(_) => ErrorKind::InvalidInput,
            TrackerError::UnknownActivity { .. } => ErrorKind::UnknownActivity,
        }
    }

    /// Get error severity level
    ///
    /// Bad log lines are expected in a batch, so record-level problems are
    /// warnings. A bad body profile affects every record and is an error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::Format(_) => ErrorSeverity::Warning,
            TrackerError::Value(_) => ErrorSeverity::Warning,
            TrackerError::UnknownActivity { .. } => ErrorSeverity::Warning,
            TrackerError::InvalidInput(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::Format(FormatError::FieldCount { expected, actual }) => format!(
                "Record should have {} comma-separated values but has {}",
                expected, actual
            ),
            TrackerError::Format(FormatError::Whitespace { field, .. }) => {
                format!("Remove the spaces around the {}", field)
            }
            TrackerError::Format(FormatError::InvalidDuration { value, .. }) => format!(
                "Could not read duration {:?}; use a form like 1h30m, 45m or 1.5h",
                value
            ),
            TrackerError::InvalidInput(InvalidInputError { parameter, .. }) => {
                format!("Please provide a positive {}", parameter)
            }
            TrackerError::UnknownActivity { label } => {
                format!("No calorie formula for activity {:?}", label)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
