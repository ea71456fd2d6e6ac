//! Error types for schedule layout.

use thiserror::Error;

/// Errors that can occur while parsing a single time string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("empty time value")]
    Empty,

    #[error("'{0}' has more than one ':' (expected H:MM or a minute count)")]
    TooManyParts(String),

    #[error("invalid {component} component '{value}'")]
    InvalidComponent {
        component: &'static str,
        value: String,
    },
}

/// Errors that can occur in schedule operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Could not parse '{field}': {source}")]
    Parse {
        field: String,
        #[source]
        source: TimeParseError,
    },

    #[error("Invalid event #{index}: {reason}")]
    InvalidEvent { index: usize, reason: String },

    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),

    #[error("Schedule document error: {0}")]
    Document(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    pub fn parse(field: impl Into<String>, source: TimeParseError) -> Self {
        ScheduleError::Parse {
            field: field.into(),
            source,
        }
    }
}

/// Result type alias for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
