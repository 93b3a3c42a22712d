//! Game operation result types.

use rpssl_domain::{Choice, Outcome};

/// Result of a single game against the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub outcome: Outcome,
    pub player: Choice,
    pub opponent: Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationErrorKind {
    NotFound,
    UnprocessableEntity,
}

/// Expected business failure, reported to the caller rather than raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationError {
    pub kind: ApplicationErrorKind,
    pub message: Option<String>,
}

impl ApplicationError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ApplicationErrorKind::NotFound,
            message: Some(message.into()),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            kind: ApplicationErrorKind::UnprocessableEntity,
            message: Some(message.into()),
        }
    }
}

/// Outcome of an operation that may fail for business reasons.
///
/// `value` can be present even when `succeeded` is false (a game that was
/// played but could not be recorded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult<T> {
    pub succeeded: bool,
    pub value: Option<T>,
    pub error: Option<ApplicationError>,
}

impl<T> OperationResult<T> {
    pub fn success(value: T) -> Self {
        Self {
            succeeded: true,
            value: Some(value),
            error: None,
        }
    }

    pub fn failure(error: ApplicationError) -> Self {
        Self {
            succeeded: false,
            value: None,
            error: Some(error),
        }
    }

    pub fn with_value(succeeded: bool, value: T) -> Self {
        Self {
            succeeded,
            value: Some(value),
            error: None,
        }
    }

    pub fn error_kind(&self) -> Option<ApplicationErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}
