//! Error handling for report decoding operations.
//!
//! Provides typed errors for structural report faults, recognizer execution
//! failures, message catalog misses, and forecast bounds violations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The report does not satisfy the format's structural requirements
    /// (missing TAF marker, non-numeric day/time header, truncated header).
    /// Always fatal for the whole parse.
    #[error("Invalid report: {reason}")]
    InvalidReport { reason: String },

    /// An enumerated code embedded in an otherwise well-shaped token could
    /// not be decoded (e.g. an unknown cloud quantity or compass direction).
    /// The remark decoder catches this and degrades to the unknown path.
    #[error("Unknown {field} code: '{value}'")]
    UnknownCode { field: &'static str, value: String },

    /// A recognizer was applied to a token its own `can_parse` should have
    /// rejected. Indicates a dispatcher bug, not bad input.
    #[error("Recognizer applied to unexpected token: '{token}'")]
    UnexpectedToken { token: String },

    /// The message catalog has no entry for the requested key.
    #[error("No translation for key: '{key}'")]
    MissingTranslation { key: String },

    /// A forecast query instant falls outside the TAF's validity window.
    #[error("Instant {instant} is outside the forecast validity [{start}, {end}]")]
    OutOfForecastRange {
        instant: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl Error {
    /// Create a structural report fault.
    pub fn invalid_report(reason: impl Into<String>) -> Self {
        Self::InvalidReport {
            reason: reason.into(),
        }
    }

    /// Create an unknown-code fault for an enumerated field.
    pub fn unknown_code(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownCode {
            field,
            value: value.into(),
        }
    }

    /// Create a defensive unexpected-token fault.
    pub fn unexpected_token(token: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            token: token.into(),
        }
    }

    /// True for faults the remark decoder converts into the unknown path.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownCode { .. } | Self::MissingTranslation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
