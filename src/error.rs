//! Error types for eventboard.
//!
//! Caller contract violations (bad sort keys, zero page sizes) fail fast with
//! a dedicated variant. Malformed event data is never an error inside the
//! query engine; it only surfaces here when something asks for it strictly.

use thiserror::Error;

/// Result type alias for eventboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for eventboard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ═══════════════════════════════════════════════════════════════════
    // Query Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Sort key string is not one of the supported keys
    #[error("Invalid sort key '{0}' (expected one of dateAsc, dateDesc, titleAsc, titleDesc)")]
    InvalidSortKey(String),

    /// Page size must be positive
    #[error("Invalid page size {0}: must be at least 1")]
    InvalidPageSize(usize),

    /// Page numbers are 1-based
    #[error("Invalid page number {0}: pages start at 1")]
    InvalidPageNumber(usize),

    // ═══════════════════════════════════════════════════════════════════
    // Event Data Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Event date could not be parsed
    #[error("Malformed event date: '{0}'")]
    MalformedDate(String),

    /// The events feed reported a failure
    #[error("Event feed rejected: {0}")]
    FeedRejected(String),

    // ═══════════════════════════════════════════════════════════════════
    // Draft Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A required draft field is missing or blank
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Draft event date is not after the reference instant
    #[error("Event date {date} must be in the future (now: {now})")]
    EventDateNotInFuture {
        /// Requested event date (RFC 3339)
        date: String,
        /// Reference instant (RFC 3339)
        now: String,
    },

    /// Email address failed the basic shape check
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    // ═══════════════════════════════════════════════════════════════════
    // Countdown Errors
    // ═══════════════════════════════════════════════════════════════════

    /// No async runtime available to drive the tick task
    #[error("Countdown timer unavailable: {0}")]
    TimerUnavailable(String),

    // ═══════════════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Invalid input parameter
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Serialization Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ═══════════════════════════════════════════════════════════════════
    // Internal Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true if the error is a caller bug rather than bad data
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidSortKey(_)
                | Error::InvalidPageSize(_)
                | Error::InvalidPageNumber(_)
                | Error::InvalidParameter { .. }
        )
    }

    /// Returns true if the user can fix the input and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_)
                | Error::EventDateNotInFuture { .. }
                | Error::InvalidEmail(_)
                | Error::FeedRejected(_)
        )
    }

    /// Returns the error code for external systems
    pub fn code(&self) -> u32 {
        match self {
            // Query errors: 1xxx
            Error::InvalidSortKey(_) => 1001,
            Error::InvalidPageSize(_) => 1002,
            Error::InvalidPageNumber(_) => 1003,

            // Event data errors: 2xxx
            Error::MalformedDate(_) => 2001,
            Error::FeedRejected(_) => 2002,

            // Draft errors: 3xxx
            Error::MissingField(_) => 3001,
            Error::EventDateNotInFuture { .. } => 3002,
            Error::InvalidEmail(_) => 3003,

            // Countdown errors: 4xxx
            Error::TimerUnavailable(_) => 4001,

            // Validation errors: 5xxx
            Error::InvalidParameter { .. } => 5001,

            // Serialization errors: 7xxx
            Error::Serialization(_) => 7001,
            Error::Deserialization(_) => 7002,

            // Internal errors: 9xxx
            Error::Internal(_) => 9001,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            Error::Deserialization(err.to_string())
        } else {
            Error::Serialization(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_unique() {
        let codes = vec![
            Error::InvalidSortKey("".into()).code(),
            Error::InvalidPageSize(0).code(),
            Error::InvalidPageNumber(0).code(),
            Error::MalformedDate("".into()).code(),
            Error::FeedRejected("".into()).code(),
            Error::MissingField("".into()).code(),
            Error::EventDateNotInFuture { date: "".into(), now: "".into() }.code(),
            Error::InvalidEmail("".into()).code(),
            Error::TimerUnavailable("".into()).code(),
            Error::InvalidParameter { name: "".into(), reason: "".into() }.code(),
            Error::Serialization("".into()).code(),
            Error::Deserialization("".into()).code(),
            Error::Internal("".into()).code(),
        ];

        let mut unique_codes = codes.clone();
        unique_codes.sort();
        unique_codes.dedup();

        assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidSortKey("newest".into());
        assert!(err.to_string().contains("newest"));
        assert!(err.to_string().contains("dateAsc"));
    }

    #[test]
    fn test_contract_violations() {
        assert!(Error::InvalidPageSize(0).is_contract_violation());
        assert!(Error::InvalidSortKey("x".into()).is_contract_violation());
        assert!(!Error::MalformedDate("x".into()).is_contract_violation());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::MissingField("title".into()).is_recoverable());
        assert!(!Error::Internal("test".into()).is_recoverable());
    }

    #[test]
    fn test_from_serde_json() {
        let err: Error = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert_eq!(err.code(), 7002);
    }
}
