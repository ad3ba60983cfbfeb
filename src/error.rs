//! The crate level error type.
use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::models::transaction::TransactionId;

/// The broad class of an [Error], used by callers to decide how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied malformed input.
    Validation,
    /// The caller referenced a transaction that does not exist.
    NotFound,
    /// Storage, file or serialization failure.
    Store,
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A month, year, date or type filter could not be parsed.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// An ordering key or direction, or another command argument, is not
    /// supported.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid transaction type '{0}', use 'income' or 'expense'")]
    InvalidTransactionType(String),

    /// Amounts are never negative, the sign comes from the transaction type.
    #[error("amount {0} is negative, amounts must be zero or greater")]
    NegativeAmount(Decimal),

    /// A date string was not a valid `YYYY-MM-DD` date.
    #[error("invalid date '{0}', use YYYY-MM-DD")]
    InvalidDate(String),

    /// An edit was requested without any fields to change.
    #[error("must include at least one field to change")]
    NoChanges,

    #[error("no transaction exists with the ID {0}")]
    NotFound(TransactionId),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    #[error("could not access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read or write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read or write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The terminal could not be set up or drawn to.
    #[error("terminal error: {0}")]
    Terminal(std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidFilter(_)
            | Error::InvalidArgument(_)
            | Error::InvalidTransactionType(_)
            | Error::NegativeAmount(_)
            | Error::InvalidDate(_)
            | Error::NoChanges => ErrorKind::Validation,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::SqlError(_)
            | Error::Io { .. }
            | Error::Json(_)
            | Error::Csv(_)
            | Error::Terminal(_) => ErrorKind::Store,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_taxonomy() {
        assert_eq!(Error::InvalidFilter("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(Error::InvalidArgument("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(Error::NotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::from(rusqlite::Error::InvalidQuery).kind(),
            ErrorKind::Store
        );
    }

    #[test]
    fn test_messages_are_actionable() {
        let message = Error::InvalidTransactionType("savings".into()).to_string();
        assert!(message.contains("'income' or 'expense'"));
    }
}
