//! Error type shared by every fallible operation in the crate.
//!
//! Only recoverable, caller-facing conditions live here. A corrupted tour
//! (broken `next`/`prev` relation, reversal of a non-path) is a programming
//! error and panics instead.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed instance text. `line` is 1-based.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The instance cannot be solved (too few nodes, non-finite coordinates, ...).
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Storage for nodes or candidate lists could not be reserved.
    #[error("allocation failed: {0}")]
    Allocation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_instance(message: impl Into<String>) -> Self {
        Self::InvalidInstance(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn allocation(message: impl Into<String>) -> Self {
        Self::Allocation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_line() {
        let err = Error::parse(7, "expected 3 fields");
        assert_eq!(err.to_string(), "parse error at line 7: expected 3 fields");
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.tsp");
        let err: Error = io.into();
        assert_eq!(err.to_string(), "missing.tsp");
    }
}
