//! Error handling for ATBL parsing
//!
//! This module provides the error type and result type shared by every
//! parsing operation. Every variant except [`AtblError::EmptyInput`]
//! carries the 1-indexed line number it was raised on.

use thiserror::Error;

/// Parse error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtblError {
    /// The document string has zero length
    #[error("An ATBL input cannot be empty")]
    EmptyInput,

    /// The first line is not exactly `ver 1`
    #[error("Line {line}: Incorrect version specified, expected `ver 1`")]
    Version { line: usize },

    /// A line has fewer than 3 characters
    #[error("Line {line}: a command must be at least 3 characters in length")]
    LineTooShort { line: usize },

    /// The first 3 characters are not a known command
    #[error("Line {line}: Unknown command {token}")]
    UnknownCommand { line: usize, token: String },

    /// `ver` used after the first line
    #[error("Line {line}: Version command not in the first line of the input")]
    MisplacedVersion { line: usize },

    /// `cel` used while no row is open
    #[error("Line {line}: Starting cell without first starting a row")]
    UnstartedRow { line: usize },

    /// `txt` or `hex` used while no cell is open
    #[error("Line {line}: Appending to a cell without initializing it")]
    UninitializedCell { line: usize },

    /// `hex` argument is not valid even-length hexadecimal
    #[error("Line {line}: Invalid hex data: {source}")]
    HexDecode {
        line: usize,
        #[source]
        source: hex::FromHexError,
    },
}

impl AtblError {
    /// Line the error was raised on, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AtblError::EmptyInput => None,
            AtblError::Version { line }
            | AtblError::LineTooShort { line }
            | AtblError::UnknownCommand { line, .. }
            | AtblError::MisplacedVersion { line }
            | AtblError::UnstartedRow { line }
            | AtblError::UninitializedCell { line }
            | AtblError::HexDecode { line, .. } => Some(*line),
        }
    }

    /// Stable short name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AtblError::EmptyInput => "empty-input",
            AtblError::Version { .. } => "version",
            AtblError::LineTooShort { .. } => "line-too-short",
            AtblError::UnknownCommand { .. } => "unknown-command",
            AtblError::MisplacedVersion { .. } => "misplaced-version",
            AtblError::UnstartedRow { .. } => "unstarted-row",
            AtblError::UninitializedCell { .. } => "uninitialized-cell",
            AtblError::HexDecode { .. } => "hex-decode",
        }
    }

    /// Suggested fix shown alongside diagnostics
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AtblError::EmptyInput | AtblError::Version { .. } => {
                Some("the first line of a document must be `ver 1`")
            }
            AtblError::LineTooShort { .. } | AtblError::UnknownCommand { .. } => {
                Some("commands are one of: ver, rem, row, cel, txt, hex")
            }
            AtblError::MisplacedVersion { .. } => Some("remove the extra `ver` line"),
            AtblError::UnstartedRow { .. } => Some("add a `row` line before the first `cel`"),
            AtblError::UninitializedCell { .. } => Some("add a `cel` line before cell data"),
            AtblError::HexDecode { .. } => {
                Some("hex data needs an even number of digits per group")
            }
        }
    }
}

/// Result type for parse operations
pub type ParseResult<T> = Result<T, AtblError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_line() {
        let err = AtblError::EmptyInput;
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_error_display_includes_line() {
        let err = AtblError::UnknownCommand {
            line: 7,
            token: "foo".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Line 7"));
        assert!(msg.contains("foo"));
        assert_eq!(err.line(), Some(7));
        assert_eq!(err.kind(), "unknown-command");
    }

    #[test]
    fn test_hex_error_keeps_source() {
        use std::error::Error;

        let err = AtblError::HexDecode {
            line: 4,
            source: hex::FromHexError::OddLength,
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Line 4"));
    }
}
