//! Parse and write error types for TS documents.

use thiserror::Error;

/// An error that occurred while reading a TS document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not well-formed XML.
    #[error("malformed XML at {line}:{column}: {message}")]
    Xml {
        line: usize,
        column: usize,
        offset: usize,
        message: String,
    },

    /// Well-formed XML that does not describe a TS catalog.
    #[error("invalid TS document at {line}:{column}: {message}")]
    Structure {
        line: usize,
        column: usize,
        offset: usize,
        message: String,
    },

    /// Invalid UTF-8 in input.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,
}

impl ParseError {
    /// Line and column (both 1-based) of the error, if known.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Xml { line, column, .. } | ParseError::Structure { line, column, .. } => {
                Some((*line, *column))
            }
            ParseError::InvalidUtf8 => None,
        }
    }

    /// Byte offset of the error in the input, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Xml { offset, .. } | ParseError::Structure { offset, .. } => Some(*offset),
            ParseError::InvalidUtf8 => None,
        }
    }

    /// Human-readable message without the position prefix.
    pub fn message(&self) -> &str {
        match self {
            ParseError::Xml { message, .. } | ParseError::Structure { message, .. } => message,
            ParseError::InvalidUtf8 => "invalid UTF-8",
        }
    }
}

/// An error that occurred while serializing a catalog.
#[derive(Debug, Error)]
#[error("failed to write TS document: {message}")]
pub struct WriteError {
    message: String,
}

impl WriteError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        WriteError {
            message: message.into(),
        }
    }
}
