//! Error and warning types for loading and checking catalogs.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that occur while loading a catalog from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the catalog.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Parse error with file location context.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        /// Byte offset of the error, for source highlighting.
        offset: Option<usize>,
        message: String,
    },
}

impl LoadError {
    /// The file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}

/// Non-fatal problems found in a loaded catalog.
///
/// Warnings never stop a catalog from loading. Lookups stay well defined
/// for every case listed here.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// The same `(source, comment)` appears twice in one context.
    #[error("duplicate message '{source_text}' in context '{context}'")]
    DuplicateMessage { context: String, source_text: String },

    /// Translation and source use different `%1`..`%99` placeholders.
    #[error(
        "placeholder mismatch in '{source_text}' ({context}): missing [{}], extra [{}]",
        join_indices(missing),
        join_indices(extra)
    )]
    PlaceholderMismatch {
        context: String,
        source_text: String,
        missing: Vec<u8>,
        extra: Vec<u8>,
    },

    /// A plural message stores a different number of forms than the
    /// language uses.
    #[error("'{source_text}' ({context}) has {found} numerus forms, {language} uses {expected}")]
    NumerusFormCount {
        context: String,
        source_text: String,
        language: String,
        expected: usize,
        found: usize,
    },

    /// No usable translation text.
    #[error("untranslated message '{source_text}' in context '{context}'")]
    Untranslated { context: String, source_text: String },

    /// A message the reference catalog does not know about.
    #[error("unknown message '{source_text}' in context '{context}'{}", format_suggestions(suggestions))]
    UnknownMessage {
        context: String,
        source_text: String,
        suggestions: Vec<String>,
    },
}

impl LoadWarning {
    /// Context name of the message the warning is about.
    pub fn context(&self) -> &str {
        match self {
            LoadWarning::DuplicateMessage { context, .. }
            | LoadWarning::PlaceholderMismatch { context, .. }
            | LoadWarning::NumerusFormCount { context, .. }
            | LoadWarning::Untranslated { context, .. }
            | LoadWarning::UnknownMessage { context, .. } => context,
        }
    }

    /// Source text of the message the warning is about.
    pub fn source_text(&self) -> &str {
        match self {
            LoadWarning::DuplicateMessage { source_text, .. }
            | LoadWarning::PlaceholderMismatch { source_text, .. }
            | LoadWarning::NumerusFormCount { source_text, .. }
            | LoadWarning::Untranslated { source_text, .. }
            | LoadWarning::UnknownMessage { source_text, .. } => source_text,
        }
    }
}

fn join_indices(indices: &[u8]) -> String {
    indices
        .iter()
        .map(|index| format!("%{index}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}
