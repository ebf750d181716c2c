//! Miette diagnostic wrapper for TS parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tscat::{LoadError, ParseError};

/// A miette-compatible diagnostic for malformed `.ts` files.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid catalog: {message}")]
#[diagnostic(code(tscat::parse))]
pub struct TsDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TsDiagnostic {
    /// Create a diagnostic from a [`ParseError`] with the file contents.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let help = match err {
            ParseError::InvalidUtf8 => Some("TS files must be saved as UTF-8".to_string()),
            ParseError::Structure { .. } => {
                Some("expected <TS><context><name/><message><source/>...".to_string())
            }
            ParseError::Xml { .. } => None,
        };
        Self::new(path, content, err.offset(), err.message().to_string(), help)
    }

    /// Create a diagnostic from a [`LoadError::Parse`].
    ///
    /// Returns `None` for I/O errors, which have no source to highlight.
    pub fn from_load_error(content: &str, err: &LoadError) -> Option<Self> {
        match err {
            LoadError::Parse {
                path,
                offset,
                message,
                ..
            } => Some(Self::new(path, content, *offset, message.clone(), None)),
            LoadError::Io { .. } => None,
        }
    }

    fn new(
        path: &Path,
        content: &str,
        offset: Option<usize>,
        message: String,
        help: Option<String>,
    ) -> Self {
        // miette panics on spans past the end of the source
        let offset = offset.unwrap_or(0).min(content.len());
        let length = usize::from(offset < content.len());
        TsDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, length).into(),
            message,
            help,
        }
    }
}

#[cfg(test)]
mod tests {
    use tscat::parse_catalog;

    use super::*;

    #[test]
    fn span_points_at_error_offset() {
        let content = "<TS>\n<context>\n<name>TopBar</nam>\n</context>\n</TS>";
        let err = parse_catalog(content).unwrap_err();
        let diagnostic = TsDiagnostic::from_parse_error(Path::new("app_hr.ts"), content, &err);
        assert!(diagnostic.span.offset() > content.find("<name>").unwrap());
        assert!(diagnostic.span.offset() <= content.len());
    }

    #[test]
    fn span_is_clamped_to_content() {
        let diagnostic = TsDiagnostic::new(
            Path::new("app_pl.ts"),
            "<TS>",
            Some(100),
            "unexpected end of file".to_string(),
            None,
        );
        assert_eq!(diagnostic.span.offset(), 4);
        assert_eq!(diagnostic.span.len(), 0);
    }
}
