//! Catalog loading shared by commands that read more than their inputs.

use std::fs;
use std::path::Path;

use miette::Report;
use owo_colors::OwoColorize;
use tscat::{load_file, LoadError, TranslationCatalog};

use crate::output::TsDiagnostic;

/// Load a catalog, or report the failure on stderr and return the exit code
/// the command should finish with.
///
/// Unreadable files map to `NOINPUT` and malformed ones to `DATAERR`.
pub fn load_catalog(path: &Path) -> Result<TranslationCatalog, i32> {
    load_file(path).map_err(|err| {
        report_load_error(path, &err);
        match err {
            LoadError::Io { .. } => exitcode::NOINPUT,
            LoadError::Parse { .. } => exitcode::DATAERR,
        }
    })
}

fn report_load_error(path: &Path, err: &LoadError) {
    let content = fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();
    match TsDiagnostic::from_load_error(&content, err) {
        Some(diagnostic) => eprintln!("{:?}", Report::new(diagnostic)),
        None => eprintln!("{} {}", "error:".red(), err),
    }
}
