//! Implementation of the `tscat check` command.

use std::fs;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Report};
use owo_colors::OwoColorize;
use serde::Serialize;
use tscat::parser::parse_catalog_bytes;
use tscat::runtime::validate_against;
use tscat::{validate_catalog, LoadWarning, TranslationCatalog};

use super::load::load_catalog;
use crate::output::TsDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (.ts)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Source-language catalog that translations must match
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Exit with non-zero code if any warning is reported
    #[arg(long)]
    pub strict: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome {
    Checked,
    Invalid,
    Unreadable,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: PathBuf,
    outcome: Outcome,
    language: Option<String>,
    messages: usize,
    error: Option<String>,
    warnings: Vec<LoadWarning>,
}

impl FileReport {
    fn failed(path: &Path, outcome: Outcome, error: String) -> Self {
        FileReport {
            file: path.to_path_buf(),
            outcome,
            language: None,
            messages: 0,
            error: Some(error),
            warnings: Vec::new(),
        }
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let reference = match &args.reference {
        Some(path) => match load_catalog(path) {
            Ok(catalog) => Some(catalog),
            Err(code) => return Ok(code),
        },
        None => None,
    };

    let reports: Vec<FileReport> = args
        .files
        .iter()
        .map(|path| check_file(path, reference.as_ref(), !args.json))
        .collect();

    if args.json {
        let json_output = serde_json::to_string_pretty(&reports).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        for report in reports.iter().filter(|r| r.outcome == Outcome::Checked) {
            print_report(report);
        }
    }

    Ok(exit_code(&reports, args.strict))
}

/// Parse and validate one file. Failures are rendered on stderr when
/// `diagnostics` is set.
fn check_file(
    path: &Path,
    reference: Option<&TranslationCatalog>,
    diagnostics: bool,
) -> FileReport {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            if diagnostics {
                eprintln!("{} {}: {}", "error:".red(), path.display(), e);
            }
            return FileReport::failed(path, Outcome::Unreadable, e.to_string());
        }
    };
    let catalog = match parse_catalog_bytes(&bytes) {
        Ok(catalog) => catalog,
        Err(e) => {
            if diagnostics {
                let content = String::from_utf8_lossy(&bytes);
                let diagnostic = TsDiagnostic::from_parse_error(path, &content, &e);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            return FileReport::failed(path, Outcome::Invalid, e.to_string());
        }
    };

    let mut warnings = validate_catalog(&catalog);
    if let Some(reference) = reference {
        warnings.extend(validate_against(reference, &catalog));
    }
    tracing::debug!(
        path = %path.display(),
        warnings = warnings.len(),
        "checked catalog"
    );
    FileReport {
        file: path.to_path_buf(),
        outcome: Outcome::Checked,
        language: Some(catalog.language().to_string()),
        messages: catalog.message_count(),
        error: None,
        warnings,
    }
}

fn exit_code(reports: &[FileReport], strict: bool) -> i32 {
    let any = |outcome: Outcome| reports.iter().any(|r| r.outcome == outcome);
    let any_warnings = reports.iter().any(|r| !r.warnings.is_empty());
    if any(Outcome::Unreadable) {
        exitcode::NOINPUT
    } else if any(Outcome::Invalid) || (strict && any_warnings) {
        exitcode::DATAERR
    } else {
        exitcode::OK
    }
}

fn print_report(report: &FileReport) {
    let language = report.language.as_deref().unwrap_or_default();
    if report.warnings.is_empty() {
        println!(
            "{} {} ({}, {} messages)",
            "ok".green(),
            report.file.display(),
            language,
            report.messages
        );
        return;
    }
    println!(
        "{} {} ({}, {} messages, {} warnings)",
        "warn".yellow(),
        report.file.display(),
        language,
        report.messages,
        report.warnings.len()
    );
    for warning in &report.warnings {
        println!("  - {}", warning);
    }
}
