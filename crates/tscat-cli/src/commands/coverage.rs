//! Coverage command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use miette::IntoDiagnostic;
use tscat::runtime::coverage;
use tscat::Coverage;

use super::load::load_catalog;
use crate::output::table::format_coverage_table;

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source-language catalog (e.g., digiwage_en.ts).
    #[arg(long)]
    pub reference: PathBuf,

    /// Languages to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub lang: Vec<String>,

    /// Directory containing translation files. Defaults to the reference file directory.
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// File name prefix, so that `--prefix app_ --lang pl` reads `app_pl.ts`.
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> miette::Result<i32> {
    let results = match collect_coverage(&args) {
        Ok(results) => results,
        Err(code) => return Ok(code),
    };

    if args.json {
        let json_output = serde_json::to_string_pretty(&results).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(&results);
        println!("{}", table);

        for lang_coverage in &results {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for name in &lang_coverage.missing {
                    println!("  - {}", name);
                }
            }
        }
    }

    let any_incomplete = results.iter().any(|c| !c.is_complete());
    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Measure every requested language. A language without a file counts as
/// entirely missing; a file that fails to load stops the command.
fn collect_coverage(args: &CoverageArgs) -> Result<Vec<Coverage>, i32> {
    let reference = load_catalog(&args.reference)?;

    let base_dir = args
        .translations
        .clone()
        .or_else(|| args.reference.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut results = Vec::new();
    for lang in &args.lang {
        let lang_file = base_dir.join(format!("{}{}.ts", args.prefix, lang));
        let target = if lang_file.exists() {
            Some(load_catalog(&lang_file)?)
        } else {
            tracing::debug!(path = %lang_file.display(), "no catalog for language");
            None
        };
        results.push(coverage(&reference, target.as_ref(), lang));
    }
    Ok(results)
}
