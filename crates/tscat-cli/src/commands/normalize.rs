//! Implementation of the `tscat normalize` command.

use std::fs;
use std::path::PathBuf;

use miette::{miette, IntoDiagnostic};
use tscat::write_catalog;

use super::load::load_catalog;

/// Arguments for the normalize command.
#[derive(Debug, clap::Args)]
pub struct NormalizeArgs {
    /// File to rewrite (.ts)
    pub file: PathBuf,

    /// Write here instead of printing to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the normalize command.
pub fn run_normalize(args: NormalizeArgs) -> miette::Result<i32> {
    let catalog = match load_catalog(&args.file) {
        Ok(catalog) => catalog,
        Err(code) => return Ok(code),
    };
    let content = write_catalog(&catalog).into_diagnostic()?;

    match &args.output {
        Some(path) => {
            fs::write(path, &content)
                .map_err(|e| miette!("Failed to write {}: {}", path.display(), e))?;
            tracing::debug!(
                from = %args.file.display(),
                to = %path.display(),
                messages = catalog.message_count(),
                "normalized catalog"
            );
        }
        None => print!("{}", content),
    }

    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn rewrites_catalog_in_canonical_layout() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("app_pl.ts");
        let output = dir.path().join("out.ts");
        fs::write(
            &input,
            r#"<TS language="pl"><context><name>TopBar</name><message><source>Pending</source><translation>Oczekujące</translation></message></context></TS>"#,
        )
        .unwrap();

        let code = run_normalize(NormalizeArgs {
            file: input,
            output: Some(output.clone()),
        })
        .unwrap();
        assert_eq!(code, exitcode::OK);

        let written = fs::read_to_string(output).unwrap();
        assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>"));
        assert!(written.contains("        <source>Pending</source>\n"));
        assert!(written.contains("<translation>Oczekujące</translation>"));
    }

    #[test]
    fn reports_missing_input() {
        let code = run_normalize(NormalizeArgs {
            file: PathBuf::from("/nonexistent/app_pl.ts"),
            output: None,
        })
        .unwrap();
        assert_eq!(code, exitcode::NOINPUT);
    }
}
