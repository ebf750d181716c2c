//! Implementation of the `tscat lookup` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;
use tscat::format::format_args;
use tscat::{Config, ConfigError, Request, Translator};

/// Arguments for the lookup command.
#[derive(Debug, clap::Args)]
pub struct LookupArgs {
    /// Locale to translate into (e.g., hr_HR, pl). Defaults to the settings
    /// file, then the system locale.
    #[arg(long, env = "TSCAT_LANG")]
    pub lang: Option<String>,

    /// Message context (usually the UI class name)
    #[arg(long, required = true)]
    pub context: String,

    /// Source text as written in the code
    #[arg(long, required = true)]
    pub source: String,

    /// Disambiguation comment
    #[arg(long)]
    pub disambiguation: Option<String>,

    /// Count for plural forms, also substituted for %n
    #[arg(short = 'n', long = "count", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Values for %1, %2, ... (repeatable, in order)
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Directory containing translation files
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// File name prefix of translation files
    #[arg(long)]
    pub prefix: Option<String>,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for lookup results.
#[derive(Serialize)]
pub struct LookupResult {
    pub context: String,
    pub source: String,
    pub languages: Vec<String>,
    pub found: bool,
    pub result: String,
}

/// Run the lookup command.
pub fn run_lookup(args: LookupArgs) -> miette::Result<i32> {
    let translator = match build_translator(&args) {
        Ok(translator) => translator,
        Err(code) => return Ok(code),
    };
    let output = resolve(&args, &translator);

    if args.json {
        let json = serde_json::to_string_pretty(&output).into_diagnostic()?;
        println!("{}", json);
    } else {
        println!("{}", output.result);
    }

    Ok(exitcode::OK)
}

/// Load catalogs from the settings file, overridden by `--dir` and
/// `--prefix`.
fn build_translator(args: &LookupArgs) -> Result<Translator, i32> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).map_err(|err| {
            eprintln!("{} {}", "error:".red(), err);
            match err {
                ConfigError::Io { .. } => exitcode::NOINPUT,
                ConfigError::Parse { .. } | ConfigError::Serialize(_) => exitcode::DATAERR,
            }
        })?,
        None => Config::default(),
    };
    if let Some(dir) = &args.dir {
        config.translations_dir = dir.clone();
    }
    if let Some(prefix) = &args.prefix {
        config.file_prefix = prefix.clone();
    }

    let translator = config.translator(args.lang.as_deref());
    if translator.layer_count() == 0 {
        tracing::warn!(
            dir = %config.translations_dir.display(),
            "no catalogs loaded, showing source text"
        );
    }
    Ok(translator)
}

fn resolve(args: &LookupArgs, translator: &Translator) -> LookupResult {
    let request = Request::builder()
        .context(&args.context)
        .source(&args.source)
        .maybe_disambiguation(args.disambiguation.as_deref())
        .maybe_count(args.count)
        .build();
    LookupResult {
        context: args.context.clone(),
        source: args.source.clone(),
        languages: translator
            .languages()
            .into_iter()
            .map(str::to_string)
            .collect(),
        found: translator.find_translation(&request).is_some(),
        result: format_args(&translator.translate_with(&request), &args.args),
    }
}
