//! tscat CLI entry point.
//!
//! Provides command-line tools for working with Qt Linguist `.ts` files:
//! - `tscat check` - Parse and validate catalogs
//! - `tscat coverage` - Report translation coverage against a reference
//! - `tscat lookup` - Translate one message the way an application would
//! - `tscat normalize` - Rewrite a catalog in canonical layout

mod commands;
mod output;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_coverage, run_lookup, run_normalize, CheckArgs, CoverageArgs, LookupArgs,
    NormalizeArgs,
};
use tracing_subscriber::EnvFilter;

/// Qt Linguist translation file tools.
#[derive(Debug, Parser)]
#[command(name = "tscat")]
#[command(about = "Qt Linguist translation file tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse and validate .ts files
    Check(CheckArgs),
    /// Report translation coverage across languages
    Coverage(CoverageArgs),
    /// Look up a translation
    Lookup(LookupArgs),
    /// Rewrite a .ts file in canonical layout
    Normalize(NormalizeArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `-v` forces debug output, otherwise `RUST_LOG` decides.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Coverage(args) => run_coverage(args),
        Commands::Lookup(args) => run_lookup(args),
        Commands::Normalize(args) => run_normalize(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["tscat", "check", "a.ts", "-v", "--color", "never"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.color, ColorWhen::Never));
        assert!(matches!(cli.command, Commands::Check(_)));
    }
}
