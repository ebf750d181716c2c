//! Process-wide translator for the `global-translator` feature.
//!
//! Removes the need to pass `&Translator` to every call site. The
//! translator is installed once at startup and never replaced.

use std::sync::OnceLock;

use crate::runtime::{Request, Translator};

static GLOBAL_TRANSLATOR: OnceLock<Translator> = OnceLock::new();

/// Install the process-wide translator.
///
/// Only the first call succeeds; later calls hand their translator back.
pub fn install(translator: Translator) -> Result<(), Translator> {
    GLOBAL_TRANSLATOR.set(translator)?;
    tracing::debug!("installed global translator");
    Ok(())
}

/// The installed translator, if any.
pub fn translator() -> Option<&'static Translator> {
    GLOBAL_TRANSLATOR.get()
}

/// Translate with the global translator, or return `source` unchanged
/// when none is installed.
pub fn tr(context: &str, source: &'static str) -> &'static str {
    match translator() {
        Some(translator) => translator.translate(context, source),
        None => source,
    }
}

/// Plural lookup with the global translator; `%n` is always replaced.
pub fn tr_n(context: &str, source: &str, count: i64) -> String {
    let request = Request::builder()
        .context(context)
        .source(source)
        .count(count)
        .build();
    match translator() {
        Some(translator) => translator.translate_with(&request),
        None => Translator::new().translate_with(&request),
    }
}
