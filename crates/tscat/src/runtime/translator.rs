//! Layered translation lookup with source fallback.

use std::fs;
use std::path::Path;

use bon::Builder;

use super::error::LoadError;
use super::locale::fallback_chain;
use super::plural::numerus_index;
use crate::format::substitute_count;
use crate::parser::parse_catalog_bytes;
use crate::types::{MessageEntry, Translation, TranslationCatalog, TranslationStatus};

/// Options controlling which entries lookups may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct LoadOptions {
    /// Use `type="unfinished"` entries that carry text.
    #[builder(default = true)]
    pub include_unfinished: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions::builder().build()
    }
}

/// A single lookup.
///
/// # Example
///
/// ```
/// use tscat::Request;
///
/// let request = Request::builder()
///     .context("TopBar")
///     .source("%n hour(s)")
///     .count(3)
///     .build();
/// assert_eq!(request.count, Some(3));
/// assert_eq!(request.disambiguation, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct Request<'a> {
    pub context: &'a str,
    pub source: &'a str,
    /// Comment distinguishing equal sources in one context.
    pub disambiguation: Option<&'a str>,
    /// Count selecting the numerus form and replacing `%n`.
    pub count: Option<i64>,
}

/// An ordered stack of catalogs answering translation lookups.
///
/// Lookups search the most recently installed catalog first and fall back
/// to earlier ones, then to the source text itself. A missing context or
/// message is never an error.
///
/// # Example
///
/// ```
/// use tscat::{Translator, parser::parse_catalog};
///
/// let base = parse_catalog(r#"<TS language="hr">
/// <context><name>TopBar</name>
/// <message><source>Pending</source><translation>Na čekanju</translation></message>
/// <message><source>Tor Disabled</source><translation>Tor isključen</translation></message>
/// </context></TS>"#).unwrap();
/// let territory = parse_catalog(r#"<TS language="hr_HR">
/// <context><name>TopBar</name>
/// <message><source>Tor Disabled</source><translation>Tor onemogućen</translation></message>
/// </context></TS>"#).unwrap();
///
/// let mut translator = Translator::new();
/// translator.install(base);
/// translator.install(territory);
///
/// assert_eq!(translator.translate("TopBar", "Tor Disabled"), "Tor onemogućen");
/// assert_eq!(translator.translate("TopBar", "Pending"), "Na čekanju");
/// assert_eq!(translator.translate("TopBar", "Synced"), "Synced");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translator {
    layers: Vec<TranslationCatalog>,
    options: LoadOptions,
}

impl Translator {
    /// Create a translator with no catalogs and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a translator with the given options.
    pub fn with_options(options: LoadOptions) -> Self {
        Translator {
            layers: Vec::new(),
            options,
        }
    }

    /// Load the catalogs for a locale from `dir`.
    ///
    /// Files are named `{prefix}{name}.ts`. For `hr_HR` the base language
    /// file `{prefix}hr.ts` is installed first and `{prefix}hr_HR.ts` second,
    /// so territory entries take precedence. Missing files are skipped, and
    /// files that fail to load are logged and skipped.
    pub fn for_locale(
        dir: impl AsRef<Path>,
        prefix: &str,
        locale: &str,
        options: LoadOptions,
    ) -> Self {
        let dir = dir.as_ref();
        let mut translator = Translator::with_options(options);
        for name in fallback_chain(locale) {
            let path = dir.join(format!("{prefix}{name}.ts"));
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "no catalog for locale, skipping");
                continue;
            }
            match load_file(&path) {
                Ok(catalog) => translator.install(catalog),
                Err(err) => tracing::warn!(error = %err, "skipping unreadable catalog"),
            }
        }
        translator
    }

    /// Options used for lookups.
    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// Add a catalog on top of the stack.
    pub fn install(&mut self, catalog: TranslationCatalog) {
        tracing::debug!(
            language = catalog.language(),
            messages = catalog.message_count(),
            layer = self.layers.len(),
            "installed catalog"
        );
        self.layers.push(catalog);
    }

    /// Load a catalog from disk and add it on top of the stack.
    pub fn install_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let catalog = load_file(path)?;
        self.install(catalog);
        Ok(())
    }

    /// Number of installed catalogs.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Installed catalogs, in installation order.
    pub fn catalogs(&self) -> &[TranslationCatalog] {
        &self.layers
    }

    /// Languages of the installed catalogs, in installation order.
    pub fn languages(&self) -> Vec<&str> {
        self.layers
            .iter()
            .map(TranslationCatalog::language)
            .collect()
    }

    /// Translate a plain message, returning `source` when no catalog has a
    /// usable translation.
    ///
    /// A plural message looked up this way yields its first form.
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.lookup(context, source, None, None).unwrap_or(source)
    }

    /// Translate with disambiguation and count.
    ///
    /// When a count is given it selects the numerus form and replaces every
    /// `%n` in the result, including the source fallback.
    ///
    /// ```
    /// use tscat::{Request, Translator};
    ///
    /// let translator = Translator::new();
    /// let request = Request::builder()
    ///     .context("TopBar")
    ///     .source("%n active connection(s)")
    ///     .count(8)
    ///     .build();
    /// assert_eq!(translator.translate_with(&request), "8 active connection(s)");
    /// ```
    pub fn translate_with(&self, request: &Request<'_>) -> String {
        let text = self.find_translation(request).unwrap_or(request.source);
        match request.count {
            Some(count) => substitute_count(text, count),
            None => text.to_string(),
        }
    }

    /// The stored text answering `request`, before `%n` substitution.
    ///
    /// `None` means [`Translator::translate_with`] falls back to the source.
    pub fn find_translation(&self, request: &Request<'_>) -> Option<&str> {
        self.lookup(
            request.context,
            request.source,
            request.disambiguation,
            request.count,
        )
    }

    /// Whether any catalog has a usable translation for the message.
    pub fn contains(&self, context: &str, source: &str) -> bool {
        self.lookup(context, source, None, None).is_some()
    }

    fn lookup(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        count: Option<i64>,
    ) -> Option<&str> {
        let comment = disambiguation.unwrap_or_default();
        let keys = [comment, ""];
        let keys = if comment.is_empty() {
            &keys[..1]
        } else {
            &keys[..]
        };
        let found = self.layers.iter().rev().find_map(|catalog| {
            keys.iter().find_map(|key| {
                let entry = catalog.find(context, source, key)?;
                self.select(catalog, entry, count)
            })
        });
        if found.is_none() {
            tracing::trace!(context, source, "no translation, using source text");
        }
        found
    }

    fn is_usable(&self, entry: &MessageEntry) -> bool {
        match entry.status {
            TranslationStatus::Vanished | TranslationStatus::Obsolete => false,
            TranslationStatus::Unfinished => self.options.include_unfinished,
            TranslationStatus::Finished => true,
        }
    }

    /// Pick the text of `entry` for `count`, if it is usable and non-empty.
    fn select<'c>(
        &self,
        catalog: &TranslationCatalog,
        entry: &'c MessageEntry,
        count: Option<i64>,
    ) -> Option<&'c str> {
        if !self.is_usable(entry) {
            return None;
        }
        let text = match &entry.translation {
            Translation::Single(text) => text.as_str(),
            Translation::Numerus(_) => {
                let index = count.map_or(0, |n| numerus_index(catalog.language(), n));
                entry.numerus_form(index)?
            }
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Read and parse a catalog file.
pub fn load_file(path: impl AsRef<Path>) -> Result<TranslationCatalog, LoadError> {
    let path = path.as_ref();
    let content = fs::read(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let catalog = parse_catalog_bytes(&content).map_err(|e| {
        let (line, column) = e.position().unwrap_or_default();
        LoadError::Parse {
            path: path.to_path_buf(),
            line,
            column,
            offset: e.offset(),
            message: e.message().to_string(),
        }
    })?;
    tracing::debug!(path = %path.display(), language = catalog.language(), "loaded catalog");
    Ok(catalog)
}
