use bon::Builder;
use serde::Serialize;

/// Review state of a translation, from the `type` attribute of `<translation>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// No `type` attribute: the translator marked the entry as done.
    #[default]
    Finished,
    /// `type="unfinished"`: not reviewed yet, possibly empty.
    Unfinished,
    /// `type="vanished"`: the source string no longer exists in the code.
    Vanished,
    /// `type="obsolete"`: legacy spelling of `vanished`.
    Obsolete,
}

impl TranslationStatus {
    /// Parse the `type` attribute value. Returns `None` for unknown values.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(Self::Unfinished),
            "vanished" => Some(Self::Vanished),
            "obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }

    /// The `type` attribute to write, or `None` for finished entries.
    pub fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Whether the entry is kept only for history and never used for lookup.
    pub fn is_retired(self) -> bool {
        matches!(self, Self::Vanished | Self::Obsolete)
    }
}

/// The translated text of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Translation {
    /// Plain `<translation>text</translation>`.
    Single(String),
    /// Ordered `<numerusform>` children of a plural message.
    Numerus(Vec<String>),
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Single(String::new())
    }
}

impl Translation {
    /// True when no text is present at all (every form empty).
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Single(text) => text.is_empty(),
            Translation::Numerus(forms) => forms.iter().all(String::is_empty),
        }
    }
}

/// One `<location>` reference to the code that uses a message.
///
/// `line` is kept exactly as written, including the relative `+12` / `-3`
/// notation produced by `lupdate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub filename: Option<String>,
    pub line: Option<String>,
}

/// A single `<message>`: a source string and its translation.
///
/// # Example
///
/// ```
/// use tscat::{MessageEntry, Translation};
///
/// let entry = MessageEntry::builder()
///     .source("%n hour(s)")
///     .numerus(true)
///     .translation(Translation::Numerus(vec![
///         "%n sat".to_string(),
///         "%n sata".to_string(),
///         "%n sati".to_string(),
///     ]))
///     .build();
///
/// assert_eq!(entry.numerus_form(1), Some("%n sata"));
/// assert_eq!(entry.numerus_form(7), Some("%n sati"));
/// assert!(entry.is_translated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Serialize)]
#[builder(on(String, into))]
pub struct MessageEntry {
    /// Original UI string, possibly containing `%1`..`%99` and `%n`.
    pub source: String,

    #[builder(default)]
    pub translation: Translation,

    /// Disambiguation text distinguishing equal sources in one context.
    pub comment: Option<String>,

    /// Set by `numerus="yes"`.
    #[builder(default)]
    pub numerus: bool,

    /// Developer note for translators (`<extracomment>`).
    pub extra_comment: Option<String>,

    /// Translator's own note (`<translatorcomment>`).
    pub translator_comment: Option<String>,

    /// Previous source text kept by `lupdate` for fuzzy matches.
    pub old_source: Option<String>,

    /// Optional message id (`id` attribute), used by id-based workflows.
    pub id: Option<String>,

    #[builder(default)]
    pub locations: Vec<Location>,

    #[builder(default)]
    pub status: TranslationStatus,
}

impl MessageEntry {
    /// The disambiguation comment, or `""` when absent.
    pub fn key_comment(&self) -> &str {
        self.comment.as_deref().unwrap_or_default()
    }

    /// The single translation text, if this is not a plural message.
    pub fn text(&self) -> Option<&str> {
        match &self.translation {
            Translation::Single(text) => Some(text),
            Translation::Numerus(_) => None,
        }
    }

    /// Get a numerus form by index, clamped to the last stored form.
    ///
    /// Returns `None` for non-plural translations and for plural
    /// translations without any forms.
    pub fn numerus_form(&self, index: usize) -> Option<&str> {
        let Translation::Numerus(forms) = &self.translation else {
            return None;
        };
        forms
            .get(index)
            .or_else(|| forms.last())
            .map(String::as_str)
    }

    /// Whether the entry carries translated text that lookups may use.
    ///
    /// Retired entries never count, regardless of their text.
    pub fn is_translated(&self) -> bool {
        !self.status.is_retired() && !self.translation.is_empty()
    }
}
