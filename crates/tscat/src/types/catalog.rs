use std::collections::HashMap;

use serde::Serialize;

use super::{MessageEntry, MessageId};

/// Format version written by current Qt tools.
pub const DEFAULT_VERSION: &str = "2.1";

/// A `<context>` block: a named group of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    pub name: String,
    pub comment: Option<String>,
    pub messages: Vec<MessageEntry>,
}

impl Context {
    /// Create an empty context.
    pub fn new(name: impl Into<String>) -> Self {
        Context {
            name: name.into(),
            comment: None,
            messages: Vec::new(),
        }
    }

    /// Append a message, builder style.
    pub fn with_message(mut self, message: MessageEntry) -> Self {
        self.messages.push(message);
        self
    }
}

/// Position of a message inside the catalog: `(context index, message index)`.
type Slot = (usize, usize);

/// An immutable set of translations for one language.
///
/// The catalog keeps contexts and messages in file order so that writing it
/// back produces the same document, and indexes every message by
/// `(context, source, comment)` for constant-time lookup.
///
/// A key is expected to appear once per context. When it appears more than
/// once the first occurrence is indexed and later ones are reported by
/// [`TranslationCatalog::duplicates`]. The same source string in two
/// different contexts is two independent keys.
///
/// # Example
///
/// ```
/// use tscat::{Context, MessageEntry, Translation, TranslationCatalog};
///
/// let catalog = TranslationCatalog::new(
///     "pl",
///     vec![Context::new("AddNewAddressDialog").with_message(
///         MessageEntry::builder()
///             .source("Address")
///             .translation(Translation::Single("Adres".to_string()))
///             .build(),
///     )],
/// );
///
/// let entry = catalog.find("AddNewAddressDialog", "Address", "").unwrap();
/// assert_eq!(entry.text(), Some("Adres"));
/// assert!(catalog.find("TopBar", "Address", "").is_none());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TranslationCatalog {
    language: String,
    source_language: Option<String>,
    version: String,
    contexts: Vec<Context>,
    #[serde(skip)]
    index: HashMap<MessageId, Vec<Slot>>,
    #[serde(skip)]
    duplicates: Vec<Slot>,
}

impl Default for TranslationCatalog {
    fn default() -> Self {
        TranslationCatalog::new("", Vec::new())
    }
}

impl PartialEq for TranslationCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
            && self.source_language == other.source_language
            && self.version == other.version
            && self.contexts == other.contexts
    }
}

impl Eq for TranslationCatalog {}

impl TranslationCatalog {
    /// Build a catalog for `language` and index its messages.
    pub fn new(language: impl Into<String>, contexts: Vec<Context>) -> Self {
        let mut catalog = TranslationCatalog {
            language: language.into(),
            source_language: None,
            version: DEFAULT_VERSION.to_string(),
            contexts,
            index: HashMap::new(),
            duplicates: Vec::new(),
        };
        catalog.rebuild_index();
        catalog
    }

    /// Set the `sourcelanguage` attribute.
    pub fn with_source_language(mut self, source_language: Option<String>) -> Self {
        self.source_language = source_language;
        self
    }

    /// Set the format version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        self.duplicates.clear();
        for (context_index, context) in self.contexts.iter().enumerate() {
            for (message_index, message) in context.messages.iter().enumerate() {
                let id = MessageId::new(&context.name, &message.source, message.key_comment());
                let bucket = self.index.entry(id).or_default();
                let taken = bucket.iter().any(|&(c, m)| {
                    let other = self.contexts.get(c).map(|ctx| &ctx.name);
                    let entry = slot_message(&self.contexts, (c, m));
                    other == Some(&context.name)
                        && entry.is_some_and(|e| {
                            e.source == message.source && e.key_comment() == message.key_comment()
                        })
                });
                if taken {
                    self.duplicates.push((context_index, message_index));
                } else {
                    bucket.push((context_index, message_index));
                }
            }
        }
    }

    /// Locale identifier from the `language` attribute (e.g. `hr_HR`).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The `sourcelanguage` attribute, if present.
    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Contexts in file order.
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// First context with the given name.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Every message paired with its context, in file order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &MessageEntry)> {
        self.contexts
            .iter()
            .flat_map(|context| context.messages.iter().map(move |message| (context, message)))
    }

    /// Total number of messages, duplicates included.
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|context| context.messages.len()).sum()
    }

    /// Look up a message by its full key.
    ///
    /// `comment` is the disambiguation text; pass `""` for messages without
    /// one. Missing contexts and keys yield `None`.
    pub fn find(&self, context: &str, source: &str, comment: &str) -> Option<&MessageEntry> {
        let id = MessageId::new(context, source, comment);
        self.index.get(&id)?.iter().find_map(|&slot| {
            let context_name = &self.contexts.get(slot.0)?.name;
            let entry = slot_message(&self.contexts, slot)?;
            (context_name == context && entry.source == source && entry.key_comment() == comment)
                .then_some(entry)
        })
    }

    /// Messages that repeat a key already seen earlier in the same context.
    pub fn duplicates(&self) -> impl Iterator<Item = (&Context, &MessageEntry)> {
        self.duplicates.iter().filter_map(|&slot| {
            let context = self.contexts.get(slot.0)?;
            Some((context, slot_message(&self.contexts, slot)?))
        })
    }
}

fn slot_message(contexts: &[Context], (context, message): Slot) -> Option<&MessageEntry> {
    contexts.get(context)?.messages.get(message)
}
