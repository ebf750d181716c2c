//! Translation coverage relative to a reference catalog.

use std::ptr;

use serde::Serialize;

use crate::types::{TranslationCatalog, TranslationStatus};

/// How much of a reference catalog a language translates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub language: String,
    /// Live messages in the reference catalog.
    pub total: usize,
    /// Messages with finished, non-empty translations.
    pub translated: usize,
    /// Messages with text still marked `unfinished`.
    pub unfinished: usize,
    /// Sources with no usable text, as `context: source`.
    pub missing: Vec<String>,
}

impl Coverage {
    /// True when every reference message is translated and finished.
    pub fn is_complete(&self) -> bool {
        self.translated == self.total
    }
}

/// Measure `target` against `reference`.
///
/// A `None` target counts every reference message as missing. Retired
/// reference messages and repeated reference keys are not counted.
///
/// ```
/// use tscat::{parser::parse_catalog, runtime::coverage};
///
/// let reference = parse_catalog(r#"<TS language="en"><context><name>AddNewAddressDialog</name>
/// <message><source>Address</source><translation type="unfinished"></translation></message>
/// <message><source>SAVE</source><translation type="unfinished"></translation></message>
/// </context></TS>"#).unwrap();
/// let polish = parse_catalog(r#"<TS language="pl"><context><name>AddNewAddressDialog</name>
/// <message><source>Address</source><translation>Adres</translation></message>
/// </context></TS>"#).unwrap();
///
/// let result = coverage(&reference, Some(&polish), "pl");
/// assert_eq!((result.total, result.translated), (2, 1));
/// assert_eq!(result.missing, vec!["AddNewAddressDialog: SAVE"]);
/// ```
pub fn coverage(
    reference: &TranslationCatalog,
    target: Option<&TranslationCatalog>,
    language: &str,
) -> Coverage {
    let mut result = Coverage {
        language: language.to_string(),
        total: 0,
        translated: 0,
        unfinished: 0,
        missing: Vec::new(),
    };
    for (context, message) in reference.messages() {
        if message.status.is_retired() {
            continue;
        }
        let first = reference.find(&context.name, &message.source, message.key_comment());
        if !first.is_some_and(|first| ptr::eq(first, message)) {
            continue;
        }
        result.total += 1;
        let entry = target
            .and_then(|target| target.find(&context.name, &message.source, message.key_comment()))
            .filter(|entry| entry.is_translated());
        match entry.map(|entry| entry.status) {
            Some(TranslationStatus::Unfinished) => result.unfinished += 1,
            Some(_) => result.translated += 1,
            None => result
                .missing
                .push(format!("{}: {}", context.name, message.source)),
        }
    }
    result
}
