//! Consistency checks over loaded catalogs.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

use super::error::LoadWarning;
use super::plural::numerus_form_count;
use crate::format::placeholders;
use crate::types::{Context, MessageEntry, Translation, TranslationCatalog};

/// Minimum similarity for a source text to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

const MAX_SUGGESTIONS: usize = 3;

/// Check a single catalog.
///
/// Reports duplicate keys, untranslated entries, placeholder mismatches
/// between source and translation, and plural messages whose form count
/// differs from what the catalog's language uses. Retired entries are
/// skipped.
///
/// # Example
///
/// ```
/// use tscat::{LoadWarning, parser::parse_catalog, runtime::validate_catalog};
///
/// let catalog = parse_catalog(r#"<TS language="hr_HR">
/// <context><name>TopBar</name>
/// <message><source>Synchronized - Block: %1</source>
///     <translation>Sinkronizirano - Blok</translation></message>
/// </context></TS>"#).unwrap();
///
/// let warnings = validate_catalog(&catalog);
/// assert!(matches!(
///     &warnings[..],
///     [LoadWarning::PlaceholderMismatch { missing, .. }] if missing == &vec![1]
/// ));
/// ```
pub fn validate_catalog(catalog: &TranslationCatalog) -> Vec<LoadWarning> {
    let mut warnings: Vec<LoadWarning> = catalog
        .duplicates()
        .map(|(context, message)| LoadWarning::DuplicateMessage {
            context: context.name.clone(),
            source_text: message.source.clone(),
        })
        .collect();

    for (context, message) in catalog.messages() {
        if message.status.is_retired() {
            continue;
        }
        if message.translation.is_empty() {
            warnings.push(LoadWarning::Untranslated {
                context: context.name.clone(),
                source_text: message.source.clone(),
            });
            continue;
        }
        check_placeholders(context, message, &mut warnings);
        check_numerus(catalog.language(), context, message, &mut warnings);
    }
    warnings
}

/// Check a translated catalog against the reference catalog it was made
/// from.
///
/// Every live message in `target` whose key is missing from `reference`
/// produces an [`LoadWarning::UnknownMessage`], with the closest reference
/// sources of the same context as suggestions.
pub fn validate_against(
    reference: &TranslationCatalog,
    target: &TranslationCatalog,
) -> Vec<LoadWarning> {
    target
        .messages()
        .filter(|(_, message)| !message.status.is_retired())
        .filter(|(context, message)| {
            reference
                .find(&context.name, &message.source, message.key_comment())
                .is_none()
        })
        .map(|(context, message)| {
            let candidates = reference
                .messages()
                .filter(|(other, _)| other.name == context.name)
                .map(|(_, other)| other.source.as_str());
            LoadWarning::UnknownMessage {
                context: context.name.clone(),
                source_text: message.source.clone(),
                suggestions: compute_suggestions(&message.source, candidates),
            }
        })
        .collect()
}

/// Source texts similar to `text`, most similar first, at most three.
///
/// ```
/// use tscat::runtime::compute_suggestions;
///
/// let available = ["&New", "&Copy", "C&lose", "Sending addresses"];
/// assert_eq!(compute_suggestions("&Cpy", available), vec!["&Copy"]);
/// assert!(compute_suggestions("Receiving", available).is_empty());
/// ```
pub fn compute_suggestions<'a>(
    text: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut scored: Vec<(f64, &str)> = Vec::new();
    for candidate in available {
        if candidate == text || scored.iter().any(|(_, seen)| *seen == candidate) {
            continue;
        }
        let score = normalized_levenshtein(text, candidate);
        if score >= SUGGESTION_THRESHOLD {
            scored.push((score, candidate));
        }
    }
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

fn check_placeholders(context: &Context, message: &MessageEntry, warnings: &mut Vec<LoadWarning>) {
    let expected = placeholders(&message.source).args;
    let forms: Vec<&str> = match &message.translation {
        Translation::Single(text) => vec![text.as_str()],
        Translation::Numerus(forms) => forms.iter().map(String::as_str).collect(),
    };
    let mut missing = BTreeSet::new();
    let mut extra = BTreeSet::new();
    for form in forms.into_iter().filter(|form| !form.is_empty()) {
        let found = placeholders(form).args;
        missing.extend(expected.difference(&found).copied());
        extra.extend(found.difference(&expected).copied());
    }
    if !missing.is_empty() || !extra.is_empty() {
        warnings.push(LoadWarning::PlaceholderMismatch {
            context: context.name.clone(),
            source_text: message.source.clone(),
            missing: missing.into_iter().collect(),
            extra: extra.into_iter().collect(),
        });
    }
}

fn check_numerus(
    language: &str,
    context: &Context,
    message: &MessageEntry,
    warnings: &mut Vec<LoadWarning>,
) {
    let Translation::Numerus(forms) = &message.translation else {
        return;
    };
    if language.is_empty() {
        return;
    }
    let expected = numerus_form_count(language);
    if forms.len() != expected {
        warnings.push(LoadWarning::NumerusFormCount {
            context: context.name.clone(),
            source_text: message.source.clone(),
            language: language.to_string(),
            expected,
            found: forms.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_are_ordered_by_similarity() {
        let available = ["%n hour(s)", "%n hours", "%n day(s)"];
        let suggestions = compute_suggestions("%n hour(s).", available);
        assert_eq!(suggestions.first().map(String::as_str), Some("%n hour(s)"));
    }

    #[test]
    fn suggestions_skip_exact_and_repeated_candidates() {
        let available = ["Address", "Addres", "Addres"];
        assert_eq!(compute_suggestions("Address", available), vec!["Addres"]);
    }

    #[test]
    fn suggestions_are_capped() {
        let available = ["item1", "item2", "item3", "item4", "item5"];
        assert_eq!(compute_suggestions("item", available).len(), MAX_SUGGESTIONS);
    }
}
