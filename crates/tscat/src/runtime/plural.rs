//! CLDR plural rules mapped onto Qt numerus forms.
//!
//! A plural message in a TS file stores its forms as a plain list. The list
//! follows the CLDR category order (zero, one, two, few, many, other) with the
//! categories that whole numbers never reach left out: Croatian stores
//! `one, few, other`, Polish stores `one, few, many` (its `other` only covers
//! fractions) and Japanese stores a single form.
//!
//! Rules are cached per thread per language, so repeated lookups reuse the
//! previously constructed `PluralRules`.

use std::cell::RefCell;
use std::ops::RangeInclusive;

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

/// Counts sampled to find which categories whole numbers produce.
const SAMPLE_RANGE: RangeInclusive<i64> = 0..=1000;

const CLDR_ORDER: [PluralCategory; 6] = [
    PluralCategory::Zero,
    PluralCategory::One,
    PluralCategory::Two,
    PluralCategory::Few,
    PluralCategory::Many,
    PluralCategory::Other,
];

struct LanguageRules {
    language: String,
    rules: Option<PluralRules>,
    forms: Vec<PluralCategory>,
}

thread_local! {
    /// Per-thread cache of plural rules keyed by base language.
    static PLURAL_RULES_CACHE: RefCell<Vec<LanguageRules>> = const { RefCell::new(Vec::new()) };
}

/// Language subtag of a Qt (`hr_HR`) or BCP-47 (`hr-HR`) locale name,
/// lowercased.
///
/// ```
/// use tscat::runtime::base_language;
///
/// assert_eq!(base_language("hr_HR"), "hr");
/// assert_eq!(base_language("pt-BR"), "pt");
/// assert_eq!(base_language("PL"), "pl");
/// ```
pub fn base_language(locale: &str) -> String {
    locale
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Build rules for a language, falling back to root rules.
fn build_rules(language: &str) -> Option<PluralRules> {
    let specific = Locale::try_from_str(language)
        .ok()
        .and_then(|loc| PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into()).ok());
    specific.or_else(|| {
        tracing::debug!(language, "no plural rules for language, using root rules");
        PluralRules::try_new(locale!("und").into(), PluralRuleType::Cardinal.into()).ok()
    })
}

/// Categories reachable by whole numbers, in CLDR order.
fn integer_forms(rules: Option<&PluralRules>) -> Vec<PluralCategory> {
    let Some(rules) = rules else {
        return vec![PluralCategory::Other];
    };
    let mut seen = Vec::new();
    for n in SAMPLE_RANGE {
        let category = rules.category_for(n);
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    CLDR_ORDER
        .into_iter()
        .filter(|category| seen.contains(category))
        .collect()
}

fn with_rules<T>(locale: &str, f: impl FnOnce(&LanguageRules) -> T) -> T {
    let language = base_language(locale);
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some(entry) = cache.iter().find(|entry| entry.language == language) {
            return f(entry);
        }
        let rules = build_rules(&language);
        let forms = integer_forms(rules.as_ref());
        let entry = LanguageRules {
            language,
            rules,
            forms,
        };
        let result = f(&entry);
        cache.push(entry);
        result
    })
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

fn category_of(entry: &LanguageRules, n: i64) -> PluralCategory {
    entry
        .rules
        .as_ref()
        .map_or(PluralCategory::Other, |rules| rules.category_for(n))
}

/// Get the CLDR plural category for a count in a given language.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other".
///
/// ```
/// use tscat::runtime::plural_category;
///
/// assert_eq!(plural_category("hr_HR", 21), "one");
/// assert_eq!(plural_category("pl", 21), "many");
/// assert_eq!(plural_category("pl", 3), "few");
/// ```
pub fn plural_category(locale: &str, n: i64) -> &'static str {
    with_rules(locale, |entry| category_str(category_of(entry, n)))
}

/// Index of the numerus form used for `n` in the given language.
///
/// A category that has no stored form in the language's list maps to the
/// last form.
///
/// ```
/// use tscat::runtime::numerus_index;
///
/// assert_eq!(numerus_index("pl", 1), 0);
/// assert_eq!(numerus_index("pl", 4), 1);
/// assert_eq!(numerus_index("pl", 12), 2);
/// assert_eq!(numerus_index("ja", 5), 0);
/// ```
pub fn numerus_index(locale: &str, n: i64) -> usize {
    with_rules(locale, |entry| {
        let category = category_of(entry, n);
        entry
            .forms
            .iter()
            .position(|&form| form == category)
            .unwrap_or_else(|| entry.forms.len().saturating_sub(1))
    })
}

/// Number of numerus forms a translation in this language should carry.
pub fn numerus_form_count(locale: &str) -> usize {
    with_rules(locale, |entry| entry.forms.len())
}

/// CLDR names of the numerus forms, in storage order.
pub fn numerus_form_names(locale: &str) -> Vec<&'static str> {
    with_rules(locale, |entry| {
        entry.forms.iter().copied().map(category_str).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn croatian_forms_are_one_few_other() {
        assert_eq!(numerus_form_names("hr_HR"), vec!["one", "few", "other"]);
    }

    #[test]
    fn polish_forms_are_one_few_many() {
        assert_eq!(numerus_form_names("pl"), vec!["one", "few", "many"]);
    }

    #[test]
    fn english_has_two_forms() {
        assert_eq!(numerus_form_count("en"), 2);
        assert_eq!(numerus_index("en", 1), 0);
        assert_eq!(numerus_index("en", 0), 1);
    }

    #[test]
    fn unknown_language_uses_a_single_form() {
        assert_eq!(numerus_form_count("zz"), 1);
        assert_eq!(numerus_index("zz", 7), 0);
    }

    #[test]
    fn empty_locale_uses_root_rules() {
        assert_eq!(plural_category("", 1), "other");
    }

    #[test]
    fn base_language_strips_codeset_and_modifier() {
        assert_eq!(base_language("sr_RS@latin"), "sr");
        assert_eq!(base_language("de_DE.UTF-8"), "de");
    }
}
