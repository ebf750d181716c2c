//! Locale names and the choice of UI language.
//!
//! Catalog files use Qt-style names (`hr_HR`, `pl`). Locales coming from
//! the environment or the command line are normalized to that form before
//! they select files.

/// Language used when nothing else names one.
pub const DEFAULT_LOCALE: &str = "en";

/// Normalize a locale name to Qt form.
///
/// Accepts BCP-47 (`hr-HR`) and POSIX (`hr_HR.UTF-8@euro`) spellings.
/// Returns `None` for empty input, for the `C` and `POSIX` locales, and for
/// anything that does not start with a 2 or 3 letter language code.
///
/// ```
/// use tscat::runtime::normalize_locale;
///
/// assert_eq!(normalize_locale("hr-hr").as_deref(), Some("hr_HR"));
/// assert_eq!(normalize_locale("pl_PL.UTF-8").as_deref(), Some("pl_PL"));
/// assert_eq!(normalize_locale("zh-hant-tw").as_deref(), Some("zh_Hant_TW"));
/// assert_eq!(normalize_locale("C"), None);
/// ```
pub fn normalize_locale(raw: &str) -> Option<String> {
    let name = raw.trim().split(['.', '@']).next().unwrap_or_default();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    let mut parts = name.split(['_', '-']);
    let language = parts.next().unwrap_or_default();
    if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let mut normalized = language.to_ascii_lowercase();
    for part in parts.filter(|part| !part.is_empty()) {
        normalized.push('_');
        if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) {
            let (first, rest) = part.split_at(1);
            normalized.push_str(&first.to_ascii_uppercase());
            normalized.push_str(&rest.to_ascii_lowercase());
        } else {
            normalized.push_str(&part.to_ascii_uppercase());
        }
    }
    Some(normalized)
}

/// The operating system's locale, normalized.
pub fn system_locale() -> Option<String> {
    sys_locale::get_locale().and_then(|locale| normalize_locale(&locale))
}

/// Choose the UI locale.
///
/// Precedence: command line, then saved settings, then the system locale,
/// then [`DEFAULT_LOCALE`]. Values that do not normalize are ignored.
pub fn resolve_locale(cli: Option<&str>, settings: Option<&str>) -> String {
    resolve_locale_from(cli, settings, system_locale().as_deref())
}

/// [`resolve_locale`] with an explicit system locale.
///
/// ```
/// use tscat::runtime::resolve_locale_from;
///
/// assert_eq!(resolve_locale_from(Some("pl"), Some("hr_HR"), Some("de_DE")), "pl");
/// assert_eq!(resolve_locale_from(None, Some("hr-HR"), Some("de_DE")), "hr_HR");
/// assert_eq!(resolve_locale_from(None, None, Some("de_DE")), "de_DE");
/// assert_eq!(resolve_locale_from(None, None, None), "en");
/// ```
pub fn resolve_locale_from(
    cli: Option<&str>,
    settings: Option<&str>,
    system: Option<&str>,
) -> String {
    let candidates = [("command line", cli), ("settings", settings), ("system", system)];
    for (origin, candidate) in candidates {
        let Some(candidate) = candidate else {
            continue;
        };
        if let Some(locale) = normalize_locale(candidate) {
            tracing::debug!(origin, locale = %locale, "resolved UI locale");
            return locale;
        }
        tracing::debug!(origin, candidate, "ignoring unusable locale");
    }
    DEFAULT_LOCALE.to_string()
}

/// Split a locale at its last `_` into language and territory.
///
/// ```
/// use tscat::runtime::split_locale;
///
/// assert_eq!(split_locale("hr_HR"), ("hr", Some("HR")));
/// assert_eq!(split_locale("pl"), ("pl", None));
/// ```
pub fn split_locale(locale: &str) -> (&str, Option<&str>) {
    match locale.rsplit_once('_') {
        Some((language, territory)) if !language.is_empty() && !territory.is_empty() => {
            (language, Some(territory))
        }
        _ => (locale, None),
    }
}

/// Catalog names to load for a locale, least specific first.
///
/// ```
/// use tscat::runtime::fallback_chain;
///
/// assert_eq!(fallback_chain("hr_HR"), vec!["hr", "hr_HR"]);
/// assert_eq!(fallback_chain("pl"), vec!["pl"]);
/// ```
pub fn fallback_chain(locale: &str) -> Vec<String> {
    if locale.is_empty() {
        return Vec::new();
    }
    match split_locale(locale) {
        (language, Some(_)) => vec![language.to_string(), locale.to_string()],
        (language, None) => vec![language.to_string()],
    }
}
