//! Runtime side of the catalog: lookups, plural selection, locale choice
//! and checks over loaded catalogs.

mod coverage;
mod error;
mod locale;
mod plural;
mod translator;
mod validate;

pub use coverage::{Coverage, coverage};
pub use error::{LoadError, LoadWarning};
pub use locale::{
    DEFAULT_LOCALE, fallback_chain, normalize_locale, resolve_locale, resolve_locale_from,
    split_locale, system_locale,
};
pub use plural::{
    base_language, numerus_form_count, numerus_form_names, numerus_index, plural_category,
};
pub use translator::{LoadOptions, Request, Translator, load_file};
pub use validate::{compute_suggestions, validate_against, validate_catalog};
