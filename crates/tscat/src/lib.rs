pub mod config;
pub mod format;
#[cfg(feature = "global-translator")]
pub mod global;
pub mod parser;
pub mod runtime;
pub mod types;

pub use config::{Config, ConfigError};
pub use parser::{ParseError, WriteError, parse_catalog, write_catalog};
pub use runtime::{
    Coverage, LoadError, LoadOptions, LoadWarning, Request, Translator, load_file,
    validate_catalog,
};
pub use types::{
    Context, Location, MessageEntry, MessageId, Translation, TranslationCatalog,
    TranslationStatus,
};
