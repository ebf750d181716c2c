//! Data model of a translation catalog.

mod catalog;
mod message;
mod message_id;

pub use catalog::{Context, DEFAULT_VERSION, TranslationCatalog};
pub use message::{Location, MessageEntry, Translation, TranslationStatus};
pub use message_id::MessageId;
