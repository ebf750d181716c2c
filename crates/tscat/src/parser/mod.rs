//! Reader and writer for Qt Linguist `.ts` documents.
//!
//! The reader turns a document into a [`TranslationCatalog`](crate::TranslationCatalog)
//! and the writer produces the layout emitted by `lupdate`/`lconvert`, so a
//! catalog survives a read/write cycle unchanged.

pub mod error;
mod reader;
mod writer;

pub use error::{ParseError, WriteError};
pub use reader::{parse_catalog, parse_catalog_bytes};
pub use writer::write_catalog;
