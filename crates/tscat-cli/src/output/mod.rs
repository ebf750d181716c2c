//! Terminal and JSON rendering helpers shared by commands.

pub mod diagnostic;
pub mod table;

pub use diagnostic::TsDiagnostic;
