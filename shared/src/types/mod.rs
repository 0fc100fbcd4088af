//! Type definitions shared by the client crates

pub mod language;

pub use language::Language;
