//! Built-in document parsers
//!
//! Two variants of the `Parser` capability share stopword filtering but differ
//! in normalization depth:
//! - **plain_text** - splits raw text on single spaces, no case folding
//! - **tabular** - reads one text column of a CSV table, strips everything
//!   outside `[A-Za-z']` and lowercases
//!
//! A capitalized stopword such as `"The"` survives the plain-text path unless
//! the document is already lowercase.

pub mod plain_text;
pub mod tabular;

pub use plain_text::PlainTextParser;
pub use tabular::TabularParser;
