//! lyrica-nlp - comparative text analysis across labeled documents
//!
//! Raw documents go through a pluggable [`types::Parser`], land in the
//! [`registry::CorpusRegistry`] keyed by attribute and label, and are read back
//! through the derived views in [`aggregator`] and the renderer contracts in
//! [`render`].

pub mod aggregator;
pub mod error;
pub mod ingest;
pub mod lexicon;
pub mod parsers;
pub mod registry;
pub mod render;
pub mod stopwords;
pub mod types;

pub use crate::error::{IngestionError, RenderDataError};
pub use crate::registry::CorpusRegistry;
pub use crate::stopwords::{StopwordError, StopwordSet};
pub use crate::types::{Attribute, DocumentSource, ParseError, ParseResult, Parser, WordCount};
