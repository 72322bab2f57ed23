//! Core Types and Trait Definitions for Lyrica
//!
//! Defines the ingestion contract shared by every parser:
//! - **DocumentSource:** where one raw document comes from
//! - **Parser:** pluggable capability turning a source into a `ParseResult`
//! - **ParseResult:** the uniform `{wordcount, clean_text}` record
//!
//! Parsers are stateless apart from their own settings. The stopword set is
//! injected into every `parse` call so it is loaded once and shared read-only.

use crate::stopwords::StopwordSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Document Sources
// ============================================================================

/// One raw document handed to a parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Document stored on disk
    File(PathBuf),
    /// Document already held in memory, identified by `id`
    Inline { id: String, body: String },
}

impl DocumentSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn inline(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Inline {
            id: id.into(),
            body: body.into(),
        }
    }

    /// Raw source identifier, used as the default label
    pub fn identifier(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline { id, .. } => id.clone(),
        }
    }

    /// Read the whole document as UTF-8 text
    pub fn read_to_string(&self) -> Result<String, ParseError> {
        match self {
            Self::File(path) => std::fs::read_to_string(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::InvalidData {
                    ParseError::Encoding {
                        source_id: self.identifier(),
                        message: e.to_string(),
                    }
                } else {
                    ParseError::SourceUnavailable {
                        source_id: self.identifier(),
                        cause: e,
                    }
                }
            }),
            Self::Inline { body, .. } => Ok(body.clone()),
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

// ============================================================================
// Word Counts
// ============================================================================

/// Word frequency table preserving first-occurrence order
///
/// Iteration yields words in the order they first appeared in the filtered
/// token stream. Top-k extraction relies on that order to break ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCount {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl WordCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every token of a stream
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = Self::new();
        for token in tokens {
            counts.add(token.as_ref());
        }
        counts
    }

    /// Increment the count of `word` by one
    pub fn add(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1));
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.index.get(word).map(|&i| self.entries[i].1)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// `(word, count)` pairs in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }
}

impl Serialize for WordCount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, count) in &self.entries {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

// ============================================================================
// Parse Results
// ============================================================================

/// Normalized record produced by every parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Exact frequency count of the filtered token stream
    pub wordcount: WordCount,
    /// Filtered tokens joined by single spaces
    pub clean_text: String,
}

impl ParseResult {
    /// Build both attributes from one filtered token stream
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let wordcount = WordCount::from_tokens(&tokens);
        let clean_text = tokens.join(" ");
        Self {
            wordcount,
            clean_text,
        }
    }
}

/// Named projections of a `ParseResult` held by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Wordcount,
    CleanText,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Wordcount, Attribute::CleanText];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Wordcount => "wordcount",
            Attribute::CleanText => "clean_text",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parser Trait
// ============================================================================

/// Pluggable document parser
///
/// Implementations normalize one raw document into a `ParseResult`. The
/// caller selects the variant explicitly; nothing is inferred from file
/// extensions.
///
/// # Example
/// ```rust,ignore
/// use lyrica_nlp::parsers::PlainTextParser;
/// use lyrica_nlp::types::{DocumentSource, Parser};
///
/// let parser = PlainTextParser;
/// let result = parser.parse(&DocumentSource::file("ballads.txt"), &stopwords)?;
/// println!("{} distinct words", result.wordcount.len());
/// ```
pub trait Parser: Send + Sync {
    /// Parser name for log output
    fn name(&self) -> &'static str;

    /// Parse one document, filtering tokens against `stopwords`
    ///
    /// # Errors
    /// Returns `ParseError` when the source cannot be read, is not valid
    /// UTF-8, lacks a required column, or is otherwise malformed.
    fn parse(
        &self,
        source: &DocumentSource,
        stopwords: &StopwordSet,
    ) -> Result<ParseResult, ParseError>;
}

/// Parse failure for one document
#[derive(Debug, Error)]
pub enum ParseError {
    /// Document cannot be opened or read
    #[error("Source unavailable ({source_id}): {cause}")]
    SourceUnavailable {
        source_id: String,
        #[source]
        cause: std::io::Error,
    },

    /// Document is not valid UTF-8
    #[error("Encoding error ({source_id}): {message}")]
    Encoding { source_id: String, message: String },

    /// Designated text column absent from the table header
    #[error("Missing required column '{column}' in {source_id}")]
    MissingColumn { source_id: String, column: String },

    /// Content could not be interpreted
    #[error("Malformed document ({source_id}): {message}")]
    Malformed { source_id: String, message: String },

    /// CSV reader failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Parsing did not finish within the ingestion deadline
    #[error("Parsing exceeded deadline of {deadline_ms} ms")]
    DeadlineExceeded { deadline_ms: u64 },

    /// Parser task panicked or was cancelled before returning
    #[error("Parser task failed ({source_id}): {message}")]
    ParserTaskFailed { source_id: String, message: String },
}
