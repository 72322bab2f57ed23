//! Corpus registry
//!
//! Owns the attribute → label → value store. Every successful ingestion writes
//! the same label under both attributes (`wordcount`, `clean_text`); a failed
//! ingestion writes nothing. Re-ingesting a label replaces its values in place
//! and keeps its original position, so label iteration follows insertion order
//! of first occurrence.

use crate::error::{IngestResult, IngestionError};
use crate::parsers::PlainTextParser;
use crate::stopwords::{StopwordError, StopwordSet};
use crate::types::{Attribute, DocumentSource, ParseResult, Parser, WordCount};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry of ingested documents keyed by label
#[derive(Debug, Clone)]
pub struct CorpusRegistry {
    /// Shared stopword set injected into every parser call
    stopwords: Arc<StopwordSet>,
    /// Labels in order of first ingestion
    labels: Vec<String>,
    wordcount: HashMap<String, WordCount>,
    clean_text: HashMap<String, String>,
}

impl CorpusRegistry {
    /// Create an empty registry around an already loaded stopword set
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self {
            stopwords,
            labels: Vec::new(),
            wordcount: HashMap::new(),
            clean_text: HashMap::new(),
        }
    }

    /// Create an empty registry, loading stopwords from `path`
    pub fn with_stopwords_file(path: &Path) -> Result<Self, StopwordError> {
        Ok(Self::new(Arc::new(StopwordSet::load(path)?)))
    }

    pub fn stopwords(&self) -> &Arc<StopwordSet> {
        &self.stopwords
    }

    /// Replace the stopword set on explicit request
    ///
    /// Documents already ingested keep the values computed with the old set.
    pub fn reload_stopwords(&mut self, path: &Path) -> Result<(), StopwordError> {
        let stopwords = StopwordSet::load(path)?;
        info!(
            source = %path.display(),
            count = stopwords.len(),
            "Reloaded stopwords"
        );
        self.stopwords = Arc::new(stopwords);
        Ok(())
    }

    /// Register one document with the corpus
    ///
    /// Parses `source` with `parser` (the plain-text parser when `None`),
    /// defaults the label to the source identifier and merges the result.
    ///
    /// # Returns
    /// The label the document was stored under.
    ///
    /// # Errors
    /// `IngestionError` wrapping the parser failure; the registry is unchanged.
    pub fn load_text(
        &mut self,
        source: &DocumentSource,
        label: Option<&str>,
        parser: Option<&dyn Parser>,
    ) -> IngestResult<String> {
        let parser = parser.unwrap_or(&PlainTextParser);

        let results = parser.parse(source, &self.stopwords).map_err(|e| {
            let err = IngestionError::new(source, label, e);
            warn!(
                source = %err.source_id,
                parser = parser.name(),
                error = %err.message,
                "Ingestion failed"
            );
            err
        })?;

        let label = label
            .map(str::to_string)
            .unwrap_or_else(|| source.identifier());

        debug!(
            label = %label,
            parser = parser.name(),
            distinct_words = results.wordcount.len(),
            "Document parsed"
        );

        self.save_results(&label, results);
        Ok(label)
    }

    /// Integrate parsing results into internal state
    ///
    /// Overwrites any existing entry for `label` under every attribute.
    pub fn save_results(&mut self, label: &str, results: ParseResult) {
        let ParseResult {
            wordcount,
            clean_text,
        } = results;

        if !self.wordcount.contains_key(label) {
            self.labels.push(label.to_string());
        }
        self.wordcount.insert(label.to_string(), wordcount);
        self.clean_text.insert(label.to_string(), clean_text);
    }

    /// Labels stored under `attribute`, in insertion order
    pub fn labels(&self, attribute: Attribute) -> Vec<&str> {
        self.labels
            .iter()
            .map(String::as_str)
            .filter(|l| match attribute {
                Attribute::Wordcount => self.wordcount.contains_key(*l),
                Attribute::CleanText => self.clean_text.contains_key(*l),
            })
            .collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.wordcount.contains_key(label)
    }

    /// Number of ingested labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn wordcount(&self, label: &str) -> Option<&WordCount> {
        self.wordcount.get(label)
    }

    pub fn clean_text(&self, label: &str) -> Option<&str> {
        self.clean_text.get(label).map(String::as_str)
    }

    /// `wordcount` attribute as `(label, counts)` in insertion order
    pub fn wordcounts(&self) -> impl Iterator<Item = (&str, &WordCount)> {
        self.labels
            .iter()
            .filter_map(|l| self.wordcount.get(l).map(|wc| (l.as_str(), wc)))
    }

    /// `clean_text` attribute as `(label, text)` in insertion order
    pub fn clean_texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .filter_map(|l| self.clean_text.get(l).map(|t| (l.as_str(), t.as_str())))
    }
}

impl Default for CorpusRegistry {
    fn default() -> Self {
        Self::new(Arc::new(StopwordSet::empty()))
    }
}
