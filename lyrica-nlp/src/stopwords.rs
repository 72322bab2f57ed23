//! Stopword loading and filtering
//!
//! A `StopwordSet` is loaded once from a line/space delimited source and then
//! shared read-only (behind an `Arc`) by every parser call. Membership is an
//! exact, case-sensitive string match: the loader performs no case folding, so
//! callers pair lowercase stopword lists with lowercasing parsers.

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Stopword source failure
#[derive(Debug, Error)]
pub enum StopwordError {
    /// Stopword source cannot be opened or read
    #[error("Stopword source unavailable ({source_id}): {cause}")]
    SourceUnavailable {
        source_id: String,
        #[source]
        cause: std::io::Error,
    },
}

/// Immutable set of excluded tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Empty set (filters nothing)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load stopwords from a file
    pub fn load(path: &Path) -> Result<Self, StopwordError> {
        let text = std::fs::read_to_string(path).map_err(|cause| {
            StopwordError::SourceUnavailable {
                source_id: path.display().to_string(),
                cause,
            }
        })?;

        let set = Self::from_text(&text);
        debug!(
            source = %path.display(),
            count = set.len(),
            "Loaded stopwords"
        );
        Ok(set)
    }

    /// Parse stopwords from text separated by any mix of newlines and spaces
    ///
    /// Separators never produce empty entries, so the empty string is never a
    /// stopword.
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact-match membership test
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Tokens not in the set, in original order with duplicates kept
    pub fn filter<I, S>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String> + AsRef<str>,
    {
        tokens
            .into_iter()
            .filter(|t| !self.contains(t.as_ref()))
            .map(Into::into)
            .collect()
    }
}

/// Free-function form of [`StopwordSet::filter`]
pub fn filter<I, S>(tokens: I, stopwords: &StopwordSet) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String> + AsRef<str>,
{
    stopwords.filter(tokens)
}
