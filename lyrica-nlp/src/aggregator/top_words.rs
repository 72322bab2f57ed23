//! Top-k word extraction and frequency map export

use crate::registry::CorpusRegistry;
use crate::types::WordCount;
use rayon::prelude::*;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One weighted label → word edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopWordRow {
    pub label: String,
    pub word: String,
    pub count: u64,
}

/// k most frequent words of one label
///
/// Sorted by descending count. The sort is stable, so equal counts keep the
/// first-occurrence order of `counts`. Yields `min(k, distinct words)` rows.
pub fn top_words_for(label: &str, counts: &WordCount, k: usize) -> Vec<TopWordRow> {
    let mut pairs: Vec<(&str, u64)> = counts.iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));

    pairs
        .into_iter()
        .take(k)
        .map(|(word, count)| TopWordRow {
            label: label.to_string(),
            word: word.to_string(),
            count,
        })
        .collect()
}

/// k most frequent words of every label, grouped by label in insertion order
pub fn top_words(registry: &CorpusRegistry, k: usize) -> Vec<TopWordRow> {
    let per_label: Vec<(&str, &WordCount)> = registry.wordcounts().collect();

    per_label
        .par_iter()
        .map(|(label, counts)| top_words_for(label, counts, k))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Read-only projection of the `wordcount` attribute
///
/// Serializes as a JSON object `{label: {word: count}}` in insertion order.
#[derive(Debug, Clone)]
pub struct FrequencyMaps<'a> {
    entries: Vec<(&'a str, &'a WordCount)>,
}

impl<'a> FrequencyMaps<'a> {
    pub fn get(&self, label: &str) -> Option<&'a WordCount> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, counts)| *counts)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a WordCount)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FrequencyMaps<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, counts) in &self.entries {
            map.serialize_entry(label, counts)?;
        }
        map.end()
    }
}

/// Project `data["wordcount"]` unchanged for rendering collaborators
pub fn frequency_maps(registry: &CorpusRegistry) -> FrequencyMaps<'_> {
    FrequencyMaps {
        entries: registry.wordcounts().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::StopwordSet;
    use crate::types::DocumentSource;
    use std::sync::Arc;

    fn words(rows: &[TopWordRow]) -> Vec<(&str, u64)> {
        rows.iter().map(|r| (r.word.as_str(), r.count)).collect()
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let counts = WordCount::from_tokens(["cat", "sat", "mat", "cat", "ran"]);
        let rows = top_words_for("A", &counts, 2);
        assert_eq!(words(&rows), vec![("cat", 2), ("sat", 1)]);
    }

    #[test]
    fn test_k_larger_than_vocabulary() {
        let counts = WordCount::from_tokens(["a", "b"]);
        assert_eq!(top_words_for("A", &counts, 10).len(), 2);
        assert!(top_words_for("A", &counts, 0).is_empty());
    }

    #[test]
    fn test_smaller_k_is_prefix() {
        let counts = WordCount::from_tokens(["x", "y", "y", "z", "w", "w", "w", "v"]);
        let full = top_words_for("A", &counts, 5);
        for k in 0..5 {
            assert_eq!(top_words_for("A", &counts, k), full[..k].to_vec());
        }
    }

    #[test]
    fn test_grouped_by_label_in_insertion_order() {
        let mut reg = CorpusRegistry::new(Arc::new(StopwordSet::empty()));
        reg.load_text(&DocumentSource::inline("z", "zz zz yy"), Some("Zed"), None)
            .unwrap();
        reg.load_text(&DocumentSource::inline("a", "aa"), Some("Ann"), None)
            .unwrap();

        let rows = top_words(&reg, 5);
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Zed", "Zed", "Ann"]);
        assert_eq!(rows[0].word, "zz");
    }

    #[test]
    fn test_frequency_maps_projection() {
        let mut reg = CorpusRegistry::default();
        reg.load_text(&DocumentSource::inline("b", "b b"), Some("B"), None)
            .unwrap();
        reg.load_text(&DocumentSource::inline("a", "a"), Some("A"), None)
            .unwrap();

        let maps = frequency_maps(&reg);
        assert_eq!(maps.len(), 2);
        assert_eq!(maps.get("B").unwrap().get("b"), Some(2));
        assert_eq!(
            serde_json::to_string(&maps).unwrap(),
            r#"{"B":{"b":2},"A":{"a":1}}"#
        );
    }
}
