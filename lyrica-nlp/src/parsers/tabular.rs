//! Tabular (CSV) parser
//!
//! Reads a table with a header row, keeps only the designated text column and
//! drops rows whose text cell is missing or empty. Each remaining cell has every
//! character outside `[A-Za-z']` replaced by a space, is lowercased and split
//! on whitespace. All rows feed one document-level token stream, which is then
//! stopword filtered and counted.

use crate::stopwords::StopwordSet;
use crate::types::{DocumentSource, ParseError, ParseResult, Parser};
use tracing::debug;

/// Parser for row-oriented tables with a free-text column
#[derive(Debug, Clone)]
pub struct TabularParser {
    text_column: String,
}

impl Default for TabularParser {
    fn default() -> Self {
        Self::new("Lyric")
    }
}

impl TabularParser {
    pub fn new(text_column: impl Into<String>) -> Self {
        Self {
            text_column: text_column.into(),
        }
    }

    pub fn text_column(&self) -> &str {
        &self.text_column
    }

    /// Strip punctuation and digits, lowercase
    ///
    /// Every character outside `[A-Za-z']` becomes exactly one space.
    pub fn normalize(cell: &str) -> String {
        cell.chars()
            .map(|c| {
                if c.is_ascii_alphabetic() || c == '\'' {
                    c.to_ascii_lowercase()
                } else {
                    ' '
                }
            })
            .collect()
    }

    /// Normalize one cell and split it into tokens
    pub fn tokenize(cell: &str) -> Vec<String> {
        Self::normalize(cell)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl Parser for TabularParser {
    fn name(&self) -> &'static str {
        "tabular"
    }

    fn parse(
        &self,
        source: &DocumentSource,
        stopwords: &StopwordSet,
    ) -> Result<ParseResult, ParseError> {
        let text = source.read_to_string()?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let column = headers
            .iter()
            .position(|h| h == self.text_column)
            .ok_or_else(|| ParseError::MissingColumn {
                source_id: source.identifier(),
                column: self.text_column.clone(),
            })?;

        let mut tokens = Vec::new();
        let mut rows_kept = 0usize;
        let mut rows_dropped = 0usize;

        for (row_index, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(ParseError::Malformed {
                    source_id: source.identifier(),
                    message: format!(
                        "row {} has {} fields, header has {}",
                        row_index + 1,
                        record.len(),
                        headers.len()
                    ),
                });
            }

            match record.get(column) {
                Some(cell) if !cell.is_empty() => {
                    tokens.extend(Self::tokenize(cell));
                    rows_kept += 1;
                }
                _ => rows_dropped += 1,
            }
        }

        let raw_count = tokens.len();
        let cleaned = stopwords.filter(tokens);

        debug!(
            source = %source,
            column = %self.text_column,
            rows_kept,
            rows_dropped,
            raw_tokens = raw_count,
            kept_tokens = cleaned.len(),
            "Parsed tabular document"
        );

        Ok(ParseResult::from_tokens(cleaned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv_text: &str, stopwords: &StopwordSet) -> Result<ParseResult, ParseError> {
        TabularParser::default().parse(&DocumentSource::inline("table", csv_text), stopwords)
    }

    #[test]
    fn test_normalization_keeps_apostrophes() {
        assert_eq!(
            TabularParser::tokenize("Hello, World! It's great."),
            vec!["hello", "world", "it's", "great"]
        );
    }

    #[test]
    fn test_digits_and_non_ascii_become_separators() {
        assert_eq!(TabularParser::tokenize("caf\u{e9}22nights"), vec!["caf", "nights"]);
    }

    #[test]
    fn test_other_columns_are_ignored() {
        let csv_text = "Title,Lyric,Year\nIntro,\"The night, the stars\",2020\n";
        let result = parse(csv_text, &StopwordSet::from_words(["the"])).unwrap();

        assert_eq!(result.clean_text, "night stars");
        assert_eq!(result.wordcount.get("intro"), None);
        assert_eq!(result.wordcount.get("2020"), None);
    }

    #[test]
    fn test_rows_concatenate_in_order() {
        let csv_text = "Lyric\nblue sky\nblue sea\n";
        let result = parse(csv_text, &StopwordSet::empty()).unwrap();

        assert_eq!(result.clean_text, "blue sky blue sea");
        let pairs: Vec<_> = result.wordcount.iter().collect();
        assert_eq!(pairs, vec![("blue", 2), ("sky", 1), ("sea", 1)]);
    }

    #[test]
    fn test_rows_with_missing_text_are_dropped() {
        let csv_text = "Title,Lyric\nA,first line\nB,\nC\nD,last line\n";
        let result = parse(csv_text, &StopwordSet::empty()).unwrap();
        assert_eq!(result.clean_text, "first line last line");
    }

    #[test]
    fn test_lowercased_tokens_hit_lowercase_stopwords() {
        let csv_text = "Lyric\nThe Cat ON the Mat\n";
        let result = parse(csv_text, &StopwordSet::from_words(["the", "on"])).unwrap();
        assert_eq!(result.clean_text, "cat mat");
    }

    #[test]
    fn test_missing_column() {
        let err = parse("Title,Year\nA,2020\n", &StopwordSet::empty()).unwrap_err();
        match err {
            ParseError::MissingColumn { column, source_id } => {
                assert_eq!(column, "Lyric");
                assert_eq!(source_id, "table");
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_fields_are_malformed() {
        let err = parse("Lyric\nok\ntoo,many\n", &StopwordSet::empty()).unwrap_err();
        assert!(matches!(err, ParseError::Malformed { .. }));
    }

    #[test]
    fn test_custom_text_column() {
        let parser = TabularParser::new("Text");
        let source = DocumentSource::inline("t", "Text\nrain falls\n");
        let result = parser.parse(&source, &StopwordSet::empty()).unwrap();
        assert_eq!(result.clean_text, "rain falls");
    }

    #[test]
    fn test_sum_of_counts_matches_clean_text() {
        let csv_text = "Lyric\n\"Oh, oh -- oh! don't stop, don't\"\n";
        let result = parse(csv_text, &StopwordSet::from_words(["oh"])).unwrap();
        assert_eq!(
            result.wordcount.total() as usize,
            result.clean_text.split_whitespace().count()
        );
    }
}
