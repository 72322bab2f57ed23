//! Plain-text parser
//!
//! Reads the whole document, turns line breaks (`\n`, `\r\n` or a lone `\r`)
//! into spaces and splits on single spaces. Consecutive delimiters yield empty
//! tokens; those are kept (the empty string is never a stopword) and therefore
//! show up in both `clean_text` and `wordcount`.

use crate::stopwords::StopwordSet;
use crate::types::{DocumentSource, ParseError, ParseResult, Parser};
use tracing::debug;

/// Default parser used when the caller does not choose one
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    /// Split raw text into tokens; only line breaks are normalized
    pub fn tokenize(text: &str) -> Vec<String> {
        text.replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace('\n', " ")
            .split(' ')
            .map(str::to_string)
            .collect()
    }
}

impl Parser for PlainTextParser {
    fn name(&self) -> &'static str {
        "plain_text"
    }

    fn parse(
        &self,
        source: &DocumentSource,
        stopwords: &StopwordSet,
    ) -> Result<ParseResult, ParseError> {
        let text = source.read_to_string()?;
        let tokens = Self::tokenize(&text);
        let raw_count = tokens.len();
        let cleaned = stopwords.filter(tokens);

        debug!(
            source = %source,
            raw_tokens = raw_count,
            kept_tokens = cleaned.len(),
            "Parsed plain-text document"
        );

        Ok(ParseResult::from_tokens(cleaned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn stopwords() -> StopwordSet {
        StopwordSet::from_words(["the", "on"])
    }

    #[test]
    fn test_counts_and_clean_text() {
        let source = DocumentSource::inline("doc", "the cat sat on the mat the cat ran");
        let result = PlainTextParser.parse(&source, &stopwords()).unwrap();

        let pairs: Vec<_> = result.wordcount.iter().collect();
        assert_eq!(pairs, vec![("cat", 2), ("sat", 1), ("mat", 1), ("ran", 1)]);
        assert_eq!(result.clean_text, "cat sat mat cat ran");
    }

    #[test]
    fn test_no_case_folding() {
        let source = DocumentSource::inline("doc", "The cat on the mat");
        let result = PlainTextParser.parse(&source, &stopwords()).unwrap();

        assert_eq!(result.clean_text, "The cat mat");
        assert_eq!(result.wordcount.get("The"), Some(1));
    }

    #[test]
    fn test_newlines_become_spaces() {
        let source = DocumentSource::inline("doc", "cat\nmat");
        let result = PlainTextParser.parse(&source, &stopwords()).unwrap();
        assert_eq!(result.clean_text, "cat mat");
    }

    #[test]
    fn test_crlf_line_endings_become_spaces() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"the cat\r\nsat on the\r\nmat").unwrap();

        let result = PlainTextParser
            .parse(&DocumentSource::file(file.path()), &stopwords())
            .unwrap();

        assert_eq!(result.clean_text, "cat sat mat");
        assert_eq!(result.wordcount.get("the"), None);
    }

    #[test]
    fn test_lone_carriage_return_is_a_line_break() {
        assert_eq!(PlainTextParser::tokenize("cat\rmat"), vec!["cat", "mat"]);
    }

    #[test]
    fn test_empty_tokens_are_kept() {
        let source = DocumentSource::inline("doc", "cat  mat\n");
        let result = PlainTextParser.parse(&source, &stopwords()).unwrap();

        // "cat", "", "mat", "" after the trailing newline
        assert_eq!(result.wordcount.get(""), Some(2));
        assert_eq!(result.wordcount.total(), 4);
        assert_eq!(result.clean_text.split(' ').count(), 4);
    }

    #[test]
    fn test_reads_file_source() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "the cat sat").unwrap();

        let source = DocumentSource::file(file.path());
        let result = PlainTextParser.parse(&source, &stopwords()).unwrap();
        assert_eq!(result.clean_text, "cat sat");
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0x6f, 0xff, 0xfe]).unwrap();

        let result = PlainTextParser.parse(&DocumentSource::file(file.path()), &stopwords());
        assert!(matches!(result, Err(ParseError::Encoding { .. })));
    }
}
