//! Lexicon polarity scorer
//!
//! Default `PolarityScorer` for the CLI. Each word with a lexicon entry
//! contributes its polarity; an intensifier directly before it scales the
//! value, a negator directly before it flips and halves it. The score is the
//! mean contribution, clamped to `[-1, 1]`. Text with no lexicon words scores
//! exactly `0.0`.

use crate::aggregator::PolarityScorer;
use std::collections::HashMap;

const NEGATION_FACTOR: f64 = -0.5;

/// Word-level polarity lexicon
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    polarity: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negators: Vec<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Scorer with the built-in English lexicon
    pub fn new() -> Self {
        Self {
            polarity: Self::build_polarity_lexicon(),
            intensifiers: Self::build_intensifiers(),
            negators: ["not", "no", "never", "don't", "can't", "won't", "ain't", "isn't"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }

    /// Add or replace one entry (clamped to `[-1, 1]`)
    pub fn with_entry(mut self, word: &str, polarity: f64) -> Self {
        self.polarity
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        self
    }

    /// Score `text`
    pub fn score(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !(c.is_alphabetic() || c == '\''))
            .filter(|w| !w.is_empty())
            .collect();

        let mut total = 0.0;
        let mut hits = 0usize;

        for (i, word) in words.iter().enumerate() {
            let Some(&base) = self.polarity.get(*word) else {
                continue;
            };

            let mut value = base;
            if i > 0 {
                let prev = words[i - 1];
                if let Some(&factor) = self.intensifiers.get(prev) {
                    value *= factor;
                } else if self.negators.iter().any(|n| n == prev) {
                    value *= NEGATION_FACTOR;
                }
            }

            total += value.clamp(-1.0, 1.0);
            hits += 1;
        }

        if hits == 0 {
            return 0.0;
        }
        (total / hits as f64).clamp(-1.0, 1.0)
    }

    fn build_polarity_lexicon() -> HashMap<String, f64> {
        [
            // Positive
            ("love", 0.5), ("loved", 0.7), ("lovely", 0.5), ("happy", 0.8),
            ("good", 0.7), ("great", 0.8), ("best", 1.0), ("better", 0.5),
            ("beautiful", 0.85), ("sweet", 0.35), ("perfect", 1.0), ("free", 0.4),
            ("fun", 0.3), ("smile", 0.3), ("shine", 0.2), ("bright", 0.7),
            ("wonderful", 1.0), ("amazing", 0.6), ("alive", 0.1), ("dream", 0.2),
            ("forever", 0.1), ("kiss", 0.3), ("heaven", 0.5), ("gold", 0.3),
            ("nice", 0.6), ("fine", 0.4), ("glad", 0.5), ("hope", 0.3),
            ("safe", 0.5), ("warm", 0.6), ("right", 0.3), ("true", 0.35),
            // Negative
            ("bad", -0.7), ("sad", -0.5), ("hate", -0.8), ("cry", -0.4),
            ("crying", -0.4), ("tears", -0.3), ("lonely", -0.5), ("alone", -0.2),
            ("broken", -0.4), ("wrong", -0.5), ("hurt", -0.5), ("pain", -0.6),
            ("die", -0.6), ("dead", -0.2), ("dark", -0.15), ("cold", -0.6),
            ("lost", -0.3), ("fear", -0.4), ("afraid", -0.6), ("lies", -0.4),
            ("crazy", -0.6), ("mad", -0.6), ("sick", -0.7), ("worst", -1.0),
            ("worse", -0.4), ("goodbye", -0.2), ("evil", -1.0), ("cruel", -1.0),
            ("sorry", -0.5), ("empty", -0.1), ("war", -0.4), ("kill", -0.5),
        ]
        .into_iter()
        .map(|(w, p)| (w.to_string(), p))
        .collect()
    }

    fn build_intensifiers() -> HashMap<String, f64> {
        [
            ("very", 1.3),
            ("really", 1.3),
            ("so", 1.3),
            ("too", 1.2),
            ("extremely", 1.5),
            ("little", 0.5),
        ]
        .into_iter()
        .map(|(w, f)| (w.to_string(), f))
        .collect()
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        self.score(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lexicon_words_is_exactly_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("table chair window"), 0.0);
        assert_eq!(scorer.score(""), 0.0);
    }

    #[test]
    fn test_sign_follows_vocabulary() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("happy beautiful day") > 0.0);
        assert!(scorer.score("sad lonely night") < 0.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        let scorer = LexiconScorer::new();
        let plain = scorer.score("good");
        let negated = scorer.score("not good");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
        assert!((negated - plain * NEGATION_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("very good") > scorer.score("good"));
        assert_eq!(scorer.score("extremely perfect"), 1.0);
    }

    #[test]
    fn test_range_is_bounded() {
        let scorer = LexiconScorer::new().with_entry("doom", -5.0);
        let score = scorer.score("doom doom doom");
        assert_eq!(score, -1.0);
    }

    #[test]
    fn test_usable_as_polarity_scorer() {
        let scorer: &dyn PolarityScorer = &LexiconScorer::new();
        assert!(scorer.polarity("great") > 0.0);
    }
}
