//! Sentiment bucketing
//!
//! Polarity comes from an external scorer treated as an opaque collaborator
//! returning a value in `[-1, 1]`. Bucketing is exact: `> 0` positive, `< 0`
//! negative, anything else neutral. No smoothing and no rounding happens here.

use crate::registry::CorpusRegistry;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Polarity scoring collaborator
///
/// Implemented for any `Fn(&str) -> f64`, so a closure can be passed directly.
pub trait PolarityScorer: Send + Sync {
    /// Polarity of `text` in `[-1, 1]`
    fn polarity(&self, text: &str) -> f64;
}

impl<F> PolarityScorer for F
where
    F: Fn(&str) -> f64 + Send + Sync,
{
    fn polarity(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Sign class of a polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBucket {
    /// Exactly one bucket per value; `0.0` and `-0.0` are neutral
    ///
    /// NaN is not ordered against zero and lands in `Neutral`.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else if polarity < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for SentimentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Polarity of one label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRecord {
    pub label: String,
    pub polarity: f64,
    pub bucket: SentimentBucket,
}

/// Score every label's `clean_text`, in label insertion order
pub fn sentiment(registry: &CorpusRegistry, scorer: &dyn PolarityScorer) -> Vec<SentimentRecord> {
    let texts: Vec<(&str, &str)> = registry.clean_texts().collect();

    texts
        .par_iter()
        .map(|(label, text)| {
            let polarity = scorer.polarity(text);
            if polarity.is_nan() {
                warn!(label = %label, "Scorer returned NaN polarity, bucketing as neutral");
            }
            SentimentRecord {
                label: label.to_string(),
                polarity,
                bucket: SentimentBucket::from_polarity(polarity),
            }
        })
        .collect()
}
