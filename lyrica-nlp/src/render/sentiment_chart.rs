//! Sentiment bar chart rows
//!
//! Colors and rounding are presentation details layered on top of the
//! bucketed records; the records themselves stay unrounded.

use crate::aggregator::{SentimentBucket, SentimentRecord};
use serde::Serialize;

/// One bar of the comparative sentiment chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentBar {
    pub label: String,
    pub polarity: f64,
    /// Polarity rounded to 2 decimals for bar annotations
    pub rounded_polarity: f64,
    pub color: &'static str,
}

/// Bar color for a bucket
pub fn bucket_color(bucket: SentimentBucket) -> &'static str {
    match bucket {
        SentimentBucket::Positive => "limegreen",
        SentimentBucket::Negative => "tab:red",
        SentimentBucket::Neutral => "blue",
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One bar per record, in record order
pub fn sentiment_chart(records: &[SentimentRecord]) -> Vec<SentimentBar> {
    records
        .iter()
        .map(|r| SentimentBar {
            label: r.label.clone(),
            polarity: r.polarity,
            rounded_polarity: round2(r.polarity),
            color: bucket_color(r.bucket),
        })
        .collect()
}
