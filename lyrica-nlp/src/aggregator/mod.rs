//! Derived views over the corpus registry
//!
//! All views are read-only, recomputed on demand and never stored back into
//! the registry:
//! - **top_words** - k most frequent words per label (link data)
//! - **frequency_maps** - projection of the `wordcount` attribute
//! - **sentiment** - polarity and bucket per label
//!
//! Per-label work runs in parallel with rayon and is collected in label
//! insertion order.

pub mod sentiment;
pub mod top_words;

pub use sentiment::{sentiment, PolarityScorer, SentimentBucket, SentimentRecord};
pub use top_words::{frequency_maps, top_words, top_words_for, FrequencyMaps, TopWordRow};
