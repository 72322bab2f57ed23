//! Data contracts for rendering collaborators
//!
//! Drawing happens elsewhere. This module shapes registry views into the
//! structures a renderer consumes:
//! - **sankey** - label → word link data with dense integer node ids
//! - **word_cloud** - per-label frequency panels on a subplot grid
//! - **sentiment_chart** - `(label, polarity, color)` bars
//!
//! `AnalysisReport` bundles all three for JSON export.

pub mod sankey;
pub mod sentiment_chart;
pub mod word_cloud;

pub use sankey::{sankey_links, SankeyLinks};
pub use sentiment_chart::{bucket_color, sentiment_chart, SentimentBar};
pub use word_cloud::{word_cloud_panels, WordCloudPanel};

use crate::aggregator::{frequency_maps, sentiment, top_words, PolarityScorer, TopWordRow};
use crate::error::RenderDataError;
use crate::registry::CorpusRegistry;
use serde::Serialize;

/// Everything a renderer needs for one corpus
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    pub top_words: Vec<TopWordRow>,
    pub sankey: SankeyLinks,
    pub word_clouds: Vec<WordCloudPanel<'a>>,
    pub sentiment: Vec<SentimentBar>,
}

/// Report layout options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_k: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            grid_rows: 3,
            grid_cols: 3,
        }
    }
}

impl<'a> AnalysisReport<'a> {
    /// Compute every view over a populated registry
    pub fn build(
        registry: &'a CorpusRegistry,
        scorer: &dyn PolarityScorer,
        options: ReportOptions,
    ) -> Result<Self, RenderDataError> {
        let top_words = top_words(registry, options.top_k);
        let sankey = sankey_links(&top_words);
        let word_clouds = word_cloud_panels(
            &frequency_maps(registry),
            options.grid_rows,
            options.grid_cols,
        )?;
        let sentiment = sentiment_chart(&sentiment(registry, scorer));

        Ok(Self {
            top_words,
            sankey,
            word_clouds,
            sentiment,
        })
    }
}
