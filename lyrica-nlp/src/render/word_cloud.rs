//! Word-cloud panel data
//!
//! One panel per label, laid out row-major on a fixed subplot grid.

use crate::aggregator::FrequencyMaps;
use crate::error::RenderDataError;
use crate::types::WordCount;
use serde::Serialize;

/// Frequencies and grid cell for one label
#[derive(Debug, Clone, Serialize)]
pub struct WordCloudPanel<'a> {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub label: &'a str,
    pub frequencies: &'a WordCount,
}

/// Assign every label a cell of a `rows` x `cols` grid
pub fn word_cloud_panels<'a>(
    maps: &FrequencyMaps<'a>,
    rows: usize,
    cols: usize,
) -> Result<Vec<WordCloudPanel<'a>>, RenderDataError> {
    if maps.len() > rows * cols {
        return Err(RenderDataError::GridTooSmall {
            rows,
            cols,
            labels: maps.len(),
        });
    }

    Ok(maps
        .iter()
        .enumerate()
        .map(|(index, (label, frequencies))| WordCloudPanel {
            index,
            row: index / cols,
            col: index % cols,
            label,
            frequencies,
        })
        .collect())
}
