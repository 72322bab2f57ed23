//! Sankey link data
//!
//! Maps every distinct label and word onto one dense integer id space, sorted
//! by string value, and emits parallel `source`/`target`/`value` arrays ready
//! for a graph renderer.

use crate::aggregator::TopWordRow;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Link table with integer node ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SankeyLinks {
    /// Node names; a node's id is its index here
    pub labels: Vec<String>,
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<u64>,
}

impl SankeyLinks {
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Build link data from top-k rows
///
/// A row whose word equals its own label would map both ends to the same id;
/// such rows are dropped so the graph has no self-loops.
pub fn sankey_links(rows: &[TopWordRow]) -> SankeyLinks {
    let kept: Vec<&TopWordRow> = rows
        .iter()
        .filter(|row| {
            let self_loop = row.label == row.word;
            if self_loop {
                warn!(label = %row.label, "Dropping self-loop link (word equals label)");
            }
            !self_loop
        })
        .collect();

    let names: BTreeSet<&str> = kept
        .iter()
        .flat_map(|row| [row.label.as_str(), row.word.as_str()])
        .collect();
    let ids: HashMap<&str, usize> = names.iter().enumerate().map(|(i, n)| (*n, i)).collect();

    let mut links = SankeyLinks {
        labels: names.iter().map(|n| n.to_string()).collect(),
        ..SankeyLinks::default()
    };
    for row in kept {
        links.source.push(ids[row.label.as_str()]);
        links.target.push(ids[row.word.as_str()]);
        links.value.push(row.count);
    }
    links
}
