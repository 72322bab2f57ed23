//! Error types for lyrica-nlp
//!
//! Parser-level failures (`ParseError`) and stopword failures
//! (`StopwordError`) live next to the code that raises them. This module holds
//! the domain-level errors surfaced by the registry and the report builders.

use crate::types::{DocumentSource, ParseError};
use thiserror::Error;

/// Failure to ingest one document into the registry
///
/// Carries the raw source identifier, the requested label (if any) and the
/// underlying parse failure. Registry state is untouched when this is returned.
#[derive(Debug, Error)]
#[error("Can't process document '{source_id}': {message}")]
pub struct IngestionError {
    /// Raw source identifier (file path or inline id)
    pub source_id: String,
    /// Label the caller asked for
    pub label: Option<String>,
    /// Human-readable failure message
    pub message: String,
    /// Underlying parser failure
    #[source]
    pub cause: ParseError,
}

impl IngestionError {
    pub fn new(source: &DocumentSource, label: Option<&str>, cause: ParseError) -> Self {
        Self {
            source_id: source.identifier(),
            label: label.map(str::to_string),
            message: cause.to_string(),
            cause,
        }
    }
}

/// Presentation data contract violations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderDataError {
    /// More labels than word-cloud panel cells
    #[error("Grid of {rows}x{cols} cannot hold {labels} panels")]
    GridTooSmall {
        rows: usize,
        cols: usize,
        labels: usize,
    },
}

/// Result type for ingestion
pub type IngestResult<T> = Result<T, IngestionError>;
