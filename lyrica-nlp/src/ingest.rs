//! Parallel document ingestion
//!
//! Parsing is embarrassingly parallel: each document depends only on its own
//! source and the shared, read-only stopword set. Every job is parsed on the
//! blocking pool concurrently; the results are then merged into the registry by
//! a single writer in job-submission order, so label order is deterministic
//! regardless of which parse finishes first.
//!
//! # Failure policies
//! - **FailFast** - merge in order until the first failure and return it.
//!   Documents before the failure stay registered, nothing after it is merged.
//! - **CollectAndContinue** - merge every success and report the failures.

use crate::error::{IngestResult, IngestionError};
use crate::parsers::PlainTextParser;
use crate::registry::CorpusRegistry;
use crate::stopwords::StopwordSet;
use crate::types::{DocumentSource, ParseError, ParseResult, Parser};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// One document to ingest
#[derive(Clone)]
pub struct IngestJob {
    pub source: DocumentSource,
    pub label: Option<String>,
    pub parser: Arc<dyn Parser>,
}

impl IngestJob {
    pub fn new(source: DocumentSource, parser: Arc<dyn Parser>) -> Self {
        Self {
            source,
            label: None,
            parser,
        }
    }

    /// Job using the default plain-text parser
    pub fn plain_text(source: DocumentSource) -> Self {
        Self::new(source, Arc::new(PlainTextParser))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label the document will be stored under
    pub fn resolved_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.source.identifier())
    }
}

impl std::fmt::Debug for IngestJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestJob")
            .field("source", &self.source)
            .field("label", &self.label)
            .field("parser", &self.parser.name())
            .finish()
    }
}

/// What to do when a document fails to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    FailFast,
    CollectAndContinue,
}

/// Outcome of a batch ingestion
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Labels merged into the registry, in merge order
    pub loaded: Vec<String>,
    /// Documents that failed (always empty under `FailFast`)
    pub failures: Vec<IngestionError>,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Concurrent parser executor with a single-writer merge step
#[derive(Debug, Clone, Default)]
pub struct ParallelIngestor {
    policy: FailurePolicy,
    deadline: Option<Duration>,
}

impl ParallelIngestor {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            deadline: None,
        }
    }

    /// Abort any single parse that runs longer than `deadline`
    ///
    /// A timed-out parse is reported as `ParseError::DeadlineExceeded`; the
    /// blocking thread finishes in the background and its result is discarded.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Parse every job concurrently
    ///
    /// Results are returned in job order.
    pub async fn parse_all(
        &self,
        jobs: &[IngestJob],
        stopwords: Arc<StopwordSet>,
    ) -> Vec<Result<ParseResult, ParseError>> {
        let deadline = self.deadline;
        let futures = jobs.iter().map(|job| {
            let parser = Arc::clone(&job.parser);
            let source = job.source.clone();
            let stopwords = Arc::clone(&stopwords);
            async move {
                let source_id = source.identifier();
                let handle =
                    tokio::task::spawn_blocking(move || parser.parse(&source, &stopwords));

                let joined = match deadline {
                    Some(limit) => match tokio::time::timeout(limit, handle).await {
                        Ok(joined) => joined,
                        Err(_) => {
                            return Err(ParseError::DeadlineExceeded {
                                deadline_ms: u64::try_from(limit.as_millis())
                                    .unwrap_or(u64::MAX),
                            })
                        }
                    },
                    None => handle.await,
                };

                joined.unwrap_or_else(|e| {
                    let message = if e.is_panic() {
                        format!("parser panicked: {}", e)
                    } else {
                        format!("parser task cancelled: {}", e)
                    };
                    Err(ParseError::ParserTaskFailed { source_id, message })
                })
            }
        });

        join_all(futures).await
    }

    /// Parse all jobs in parallel and merge them into `registry`
    ///
    /// # Errors
    /// Under `FailFast`, the first failing job in submission order.
    pub async fn ingest(
        &self,
        registry: &mut CorpusRegistry,
        jobs: Vec<IngestJob>,
    ) -> IngestResult<IngestReport> {
        let stopwords = Arc::clone(registry.stopwords());
        debug!(jobs = jobs.len(), policy = ?self.policy, "Starting batch ingestion");

        let results = self.parse_all(&jobs, stopwords).await;

        let mut report = IngestReport::default();
        for (job, result) in jobs.iter().zip(results) {
            match result {
                Ok(parsed) => {
                    let label = job.resolved_label();
                    registry.save_results(&label, parsed);
                    report.loaded.push(label);
                }
                Err(e) => {
                    let err = IngestionError::new(&job.source, job.label.as_deref(), e);
                    warn!(
                        source = %err.source_id,
                        parser = job.parser.name(),
                        error = %err.message,
                        "Ingestion failed"
                    );
                    match self.policy {
                        FailurePolicy::FailFast => return Err(err),
                        FailurePolicy::CollectAndContinue => report.failures.push(err),
                    }
                }
            }
        }

        info!(
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            "Batch ingestion complete"
        );
        Ok(report)
    }
}

// ============================================================================
// Tests
// ============================================================================
