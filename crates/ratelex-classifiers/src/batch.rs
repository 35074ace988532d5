//! Batch classification of many terms
//!
//! Each term is classified independently, so a batch is split into one
//! contiguous chunk per worker and every chunk runs on the blocking pool.
//! Workers share nothing but the classifier (and through it the read-only
//! corpus weights) and the lock-free metrics counters. Outcomes come back in
//! input order.

use crate::gate::{ClassifiabilityGate, SkipReason};
use crate::histogram::TermHistogram;
use crate::result::ClassificationResult;
use crate::SentimentClassifier;
use futures::future::join_all;
use ratelex_core::{Error, Result};
use ratelex_telemetry::metrics::{
    CLASSIFICATION_LATENCY, TERMS_CLASSIFIED, TERMS_SKIPPED, WINDOWS_EMITTED,
};
use ratelex_telemetry::MetricsCollector;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// One term awaiting classification
#[derive(Debug, Clone)]
pub struct TermInput {
    pub term: String,
    pub histogram: TermHistogram,
}

impl TermInput {
    pub fn new(term: impl Into<String>, histogram: TermHistogram) -> Self {
        Self {
            term: term.into(),
            histogram,
        }
    }
}

/// What happened to one term
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Classified { result: ClassificationResult },
    Skipped { reason: SkipReason },
}

/// Outcome for a named term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermOutcome {
    pub term: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl TermOutcome {
    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.outcome {
            Outcome::Classified { result } => Some(result),
            Outcome::Skipped { .. } => None,
        }
    }
}

/// Complete batch result
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Outcomes in input order
    pub outcomes: Vec<TermOutcome>,

    /// Total batch execution time
    pub total_latency_us: u64,
}

impl BatchResult {
    pub fn classified(&self) -> impl Iterator<Item = (&str, &ClassificationResult)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result().map(|r| (o.term.as_str(), r)))
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result().is_none()).count()
    }
}

/// Runs one classifier over many terms in parallel
#[derive(Clone)]
pub struct BatchClassifier {
    classifier: Arc<dyn SentimentClassifier>,
    gate: ClassifiabilityGate,
    metrics: MetricsCollector,
    workers: usize,
}

impl BatchClassifier {
    /// Create a batch runner with one worker per CPU
    pub fn new(classifier: Arc<dyn SentimentClassifier>, gate: ClassifiabilityGate) -> Self {
        Self {
            classifier,
            gate,
            metrics: MetricsCollector::new(),
            workers: num_cpus::get().max(1),
        }
    }

    /// Override the worker count (at least 1)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Report into an existing collector
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Gate and classify a single term on the current thread
    pub fn classify_one(&self, input: &TermInput) -> Result<Outcome> {
        classify_term(self.classifier.as_ref(), &self.gate, &self.metrics, input)
    }

    /// Classify every term, gating each first
    pub async fn run(&self, inputs: Vec<TermInput>) -> Result<BatchResult> {
        let start = Instant::now();
        let total = inputs.len();
        let chunk_size = total.div_ceil(self.workers).max(1);

        info!(
            classifier = self.classifier.name(),
            terms = total,
            workers = self.workers,
            "starting batch classification"
        );

        let mut chunks = Vec::new();
        let mut remaining = inputs;
        while !remaining.is_empty() {
            let rest = remaining.split_off(chunk_size.min(remaining.len()));
            chunks.push(remaining);
            remaining = rest;
        }

        let tasks: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                let classifier = Arc::clone(&self.classifier);
                let gate = self.gate;
                let metrics = self.metrics.clone();

                tokio::task::spawn_blocking(move || {
                    chunk
                        .into_iter()
                        .map(|input| {
                            let outcome =
                                classify_term(classifier.as_ref(), &gate, &metrics, &input)?;
                            Ok(TermOutcome {
                                term: input.term,
                                outcome,
                            })
                        })
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(total);
        for joined in join_all(tasks).await {
            let chunk = joined.map_err(|e| Error::internal(format!("worker failed: {e}")))?;
            outcomes.extend(chunk?);
        }

        let result = BatchResult {
            outcomes,
            total_latency_us: start.elapsed().as_micros() as u64,
        };
        info!(
            terms = total,
            skipped = result.skipped_count(),
            latency_us = result.total_latency_us,
            "batch classification finished"
        );
        Ok(result)
    }
}

fn classify_term(
    classifier: &dyn SentimentClassifier,
    gate: &ClassifiabilityGate,
    metrics: &MetricsCollector,
    input: &TermInput,
) -> Result<Outcome> {
    if let Err(reason) = gate.check(&input.histogram) {
        debug!(term = %input.term, %reason, "term not classifiable");
        metrics.record_skipped();
        ::metrics::counter!(TERMS_SKIPPED, "reason" => reason.as_str()).increment(1);
        return Ok(Outcome::Skipped { reason });
    }

    let start = Instant::now();
    let result = classifier.classify(&input.histogram)?;
    let latency_us = start.elapsed().as_micros() as u64;

    let windows = result.components().len() as u64;
    metrics.record_classified(result.is_subjective(), result.is_degenerate(), windows);
    metrics.record_latency(latency_us);
    ::metrics::counter!(
        TERMS_CLASSIFIED,
        "strategy" => classifier.strategy().as_str(),
        "subjectivity" => result.subjectivity().as_str()
    )
    .increment(1);
    ::metrics::counter!(WINDOWS_EMITTED).increment(windows);
    ::metrics::histogram!(CLASSIFICATION_LATENCY).record(latency_us as f64);

    Ok(Outcome::Classified { result })
}
