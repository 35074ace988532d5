//! Subcommand implementations
//!
//! Each command writes its results as JSON lines to the given writer so the
//! binary can point it at stdout and tests at a buffer.

use crate::cli::{ClassifyArgs, WeightsArgs};
use crate::input;
use anyhow::{Context, Result};
use ratelex_classifiers::{BatchClassifier, ClassifierRegistry, EngineConfig};
use ratelex_core::Rating;
use ratelex_telemetry::MetricsSnapshot;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Load the engine configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Classify every term and write one outcome per line.
///
/// Returns the run's counters.
pub async fn classify(args: &ClassifyArgs, out: &mut impl Write) -> Result<MetricsSnapshot> {
    let config = load_config(args.config.as_deref())?;
    let corpus = input::load_corpus(&args.corpus)?;
    let registry = ClassifierRegistry::from_corpus(config, &corpus)?;

    let classifier = match args.strategy {
        Some(strategy) => registry.for_strategy(strategy)?,
        None => registry.default_classifier()?,
    };
    let inputs = input::load_terms(&args.terms, registry.config().scale)?;
    info!(
        classifier = classifier.name(),
        terms = inputs.len(),
        "Classifying terms"
    );

    let mut runner = BatchClassifier::new(classifier, registry.gate());
    if let Some(workers) = args.workers {
        runner = runner.with_workers(workers);
    }
    let result = runner.run(inputs).await?;

    for outcome in &result.outcomes {
        serde_json::to_writer(&mut *out, outcome)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(runner.metrics().snapshot())
}

/// One row of the weight table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightRow {
    pub rating: Rating,
    pub length: u64,
    pub reviews: u64,
    /// 0.0 when the corpus has no text at this rating
    pub weight: f64,
}

/// Write the corpus weight table, one rating per line
pub fn weights(args: &WeightsArgs, out: &mut impl Write) -> Result<Vec<WeightRow>> {
    let config = load_config(args.config.as_deref())?;
    let corpus = input::load_corpus(&args.corpus)?;
    let registry = ClassifierRegistry::from_corpus(config, &corpus)?;

    let rows: Vec<WeightRow> = registry
        .weights()
        .iter()
        .map(|(rating, weight)| WeightRow {
            rating,
            length: corpus.total_length(rating),
            reviews: corpus.review_count(rating),
            weight,
        })
        .collect();

    for row in &rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(rows)
}
