//! JSON input files: corpus length totals and term histograms

use anyhow::{Context, Result};
use ratelex_classifiers::{CorpusLengthStats, DocumentId, TermHistogram, TermInput};
use ratelex_core::{Rating, RatingScale};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Per-rating review totals of a corpus
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusFile {
    #[serde(default)]
    pub scale: RatingScale,

    /// Keyed by rating; ratings without reviews may be left out
    pub ratings: BTreeMap<Rating, RatingTotals>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RatingTotals {
    /// Summed length of all reviews at this rating
    pub length: u64,
    pub reviews: u64,
}

impl CorpusFile {
    pub fn into_stats(self) -> ratelex_core::Result<CorpusLengthStats> {
        CorpusLengthStats::from_totals(
            self.scale,
            self.ratings
                .into_iter()
                .map(|(rating, totals)| (rating, totals.length, totals.reviews)),
        )
    }
}

/// One term's observations
#[derive(Debug, Clone, Deserialize)]
pub struct TermRecord {
    pub term: String,
    pub counts: BTreeMap<Rating, u64>,
    /// Distinct documents the term occurs in
    #[serde(default)]
    pub documents: Vec<DocumentId>,
}

impl TermRecord {
    pub fn into_input(self, scale: RatingScale) -> ratelex_core::Result<TermInput> {
        let mut histogram = TermHistogram::from_counts(scale, self.counts)?;
        for document in self.documents {
            histogram.record_document(document);
        }
        Ok(TermInput::new(self.term, histogram))
    }
}

pub fn load_corpus(path: &Path) -> Result<CorpusLengthStats> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading corpus file {}", path.display()))?;
    let file: CorpusFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing corpus file {}", path.display()))?;
    let stats = file.into_stats()?;
    debug!(
        scale = stats.scale().size(),
        reviews = stats.grand_total_reviews(),
        "loaded corpus totals"
    );
    Ok(stats)
}

pub fn load_terms(path: &Path, scale: RatingScale) -> Result<Vec<TermInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading terms file {}", path.display()))?;
    let records: Vec<TermRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing terms file {}", path.display()))?;

    let inputs = records
        .into_iter()
        .map(|record| {
            let term = record.term.clone();
            record
                .into_input(scale)
                .with_context(|| format!("term '{term}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(terms = inputs.len(), "loaded term histograms");
    Ok(inputs)
}
