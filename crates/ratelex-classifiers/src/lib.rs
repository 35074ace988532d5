//! ratelex Classifiers
//!
//! Sentiment classification of lexical terms from how their occurrences
//! spread over a review corpus's rating scale.
//!
//! A term's raw per-rating counts are normalized by corpus-wide review
//! length weights, then handed to one of two strategies:
//! - Threshold: subjectivity plus one dominant-mass score and intensity per
//!   polarity half
//! - Window: a greedy decomposition of the rating axis into contiguous
//!   sentiment windows, exposing terms whose sentiment depends on context
//!
//! Classification is pure and deterministic; batches of terms are fanned out
//! across workers with no shared mutable state beyond telemetry counters.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod corpus;
pub mod gate;
pub mod histogram;
pub mod registry;
pub mod result;
pub mod threshold;
pub mod window;

pub use batch::{BatchClassifier, BatchResult, Outcome, TermInput, TermOutcome};
pub use classifier::{SentimentClassifier, Strategy};
pub use config::{EngineConfig, GatingConfig, ThresholdConfig, WindowConfig};
pub use corpus::{CorpusLengthStats, RatingWeights};
pub use gate::{ClassifiabilityGate, SkipReason};
pub use histogram::{DocumentId, RelativeFrequencies, TermHistogram};
pub use registry::ClassifierRegistry;
pub use result::{ClassificationResult, Intensity, PolarityScore, SentimentComponent};
pub use threshold::ThresholdClassifier;
pub use window::{required_coverage, SentimentWindow, WindowClassifier};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{SentimentClassifier, Strategy};
    pub use crate::corpus::{CorpusLengthStats, RatingWeights};
    pub use crate::histogram::TermHistogram;
    pub use crate::result::{ClassificationResult, Intensity, SentimentComponent};
    pub use crate::threshold::ThresholdClassifier;
    pub use crate::window::WindowClassifier;
    pub use ratelex_core::{Polarity, RatingScale, Subjectivity};
}
