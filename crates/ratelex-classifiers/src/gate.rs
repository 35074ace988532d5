//! Minimum-evidence check performed before a term is classified

use crate::config::GatingConfig;
use crate::histogram::TermHistogram;
use serde::Serialize;
use std::fmt;

/// Why a term was not classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer observations than the corpus-wide minimum
    TooFewObservations { observed: u64, required: u64 },
    /// Seen in too few distinct documents to generalise from
    TooFewDocuments { observed: usize, required: usize },
}

impl SkipReason {
    /// Short label for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooFewObservations { .. } => "too_few_observations",
            Self::TooFewDocuments { .. } => "too_few_documents",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewObservations { observed, required } => {
                write!(f, "{observed} observations, {required} required")
            }
            Self::TooFewDocuments { observed, required } => {
                write!(f, "{observed} documents, {required} required")
            }
        }
    }
}

/// A term is classifiable only with at least `min_observations`
/// observations spread over at least `min_documents` distinct documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiabilityGate {
    config: GatingConfig,
}

impl ClassifiabilityGate {
    pub fn new(config: GatingConfig) -> Self {
        Self { config }
    }

    /// Gate that lets every term through
    pub fn open() -> Self {
        Self::new(GatingConfig {
            min_observations: 0,
            min_documents: 0,
        })
    }

    pub fn check(&self, histogram: &TermHistogram) -> Result<(), SkipReason> {
        let observed = histogram.total_observations();
        if observed < self.config.min_observations {
            return Err(SkipReason::TooFewObservations {
                observed,
                required: self.config.min_observations,
            });
        }

        let documents = histogram.distinct_documents();
        if documents < self.config.min_documents {
            return Err(SkipReason::TooFewDocuments {
                observed: documents,
                required: self.config.min_documents,
            });
        }

        Ok(())
    }
}

impl Default for ClassifiabilityGate {
    fn default() -> Self {
        Self::new(GatingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratelex_core::RatingScale;

    fn histogram(observations: &[(u32, u64)]) -> TermHistogram {
        let mut histogram = TermHistogram::new(RatingScale::default());
        for &(rating, document) in observations {
            histogram.observe(rating, document).unwrap();
        }
        histogram
    }

    #[test]
    fn test_too_few_observations() {
        let gate = ClassifiabilityGate::default();
        let result = gate.check(&histogram(&[(9, 1), (9, 2)]));
        assert_eq!(
            result,
            Err(SkipReason::TooFewObservations {
                observed: 2,
                required: 5
            })
        );
    }

    #[test]
    fn test_single_document() {
        let gate = ClassifiabilityGate::default();
        let result = gate.check(&histogram(&[(9, 7), (9, 7), (10, 7), (8, 7), (9, 7)]));
        assert_eq!(
            result,
            Err(SkipReason::TooFewDocuments {
                observed: 1,
                required: 2
            })
        );
        assert_eq!(result.unwrap_err().as_str(), "too_few_documents");
    }

    #[test]
    fn test_classifiable() {
        let gate = ClassifiabilityGate::default();
        assert!(gate
            .check(&histogram(&[(9, 1), (9, 2), (10, 3), (8, 1), (9, 4)]))
            .is_ok());
    }

    #[test]
    fn test_open_gate() {
        let gate = ClassifiabilityGate::open();
        assert!(gate.check(&TermHistogram::new(RatingScale::default())).is_ok());
    }
}
